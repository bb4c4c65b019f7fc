//! # hipify-cuda
//!
//! CUDA front end for hipify: parses CUDA C++ with tree-sitter and reports
//! the constructs the rewrite rules act on.
//!
//! ## Pipeline
//!
//! 1. **Lexing** - a small tokenizer finds CUDA-only syntax
//! 2. **Neutralization** - execution-space qualifiers and `<<<...>>>` are
//!    blanked with spaces, keeping every byte offset
//! 3. **Parsing** - tree-sitter-cpp parses the neutralized text
//! 4. **Scanning** - directives first, then a view-aware tree walk
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hipify::{SymbolTable, Translator, TranslatorConfig};
//! use hipify_api::SourceFile;
//! use hipify_cuda::CudaFrontend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TranslatorConfig::default();
//! let frontend = CudaFrontend::with_config(config.clone());
//! let symbols = SymbolTable::cuda_to_hip().with_overrides(&config.extra_symbols);
//!
//! let file = SourceFile::new("vec_add.hip.cu", std::fs::read_to_string("vec_add.hip.cu")?);
//! let plan = Translator::new(&frontend, &symbols, &config).translate(&[file]);
//! println!("{} edits planned", plan.edit_count());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extractor;
mod frontend;
pub mod lexer;
pub mod neutralizer;
pub mod preprocessor;
pub mod visitor;

pub use error::FrontendError;
pub use frontend::CudaFrontend;
pub use neutralizer::{neutralize, NeutralizedSource, Qualifier};
pub use visitor::{ExecSpace, LAUNCH_CONFIG_TYPES};
