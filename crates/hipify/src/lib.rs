//! # hipify
//!
//! Source-to-source translation of CUDA programs to HIP.
//!
//! ## Core Principles
//!
//! - **Front end agnostic**: Anything implementing [`MatchSource`] can feed the rules
//! - **Original coordinates**: Every edit addresses the untouched source buffer
//! - **First writer wins**: Colliding edits are resolved deterministically
//! - **Never abort a batch**: Parse failures and skipped edits are data, not errors
//!
//! ## Architecture
//!
//! ```text
//! Staging (foo.cu -> foo.hip.cu)
//!     ↓
//! Front end (MatchSource, host view then device view)
//!     ↓
//! Rules (symbol table, launch rewriting, literals, directives)
//!     ↓
//! Replacement sets (one per file)
//!     ↓
//! Apply + restore
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use hipify::{apply_plan, stage, SymbolTable, Translator};
//! use hipify_api::TranslatorConfig;
//! use std::path::Path;
//!
//! let config = TranslatorConfig::default();
//! let symbols = SymbolTable::cuda_to_hip().with_overrides(&config.extra_symbols);
//! let frontend = my_frontend();
//!
//! let staged = stage(Path::new("vecAdd.cu"), &config)?.expect("a .cu file");
//! let files = vec![staged.load()?];
//!
//! let mut plan = Translator::new(&frontend, &symbols, &config).translate(&files);
//! apply_plan(&mut plan, &files);
//! staged.restore()?;
//! ```

#![deny(unsafe_code)]

pub mod orchestrator;
pub mod preprocessor;
pub mod replacements;
pub mod report;
pub mod rewrite;
pub mod rules;
pub mod staging;
pub mod symbols;

// Re-export main types
pub use hipify_api::{MatchSource, TranslatorConfig};
pub use orchestrator::{PassReport, PassSummary, TranslationPlan, Translator};
pub use replacements::{Conflict, ConflictReason, Proposal, ReplacementSet};
pub use report::export_json;
pub use rewrite::{apply_edits, apply_plan, ApplyFailure, ApplyOutcome, FileOutcome, SkipReason};
pub use rules::{render_launch, rewrite_markers, RuleEngine};
pub use staging::{scratch_path, stage, StagedFile};
pub use symbols::SymbolTable;
