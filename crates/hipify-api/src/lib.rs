//! hipify API
//!
//! Shared contract types for the hipify CUDA-to-HIP source translator.
//!
//! This crate sits between the front ends that understand CUDA source and the
//! rule engine that turns recognized constructs into text edits. It defines:
//!
//! - **MatchSource trait**: The interface every front end implements
//! - **Match results**: One variant per recognized construct shape
//! - **Edits**: Span-addressed replacements against the original buffer
//! - **Configuration**: Launch syntax, markers, conflict policy
//! - **Metrics**: Counters collected over a translation run
//! - **Error handling**: Error types shared by all crates
//!
//! # Example
//!
//! ```rust,ignore
//! use hipify_api::{CompilationView, MatchSource, ScanOutcome, SourceFile, HipifyResult};
//!
//! struct NoMatches;
//!
//! impl MatchSource for NoMatches {
//!     fn name(&self) -> &str {
//!         "none"
//!     }
//!
//!     fn scan(&self, _file: &SourceFile, _view: CompilationView) -> HipifyResult<ScanOutcome> {
//!         Ok(ScanOutcome::default())
//!     }
//! }
//! ```

pub mod config;
pub mod edit;
pub mod errors;
pub mod matches;
pub mod metrics;
pub mod span;
pub mod traits;

// Re-export commonly used types
pub use config::{ConflictPolicy, LaunchSyntax, MarkerRewrite, TranslatorConfig};
pub use edit::{Edit, EditOrigin};
pub use errors::{HipifyError, HipifyResult};
pub use matches::{Captured, ConfigArg, MatchResult, TypeRefKind};
pub use metrics::TranslationMetrics;
pub use span::{SourceLoc, Span};
pub use traits::{CompilationView, Diagnostic, MatchSource, ScanOutcome, SourceFile};
