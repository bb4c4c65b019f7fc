use crate::{errors::HipifyResult, matches::MatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which half of a CUDA translation unit a front end exposes
///
/// The same source compiles twice: once for the host and once for the
/// device. Kernel bodies are only meaningful in the device view, host
/// launch sites only in the host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilationView {
    HostOnly,
    DeviceOnly,
}

impl CompilationView {
    /// Order in which passes run and their edits are folded
    pub const PASS_ORDER: [CompilationView; 2] =
        [CompilationView::HostOnly, CompilationView::DeviceOnly];
}

impl fmt::Display for CompilationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilationView::HostOnly => f.write_str("host-only"),
            CompilationView::DeviceOnly => f.write_str("device-only"),
        }
    }
}

/// A file under translation and the text all spans refer to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Problem the front end reported while scanning a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// Everything a front end found in one file under one view
///
/// When `diagnostics` is non-empty the scan failed part-way; `matches` still
/// holds whatever was recognized before the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub matches: Vec<MatchResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanOutcome {
    pub fn new(matches: Vec<MatchResult>) -> Self {
        Self {
            matches,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn failed(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Contract every front end implements
///
/// A front end parses a file under one compilation view and reports the
/// constructs the rules care about. Preprocessor-layer matches come first,
/// then tree-level matches, each in document order, so that rule output is
/// deterministic.
///
/// # Example
/// ```rust,ignore
/// use hipify_api::{CompilationView, MatchSource, ScanOutcome, SourceFile, HipifyResult};
///
/// struct Fixed(Vec<hipify_api::MatchResult>);
///
/// impl MatchSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn scan(&self, _: &SourceFile, _: CompilationView) -> HipifyResult<ScanOutcome> {
///         Ok(ScanOutcome::new(self.0.clone()))
///     }
/// }
/// ```
pub trait MatchSource {
    /// Front end identifier used in logs
    fn name(&self) -> &str;

    /// Scan one file under one view
    ///
    /// # Errors
    /// Returns an error only when no scan could be attempted at all; syntax
    /// problems are reported through [`ScanOutcome::diagnostics`].
    fn scan(&self, file: &SourceFile, view: CompilationView) -> HipifyResult<ScanOutcome>;
}
