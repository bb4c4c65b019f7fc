//! Implementation of the MatchSource trait for CUDA C++

use hipify_api::{CompilationView, HipifyResult, MatchSource, ScanOutcome, SourceFile, TranslatorConfig};
use std::time::Instant;

use crate::extractor;

/// tree-sitter based CUDA front end
pub struct CudaFrontend {
    config: TranslatorConfig,
}

impl CudaFrontend {
    /// Create a front end with default configuration
    pub fn new() -> Self {
        Self::with_config(TranslatorConfig::default())
    }

    /// Create a front end sharing the translator's configuration
    pub fn with_config(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }
}

impl Default for CudaFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSource for CudaFrontend {
    fn name(&self) -> &str {
        "tree-sitter-cuda"
    }

    fn scan(&self, file: &SourceFile, view: CompilationView) -> HipifyResult<ScanOutcome> {
        let start = Instant::now();
        let outcome = extractor::extract(file, view, &self.config)?;
        log::debug!(
            "{} [{view}]: {} matches, {} diagnostics in {:?}",
            file.path.display(),
            outcome.matches.len(),
            outcome.diagnostics.len(),
            start.elapsed()
        );
        Ok(outcome)
    }
}
