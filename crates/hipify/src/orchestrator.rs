//! Two-pass orchestration.
//!
//! The same files are scanned once through the host-only view and once
//! through the device-only view. Each pass is an independent function of the
//! files and the view; their edits are folded, host pass first, into one
//! replacement set per file.

use crate::replacements::{Proposal, ReplacementSet};
use crate::rules::RuleEngine;
use crate::symbols::SymbolTable;
use hipify_api::{
    CompilationView, Diagnostic, Edit, MatchSource, SourceFile, TranslationMetrics,
    TranslatorConfig,
};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything one pass produced, in discovery order
#[derive(Debug, Clone)]
pub struct PassReport {
    pub view: CompilationView,
    pub edits: Vec<(PathBuf, Edit)>,
    pub diagnostics: Vec<(PathBuf, Diagnostic)>,
    /// Files whose scan reported diagnostics or could not run
    pub failed_files: Vec<PathBuf>,
    pub matches: usize,
}

impl PassReport {
    fn new(view: CompilationView) -> Self {
        Self {
            view,
            edits: Vec::new(),
            diagnostics: Vec::new(),
            failed_files: Vec::new(),
            matches: 0,
        }
    }

    fn summary(&self) -> PassSummary {
        PassSummary {
            view: self.view,
            matches: self.matches,
            edits_proposed: self.edits.len(),
            diagnostics: self.diagnostics.clone(),
            failed_files: self.failed_files.clone(),
        }
    }
}

/// What is kept of a pass once its edits are folded
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    pub view: CompilationView,
    pub matches: usize,
    pub edits_proposed: usize,
    pub diagnostics: Vec<(PathBuf, Diagnostic)>,
    pub failed_files: Vec<PathBuf>,
}

/// Folded result of all passes, ready for the apply step
#[derive(Debug, Clone, Default)]
pub struct TranslationPlan {
    files: BTreeMap<PathBuf, ReplacementSet>,
    passes: Vec<PassSummary>,
    metrics: TranslationMetrics,
}

impl TranslationPlan {
    /// Propose every edit of a pass, in order
    pub fn fold(&mut self, report: PassReport, config: &TranslatorConfig) {
        self.passes.push(report.summary());
        self.metrics.matches_found += report.matches;
        self.metrics.pass_failures += report.failed_files.len();

        for (path, edit) in report.edits {
            self.metrics.edits_proposed += 1;
            let set = self
                .files
                .entry(path.clone())
                .or_insert_with(|| ReplacementSet::new(config.conflict_policy));

            match set.propose(edit) {
                Proposal::Accepted => self.metrics.edits_accepted += 1,
                Proposal::Rejected(conflict) => {
                    self.metrics.edits_rejected += 1;
                    if conflict.is_duplicate() {
                        debug!("{}: {conflict}", path.display());
                    } else {
                        warn!("{}: {conflict}", path.display());
                    }
                }
            }
        }

        self.metrics.files_translated = self.files.values().filter(|s| !s.is_empty()).count();
    }

    /// Replacement set of one file, if any edit was proposed for it
    pub fn set(&self, path: &Path) -> Option<&ReplacementSet> {
        self.files.get(path)
    }

    /// Files with their replacement sets, ordered by path
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &ReplacementSet)> {
        self.files.iter()
    }

    pub fn passes(&self) -> &[PassSummary] {
        &self.passes
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut TranslationMetrics {
        &mut self.metrics
    }

    /// Accepted edits over all files
    pub fn edit_count(&self) -> usize {
        self.files.values().map(ReplacementSet::len).sum()
    }
}

/// Runs front end and rules over a file list, once per view
pub struct Translator<'a, S: MatchSource + ?Sized> {
    source: &'a S,
    engine: RuleEngine<'a>,
    config: &'a TranslatorConfig,
}

impl<'a, S: MatchSource + ?Sized> Translator<'a, S> {
    pub fn new(source: &'a S, symbols: &'a SymbolTable, config: &'a TranslatorConfig) -> Self {
        Self {
            source,
            engine: RuleEngine::new(symbols, config),
            config,
        }
    }

    /// Scan every file under one view and collect candidate edits
    ///
    /// A file whose scan fails still contributes the matches found before
    /// the failure; other files are unaffected.
    pub fn run_pass(&self, files: &[SourceFile], view: CompilationView) -> PassReport {
        info!("Running {view} pass over {} file(s) with {}", files.len(), self.source.name());
        let mut report = PassReport::new(view);

        for file in files {
            let outcome = match self.source.scan(file, view) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("{view} pass skipped {}: {e}", file.path.display());
                    report
                        .diagnostics
                        .push((file.path.clone(), Diagnostic::new(0, 0, e.to_string())));
                    report.failed_files.push(file.path.clone());
                    continue;
                }
            };

            if outcome.failed() {
                for diagnostic in &outcome.diagnostics {
                    warn!("{} ({view}): {diagnostic}", file.path.display());
                }
                report.failed_files.push(file.path.clone());
                report.diagnostics.extend(
                    outcome
                        .diagnostics
                        .iter()
                        .cloned()
                        .map(|d| (file.path.clone(), d)),
                );
            }

            report.matches += outcome.matches.len();
            for m in &outcome.matches {
                for edit in self.engine.edits_for(m) {
                    report.edits.push((file.path.clone(), edit));
                }
            }
        }

        info!(
            "{view} pass: {} match(es), {} candidate edit(s), {} failed file(s)",
            report.matches,
            report.edits.len(),
            report.failed_files.len()
        );
        report
    }

    /// Run the host pass, then the device pass, and fold both
    pub fn translate(&self, files: &[SourceFile]) -> TranslationPlan {
        let start = Instant::now();
        let mut plan = TranslationPlan::default();
        plan.metrics.files_attempted = files.len();

        for view in CompilationView::PASS_ORDER {
            let report = self.run_pass(files, view);
            plan.fold(report, self.config);
        }

        plan.metrics.total_time = start.elapsed();
        info!(
            "Collected {} edit(s) for {} file(s), {} rejected",
            plan.edit_count(),
            plan.metrics.files_translated,
            plan.metrics.edits_rejected
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hipify_api::{EditOrigin, HipifyError, HipifyResult, MatchResult, ScanOutcome, SourceLoc, Span};

    struct Scripted;

    impl MatchSource for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn scan(&self, file: &SourceFile, view: CompilationView) -> HipifyResult<ScanOutcome> {
            if file.path.ends_with("broken.cu") {
                return Err(HipifyError::frontend(&file.path, "no grammar"));
            }
            let callee = match view {
                CompilationView::HostOnly => "cudaMalloc",
                CompilationView::DeviceOnly => "cudaFree",
            };
            Ok(ScanOutcome::new(vec![MatchResult::FunctionCall {
                callee_name: callee.to_string(),
                loc: SourceLoc::new(0),
            }]))
        }
    }

    #[test]
    fn test_host_pass_claims_span_first() {
        let symbols = SymbolTable::cuda_to_hip();
        let config = TranslatorConfig::default();
        let translator = Translator::new(&Scripted, &symbols, &config);
        let files = vec![SourceFile::new("a.cu", "cudaMalloc")];

        let plan = translator.translate(&files);
        let set = plan.set(Path::new("a.cu")).unwrap();

        // cudaMalloc (host) and cudaFree (device) both start at 0 but differ in length
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&Span::new(0, 10)).unwrap().new_text, "hipMalloc");
        assert_eq!(plan.passes().len(), 2);
        assert_eq!(plan.passes()[0].view, CompilationView::HostOnly);
    }

    #[test]
    fn test_frontend_error_does_not_stop_other_files() {
        let symbols = SymbolTable::cuda_to_hip();
        let config = TranslatorConfig::default();
        let translator = Translator::new(&Scripted, &symbols, &config);
        let files = vec![
            SourceFile::new("broken.cu", ""),
            SourceFile::new("fine.cu", "cudaMalloc"),
        ];

        let report = translator.run_pass(&files, CompilationView::HostOnly);
        assert_eq!(report.failed_files, vec![PathBuf::from("broken.cu")]);
        assert_eq!(report.edits.len(), 1);
        assert_eq!(report.edits[0].1.origin, EditOrigin::CallRename);

        let plan = translator.translate(&files);
        assert_eq!(plan.metrics().pass_failures, 2);
        assert!(plan.set(Path::new("broken.cu")).is_none());
    }
}
