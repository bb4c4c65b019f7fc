//! Applying accepted edits to the original text.
//!
//! Edits are applied in one forward sweep over the untouched buffer, so the
//! spans recorded during analysis stay valid no matter how many edits came
//! before them. An edit that cannot be applied is reported and skipped; the
//! rest still go in.

use crate::orchestrator::TranslationPlan;
use crate::replacements::ReplacementSet;
use hipify_api::{Edit, HipifyError, SourceFile, Span};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Why an accepted edit was not applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("span {span} is outside the {len}-byte source")]
    OutOfBounds { span: Span, len: usize },

    #[error("span {0} splits a character")]
    NotCharBoundary(Span),

    #[error("span {0} overlaps an edit applied before it")]
    OverlapsApplied(Span),

    #[error("file changed on disk after analysis")]
    SourceChanged,

    #[error("{0}")]
    Io(String),
}

/// An edit that was skipped and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFailure {
    pub edit: Edit,
    pub reason: SkipReason,
}

/// Rewritten text of one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub text: String,
    pub applied: usize,
    pub skipped: Vec<ApplyFailure>,
}

impl ApplyOutcome {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Apply a replacement set to the text it was built against
pub fn apply_edits(original: &str, set: &ReplacementSet) -> ApplyOutcome {
    let mut text = String::with_capacity(original.len());
    let mut cursor = 0;
    let mut applied = 0;
    let mut skipped = Vec::new();

    for edit in set {
        let span = edit.span;
        let reason = if span.end > original.len() {
            Some(SkipReason::OutOfBounds {
                span,
                len: original.len(),
            })
        } else if span.start < cursor {
            Some(SkipReason::OverlapsApplied(span))
        } else if span.text(original).is_none() {
            Some(SkipReason::NotCharBoundary(span))
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!("Skipping {edit}: {reason}");
            skipped.push(ApplyFailure {
                edit: edit.clone(),
                reason,
            });
            continue;
        }

        text.push_str(&original[cursor..span.start]);
        text.push_str(&edit.new_text);
        cursor = span.end;
        applied += 1;
    }
    text.push_str(&original[cursor..]);

    ApplyOutcome {
        text,
        applied,
        skipped,
    }
}

/// What happened to one file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub applied: usize,
    pub skipped: Vec<ApplyFailure>,
    pub written: bool,
}

impl FileOutcome {
    fn all_skipped(path: PathBuf, set: &ReplacementSet, reason: SkipReason) -> Self {
        warn!("{}: {reason}, {} edit(s) not applied", path.display(), set.len());
        Self {
            path,
            applied: 0,
            skipped: set
                .iter()
                .map(|edit| ApplyFailure {
                    edit: edit.clone(),
                    reason: reason.clone(),
                })
                .collect(),
            written: false,
        }
    }
}

/// Write every file's accepted edits back to disk
///
/// Each file is re-read first; if it no longer holds the text the plan was
/// computed from, none of its edits are applied. Counters in the plan's
/// metrics are updated.
pub fn apply_plan(plan: &mut TranslationPlan, files: &[SourceFile]) -> Vec<FileOutcome> {
    let mut outcomes = Vec::new();

    for (path, set) in plan.files() {
        if set.is_empty() {
            continue;
        }

        let analysed = files.iter().find(|f| &f.path == path).map(|f| f.text.as_str());
        let current = match fs::read_to_string(path) {
            Ok(current) => current,
            Err(e) => {
                let err = HipifyError::Io(path.clone(), e);
                outcomes.push(FileOutcome::all_skipped(
                    path.clone(),
                    set,
                    SkipReason::Io(err.to_string()),
                ));
                continue;
            }
        };
        if analysed != Some(current.as_str()) {
            outcomes.push(FileOutcome::all_skipped(path.clone(), set, SkipReason::SourceChanged));
            continue;
        }

        let outcome = apply_edits(&current, set);
        let mut file = FileOutcome {
            path: path.clone(),
            applied: outcome.applied,
            skipped: outcome.skipped,
            written: false,
        };

        if outcome.applied > 0 {
            match fs::write(path, &outcome.text) {
                Ok(()) => {
                    file.written = true;
                    debug!("Wrote {} edit(s) to {}", file.applied, path.display());
                }
                Err(e) => {
                    let err = HipifyError::Io(path.clone(), e);
                    outcomes.push(FileOutcome::all_skipped(
                        path.clone(),
                        set,
                        SkipReason::Io(err.to_string()),
                    ));
                    continue;
                }
            }
        }
        outcomes.push(file);
    }

    let metrics = plan.metrics_mut();
    for outcome in &outcomes {
        metrics.edits_applied += outcome.applied;
        metrics.apply_failures += outcome.skipped.len();
    }
    info!(
        "Applied {} edit(s), skipped {}",
        metrics.edits_applied, metrics.apply_failures
    );

    outcomes
}
