//! JSON report of a translation run.
//!
//! Lists every accepted edit and every rejected proposal per file, the
//! diagnostics of each pass, and the run's counters.

use crate::orchestrator::{PassSummary, TranslationPlan};
use crate::replacements::Conflict;
use hipify_api::{Edit, HipifyError, HipifyResult};
use serde_json::{json, Value};

/// Export a plan (and the counters gathered so far) as pretty JSON
pub fn export_json(plan: &TranslationPlan) -> HipifyResult<String> {
    let files: Vec<Value> = plan
        .files()
        .map(|(path, set)| {
            json!({
                "path": path.display().to_string(),
                "edits": set.iter().map(edit_to_json).collect::<Vec<_>>(),
                "conflicts": set.conflicts().iter().map(conflict_to_json).collect::<Vec<_>>(),
                "overlapping": set.overlapping_pairs().len(),
            })
        })
        .collect();

    let passes: Vec<Value> = plan.passes().iter().map(pass_to_json).collect();

    let metrics =
        serde_json::to_value(plan.metrics()).map_err(|e| HipifyError::Serialization(e.to_string()))?;

    let result = json!({
        "files": files,
        "passes": passes,
        "metrics": metrics,
    });

    serde_json::to_string_pretty(&result).map_err(|e| HipifyError::Serialization(e.to_string()))
}

fn edit_to_json(edit: &Edit) -> Value {
    json!({
        "start": edit.span.start,
        "end": edit.span.end,
        "text": edit.new_text,
        "origin": edit.origin.to_string(),
    })
}

fn conflict_to_json(conflict: &Conflict) -> Value {
    json!({
        "reason": conflict.reason.to_string(),
        "duplicate": conflict.is_duplicate(),
        "kept": edit_to_json(&conflict.existing),
        "rejected": edit_to_json(&conflict.rejected),
    })
}

fn pass_to_json(pass: &PassSummary) -> Value {
    json!({
        "view": pass.view.to_string(),
        "matches": pass.matches,
        "edits_proposed": pass.edits_proposed,
        "failed_files": pass
            .failed_files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "diagnostics": pass
            .diagnostics
            .iter()
            .map(|(path, d)| json!({
                "path": path.display().to_string(),
                "line": d.line,
                "column": d.column,
                "message": d.message,
            }))
            .collect::<Vec<_>>(),
    })
}
