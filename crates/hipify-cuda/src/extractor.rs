//! Match extraction for CUDA source code
//!
//! Parsing runs on the neutralized text. In tolerant mode tree-level matches
//! are reported even when the tree has errors; in strict mode such a file
//! only yields its preprocessor-layer matches.

use crate::error::FrontendError;
use crate::lexer::tokenize;
use crate::neutralizer::neutralize;
use crate::preprocessor::scan_directives;
use crate::visitor::CudaVisitor;
use hipify_api::{CompilationView, Diagnostic, ScanOutcome, SourceFile, TranslatorConfig};
use tree_sitter::{Node, Parser};

/// Extract matches for one file under one compilation view
pub fn extract(
    file: &SourceFile,
    view: CompilationView,
    config: &TranslatorConfig,
) -> Result<ScanOutcome, FrontendError> {
    let source = file.text.as_str();
    if source.len() > config.max_file_size {
        return Ok(ScanOutcome::default().with_diagnostic(Diagnostic::new(
            0,
            0,
            format!(
                "file is {} bytes, larger than the {} byte limit",
                source.len(),
                config.max_file_size
            ),
        )));
    }

    let neutralized = neutralize(source, &tokenize(source));

    let mut parser = Parser::new();
    let language = tree_sitter_cpp::language();
    parser
        .set_language(&language)
        .map_err(|e| FrontendError::Language(file.path.clone(), e.to_string()))?;
    let tree = parser
        .parse(&neutralized.code, None)
        .ok_or_else(|| FrontendError::NoTree(file.path.clone()))?;
    let root = tree.root_node();

    let mut diagnostics = Vec::new();
    if root.has_error() {
        collect_errors(root, &mut diagnostics);
    }

    let mut matches = scan_directives(root, source);

    if diagnostics.is_empty() || config.tolerant {
        let mut visitor = CudaVisitor::new(source, &neutralized, view, config);
        visitor.collect_kernels(root);
        visitor.visit_node(root);
        matches.extend(visitor.matches);
    } else {
        log::debug!(
            "{}: {} syntax errors, skipping tree-level matches",
            file.path.display(),
            diagnostics.len()
        );
    }

    Ok(ScanOutcome {
        matches,
        diagnostics,
    })
}

/// Outermost ERROR and MISSING nodes, one diagnostic each
fn collect_errors(node: Node, diagnostics: &mut Vec<Diagnostic>) {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            "syntax error".to_string()
        };
        diagnostics.push(Diagnostic::new(pos.row + 1, pos.column + 1, message));
        return;
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, diagnostics);
    }
}
