//! Preprocessor-layer scan: `#include` targets and `#define` bodies.

use crate::lexer::{tokenize_range, TokenKind};
use hipify_api::{MatchResult, Span};
use tree_sitter::Node;

/// Collect directive matches in document order
///
/// Only the file being translated is parsed, so every directive found here
/// lives in the main file.
pub fn scan_directives(root: Node, source: &str) -> Vec<MatchResult> {
    let mut matches = Vec::new();
    visit(root, source, &mut matches);
    matches
}

fn visit(node: Node, source: &str, matches: &mut Vec<MatchResult>) {
    match node.kind() {
        "preproc_include" => visit_include(node, source, matches),
        "preproc_def" | "preproc_function_def" => visit_define(node, source, matches),
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                visit(child, source, matches);
            }
        }
    }
}

fn visit_include(node: Node, source: &str, matches: &mut Vec<MatchResult>) {
    let Some(path) = node.child_by_field_name("path") else {
        return;
    };
    let angled = match path.kind() {
        "system_lib_string" => true,
        "string_literal" => false,
        // #include MACRO
        _ => return,
    };
    let span = Span::new(path.start_byte(), path.end_byte());
    let Some(text) = span.text(source) else {
        return;
    };
    if text.len() < 2 {
        return;
    }

    matches.push(MatchResult::Include {
        target_name: text[1..text.len() - 1].to_string(),
        angled,
        span,
        in_main_file: true,
    });
}

fn visit_define(node: Node, source: &str, matches: &mut Vec<MatchResult>) {
    let (Some(name), Some(value)) = (
        node.child_by_field_name("name"),
        node.child_by_field_name("value"),
    ) else {
        return;
    };
    let macro_name = source[name.start_byte()..name.end_byte()].to_string();

    let body = Span::new(value.start_byte(), value.end_byte());
    for token in tokenize_range(source, body) {
        if token.kind != TokenKind::Identifier {
            continue;
        }
        matches.push(MatchResult::MacroBodyIdentifier {
            name: token.text(source).to_string(),
            macro_name: macro_name.clone(),
            span: token.span,
            in_main_file: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn scan(source: &str) -> Vec<MatchResult> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_cpp::language()).unwrap();
        let tree = parser.parse(source, None).unwrap();
        scan_directives(tree.root_node(), source)
    }

    #[test]
    fn test_includes() {
        let source = "#include <cuda_runtime.h>\n#include \"kernels.cuh\"\n";
        let matches = scan(source);
        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches[0],
            MatchResult::Include {
                target_name: "cuda_runtime.h".to_string(),
                angled: true,
                span: Span::new(9, 25),
                in_main_file: true,
            }
        );
        match &matches[1] {
            MatchResult::Include {
                target_name, angled, ..
            } => {
                assert_eq!(target_name, "kernels.cuh");
                assert!(!angled);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_define_body_identifiers() {
        let source = "#define CHECK(call) if ((call) != cudaSuccess) cudaDeviceReset()\n";
        let names: Vec<String> = scan(source)
            .into_iter()
            .filter_map(|m| match m {
                MatchResult::MacroBodyIdentifier {
                    name, macro_name, ..
                } => {
                    assert_eq!(macro_name, "CHECK");
                    Some(name)
                }
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["if", "call", "cudaSuccess", "cudaDeviceReset"]);
    }

    #[test]
    fn test_object_like_define_spans() {
        let source = "#define ALLOC cudaMalloc\n";
        let matches = scan(source);
        assert_eq!(
            matches,
            vec![MatchResult::MacroBodyIdentifier {
                name: "cudaMalloc".to_string(),
                macro_name: "ALLOC".to_string(),
                span: Span::new(14, 24),
                in_main_file: true,
            }]
        );
    }

    #[test]
    fn test_directives_inside_conditionals() {
        let source = "#ifdef USE_CUDA\n#include <cuda.h>\n#endif\n";
        let matches = scan(source);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].is_preprocessor());
    }

    #[test]
    fn test_define_without_body() {
        assert!(scan("#define GUARD\n").is_empty());
    }
}
