//! Pattern rules: recognized constructs in, candidate edits out.
//!
//! Each rule looks at one [`MatchResult`] shape and the symbol table and
//! produces its edits without knowing about any other rule. Collisions
//! between rules are resolved later by the replacement set.

mod builtins;
mod calls;
mod launch;
mod strings;
mod types;

use crate::preprocessor;
use crate::symbols::SymbolTable;
use hipify_api::{Edit, MatchResult, TranslatorConfig};
use log::debug;

pub use launch::render_launch;
pub use strings::rewrite_markers;

/// Applies every rule to matches coming out of a front end
pub struct RuleEngine<'a> {
    symbols: &'a SymbolTable,
    config: &'a TranslatorConfig,
}

impl<'a> RuleEngine<'a> {
    pub fn new(symbols: &'a SymbolTable, config: &'a TranslatorConfig) -> Self {
        Self { symbols, config }
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    /// Edits for one match, in the order they should be proposed
    pub fn edits_for(&self, m: &MatchResult) -> Vec<Edit> {
        debug!("Matched {m}");

        let edits: Vec<Edit> = match m {
            MatchResult::FunctionCall { callee_name, loc } => {
                calls::rename_call(self.symbols, callee_name, *loc)
                    .into_iter()
                    .collect()
            }
            MatchResult::KernelLaunch {
                callee_name,
                param_lists,
                config_args,
                launch_args,
                nested,
                full_span,
            } => launch::rewrite_launch(
                &self.config.launch,
                callee_name,
                param_lists,
                config_args,
                launch_args,
                nested.iter().flat_map(|m| self.edits_for(m)).collect(),
                *full_span,
            ),
            MatchResult::BuiltinAccess {
                base_decl,
                member_name,
                loc,
            } => builtins::rename_builtin(
                self.symbols,
                &self.config.builtin_member_prefix,
                base_decl.as_deref(),
                member_name,
                *loc,
            )
            .into_iter()
            .collect(),
            MatchResult::EnumOrTypeRef { name, loc, kind } => {
                types::rename_type_ref(self.symbols, name, *loc, *kind)
                    .into_iter()
                    .collect()
            }
            MatchResult::StringLiteral { raw_text, span } => {
                strings::rewrite_literal(&self.config.string_marker, raw_text, *span)
                    .into_iter()
                    .collect()
            }
            MatchResult::Include {
                target_name,
                angled,
                span,
                in_main_file,
            } => preprocessor::rewrite_include(
                self.symbols,
                target_name,
                *angled,
                *span,
                *in_main_file,
            )
            .into_iter()
            .collect(),
            MatchResult::MacroBodyIdentifier {
                name,
                macro_name,
                span,
                in_main_file,
            } => preprocessor::rewrite_macro_identifier(
                self.symbols,
                name,
                macro_name,
                *span,
                *in_main_file,
            )
            .into_iter()
            .collect(),
        };

        for edit in &edits {
            debug!("Produced {edit}");
        }
        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hipify_api::{Captured, ConfigArg, EditOrigin, SourceLoc, Span, TypeRefKind};

    fn engine_parts() -> (SymbolTable, TranslatorConfig) {
        (SymbolTable::cuda_to_hip(), TranslatorConfig::default())
    }

    #[test]
    fn test_dispatch_call() {
        let (symbols, config) = engine_parts();
        let engine = RuleEngine::new(&symbols, &config);

        let edits = engine.edits_for(&MatchResult::FunctionCall {
            callee_name: "cudaDeviceSynchronize".to_string(),
            loc: SourceLoc::new(4),
        });
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].origin, EditOrigin::CallRename);
        assert_eq!(edits[0].span, Span::new(4, 25));
    }

    #[test]
    fn test_dispatch_lookup_miss_is_silent() {
        let (symbols, config) = engine_parts();
        let engine = RuleEngine::new(&symbols, &config);

        let edits = engine.edits_for(&MatchResult::EnumOrTypeRef {
            name: "cudaSomethingNew".to_string(),
            loc: SourceLoc::new(0),
            kind: TypeRefKind::EnumConstant,
        });
        assert!(edits.is_empty());
    }

    #[test]
    fn test_dispatch_launch_rewrites_nested_matches() {
        let (symbols, config) = engine_parts();
        let engine = RuleEngine::new(&symbols, &config);

        // k<<<1, 1>>>(cudaMemcpyHostToDevice, "cuda")
        let source = "k<<<1, 1>>>(cudaMemcpyHostToDevice, \"cuda\")";
        let capture = |text: &str| {
            let start = source.find(text).unwrap();
            Captured::new(Span::at(start, text.len()), text)
        };
        let kind = capture("cudaMemcpyHostToDevice");
        let literal = capture("\"cuda\"");
        let nested = vec![
            MatchResult::EnumOrTypeRef {
                name: kind.text.clone(),
                loc: SourceLoc::new(kind.span.start),
                kind: TypeRefKind::EnumConstant,
            },
            MatchResult::StringLiteral {
                raw_text: literal.text.clone(),
                span: literal.span,
            },
        ];

        let edits = engine.edits_for(&MatchResult::KernelLaunch {
            callee_name: "k".to_string(),
            param_lists: Vec::new(),
            config_args: vec![
                ConfigArg::written(Captured::new(Span::at(4, 1), "1"), "dim3"),
                ConfigArg::written(Captured::new(Span::at(7, 1), "1"), "dim3"),
            ],
            launch_args: vec![kind, literal],
            nested,
            full_span: Span::new(0, source.len()),
        });
        assert_eq!(edits.len(), 1);
        assert_eq!(
            edits[0].new_text,
            "hipLaunchKernel(HIP_KERNEL_NAME(k), dim3(1), dim3(1), hipMemcpyHostToDevice, \"hip\")"
        );
    }

    #[test]
    fn test_dispatch_uses_configured_marker() {
        let symbols = SymbolTable::new();
        let mut config = TranslatorConfig::default();
        config.string_marker.from = "CUDA".to_string();
        config.string_marker.to = "HIP".to_string();
        let engine = RuleEngine::new(&symbols, &config);

        let edits = engine.edits_for(&MatchResult::StringLiteral {
            raw_text: "\"CUDA cuda\"".to_string(),
            span: Span::new(0, 11),
        });
        assert_eq!(edits[0].new_text, "\"HIP cuda\"");
    }
}
