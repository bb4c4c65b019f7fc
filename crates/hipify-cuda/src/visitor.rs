//! Tree visitor reporting translatable constructs
//!
//! Works on the tree of the neutralized text; since neutralization keeps
//! every offset, node byte ranges index the original source directly.

use crate::lexer::{tokenize_range, TokenKind};
use crate::neutralizer::{LaunchConfig, NeutralizedSource, Qualifier};
use hipify_api::{
    Captured, CompilationView, ConfigArg, MatchResult, SourceLoc, Span, TranslatorConfig,
    TypeRefKind,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tree_sitter::Node;

static RE_BUILTIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(threadIdx|blockIdx|blockDim|gridDim)\.([xyz])$").unwrap()
});

/// Declared types of the launch configuration parameters, in order
pub const LAUNCH_CONFIG_TYPES: [&str; 4] = ["dim3", "dim3", "size_t", "cudaStream_t"];

/// Where a function's body executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecSpace {
    Host,
    Device,
    Kernel,
    HostDevice,
}

impl ExecSpace {
    fn from_qualifiers(qualifiers: impl Iterator<Item = Qualifier>) -> Self {
        let (mut host, mut device) = (false, false);
        for qualifier in qualifiers {
            match qualifier {
                Qualifier::Global => return ExecSpace::Kernel,
                Qualifier::Host => host = true,
                Qualifier::Device => device = true,
                _ => {}
            }
        }
        match (host, device) {
            (true, true) => ExecSpace::HostDevice,
            (false, true) => ExecSpace::Device,
            _ => ExecSpace::Host,
        }
    }

    /// Whether bodies in this space are analysed under `view`
    pub fn visible_in(self, view: CompilationView) -> bool {
        match self {
            ExecSpace::HostDevice => true,
            ExecSpace::Host => view == CompilationView::HostOnly,
            ExecSpace::Device | ExecSpace::Kernel => view == CompilationView::DeviceOnly,
        }
    }
}

pub struct CudaVisitor<'a> {
    source: &'a str,
    neutralized: &'a NeutralizedSource,
    view: CompilationView,
    prefix: &'a str,
    member_prefix: &'a str,
    /// Kernel name to the parameter lists of its declarations
    kernels: HashMap<String, Vec<Captured>>,
    pub matches: Vec<MatchResult>,
}

impl<'a> CudaVisitor<'a> {
    pub fn new(
        source: &'a str,
        neutralized: &'a NeutralizedSource,
        view: CompilationView,
        config: &'a TranslatorConfig,
    ) -> Self {
        Self {
            source,
            neutralized,
            view,
            prefix: &config.source_prefix,
            member_prefix: &config.builtin_member_prefix,
            kernels: HashMap::new(),
            matches: Vec::new(),
        }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn span(node: Node) -> Span {
        Span::new(node.start_byte(), node.end_byte())
    }

    fn is_prefixed(&self, name: &str) -> bool {
        !self.prefix.is_empty() && name.starts_with(self.prefix)
    }

    /// Record the parameter list of every `__global__` declaration,
    /// prototypes and definition alike, in source order
    pub fn collect_kernels(&mut self, node: Node) {
        match node.kind() {
            "function_definition" | "declaration" | "field_declaration" => {
                let Some(declarator) = function_declarator(node) else {
                    return;
                };
                if self.exec_space(node) != ExecSpace::Kernel {
                    return;
                }
                let (Some(name), Some(params)) = (
                    declarator.child_by_field_name("declarator"),
                    declarator.child_by_field_name("parameters"),
                ) else {
                    return;
                };
                let name = self.base_name(name).to_string();
                let params = self.parameter_list(params);
                self.kernels.entry(name).or_default().push(params);
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.collect_kernels(child);
                }
            }
        }
    }

    pub fn visit_node(&mut self, node: Node) {
        let should_recurse = match node.kind() {
            "preproc_include" | "preproc_def" | "preproc_function_def" | "preproc_defined"
            | "comment" => false,
            "preproc_if" | "preproc_ifdef" | "preproc_elif" | "preproc_elifdef" => {
                self.visit_conditional(node);
                false
            }
            "function_definition" => {
                self.visit_function(node);
                false
            }
            "declaration" | "field_declaration" => {
                self.visit_declaration(node);
                false
            }
            "parameter_declaration" | "optional_parameter_declaration" => {
                self.visit_parameter(node);
                false
            }
            "enumerator" => {
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit_node(value);
                }
                false
            }
            "for_range_loop" => {
                for field in ["right", "body"] {
                    if let Some(child) = node.child_by_field_name(field) {
                        self.visit_node(child);
                    }
                }
                false
            }
            "call_expression" => {
                self.visit_call(node);
                false
            }
            "field_expression" => !self.visit_builtin(node),
            "identifier" => {
                self.visit_identifier(node);
                false
            }
            "type_descriptor" => {
                self.visit_type(node, TypeRefKind::TypeExpression);
                false
            }
            "string_literal" | "raw_string_literal" => {
                self.matches.push(MatchResult::StringLiteral {
                    raw_text: self.node_text(node).to_string(),
                    span: Self::span(node),
                });
                false
            }
            _ => true,
        };

        if should_recurse {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                self.visit_node(child);
            }
        }
    }

    /// Conditional blocks: skip the condition, keep the guarded code
    fn visit_conditional(&mut self, node: Node) {
        let skipped = [
            node.child_by_field_name("name"),
            node.child_by_field_name("condition"),
        ];
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if !skipped.contains(&Some(child)) {
                self.visit_node(child);
            }
        }
    }

    /// Execution space from the qualifiers written before the declarator
    fn exec_space(&self, node: Node) -> ExecSpace {
        // The root starts at its first token, after any leading qualifier
        let boundary = node
            .prev_sibling()
            .map(|s| s.end_byte())
            .or_else(|| node.parent().filter(|p| p.parent().is_some()).map(|p| p.start_byte()))
            .unwrap_or(0);
        let end = node
            .child_by_field_name("declarator")
            .map_or(node.start_byte(), |d| d.start_byte());
        if end < boundary {
            return ExecSpace::Host;
        }
        ExecSpace::from_qualifiers(self.neutralized.qualifiers_in(Span::new(boundary, end)))
    }

    fn visit_function(&mut self, node: Node) {
        let space = self.exec_space(node);

        if let Some(ty) = node.child_by_field_name("type") {
            self.visit_type(ty, TypeRefKind::ReturnType);
        }
        if let Some(declarator) = function_declarator(node) {
            self.visit_parameters(declarator);
        }

        if !space.visible_in(self.view) {
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "field_initializer_list" {
                self.visit_node(child);
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_node(body);
        }
    }

    fn visit_parameters(&mut self, declarator: Node) {
        let Some(params) = declarator.child_by_field_name("parameters") else {
            return;
        };
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            self.visit_node(param);
        }
    }

    fn visit_parameter(&mut self, node: Node) {
        if let Some(ty) = node.child_by_field_name("type") {
            self.visit_type(ty, TypeRefKind::Parameter);
        }
        if let Some(default) = node.child_by_field_name("default_value") {
            self.visit_node(default);
        }
    }

    fn visit_declaration(&mut self, node: Node) {
        // Prototype
        if let Some(declarator) = function_declarator(node) {
            if let Some(ty) = node.child_by_field_name("type") {
                self.visit_type(ty, TypeRefKind::ReturnType);
            }
            self.visit_parameters(declarator);
            return;
        }

        if let Some(ty) = node.child_by_field_name("type") {
            let kind = if ty.kind() == "enum_specifier" {
                TypeRefKind::EnumVariable
            } else {
                TypeRefKind::StructVariable
            };
            self.visit_type(ty, kind);
        }

        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        for declarator in declarators {
            self.visit_declarator(declarator);
        }
        if let Some(default) = node.child_by_field_name("default_value") {
            self.visit_node(default);
        }
    }

    fn visit_declarator(&mut self, node: Node) {
        match node.kind() {
            "init_declarator" => {
                if let Some(inner) = node.child_by_field_name("declarator") {
                    self.visit_declarator(inner);
                }
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit_node(value);
                }
            }
            "array_declarator" => {
                if let Some(inner) = node.child_by_field_name("declarator") {
                    self.visit_declarator(inner);
                }
                if let Some(size) = node.child_by_field_name("size") {
                    self.visit_node(size);
                }
            }
            "pointer_declarator" | "reference_declarator" | "parenthesized_declarator"
            | "attributed_declarator" => {
                let mut cursor = node.walk();
                let inner: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in inner {
                    self.visit_declarator(child);
                }
            }
            "function_declarator" => self.visit_parameters(node),
            _ => {}
        }
    }

    /// Report prefixed type names inside a type specifier
    fn visit_type(&mut self, node: Node, kind: TypeRefKind) {
        match node.kind() {
            "type_identifier" => {
                let name = self.node_text(node);
                if self.is_prefixed(name) {
                    self.matches.push(MatchResult::EnumOrTypeRef {
                        name: name.to_string(),
                        loc: SourceLoc::new(node.start_byte()),
                        kind,
                    });
                }
            }
            // Members of a struct or enum defined in place
            "field_declaration_list" | "enumerator_list" => self.visit_node(node),
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit_type(child, kind);
                }
            }
        }
    }

    fn visit_call(&mut self, node: Node) {
        let function = node.child_by_field_name("function");
        let arguments = node.child_by_field_name("arguments");

        let (Some(function), Some(arguments)) = (function, arguments) else {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                self.visit_node(child);
            }
            return;
        };

        let neutralized = self.neutralized;
        let between = Span::new(function.end_byte(), arguments.start_byte());
        if let Some(launch) = neutralized.launch_in(between) {
            self.report_launch(node, function, arguments, launch);
            return;
        }

        let callee = match function.kind() {
            "identifier" => Some(function),
            "template_function" | "qualified_identifier" => function
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier"),
            _ => None,
        };
        if let Some(template_args) = callee.and_then(|_| function.child_by_field_name("arguments")) {
            self.visit_node(template_args);
        }
        match callee {
            Some(name) => {
                let callee_name = self.node_text(name);
                if self.is_prefixed(callee_name) {
                    self.matches.push(MatchResult::FunctionCall {
                        callee_name: callee_name.to_string(),
                        loc: SourceLoc::new(name.start_byte()),
                    });
                }
            }
            None => self.visit_node(function),
        }
        self.visit_node(arguments);
    }

    fn report_launch(&mut self, node: Node, function: Node, arguments: Node, launch: &LaunchConfig) {
        let callee_name = self.node_text(function).to_string();
        let param_lists = self
            .kernels
            .get(self.base_name(function))
            .cloned()
            .unwrap_or_default();

        let slots = launch.args.len().max(LAUNCH_CONFIG_TYPES.len());
        let config_args = (0..slots)
            .map(|i| match launch.args.get(i) {
                Some(arg) => ConfigArg::written(arg.clone(), LAUNCH_CONFIG_TYPES.get(i).copied().unwrap_or("")),
                None => ConfigArg::Defaulted,
            })
            .collect();

        let mut cursor = arguments.walk();
        let launch_args = arguments
            .named_children(&mut cursor)
            .filter(|arg| arg.kind() != "comment")
            .map(|arg| Captured::new(Self::span(arg), self.node_text(arg)))
            .collect();

        // Argument matches go into the launch, not next to it
        let outer = std::mem::take(&mut self.matches);
        for arg in &launch.args {
            self.scan_config_arg(arg);
        }
        self.visit_node(arguments);
        let nested = std::mem::replace(&mut self.matches, outer);

        self.matches.push(MatchResult::KernelLaunch {
            callee_name,
            param_lists,
            config_args,
            launch_args,
            nested,
            full_span: Self::span(node),
        });
    }

    /// Configuration arguments are blanked out of the tree, so their
    /// tokens are matched directly
    fn scan_config_arg(&mut self, arg: &Captured) {
        let tokens = tokenize_range(self.source, arg.span);
        for (i, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Str => self.matches.push(MatchResult::StringLiteral {
                    raw_text: token.text(self.source).to_string(),
                    span: token.span,
                }),
                TokenKind::Identifier => {
                    let name = token.text(self.source);
                    let member = i > 0
                        && [".", "->"]
                            .iter()
                            .any(|p| tokens[i - 1].is_punct(self.source, p));
                    if member || !self.is_prefixed(name) {
                        continue;
                    }
                    let called = tokens.get(i + 1).is_some_and(|t| t.is_punct(self.source, "("));
                    self.matches.push(if called {
                        MatchResult::FunctionCall {
                            callee_name: name.to_string(),
                            loc: SourceLoc::new(token.span.start),
                        }
                    } else {
                        MatchResult::EnumOrTypeRef {
                            name: name.to_string(),
                            loc: SourceLoc::new(token.span.start),
                            kind: TypeRefKind::EnumConstant,
                        }
                    });
                }
                _ => {}
            }
        }
    }

    /// `threadIdx.x` and friends; returns whether the node was one
    fn visit_builtin(&mut self, node: Node) -> bool {
        let text = self.node_text(node);
        let Some(caps) = RE_BUILTIN.captures(text) else {
            return false;
        };
        self.matches.push(MatchResult::BuiltinAccess {
            base_decl: Some(caps[1].to_string()),
            member_name: format!("{}{}", self.member_prefix, &caps[2]),
            loc: SourceLoc::new(node.start_byte()),
        });
        true
    }

    /// Identifier in expression position
    fn visit_identifier(&mut self, node: Node) {
        let name = self.node_text(node);
        if self.is_prefixed(name) {
            self.matches.push(MatchResult::EnumOrTypeRef {
                name: name.to_string(),
                loc: SourceLoc::new(node.start_byte()),
                kind: TypeRefKind::EnumConstant,
            });
        }
    }

    /// Unqualified, untemplated name of a function or declarator
    fn base_name(&self, node: Node) -> &'a str {
        match node.kind() {
            "qualified_identifier" | "template_function" => node
                .child_by_field_name("name")
                .map_or_else(|| self.node_text(node), |name| self.base_name(name)),
            _ => self.node_text(node),
        }
    }

    /// Text between the parentheses, or an empty capture right after `(`
    fn parameter_list(&self, params: Node) -> Captured {
        let mut cursor = params.walk();
        let named: Vec<Node> = params
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect();
        let span = match (named.first(), named.last()) {
            (Some(first), Some(last)) => Span::new(first.start_byte(), last.end_byte()),
            _ => Span::at(params.start_byte() + 1, 0),
        };
        Captured::new(span, span.text(self.source).unwrap_or(""))
    }
}

/// The function declarator of a definition or prototype, through pointer
/// and reference declarators
fn function_declarator(node: Node) -> Option<Node> {
    let mut current = node.child_by_field_name("declarator")?;
    loop {
        match current.kind() {
            "function_declarator" => return Some(current),
            "pointer_declarator" | "reference_declarator" => {
                current = current
                    .child_by_field_name("declarator")
                    .or_else(|| current.named_child(current.named_child_count().checked_sub(1)?))?;
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::neutralizer::neutralize;
    use tree_sitter::Parser;

    fn visit(source: &str, view: CompilationView) -> Vec<MatchResult> {
        let neutralized = neutralize(source, &tokenize(source));
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_cpp::language()).unwrap();
        let tree = parser.parse(&neutralized.code, None).unwrap();

        let config = TranslatorConfig::default();
        let mut visitor = CudaVisitor::new(source, &neutralized, view, &config);
        visitor.collect_kernels(tree.root_node());
        visitor.visit_node(tree.root_node());
        visitor.matches
    }

    fn calls(matches: &[MatchResult]) -> Vec<&str> {
        matches
            .iter()
            .filter_map(|m| match m {
                MatchResult::FunctionCall { callee_name, .. } => Some(callee_name.as_str()),
                _ => None,
            })
            .collect()
    }

    const VIEWS: &str = r#"
__device__ float twice(float x) { cudaDeviceOnly(); return 2 * x; }
void host_side() { cudaHostOnly(); }
__host__ __device__ void both() { cudaEverywhere(); }
"#;

    #[test]
    fn test_views_select_function_bodies() {
        let host = visit(VIEWS, CompilationView::HostOnly);
        assert_eq!(calls(&host), vec!["cudaHostOnly", "cudaEverywhere"]);

        let device = visit(VIEWS, CompilationView::DeviceOnly);
        assert_eq!(calls(&device), vec!["cudaDeviceOnly", "cudaEverywhere"]);
    }

    #[test]
    fn test_exec_space_from_qualifiers() {
        use Qualifier::*;
        assert_eq!(ExecSpace::from_qualifiers([Global].into_iter()), ExecSpace::Kernel);
        assert_eq!(ExecSpace::from_qualifiers([Device, Host].into_iter()), ExecSpace::HostDevice);
        assert_eq!(ExecSpace::from_qualifiers([Device, ForceInline].into_iter()), ExecSpace::Device);
        assert_eq!(ExecSpace::from_qualifiers([Host].into_iter()), ExecSpace::Host);
        assert_eq!(ExecSpace::from_qualifiers(std::iter::empty()), ExecSpace::Host);
        assert!(ExecSpace::Kernel.visible_in(CompilationView::DeviceOnly));
        assert!(!ExecSpace::Kernel.visible_in(CompilationView::HostOnly));
    }

    #[test]
    fn test_kernel_launch() {
        let source = "__global__ void add(int n, float *x) {}\n\
                      void run(float *x) { add<<<blocks, 256>>>(n, x); }\n";
        let matches = visit(source, CompilationView::HostOnly);
        let launch = matches
            .iter()
            .find(|m| matches!(m, MatchResult::KernelLaunch { .. }))
            .unwrap();

        let MatchResult::KernelLaunch {
            callee_name,
            param_lists,
            config_args,
            launch_args,
            nested,
            full_span,
        } = launch
        else {
            unreachable!()
        };
        fn texts(captures: &[Captured]) -> Vec<&str> {
            captures.iter().map(|c| c.text.as_str()).collect()
        }
        let at = |text: &str| {
            let start = source.rfind(text).unwrap();
            Captured::new(Span::at(start, text.len()), text)
        };
        assert_eq!(callee_name, "add");
        assert_eq!(texts(param_lists), vec!["int n, float *x"]);
        assert_eq!(
            config_args,
            &vec![
                ConfigArg::written(at("blocks"), "dim3"),
                ConfigArg::written(at("256"), "dim3"),
                ConfigArg::Defaulted,
                ConfigArg::Defaulted,
            ]
        );
        assert_eq!(texts(launch_args), vec!["n", "x"]);
        assert_eq!(launch_args[1].span.text(source), Some("x"));
        assert!(nested.is_empty());
        assert_eq!(full_span.text(source), Some("add<<<blocks, 256>>>(n, x)"));
    }

    #[test]
    fn test_kernel_launch_collects_argument_matches() {
        let source = "__global__ void k(int kind, const char *tag) {}\n\
                      void run() { k<<<1, 1, 0, cudaStreamPerThread>>>(cudaMemcpyHostToDevice, \"cuda\"); }\n";
        let matches = visit(source, CompilationView::HostOnly);
        assert_eq!(matches.len(), 1, "{matches:?}");

        let MatchResult::KernelLaunch { nested, .. } = &matches[0] else {
            panic!("no launch in {matches:?}");
        };
        let found: Vec<(&str, usize)> = nested
            .iter()
            .map(|m| match m {
                MatchResult::EnumOrTypeRef { name, loc, .. } => (name.as_str(), loc.offset),
                MatchResult::StringLiteral { raw_text, span } => (raw_text.as_str(), span.start),
                other => panic!("unexpected {other}"),
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("cudaStreamPerThread", source.find("cudaStreamPerThread").unwrap()),
                ("cudaMemcpyHostToDevice", source.find("cudaMemcpyHostToDevice").unwrap()),
                ("\"cuda\"", source.find("\"cuda\"").unwrap()),
            ]
        );
    }

    #[test]
    fn test_config_argument_calls_and_members() {
        let source = "void run() { k<<<cudaGrid(n), cfg.cudaBlock>>>(); }";
        let matches = visit(source, CompilationView::HostOnly);
        let Some(MatchResult::KernelLaunch { nested, .. }) = matches.last() else {
            panic!("no launch in {matches:?}");
        };
        assert_eq!(calls(nested), vec!["cudaGrid"]);
        assert_eq!(nested.len(), 1);
    }

    #[test]
    fn test_kernel_prototype_and_empty_parameters() {
        let source = "__global__ void tick();\nvoid go() { tick<<<1, 1>>>(); }\n";
        let matches = visit(source, CompilationView::HostOnly);
        let Some(MatchResult::KernelLaunch { param_lists, .. }) = matches.last() else {
            panic!("no launch in {matches:?}");
        };
        assert_eq!(param_lists.len(), 1);
        assert!(param_lists[0].span.is_empty());
        assert_eq!(param_lists[0].span.start, source.find("()").unwrap() + 1);
    }

    #[test]
    fn test_kernel_prototype_and_definition() {
        let source = "__global__ void k(int);\nvoid h() { k<<<1, 1>>>(3); }\n__global__ void k(int a) {}\n";
        let matches = visit(source, CompilationView::HostOnly);
        let Some(MatchResult::KernelLaunch { param_lists, .. }) = matches.last() else {
            panic!("no launch in {matches:?}");
        };
        let found: Vec<(&str, usize)> = param_lists
            .iter()
            .map(|p| (p.text.as_str(), p.span.start))
            .collect();
        assert_eq!(
            found,
            vec![
                ("int", source.find("int)").unwrap()),
                ("int a", source.find("int a").unwrap()),
            ]
        );
    }

    #[test]
    fn test_builtins_in_kernel_body() {
        let source = "__global__ void k(float *a) { int i = blockIdx.x * blockDim.x + threadIdx.x; a[i] = 0; }";
        let matches = visit(source, CompilationView::DeviceOnly);
        let builtins: Vec<(&str, &str)> = matches
            .iter()
            .filter_map(|m| match m {
                MatchResult::BuiltinAccess {
                    base_decl,
                    member_name,
                    ..
                } => Some((base_decl.as_deref().unwrap(), member_name.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            builtins,
            vec![
                ("blockIdx", "__fetch_builtin_x"),
                ("blockDim", "__fetch_builtin_x"),
                ("threadIdx", "__fetch_builtin_x"),
            ]
        );
        assert!(visit(source, CompilationView::HostOnly)
            .iter()
            .all(|m| !matches!(m, MatchResult::BuiltinAccess { .. })));
    }

    #[test]
    fn test_type_references() {
        let source = "cudaError_t check(cudaStream_t s) {\n  cudaDeviceProp prop;\n  return cudaSuccess;\n}\n";
        let matches = visit(source, CompilationView::HostOnly);
        let refs: Vec<(&str, TypeRefKind)> = matches
            .iter()
            .filter_map(|m| match m {
                MatchResult::EnumOrTypeRef { name, kind, .. } => Some((name.as_str(), *kind)),
                _ => None,
            })
            .collect();
        assert_eq!(
            refs,
            vec![
                ("cudaError_t", TypeRefKind::ReturnType),
                ("cudaStream_t", TypeRefKind::Parameter),
                ("cudaDeviceProp", TypeRefKind::StructVariable),
                ("cudaSuccess", TypeRefKind::EnumConstant),
            ]
        );
    }

    #[test]
    fn test_type_names_in_expressions() {
        let source = "void f(int e) {\n  cudaError_t r = (cudaError_t)e;\n  auto s = static_cast<cudaStream_t>(0);\n}\n";
        let matches = visit(source, CompilationView::HostOnly);
        let refs: Vec<(&str, TypeRefKind)> = matches
            .iter()
            .filter_map(|m| match m {
                MatchResult::EnumOrTypeRef { name, kind, .. } => Some((name.as_str(), *kind)),
                _ => None,
            })
            .collect();
        assert_eq!(
            refs,
            vec![
                ("cudaError_t", TypeRefKind::StructVariable),
                ("cudaError_t", TypeRefKind::TypeExpression),
                ("cudaStream_t", TypeRefKind::TypeExpression),
            ]
        );
    }

    #[test]
    fn test_declared_names_are_not_references() {
        let source = "void f() { int cudaCount = 0; }";
        let matches = visit(source, CompilationView::HostOnly);
        assert!(matches.is_empty(), "{matches:?}");
    }

    #[test]
    fn test_strings_and_calls_with_arguments() {
        let source = "void f() { printf(\"cuda says %d\", cudaGetLastError()); }";
        let matches = visit(source, CompilationView::HostOnly);
        assert!(matches!(
            &matches[0],
            MatchResult::StringLiteral { raw_text, .. } if raw_text == "\"cuda says %d\""
        ));
        assert_eq!(calls(&matches), vec!["cudaGetLastError"]);
    }
}
