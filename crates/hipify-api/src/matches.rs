use crate::span::{SourceLoc, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text captured from the source together with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Captured {
    /// Span of the text in the original buffer
    pub span: Span,

    /// The text itself, spacing preserved
    pub text: String,
}

impl Captured {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }
}

/// One argument of a kernel launch configuration (`<<<grid, block, shmem, stream>>>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigArg {
    /// Argument written in the source
    Written {
        /// The argument as written, spacing preserved
        arg: Captured,

        /// Declared type of the configuration parameter it binds to
        declared_type: String,
    },

    /// Argument left out and filled in by the compiler's default
    Defaulted,
}

impl ConfigArg {
    pub fn written(arg: Captured, declared_type: impl Into<String>) -> Self {
        Self::Written {
            arg,
            declared_type: declared_type.into(),
        }
    }
}

/// Where a type or constant name was referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRefKind {
    /// Use of an enumerator (`cudaMemcpyHostToDevice`)
    EnumConstant,
    /// Variable declared with an enum type (`cudaError_t err;`)
    EnumVariable,
    /// Variable declared with a struct type (`cudaDeviceProp prop;`)
    StructVariable,
    /// Function parameter declared with a named type
    Parameter,
    /// Function return type
    ReturnType,
    /// Type named inside an expression (`(cudaError_t)e`, `sizeof(cudaDeviceProp)`)
    TypeExpression,
}

/// One occurrence of a construct recognized by a front end
///
/// Variants carry only spans and literal text; nothing here refers back into
/// a parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// Direct call of a named function
    FunctionCall {
        callee_name: String,
        /// Location of the callee token
        loc: SourceLoc,
    },

    /// Kernel launch with an execution configuration
    KernelLaunch {
        callee_name: String,
        /// Parameter lists of every declaration of the kernel visible in this
        /// file, prototypes included, in source order
        param_lists: Vec<Captured>,
        config_args: Vec<ConfigArg>,
        launch_args: Vec<Captured>,
        /// Matches found inside the configuration and call arguments
        nested: Vec<MatchResult>,
        /// Whole launch expression, from callee to closing parenthesis
        full_span: Span,
    },

    /// Member access on a built-in coordinate object (`threadIdx.x`)
    BuiltinAccess {
        /// Declaration the base expression resolves to, if it resolves
        base_decl: Option<String>,
        /// Member as named by the builtin's record (`__fetch_builtin_x`)
        member_name: String,
        loc: SourceLoc,
    },

    /// Reference to an enum constant or a named type
    EnumOrTypeRef {
        /// The constant or type name, never the declared variable's name
        name: String,
        loc: SourceLoc,
        kind: TypeRefKind,
    },

    /// String literal, quotes included
    StringLiteral { raw_text: String, span: Span },

    /// `#include` directive
    Include {
        target_name: String,
        angled: bool,
        /// Filename including its `<>` or `""` delimiters
        span: Span,
        in_main_file: bool,
    },

    /// Identifier token inside a `#define` body
    MacroBodyIdentifier {
        name: String,
        macro_name: String,
        span: Span,
        in_main_file: bool,
    },
}

impl MatchResult {
    /// Short construct name used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::FunctionCall { .. } => "call",
            MatchResult::KernelLaunch { .. } => "kernel launch",
            MatchResult::BuiltinAccess { .. } => "builtin",
            MatchResult::EnumOrTypeRef { .. } => "type ref",
            MatchResult::StringLiteral { .. } => "string literal",
            MatchResult::Include { .. } => "include",
            MatchResult::MacroBodyIdentifier { .. } => "macro identifier",
        }
    }

    /// Whether this match comes from the preprocessor layer
    pub fn is_preprocessor(&self) -> bool {
        matches!(
            self,
            MatchResult::Include { .. } | MatchResult::MacroBodyIdentifier { .. }
        )
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::FunctionCall { callee_name, loc } => {
                write!(f, "call `{callee_name}` at {}", loc.effective())
            }
            MatchResult::KernelLaunch {
                callee_name,
                full_span,
                ..
            } => write!(f, "kernel launch `{callee_name}` at {full_span}"),
            MatchResult::BuiltinAccess {
                base_decl,
                member_name,
                loc,
            } => write!(
                f,
                "builtin `{}.{member_name}` at {}",
                base_decl.as_deref().unwrap_or("?"),
                loc.effective()
            ),
            MatchResult::EnumOrTypeRef { name, loc, kind } => {
                write!(f, "{kind:?} `{name}` at {}", loc.effective())
            }
            MatchResult::StringLiteral { raw_text, span } => {
                write!(f, "string {raw_text} at {span}")
            }
            MatchResult::Include {
                target_name,
                angled,
                span,
                ..
            } => {
                let (open, close) = if *angled { ('<', '>') } else { ('"', '"') };
                write!(f, "include {open}{target_name}{close} at {span}")
            }
            MatchResult::MacroBodyIdentifier {
                name,
                macro_name,
                span,
                ..
            } => write!(f, "`{name}` in macro {macro_name} at {span}"),
        }
    }
}
