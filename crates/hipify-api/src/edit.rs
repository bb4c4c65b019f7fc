use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule produced an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOrigin {
    CallRename,
    /// Extra leading parameter inserted into a kernel's declaration
    KernelParameters,
    KernelLaunch,
    BuiltinAccess,
    TypeRename,
    StringLiteral,
    Include,
    MacroIdentifier,
}

impl fmt::Display for EditOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditOrigin::CallRename => "call-rename",
            EditOrigin::KernelParameters => "kernel-parameters",
            EditOrigin::KernelLaunch => "kernel-launch",
            EditOrigin::BuiltinAccess => "builtin-access",
            EditOrigin::TypeRename => "type-rename",
            EditOrigin::StringLiteral => "string-literal",
            EditOrigin::Include => "include",
            EditOrigin::MacroIdentifier => "macro-identifier",
        };
        f.write_str(name)
    }
}

/// Replacement of one span of the original text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edit {
    pub span: Span,
    pub new_text: String,
    pub origin: EditOrigin,
}

impl Edit {
    pub fn new(span: Span, new_text: impl Into<String>, origin: EditOrigin) -> Self {
        Self {
            span,
            new_text: new_text.into(),
            origin,
        }
    }

    /// Whether this edit inserts text without removing any
    pub fn is_insertion(&self) -> bool {
        self.span.is_empty()
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} -> {:?}", self.origin, self.span, self.new_text)
    }
}
