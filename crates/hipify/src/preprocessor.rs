//! Preprocessor rules
//!
//! These work on directives rather than the parse tree: angled `#include`
//! targets and identifiers inside `#define` bodies. Directives that live in
//! other files (headers pulled in by the translated file) are never touched.

use crate::symbols::SymbolTable;
use hipify_api::{Edit, EditOrigin, Span};
use log::{debug, trace};

/// Rewrite `<cuda_header.h>` to `<hip_header.h>`
pub(crate) fn rewrite_include(
    symbols: &SymbolTable,
    target_name: &str,
    angled: bool,
    span: Span,
    in_main_file: bool,
) -> Option<Edit> {
    if !in_main_file {
        trace!("Include {target_name} is outside the translated file");
        return None;
    }
    if !angled {
        trace!("Quoted include \"{target_name}\" left as is");
        return None;
    }
    let target = symbols.lookup(target_name)?;
    debug!("Include file found: {target_name}, will be replaced with {target}");
    Some(Edit::new(span, format!("<{target}>"), EditOrigin::Include))
}

/// Rename one identifier token of a macro definition body
pub(crate) fn rewrite_macro_identifier(
    symbols: &SymbolTable,
    name: &str,
    macro_name: &str,
    span: Span,
    in_main_file: bool,
) -> Option<Edit> {
    if !in_main_file {
        return None;
    }
    let target = symbols.lookup(name)?;
    debug!("Identifier {name} found in definition of macro {macro_name}, will be replaced with {target}");
    Some(Edit::new(span, target, EditOrigin::MacroIdentifier))
}
