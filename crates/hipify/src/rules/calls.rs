use crate::symbols::SymbolTable;
use hipify_api::{Edit, EditOrigin, SourceLoc};
use log::trace;

/// Rename the callee token of a direct call.
///
/// Only the callee name is replaced; parentheses and arguments are left
/// alone. Calls spelled inside a macro argument are edited where they were
/// spelled.
pub(crate) fn rename_call(symbols: &SymbolTable, callee_name: &str, loc: SourceLoc) -> Option<Edit> {
    let Some(target) = symbols.lookup(callee_name) else {
        trace!("No mapping for call `{callee_name}`");
        return None;
    };
    Some(Edit::new(
        loc.span(callee_name.len()),
        target,
        EditOrigin::CallRename,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hipify_api::Span;

    #[test]
    fn test_every_mapped_name_renames_only_the_callee() {
        let symbols = SymbolTable::cuda_to_hip();
        for (source, target) in symbols.iter() {
            let edit = rename_call(&symbols, source, SourceLoc::new(8)).unwrap();
            assert_eq!(edit.span, Span::new(8, 8 + source.len()));
            assert_eq!(edit.new_text, target);
        }
    }

    #[test]
    fn test_unknown_callee() {
        let symbols = SymbolTable::cuda_to_hip();
        assert!(rename_call(&symbols, "printf", SourceLoc::new(0)).is_none());
    }

    #[test]
    fn test_macro_argument_uses_spelling_location() {
        let symbols = SymbolTable::cuda_to_hip();
        // CHECK(cudaFree(p)) expanded at 300, spelled at 6
        let edit = rename_call(&symbols, "cudaFree", SourceLoc::in_macro_arg(300, 6)).unwrap();
        assert_eq!(edit.span, Span::new(6, 14));
        assert_eq!(edit.new_text, "hipFree");
    }
}
