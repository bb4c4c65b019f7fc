use crate::symbols::SymbolTable;
use hipify_api::{Edit, EditOrigin, SourceLoc, TypeRefKind};
use log::trace;

/// Rename an enum constant or a declared type name
///
/// For declarations the name is the declared type, never the variable. A
/// name missing from the table is left alone.
pub(crate) fn rename_type_ref(
    symbols: &SymbolTable,
    name: &str,
    loc: SourceLoc,
    kind: TypeRefKind,
) -> Option<Edit> {
    let Some(target) = symbols.lookup(name) else {
        trace!("No mapping for {kind:?} `{name}`");
        return None;
    };
    Some(Edit::new(loc.span(name.len()), target, EditOrigin::TypeRename))
}
