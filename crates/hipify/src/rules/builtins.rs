use crate::symbols::SymbolTable;
use hipify_api::{Edit, EditOrigin, SourceLoc};
use log::trace;

/// Rename a coordinate builtin access such as `threadIdx.x`.
///
/// The key is the base declaration's name, a dot and the member name with
/// the builtin record's accessor prefix removed. The edit covers `base.member`
/// as written.
pub(crate) fn rename_builtin(
    symbols: &SymbolTable,
    member_prefix: &str,
    base_decl: Option<&str>,
    member_name: &str,
    loc: SourceLoc,
) -> Option<Edit> {
    let Some(base) = base_decl else {
        trace!("Builtin member {member_name} on an unresolved base");
        return None;
    };
    let member = member_name
        .strip_prefix(member_prefix)
        .unwrap_or(member_name);
    let key = format!("{base}.{member}");

    let Some(target) = symbols.lookup(&key) else {
        trace!("No mapping for builtin `{key}`");
        return None;
    };
    Some(Edit::new(loc.span(key.len()), target, EditOrigin::BuiltinAccess))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hipify_api::Span;

    const PREFIX: &str = "__fetch_builtin_";

    #[test]
    fn test_prefixed_member() {
        let symbols = SymbolTable::cuda_to_hip();
        let edit = rename_builtin(
            &symbols,
            PREFIX,
            Some("blockDim"),
            "__fetch_builtin_x",
            SourceLoc::new(40),
        )
        .unwrap();
        assert_eq!(edit.span, Span::new(40, 50));
        assert_eq!(edit.new_text, "hipBlockDim_x");
    }

    #[test]
    fn test_plain_member() {
        let symbols = SymbolTable::cuda_to_hip();
        let edit = rename_builtin(&symbols, PREFIX, Some("gridDim"), "z", SourceLoc::new(0)).unwrap();
        assert_eq!(edit.new_text, "hipGridDim_z");
    }

    #[test]
    fn test_prefix_is_not_a_character_set() {
        // Stripping characters of the prefix as a set would eat into "fetch"
        let symbols = SymbolTable::from_pairs([("s.fetch", "hipFetch")]);
        let edit = rename_builtin(
            &symbols,
            PREFIX,
            Some("s"),
            "__fetch_builtin_fetch",
            SourceLoc::new(0),
        )
        .unwrap();
        assert_eq!(edit.new_text, "hipFetch");
    }

    #[test]
    fn test_unknown_key_and_unresolved_base() {
        let symbols = SymbolTable::cuda_to_hip();
        assert!(rename_builtin(&symbols, PREFIX, Some("threadIdx"), "__fetch_builtin_w", SourceLoc::new(0)).is_none());
        assert!(rename_builtin(&symbols, PREFIX, None, "__fetch_builtin_x", SourceLoc::new(0)).is_none());
    }
}
