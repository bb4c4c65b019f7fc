use hipify_api::{Edit, EditOrigin, MarkerRewrite, Span};

/// Replace every occurrence of the marker, left to right.
///
/// The scan resumes after each inserted replacement, so a replacement that
/// contains the marker is never rewritten again. Returns `None` when there
/// was nothing to replace.
pub fn rewrite_markers(text: &str, marker: &MarkerRewrite) -> Option<String> {
    if marker.from.is_empty() {
        return None;
    }

    let mut out = text.to_string();
    let mut pos = 0;
    let mut replaced = 0;
    while let Some(found) = out[pos..].find(marker.from.as_str()) {
        let at = pos + found;
        out.replace_range(at..at + marker.from.len(), &marker.to);
        pos = at + marker.to.len();
        replaced += 1;
    }

    (replaced > 0).then_some(out)
}

/// One edit over the whole literal carrying all replacements
pub(crate) fn rewrite_literal(marker: &MarkerRewrite, raw_text: &str, span: Span) -> Option<Edit> {
    let rewritten = rewrite_markers(raw_text, marker)?;
    Some(Edit::new(span, rewritten, EditOrigin::StringLiteral))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_occurrences() {
        let raw = "\"cuda error in cudaMalloc\"";
        let edit = rewrite_literal(&MarkerRewrite::default(), raw, Span::new(5, 5 + raw.len())).unwrap();
        assert_eq!(edit.new_text, "\"hip error in hipMalloc\"");
        assert_eq!(edit.span, Span::new(5, 31));
    }

    #[test]
    fn test_no_occurrence() {
        assert!(rewrite_literal(&MarkerRewrite::default(), "\"done\"", Span::new(0, 6)).is_none());
        assert!(rewrite_markers("CUDA", &MarkerRewrite::default()).is_none());
    }

    #[test]
    fn test_adjacent_occurrences() {
        assert_eq!(
            rewrite_markers("cudacuda", &MarkerRewrite::default()).as_deref(),
            Some("hiphip")
        );
    }

    #[test]
    fn test_replacement_containing_marker_terminates() {
        let marker = MarkerRewrite {
            from: "cu".to_string(),
            to: "cucu".to_string(),
        };
        assert_eq!(rewrite_markers("cu-cu", &marker).as_deref(), Some("cucu-cucu"));
    }
}
