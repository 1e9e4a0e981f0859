//! Case-insensitive `ilike` matching.
//!
//! `%` matches any run of characters. Matching is unanchored, so `foo` and
//! `%foo%` both match any value containing `foo`, and `a%b` matches any value
//! with an `a` somewhere before a `b`.

/// Match `value` against an `ilike` pattern.
pub fn ilike(value: &str, pattern: &str) -> bool {
    let value = value.to_lowercase();
    let pattern = pattern.to_lowercase();

    let mut rest = value.as_str();
    for segment in pattern.split('%').filter(|s| !s.is_empty()) {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        assert!(ilike("Practice Tests", "practice"));
        assert!(ilike("Practice Tests", "%TESTS%"));
        assert!(!ilike("Practice Tests", "flash"));
    }

    #[test]
    fn test_wildcard_order_matters() {
        assert!(ilike("study_groups", "st%gr"));
        assert!(!ilike("study_groups", "gr%st"));
    }

    #[test]
    fn test_empty_and_bare_wildcards_match_everything() {
        assert!(ilike("anything", ""));
        assert!(ilike("anything", "%"));
        assert!(ilike("", "%%"));
    }
}
