// crates/restodb-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Café` -> `Cafe`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use restodb_core::text::fold_key;
///
/// assert_eq!(fold_key("Café Zürich"), "cafe zurich");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Parses an optional cell into a finite `f64`.
///
/// \- Trims leading and trailing whitespace before parsing.
/// \- Returns `None` for a missing cell, an unparsable value, or NaN/inf.
///
/// # Examples
///
/// ```rust
/// use restodb_core::text::parse_opt_f64;
///
/// assert_eq!(parse_opt_f64(Some(" 4.5 ")), Some(4.5));
/// assert_eq!(parse_opt_f64(Some("n/a")), None);
/// assert_eq!(parse_opt_f64(Some("NaN")), None);
/// assert_eq!(parse_opt_f64(None), None);
/// ```
pub fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    s.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Empty or whitespace-only cells become `None`.
pub fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_case() {
        assert!(equals_folded("CAFÉ", "cafe"));
        assert!(!equals_folded("Sushi", "Tacos"));
    }

    #[test]
    fn rejects_non_numeric_cells() {
        assert_eq!(parse_opt_f64(Some("")), None);
        assert_eq!(parse_opt_f64(Some("four")), None);
        assert_eq!(parse_opt_f64(Some("inf")), None);
        assert_eq!(parse_opt_f64(Some("-73.98")), Some(-73.98));
    }

    #[test]
    fn blank_cells_are_none() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("555-0100".into())), Some("555-0100".into()));
    }
}
