//! Whitespace and edge-punctuation helpers.
//!
//! Ingredient labels arrive with every kind of spacing: OCR line breaks,
//! non-breaking spaces copied from PDFs, tabs from spreadsheet exports.
//! [`collapse_whitespace`] folds all of them into single ASCII spaces.
//!
//! # Examples
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  soy \n\t lecithin  "), "soy lecithin");
//! ```

/// Collapses repeated Unicode whitespace into single spaces and trims edges.
///
/// Deterministic; returns an empty string for empty or whitespace-only input.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("sugar\r\nsalt"), "sugar salt");
/// assert_eq!(collapse_whitespace("corn\u{00A0}syrup"), "corn syrup");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Trims commas, semicolons, periods and whitespace from both ends.
pub(crate) fn trim_edge_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, ',' | ';' | '.') || c.is_whitespace())
}
