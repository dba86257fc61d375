//! Single-fragment ingredient normalization.
//!
//! [`normalize`] turns one ingredient fragment ("Soy Lecithin (0.5%)",
//! "Vit. B6", "CONTAINS: Red 40") into the form every matcher compares
//! against. It is pure and total: garbage in, garbage out, never an error.
//!
//! Steps, in order:
//!
//! 1. lowercase
//! 2. NFKD, then drop Latin combining diacritics ("café" → "cafe")
//! 3. strip `(5%)`, `( 2.5 )` and bare `5%` annotations
//! 4. map Unicode hyphens and dashes to `-`
//! 5. collapse whitespace
//! 6. trim commas, semicolons, periods and whitespace at both ends
//! 7. expand `vit.` / `vit ` to `vitamin `
//! 8. strip a leading `contains` / `contains:` label
//! 9. final trim
//!
//! Percentage stripping runs before punctuation trimming so that
//! "sugar (5%)." does not leave a dangling parenthesis behind. Stripping can
//! expose a new leading label or punctuation run, so the pass repeats until
//! the text is stable; that makes `normalize` idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::whitespace::{collapse_whitespace, trim_edge_punctuation};

static PAREN_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*\d+(?:\.\d+)?%?\s*\)").expect("paren percent regex"));

static BARE_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?%").expect("bare percent regex"));

static VITAMIN_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bvit(?:\.\s*|\s+)").expect("vitamin regex"));

static CONTAINS_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^contains\b\s*:?\s*").expect("contains regex"));

/// Normalizes a single ingredient fragment into its matchable form.
///
/// ```rust
/// use canonical::normalize;
///
/// assert_eq!(normalize("Soy Lecithin (0.5%)"), "soy lecithin");
/// assert_eq!(normalize("CONTAINS: Vit. B6."), "vitamin b6");
/// assert_eq!(normalize("Crème Fraîche"), "creme fraiche");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let mut current = normalize_pass(text);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let lowered = text.to_lowercase();

    let folded: String = lowered
        .nfkd()
        .filter(|ch| !is_latin_diacritic(*ch))
        .collect();

    let without_parens = PAREN_PERCENT.replace_all(&folded, "");
    let without_percent = BARE_PERCENT.replace_all(&without_parens, "");

    let dashed: String = without_percent.chars().map(fold_dash).collect();
    let collapsed = collapse_whitespace(&dashed);
    let trimmed = trim_edge_punctuation(&collapsed);

    let expanded = VITAMIN_ABBREVIATION.replace_all(trimmed, "vitamin ");
    let unlabeled = CONTAINS_LABEL.replace(&expanded, "");

    unlabeled.trim().to_string()
}

/// Combining Diacritical Marks block (U+0300–U+036F).
fn is_latin_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

fn fold_dash(ch: char) -> char {
    match ch {
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}' => '-',
        other => other,
    }
}
