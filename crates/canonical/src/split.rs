//! Bracket-aware ingredient list splitting.
//!
//! Labels nest: "chocolate (sugar, cocoa butter), salt". A naive comma split
//! would tear the parenthetical apart, so [`split_top_level`] tracks bracket
//! depth and only splits on `,` / `;` at depth zero. [`extract_sub_ingredients`]
//! then peels one level of `main (sub, list)` apart so both the compound and
//! its components are checked.

use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

static TRAILING_PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.+?)\s*\((.+)\)\s*$").expect("parenthetical regex"));

/// Splits on `,` and `;` outside of `()` / `[]`, returning trimmed,
/// non-empty segments borrowed from `text`.
///
/// Unbalanced brackets never fail: depth may go negative or stay open, and
/// whatever is buffered at the end is emitted as the final segment.
///
/// ```rust
/// use canonical::split_top_level;
///
/// assert_eq!(
///     split_top_level("sugar (cane sugar, molasses), salt; [water, ice]"),
///     vec!["sugar (cane sugar, molasses)", "salt", "[water, ice]"],
/// );
/// ```
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0usize;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' | ';' if depth == 0 => {
                push_segment(&mut segments, &text[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    push_segment(&mut segments, &text[start..]);

    segments
}

fn push_segment<'a>(segments: &mut Vec<&'a str>, raw: &'a str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed);
    }
}

/// Expands one top-level segment into normalized terms.
///
/// A segment shaped like `main (sub, list)`, where the parenthetical runs to
/// the end of the segment, yields `main` followed by each top-level item of
/// the sub-list. Sub-items are not expanded further. Empty results after
/// normalization are dropped.
///
/// ```rust
/// use canonical::extract_sub_ingredients;
///
/// assert_eq!(
///     extract_sub_ingredients("Sugar (Cane Sugar, Molasses)"),
///     vec!["sugar", "cane sugar", "molasses"],
/// );
/// ```
pub fn extract_sub_ingredients(segment: &str) -> Vec<String> {
    let raw_terms: Vec<&str> = match TRAILING_PARENTHETICAL.captures(segment) {
        Some(caps) => {
            let main = caps.get(1).map_or("", |m| m.as_str().trim());
            let sub = caps.get(2).map_or("", |m| m.as_str());
            std::iter::once(main).chain(split_top_level(sub)).collect()
        }
        None => vec![segment],
    };

    raw_terms
        .into_iter()
        .map(normalize)
        .filter(|term| !term.is_empty())
        .collect()
}

/// Full splitting pipeline: top-level split, sub-ingredient extraction,
/// normalization and first-seen deduplication.
///
/// ```rust
/// use canonical::split_and_normalize;
///
/// let terms = split_and_normalize("Sugar (cane sugar, molasses), SALT, sugar");
/// assert_eq!(terms, vec!["sugar", "cane sugar", "molasses", "salt"]);
/// assert!(split_and_normalize("").is_empty());
/// ```
pub fn split_and_normalize(raw: &str) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut terms = Vec::new();

    for segment in split_top_level(raw) {
        for term in extract_sub_ingredients(segment) {
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }
    }

    terms
}
