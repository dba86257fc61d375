//! Workspace umbrella crate for ingredient screening.
//!
//! This crate stitches together text canonicalization (`canonical`), the
//! banned-ingredient reference list (`reference`) and the five-pass matcher
//! (`matcher`) so callers can screen an ingredient label with a single call:
//!
//! ```rust
//! use ingredient_screen::{analyze_ingredients, is_clean, MatchType};
//!
//! let matches = analyze_ingredients(
//!     Some("Enriched Flour, Sugar, Soybean Oil, Soy Lecithin, Red 40"),
//!     Some(["en:e322", "en:e129"].as_slice()),
//! );
//! assert!(matches.iter().all(|m| m.match_type == MatchType::Exact));
//! assert!(is_clean(Some("rolled oats, water, sea salt"), None::<&[&str]>));
//! ```
//!
//! The free functions use a process-wide default [`Matcher`] built lazily
//! from the bundled reference list. [`install_reference`] swaps in a
//! different list at runtime; analyses already running keep the matcher they
//! started with.

pub mod config;
mod error;
pub mod product;

pub use canonical::{extract_sub_ingredients, normalize, split_and_normalize, split_top_level};
pub use matcher::{
    set_analysis_metrics, AnalysisInput, AnalysisMetrics, AnalysisReport, MatchResult, MatchType,
    Matcher, Verdict,
};
pub use reference::{
    bundled_entries, load_entries_from_file, load_entries_from_str, BannedIngredient, Category,
    MatchPattern, ReferenceError, ReferenceIndex, Severity,
};

pub use crate::config::{ConfigLoadError, LogFormat, ScreenConfig};
pub use crate::error::ScreenError;
pub use crate::product::{
    screen_product, validate_barcode, ProductDocument, ProductResponse, ProductScreening,
};

use std::sync::{Arc, OnceLock, RwLock};

use tracing::{info, warn};

fn default_slot() -> &'static RwLock<Arc<Matcher>> {
    static DEFAULT: OnceLock<RwLock<Arc<Matcher>>> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        let matcher = Matcher::bundled().expect("bundled reference list must build");
        RwLock::new(Arc::new(matcher))
    })
}

/// The process-wide default matcher.
pub fn default_matcher() -> Arc<Matcher> {
    let guard = default_slot()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&guard)
}

/// Replace the default matcher with one built from `entries`.
///
/// On error the current matcher stays installed.
pub fn install_reference(entries: Vec<BannedIngredient>) -> Result<Arc<Matcher>, ScreenError> {
    let matcher = Matcher::from_entries(entries)?;
    Ok(install_matcher(matcher))
}

/// Replace the default matcher and return the new handle.
pub fn install_matcher(matcher: Matcher) -> Arc<Matcher> {
    let matcher = Arc::new(matcher);
    let mut guard = default_slot()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    warn!(
        previous = guard.index().len(),
        entries = matcher.index().len(),
        "replacing default reference list"
    );
    *guard = Arc::clone(&matcher);
    matcher
}

/// Build the matcher selected by `config` without installing it.
pub fn matcher_from_config(config: &ScreenConfig) -> Result<Matcher, ScreenError> {
    let entries = config.reference_entries()?;
    let matcher = Matcher::from_entries(entries)?;
    info!(
        entries = matcher.index().len(),
        custom = config.reference.path.is_some(),
        "reference list loaded from config"
    );
    Ok(matcher)
}

/// Banned ingredients found in `text` and `additive_tags` by the default
/// matcher, ordered by descending confidence.
pub fn analyze_ingredients<S: AsRef<str>>(
    text: Option<&str>,
    additive_tags: Option<&[S]>,
) -> Vec<MatchResult> {
    default_matcher().analyze(text, additive_tags)
}

/// `true` when [`analyze_ingredients`] finds nothing.
pub fn is_clean<S: AsRef<str>>(text: Option<&str>, additive_tags: Option<&[S]>) -> bool {
    analyze_ingredients(text, additive_tags).is_empty()
}

/// [`analyze_ingredients`] plus the derived [`Verdict`].
pub fn assess<S: AsRef<str>>(text: Option<&str>, additive_tags: Option<&[S]>) -> AnalysisReport {
    default_matcher().assess(text, additive_tags)
}

/// Catalog browsing over the default matcher's reference list: entries
/// whose name or alias contains `query`, optionally limited to `category`.
pub fn search_catalog(query: &str, category: Option<Category>) -> Vec<BannedIngredient> {
    default_matcher()
        .index()
        .search(query, category)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_agree_with_matcher() {
        let text = "water, sugar, sodium benzoate, aspartame";
        let matcher = Matcher::bundled().unwrap();
        assert_eq!(
            analyze_ingredients(Some(text), None::<&[&str]>),
            matcher.analyze(Some(text), None::<&[&str]>)
        );
        assert!(!is_clean(Some(text), None::<&[&str]>));
        assert_eq!(assess(Some(text), None::<&[&str]>).verdict, Verdict::Flagged);
    }

    #[test]
    fn catalog_search_by_category() {
        let dyes = search_catalog("", Some(Category::SyntheticDye));
        assert!(!dyes.is_empty());
        assert!(dyes.iter().all(|entry| entry.category == Category::SyntheticDye));

        let by_alias = search_catalog("splenda", None);
        assert_eq!(by_alias.len(), 1);
        assert_eq!(by_alias[0].canonical_name, "Sucralose");
    }

    #[test]
    fn config_builds_bundled_matcher() {
        let matcher = matcher_from_config(&ScreenConfig::default()).unwrap();
        assert_eq!(matcher.index().len(), bundled_entries().unwrap().len());
    }
}
