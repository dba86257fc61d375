//! Prepared, read-only lookup structures over a reference list.
//!
//! Everything the matcher needs per entry is derived once here: normalized
//! names, word-boundary substring matchers, compiled patterns and normalized
//! additive codes. After [`ReferenceIndex::build`] returns nothing is
//! mutated, so one index can be shared behind an `Arc` by any number of
//! threads.

use canonical::normalize;
use fxhash::{FxHashMap, FxHashSet};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::ReferenceError;
use crate::pattern::CompiledPattern;
use crate::types::{BannedIngredient, Category, Severity};

/// Names shorter than this only ever match exactly.
pub const MIN_SUBSTRING_NAME_CHARS: usize = 4;

/// Word-boundary matcher for one normalized name.
///
/// A hit needs the name to be preceded by start-of-text, whitespace, `,`,
/// `;` or `(` and followed by end-of-text, whitespace, `,`, `;` or `)`.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    name: String,
    regex: Regex,
}

impl SubstringMatcher {
    fn new(name: &str) -> Result<Self, regex::Error> {
        let expression = format!(r"(?:^|[\s,;(]){}(?:$|[\s,;)])", regex::escape(name));
        Ok(Self {
            name: name.to_string(),
            regex: Regex::new(&expression)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// An additive code in the forms needed for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ENumber {
    code: String,
    key: String,
}

impl ENumber {
    fn new(code: &str) -> Option<Self> {
        let normalized = normalize_additive_code(code);
        let key = additive_key(&normalized);
        if key.is_empty() {
            return None;
        }
        Some(Self {
            code: code.trim().to_string(),
            key: key.to_string(),
        })
    }

    /// The code as written in the reference list, e.g. `E102`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Comparison key: lowercase, no whitespace, one leading `e` removed.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether an additive tag such as `en:e102` or `en:102` names this code.
    pub fn matches_tag(&self, tag: &str) -> bool {
        additive_key(&normalize_additive_tag(tag)) == self.key
    }
}

/// Lowercases a code and removes all whitespace (`"E 102 "` → `"e102"`).
pub fn normalize_additive_code(code: &str) -> String {
    code.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalizes an additive tag: strips whitespace, lowercases and drops an
/// `en:` language prefix (`"en:E102"` → `"e102"`).
pub fn normalize_additive_tag(tag: &str) -> String {
    let normalized = normalize_additive_code(tag);
    match normalized.strip_prefix("en:") {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// Removes one leading `e`, so `e102` and `102` compare equal.
pub fn additive_key(normalized: &str) -> &str {
    normalized.strip_prefix('e').unwrap_or(normalized)
}

/// One reference entry with all of its match structures prepared.
#[derive(Debug, Clone)]
pub struct PreparedEntry {
    entry: BannedIngredient,
    normalized_names: Vec<String>,
    substring_matchers: Vec<SubstringMatcher>,
    patterns: Vec<CompiledPattern>,
    e_numbers: Vec<ENumber>,
}

impl PreparedEntry {
    fn prepare(position: usize, entry: BannedIngredient) -> Result<Self, ReferenceError> {
        let canonical = normalize(&entry.canonical_name);
        if canonical.is_empty() {
            return Err(ReferenceError::EmptyName(position));
        }

        let mut seen = FxHashSet::default();
        let mut normalized_names = Vec::with_capacity(entry.aliases.len() + 1);
        for name in std::iter::once(canonical).chain(entry.aliases.iter().map(|a| normalize(a))) {
            if name.is_empty() {
                debug!(entry = %entry.canonical_name, "dropping alias that normalizes to nothing");
                continue;
            }
            if seen.insert(name.clone()) {
                normalized_names.push(name);
            }
        }

        let substring_matchers = normalized_names
            .iter()
            .filter(|name| name.chars().count() >= MIN_SUBSTRING_NAME_CHARS)
            .map(|name| {
                SubstringMatcher::new(name).map_err(|err| ReferenceError::InvalidPattern {
                    canonical_name: entry.canonical_name.clone(),
                    pattern: name.clone(),
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let patterns = entry
            .patterns
            .iter()
            .map(|pattern| CompiledPattern::compile(&entry.canonical_name, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let e_numbers = entry.e_numbers.iter().filter_map(|code| ENumber::new(code)).collect();

        Ok(Self {
            entry,
            normalized_names,
            substring_matchers,
            patterns,
            e_numbers,
        })
    }

    pub fn entry(&self) -> &BannedIngredient {
        &self.entry
    }

    pub fn canonical_name(&self) -> &str {
        &self.entry.canonical_name
    }

    pub fn category(&self) -> Category {
        self.entry.category
    }

    pub fn severity(&self) -> Severity {
        self.entry.severity
    }

    /// Normalized canonical name first, then normalized aliases, deduplicated.
    pub fn normalized_names(&self) -> &[String] {
        &self.normalized_names
    }

    pub fn substring_matchers(&self) -> &[SubstringMatcher] {
        &self.substring_matchers
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn e_numbers(&self) -> &[ENumber] {
        &self.e_numbers
    }
}

/// A normalized name claimed by more than one entry. The exact-match table
/// keeps the first entry; the later one can still match through the other
/// passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    pub kept: String,
    pub shadowed: String,
}

/// Prepared reference list plus the exact-match table.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    entries: Vec<PreparedEntry>,
    exact: FxHashMap<String, usize>,
    collisions: Vec<NameCollision>,
}

impl ReferenceIndex {
    /// Prepares every entry and builds the exact-match table.
    ///
    /// Fails on duplicate canonical names, names that normalize to nothing
    /// and patterns that do not compile.
    pub fn build(entries: Vec<BannedIngredient>) -> Result<Self, ReferenceError> {
        let mut canonical_seen = FxHashSet::default();
        let mut prepared = Vec::with_capacity(entries.len());

        for (position, entry) in entries.into_iter().enumerate() {
            let entry = PreparedEntry::prepare(position, entry)?;
            if !canonical_seen.insert(entry.normalized_names[0].clone()) {
                return Err(ReferenceError::DuplicateCanonicalName(
                    entry.canonical_name().to_string(),
                ));
            }
            prepared.push(entry);
        }

        let mut exact: FxHashMap<String, usize> = FxHashMap::default();
        let mut collisions = Vec::new();
        for (position, entry) in prepared.iter().enumerate() {
            for name in &entry.normalized_names {
                match exact.get(name) {
                    Some(&kept) => {
                        let collision = NameCollision {
                            name: name.clone(),
                            kept: prepared[kept].canonical_name().to_string(),
                            shadowed: entry.canonical_name().to_string(),
                        };
                        warn!(
                            name = %collision.name,
                            kept = %collision.kept,
                            shadowed = %collision.shadowed,
                            "normalized name claimed by two reference entries"
                        );
                        collisions.push(collision);
                    }
                    None => {
                        exact.insert(name.clone(), position);
                    }
                }
            }
        }

        info!(
            entries = prepared.len(),
            names = exact.len(),
            patterns = prepared.iter().map(|e| e.patterns.len()).sum::<usize>(),
            "reference index built"
        );

        Ok(Self {
            entries: prepared,
            exact,
            collisions,
        })
    }

    pub fn entries(&self) -> &[PreparedEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&PreparedEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry owning `normalized` as one of its names.
    pub fn exact_lookup(&self, normalized: &str) -> Option<usize> {
        self.exact.get(normalized).copied()
    }

    pub fn name_collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Catalog search: entries whose canonical name or any alias contains
    /// `query` (case-insensitive), optionally limited to one category. An
    /// empty query matches every entry. Results keep list order.
    pub fn search(&self, query: &str, category: Option<Category>) -> Vec<&BannedIngredient> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .map(PreparedEntry::entry)
            .filter(|entry| category.is_none_or(|wanted| entry.category == wanted))
            .filter(|entry| {
                needle.is_empty()
                    || entry.canonical_name.to_lowercase().contains(&needle)
                    || entry.aliases.iter().any(|alias| alias.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Groups entries by category in [`Category::ALL`] order, skipping
    /// categories with no entries.
    pub fn grouped_by_category<'a>(
        entries: &[&'a BannedIngredient],
    ) -> Vec<(Category, Vec<&'a BannedIngredient>)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let members: Vec<_> = entries
                    .iter()
                    .copied()
                    .filter(|entry| entry.category == category)
                    .collect();
                (!members.is_empty()).then_some((category, members))
            })
            .collect()
    }
}
