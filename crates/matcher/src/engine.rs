use std::sync::Arc;
use std::time::Instant;

use canonical::split_and_normalize;
use rayon::prelude::*;
use reference::{BannedIngredient, PreparedEntry, ReferenceError, ReferenceIndex};
use tracing::debug;

use crate::metrics::metrics_recorder;
use crate::types::{AnalysisInput, AnalysisReport, MatchResult, MatchType, Verdict};


/// Names shorter than this never take part in fuzzy matching.
pub const MIN_FUZZY_NAME_CHARS: usize = 5;
/// Largest edit distance accepted by the fuzzy pass.
pub const MAX_FUZZY_DISTANCE: usize = 2;
/// Smallest `1 - distance / max_len` accepted by the fuzzy pass.
pub const MIN_FUZZY_SIMILARITY: f64 = 0.85;

/// Banned-ingredient matcher over a shared, prepared reference index.
///
/// Cloning is cheap; clones share the index.
#[derive(Debug, Clone)]
pub struct Matcher {
    index: Arc<ReferenceIndex>,
}

impl Matcher {
    /// Construct a matcher that owns `index`.
    pub fn new(index: ReferenceIndex) -> Self {
        Self::with_index_arc(Arc::new(index))
    }

    /// Construct a matcher from a shared index handle.
    pub fn with_index_arc(index: Arc<ReferenceIndex>) -> Self {
        Self { index }
    }

    /// Build the index for `entries` and wrap it.
    pub fn from_entries(entries: Vec<BannedIngredient>) -> Result<Self, ReferenceError> {
        Ok(Self::new(ReferenceIndex::build(entries)?))
    }

    /// Matcher over the reference list compiled into `reference`.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Ok(Self::new(reference::bundled_index()?))
    }

    pub fn index(&self) -> &Arc<ReferenceIndex> {
        &self.index
    }

    /// Run all five passes and return the best match per banned ingredient,
    /// ordered by descending confidence.
    ///
    /// Absent or blank text yields no matches, even when tags are given.
    /// Absent tags skip the e-number pass.
    pub fn analyze<S: AsRef<str>>(
        &self,
        text: Option<&str>,
        additive_tags: Option<&[S]>,
    ) -> Vec<MatchResult> {
        let start = Instant::now();

        let candidates = match text {
            Some(text) => split_and_normalize(text),
            None => Vec::new(),
        };
        if candidates.is_empty() {
            return Vec::new();
        }

        let entries = self.index.entries();
        let mut best = vec![0.0f32; entries.len()];
        let mut raw = Vec::new();

        for candidate in &candidates {
            let exact = self.index.exact_lookup(candidate);
            for (position, entry) in entries.iter().enumerate() {
                let is_exact = exact == Some(position);
                if let Some((match_type, matched_against)) =
                    match_candidate(candidate, entry, is_exact, best[position])
                {
                    best[position] = match_type.confidence();
                    raw.push((position, build_result(entry, candidate, matched_against, match_type)));
                }
            }
        }

        if let Some(tags) = additive_tags {
            for (position, entry) in entries.iter().enumerate() {
                if best[position] >= MatchType::ENumber.confidence() {
                    continue;
                }
                if let Some((tag, code)) = match_additive_tags(entry, tags) {
                    best[position] = MatchType::ENumber.confidence();
                    raw.push((position, build_result(entry, tag, code.to_string(), MatchType::ENumber)));
                }
            }
        }

        let matches = resolve(raw, entries.len());

        debug!(
            candidates = candidates.len(),
            matches = matches.len(),
            "analyzed ingredient list"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_analysis(start.elapsed(), candidates.len(), matches.len());
        }

        matches
    }

    /// `true` when [`Matcher::analyze`] finds nothing.
    pub fn is_clean<S: AsRef<str>>(&self, text: Option<&str>, additive_tags: Option<&[S]>) -> bool {
        self.analyze(text, additive_tags).is_empty()
    }

    /// Matches plus the derived [`Verdict`].
    pub fn assess<S: AsRef<str>>(
        &self,
        text: Option<&str>,
        additive_tags: Option<&[S]>,
    ) -> AnalysisReport {
        let matches = self.analyze(text, additive_tags);
        AnalysisReport {
            verdict: Verdict::from_matches(text, &matches),
            matches,
        }
    }

    /// Assess many inputs in parallel. Output order follows input order.
    pub fn analyze_batch(&self, inputs: &[AnalysisInput]) -> Vec<AnalysisReport> {
        inputs
            .par_iter()
            .map(|input| {
                self.assess(
                    input.ingredients_text.as_deref(),
                    input.additive_tags.as_deref(),
                )
            })
            .collect()
    }
}

/// Passes 1, 2, 3 and 5 for one (candidate, entry) pair. The first pass that
/// hits wins; passes that cannot beat `best` are skipped.
fn match_candidate(
    candidate: &str,
    entry: &PreparedEntry,
    is_exact: bool,
    best: f32,
) -> Option<(MatchType, String)> {
    if is_exact && best < MatchType::Exact.confidence() {
        return Some((MatchType::Exact, candidate.to_string()));
    }

    if best < MatchType::Substring.confidence() {
        if let Some(matcher) = entry
            .substring_matchers()
            .iter()
            .find(|matcher| matcher.is_match(candidate))
        {
            return Some((MatchType::Substring, matcher.name().to_string()));
        }
    }

    if best < MatchType::Pattern.confidence() {
        if let Some(pattern) = entry.patterns().iter().find(|pattern| pattern.is_match(candidate)) {
            return Some((MatchType::Pattern, pattern.source().to_string()));
        }
    }

    if best < MatchType::Fuzzy.confidence() {
        if let Some(name) = entry
            .normalized_names()
            .iter()
            .find(|name| is_fuzzy_match(candidate, name))
        {
            return Some((MatchType::Fuzzy, name.clone()));
        }
    }

    None
}

/// Pass 4: first (code, tag) pair, in code order, that names the same
/// additive.
fn match_additive_tags<'a, S: AsRef<str>>(
    entry: &'a PreparedEntry,
    tags: &'a [S],
) -> Option<(&'a str, &'a str)> {
    entry.e_numbers().iter().find_map(|code| {
        tags.iter()
            .map(|tag| tag.as_ref())
            .find(|tag| code.matches_tag(tag))
            .map(|tag| (tag, code.code()))
    })
}

fn is_fuzzy_match(candidate: &str, name: &str) -> bool {
    let name_len = name.chars().count();
    if name_len < MIN_FUZZY_NAME_CHARS {
        return false;
    }
    let candidate_len = candidate.chars().count();
    if candidate_len.abs_diff(name_len) > MAX_FUZZY_DISTANCE {
        return false;
    }

    let distance = strsim::levenshtein(candidate, name);
    if distance > MAX_FUZZY_DISTANCE {
        return false;
    }
    let similarity = 1.0 - distance as f64 / candidate_len.max(name_len) as f64;
    similarity >= MIN_FUZZY_SIMILARITY
}

fn build_result(
    entry: &PreparedEntry,
    ingredient: &str,
    matched_against: String,
    match_type: MatchType,
) -> MatchResult {
    MatchResult {
        ingredient: ingredient.to_string(),
        matched_against,
        canonical_name: entry.canonical_name().to_string(),
        category: entry.category(),
        severity: entry.severity(),
        confidence: match_type.confidence(),
        match_type,
    }
}

/// Keep the highest-confidence match per entry (first seen wins ties), then
/// order by descending confidence. The sort is stable, so equal confidences
/// keep first-seen order.
fn resolve(raw: Vec<(usize, MatchResult)>, entry_count: usize) -> Vec<MatchResult> {
    let mut best: Vec<Option<MatchResult>> = vec![None; entry_count];
    let mut order = Vec::new();

    for (position, result) in raw {
        match &best[position] {
            Some(existing) if existing.confidence >= result.confidence => {}
            Some(_) => best[position] = Some(result),
            None => {
                order.push(position);
                best[position] = Some(result);
            }
        }
    }

    let mut matches: Vec<MatchResult> = order
        .into_iter()
        .filter_map(|position| best[position].take())
        .collect();

    matches.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}
