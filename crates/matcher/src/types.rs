use reference::{Category, Severity};
use serde::{Deserialize, Serialize};

/// Which of the five passes produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// Candidate equals a normalized name.
    Exact,
    /// A normalized name appears in the candidate on word boundaries.
    Substring,
    /// One of the entry's authored patterns matches the candidate.
    Pattern,
    /// An additive tag names one of the entry's codes.
    #[serde(rename = "e-number")]
    ENumber,
    /// Candidate is within a small edit distance of a normalized name.
    Fuzzy,
}

impl MatchType {
    /// Fixed confidence attached to matches of this kind.
    pub fn confidence(&self) -> f32 {
        match self {
            MatchType::Exact => 1.0,
            MatchType::Substring => 0.95,
            MatchType::Pattern => 0.90,
            MatchType::ENumber => 0.95,
            MatchType::Fuzzy => 0.70,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Substring => "substring",
            MatchType::Pattern => "pattern",
            MatchType::ENumber => "e-number",
            MatchType::Fuzzy => "fuzzy",
        }
    }
}

/// A flagged ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The candidate term, or the raw additive tag for e-number matches.
    pub ingredient: String,
    /// The normalized name, pattern source or additive code that matched.
    pub matched_against: String,
    pub canonical_name: String,
    pub category: Category,
    pub severity: Severity,
    /// In `[0, 1]`, fixed per [`MatchType`].
    pub confidence: f32,
    pub match_type: MatchType,
}

/// Overall outcome for one ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Text was present and nothing matched.
    Clean,
    /// At least one banned ingredient matched.
    Flagged,
    /// No usable ingredient text.
    Unknown,
}

impl Verdict {
    pub fn from_matches(text: Option<&str>, matches: &[MatchResult]) -> Self {
        if !matches.is_empty() {
            return Verdict::Flagged;
        }
        match text {
            Some(text) if !text.trim().is_empty() => Verdict::Clean,
            _ => Verdict::Unknown,
        }
    }
}

/// Matches plus the verdict derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub verdict: Verdict,
    /// Ordered by descending confidence.
    pub matches: Vec<MatchResult>,
}

impl AnalysisReport {
    pub fn is_clean(&self) -> bool {
        self.verdict == Verdict::Clean
    }

    /// Distinct categories among the matches, in match order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::new();
        for m in &self.matches {
            if !out.contains(&m.category) {
                out.push(m.category);
            }
        }
        out
    }
}

/// One item of a batch analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub additive_tags: Option<Vec<String>>,
}

impl AnalysisInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            ingredients_text: Some(text.into()),
            additive_tags: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additive_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}
