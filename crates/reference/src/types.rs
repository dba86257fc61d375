use std::fmt;

use serde::{Deserialize, Serialize};

/// Grouping used for display and filtering. Has no effect on matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SeedOil,
    ArtificialSweetener,
    Preservative,
    SyntheticDye,
    Emulsifier,
    ProcessingAgent,
    FlavorEnhancer,
    TransFat,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 9] = [
        Category::SeedOil,
        Category::ArtificialSweetener,
        Category::Preservative,
        Category::SyntheticDye,
        Category::Emulsifier,
        Category::ProcessingAgent,
        Category::FlavorEnhancer,
        Category::TransFat,
        Category::Other,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SeedOil => "seed_oil",
            Category::ArtificialSweetener => "artificial_sweetener",
            Category::Preservative => "preservative",
            Category::SyntheticDye => "synthetic_dye",
            Category::Emulsifier => "emulsifier",
            Category::ProcessingAgent => "processing_agent",
            Category::FlavorEnhancer => "flavor_enhancer",
            Category::TransFat => "trans_fat",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SeedOil => "Seed Oil",
            Category::ArtificialSweetener => "Artificial Sweetener",
            Category::Preservative => "Preservative",
            Category::SyntheticDye => "Synthetic Dye",
            Category::Emulsifier => "Emulsifier",
            Category::ProcessingAgent => "Processing Agent",
            Category::FlavorEnhancer => "Flavor Enhancer",
            Category::TransFat => "Trans Fat",
            Category::Other => "Other Additive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::SeedOil => "Industrial seed and vegetable oils high in omega-6",
            Category::ArtificialSweetener => "Synthetic or highly processed sugar substitutes",
            Category::Preservative => "Chemical preservatives linked to health concerns",
            Category::SyntheticDye => "Artificial food colorings derived from petroleum",
            Category::Emulsifier => "Additives that may disrupt gut microbiome",
            Category::ProcessingAgent => "Chemicals used in industrial food processing",
            Category::FlavorEnhancer => "Additives that artificially enhance taste",
            Category::TransFat => "Artificially created trans fatty acids",
            Category::Other => "Other concerning food additives",
        }
    }

    /// Parses the wire name (`seed_oil`) or the label (`Seed Oil`),
    /// ignoring case.
    pub fn parse(value: &str) -> Option<Category> {
        let wanted = value.trim();
        Category::ALL.into_iter().find(|category| {
            category.as_str().eq_ignore_ascii_case(wanted)
                || category.label().eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural matcher for ingredient variants that plain names miss.
///
/// Literal, prefix and suffix texts are normalized before compilation, so
/// they can be authored the way they appear on a label. Regex sources are
/// used as written. Everything is matched case-insensitively against
/// normalized candidate terms.
///
/// Serialized adjacently tagged:
///
/// ```yaml
/// - { kind: prefix, value: 'vegetable oil' }
/// - { kind: regex, value: '\bred\s*40\b' }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MatchPattern {
    /// Candidate contains the text anywhere.
    Literal(String),
    /// Candidate starts with the text.
    Prefix(String),
    /// Candidate ends with the text.
    Suffix(String),
    /// Authored regular expression (no look-around).
    Regex(String),
}

impl MatchPattern {
    /// The text as authored, used as `matched_against` in match results.
    pub fn source(&self) -> &str {
        match self {
            MatchPattern::Literal(s)
            | MatchPattern::Prefix(s)
            | MatchPattern::Suffix(s)
            | MatchPattern::Regex(s) => s,
        }
    }
}

/// One entry of the banned-ingredient reference list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannedIngredient {
    /// Display name, unique across the list.
    pub canonical_name: String,
    pub category: Category,
    pub severity: Severity,
    /// Alternate names; order only matters for display.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<MatchPattern>,
    /// Additive codes such as `E102`.
    #[serde(default)]
    pub e_numbers: Vec<String>,
}

impl BannedIngredient {
    /// Minimal entry with no aliases, patterns or codes.
    pub fn new(canonical_name: impl Into<String>, category: Category, severity: Severity) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            category,
            severity,
            aliases: Vec::new(),
            patterns: Vec::new(),
            e_numbers: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_pattern(mut self, pattern: MatchPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn with_e_numbers<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.e_numbers.extend(codes.into_iter().map(Into::into));
        self
    }
}
