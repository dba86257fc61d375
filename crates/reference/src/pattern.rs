use canonical::normalize;
use regex::{Regex, RegexBuilder};

use crate::error::ReferenceError;
use crate::types::MatchPattern;

/// A [`MatchPattern`] compiled to a case-insensitive regex.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn compile(canonical_name: &str, pattern: &MatchPattern) -> Result<Self, ReferenceError> {
        let invalid = |reason: String| ReferenceError::InvalidPattern {
            canonical_name: canonical_name.to_string(),
            pattern: pattern.source().to_string(),
            reason,
        };

        let expression = match pattern {
            MatchPattern::Regex(source) => {
                if source.trim().is_empty() {
                    return Err(invalid("empty expression".into()));
                }
                source.clone()
            }
            MatchPattern::Literal(text) | MatchPattern::Prefix(text) | MatchPattern::Suffix(text) => {
                let normalized = normalize(text);
                if normalized.is_empty() {
                    return Err(invalid("text is empty after normalization".into()));
                }
                let escaped = regex::escape(&normalized);
                match pattern {
                    MatchPattern::Prefix(_) => format!("^{escaped}"),
                    MatchPattern::Suffix(_) => format!("{escaped}$"),
                    _ => escaped,
                }
            }
        };

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .build()
            .map_err(|err| invalid(err.to_string()))?;

        Ok(Self {
            source: pattern.source().to_string(),
            regex,
        })
    }

    /// The pattern text as authored.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}
