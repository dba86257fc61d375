use thiserror::Error;

/// Errors raised while loading or indexing a reference list.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference list: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse reference list: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid pattern {pattern:?} for {canonical_name}: {reason}")]
    InvalidPattern {
        canonical_name: String,
        pattern: String,
        reason: String,
    },

    #[error("duplicate canonical name: {0}")]
    DuplicateCanonicalName(String),

    #[error("entry #{0} has an empty canonical name")]
    EmptyName(usize),
}
