use reference::ReferenceError;
use thiserror::Error;

use crate::config::ConfigLoadError;

/// Errors surfaced by the umbrella crate's fallible entry points.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("config error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("invalid barcode {0:?}: expected 8 to 14 digits")]
    InvalidBarcode(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("invalid product JSON: {0}")]
    Json(#[from] serde_json::Error),
}
