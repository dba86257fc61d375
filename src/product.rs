//! Screening of Open Food Facts product documents.
//!
//! [`ProductResponse`] mirrors the `/api/v2/product/{barcode}` envelope and
//! [`ProductDocument`] the subset of product fields screening needs. Fetching
//! is left to the caller; this module only interprets the JSON.

use matcher::{MatchResult, Matcher, Verdict};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScreenError;

static BARCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8,14}$").expect("barcode regex"));

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Product fields used for screening. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_front_url: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub ingredients_text_en: Option<String>,
    #[serde(default)]
    pub additives_tags: Option<Vec<String>>,
    #[serde(default)]
    pub categories_tags: Option<Vec<String>>,
}

impl ProductDocument {
    /// English ingredients text, else the generic one. Blank values count
    /// as missing.
    pub fn ingredients_text(&self) -> Option<&str> {
        non_blank(&self.ingredients_text_en).or_else(|| non_blank(&self.ingredients_text))
    }

    pub fn display_name(&self) -> &str {
        non_blank(&self.product_name).unwrap_or(UNKNOWN_PRODUCT)
    }

    pub fn brand(&self) -> Option<&str> {
        non_blank(&self.brands)
    }

    /// Front image, else the generic image.
    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image_front_url).or_else(|| non_blank(&self.image_url))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Open Food Facts product lookup envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub code: Option<String>,
    /// `0` when the product is unknown.
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub status_verbose: Option<String>,
    #[serde(default)]
    pub product: Option<ProductDocument>,
}

impl ProductResponse {
    pub fn from_json(json: &str) -> Result<Self, ScreenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The product, with the envelope's `code` filled in when the product
    /// itself has none.
    pub fn into_product(self) -> Result<ProductDocument, ScreenError> {
        let code = self.code.unwrap_or_default();
        match (self.status, self.product) {
            (Some(0), _) | (_, None) => Err(ScreenError::ProductNotFound(code)),
            (_, Some(mut product)) => {
                if non_blank(&product.code).is_none() && !code.is_empty() {
                    product.code = Some(code);
                }
                Ok(product)
            }
        }
    }
}

/// Checks that `barcode` is 8 to 14 ASCII digits, ignoring surrounding
/// whitespace, and returns the trimmed value.
pub fn validate_barcode(barcode: &str) -> Result<&str, ScreenError> {
    let trimmed = barcode.trim();
    if BARCODE.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(ScreenError::InvalidBarcode(barcode.to_string()))
    }
}

/// Screening outcome for one product, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductScreening {
    pub barcode: String,
    pub product_name: String,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub ingredients_text: Option<String>,
    pub verdict: Verdict,
    pub flagged_ingredients: Vec<MatchResult>,
    #[serde(default)]
    pub categories_tags: Vec<String>,
}

/// Validates the product barcode and screens its ingredients and additive
/// tags with `matcher`.
pub fn screen_product(
    matcher: &Matcher,
    product: &ProductDocument,
) -> Result<ProductScreening, ScreenError> {
    let barcode = validate_barcode(product.code.as_deref().unwrap_or_default())?;
    let ingredients_text = product.ingredients_text();

    let report = matcher.assess(ingredients_text, product.additives_tags.as_deref());
    debug!(
        barcode,
        verdict = ?report.verdict,
        flagged = report.matches.len(),
        "screened product"
    );

    Ok(ProductScreening {
        barcode: barcode.to_string(),
        product_name: product.display_name().to_string(),
        brand: product.brand().map(str::to_string),
        image_url: product.image().map(str::to_string),
        ingredients_text: ingredients_text.map(str::to_string),
        verdict: report.verdict,
        flagged_ingredients: report.matches,
        categories_tags: product.categories_tags.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_validation() {
        assert_eq!(validate_barcode("3017620422003").unwrap(), "3017620422003");
        assert_eq!(validate_barcode(" 12345678 ").unwrap(), "12345678");
        assert!(validate_barcode("1234567").is_err());
        assert!(validate_barcode("123456789012345").is_err());
        assert!(validate_barcode("12345abc").is_err());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("١٢٣٤٥٦٧٨").is_err());
    }

    #[test]
    fn ingredients_text_prefers_english_and_skips_blanks() {
        let mut doc = ProductDocument {
            ingredients_text: Some("sucre, huile de palme".into()),
            ingredients_text_en: Some("sugar, palm oil".into()),
            ..Default::default()
        };
        assert_eq!(doc.ingredients_text(), Some("sugar, palm oil"));

        doc.ingredients_text_en = Some("   ".into());
        assert_eq!(doc.ingredients_text(), Some("sucre, huile de palme"));

        doc.ingredients_text = None;
        assert_eq!(doc.ingredients_text(), None);
    }

    #[test]
    fn display_fields_fall_back() {
        let doc = ProductDocument {
            image_url: Some("https://img/generic.jpg".into()),
            ..Default::default()
        };
        assert_eq!(doc.display_name(), "Unknown Product");
        assert_eq!(doc.brand(), None);
        assert_eq!(doc.image(), Some("https://img/generic.jpg"));

        let doc = ProductDocument {
            image_url: Some("https://img/generic.jpg".into()),
            image_front_url: Some("https://img/front.jpg".into()),
            ..doc
        };
        assert_eq!(doc.image(), Some("https://img/front.jpg"));
    }

    #[test]
    fn envelope_status_zero_is_not_found() {
        let response = ProductResponse::from_json(
            r#"{"code":"0000000000000","status":0,"status_verbose":"product not found"}"#,
        )
        .unwrap();
        match response.into_product() {
            Err(ScreenError::ProductNotFound(code)) => assert_eq!(code, "0000000000000"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn envelope_without_product_is_not_found() {
        let response = ProductResponse::from_json(r#"{"status":1}"#).unwrap();
        assert!(matches!(response.into_product(), Err(ScreenError::ProductNotFound(_))));
    }

    #[test]
    fn envelope_code_fills_missing_product_code() {
        let response = ProductResponse::from_json(
            r#"{"code":"12345678","status":1,"product":{"product_name":"Crackers","unknown_field":[1,2]}}"#,
        )
        .unwrap();
        let product = response.into_product().unwrap();
        assert_eq!(product.code.as_deref(), Some("12345678"));
        assert_eq!(product.display_name(), "Crackers");
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(ProductResponse::from_json("{"), Err(ScreenError::Json(_))));
    }
}
