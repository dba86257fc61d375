//! # Ingredient Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of `canonical` (text normalization and splitting)
//! and `reference` (the prepared banned list). It turns raw ingredient-label
//! text plus optional Open Food Facts additive tags into a list of flagged
//! banned ingredients with confidences.
//!
//! ## Passes
//!
//! Every candidate term is checked against every reference entry; the first
//! pass that hits for a (candidate, entry) pair wins:
//!
//! | Pass | Rule | Confidence |
//! |---|---|---|
//! | exact | candidate equals a normalized name | 1.00 |
//! | substring | name (4+ chars) appears on word boundaries | 0.95 |
//! | pattern | an authored [`reference::MatchPattern`] matches | 0.90 |
//! | e-number | an additive tag names one of the entry's codes | 0.95 |
//! | fuzzy | name (5+ chars) within edit distance 2 and 85% similarity | 0.70 |
//!
//! The e-number pass looks at the tags, not the text, and only runs when the
//! text produced at least one candidate. Each banned ingredient appears at
//! most once in the output, with its highest confidence.
//!
//! ## Core Types
//!
//! - [`Matcher`]: cheap-to-clone handle over an `Arc<ReferenceIndex>`.
//! - [`MatchResult`] / [`MatchType`]: one flagged ingredient.
//! - [`Verdict`] / [`AnalysisReport`]: clean, flagged or unknown plus matches.
//! - [`AnalysisInput`]: one item for [`Matcher::analyze_batch`].
//!
//! ## Example Usage
//!
//! ```rust
//! use matcher::{Matcher, MatchType, Verdict};
//!
//! let matcher = Matcher::bundled().expect("bundled list builds");
//!
//! let matches = matcher.analyze(
//!     Some("Water, Sugar, Soybean Oil (2%), Red 40 Lake"),
//!     Some(&["en:e330"]),
//! );
//! assert_eq!(matches[0].match_type, MatchType::Exact);
//! assert!(matches.iter().any(|m| m.canonical_name == "Soybean Oil"));
//!
//! let report = matcher.assess(Some("water, sea salt"), None::<&[&str]>);
//! assert_eq!(report.verdict, Verdict::Clean);
//! ```
//!
//! ## Observability
//!
//! Install an [`AnalysisMetrics`] implementation via [`set_analysis_metrics`]
//! to record per-analysis latency and counts. Each analysis also emits a
//! `tracing` debug event.

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::Matcher;
pub use crate::metrics::{set_analysis_metrics, AnalysisMetrics};
pub use crate::types::{AnalysisInput, AnalysisReport, MatchResult, MatchType, Verdict};
