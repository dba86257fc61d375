//! Ingredient text canonicalization.
//!
//! This crate turns raw ingredient-label text into the normalized candidate
//! terms the matcher compares against the banned-ingredient reference list.
//!
//! ## What we do
//!
//! - Fragment normalization ([`normalize`]): casing, NFKD + diacritic folding,
//!   percentage stripping, dash folding, whitespace collapsing, edge
//!   punctuation trimming, `vit.` expansion, `contains:` label stripping
//! - Bracket-aware splitting ([`split_top_level`]) that never breaks inside
//!   `(...)` or `[...]`
//! - One level of sub-ingredient extraction ([`extract_sub_ingredients`])
//! - The full pipeline with first-seen deduplication ([`split_and_normalize`])
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence, no failure modes. Empty or
//! malformed input produces empty or malformed output, never an error.
//!
//! ## Invariants worth knowing
//!
//! - `normalize(normalize(s)) == normalize(s)` for every `s`
//! - `split_and_normalize` never yields an empty term or a duplicate
//! - Output order is first-seen order, so results are stable for tests

mod normalize;
mod split;
mod whitespace;

pub use crate::normalize::normalize;
pub use crate::split::{extract_sub_ingredients, split_and_normalize, split_top_level};
pub use crate::whitespace::collapse_whitespace;
