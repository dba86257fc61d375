//! # Banned-ingredient reference data (`reference`)
//!
//! Schema, bundled data and the prepared lookup index for the banned list.
//!
//! ## Core Types
//!
//! - [`BannedIngredient`]: one authored entry (canonical name, [`Category`],
//!   [`Severity`], aliases, [`MatchPattern`]s, additive codes).
//! - [`ReferenceIndex`]: the list after preparation. Holds the exact-match
//!   table and, per entry, a [`PreparedEntry`] with normalized names,
//!   word-boundary [`SubstringMatcher`]s, [`CompiledPattern`]s and
//!   [`ENumber`]s.
//! - [`ReferenceError`]: everything that can go wrong while loading or
//!   preparing a list.
//!
//! ## Example Usage
//!
//! ```rust
//! use reference::{bundled_index, Category};
//!
//! let index = bundled_index().expect("bundled list builds");
//! let position = index.exact_lookup("soybean oil").expect("known name");
//! assert_eq!(index.entries()[position].category(), Category::SeedOil);
//!
//! let dyes = index.search("red", Some(Category::SyntheticDye));
//! assert!(!dyes.is_empty());
//! ```
//!
//! The bundled list lives in `data/banned_ingredients.yaml` and is compiled
//! into the crate. Custom lists use the same document layout and go through
//! [`load_entries_from_file`] or [`load_entries_from_str`].

mod bundled;
mod error;
mod index;
mod pattern;
mod types;

pub use crate::bundled::{bundled_entries, bundled_index, load_entries_from_file, load_entries_from_str};
pub use crate::error::ReferenceError;
pub use crate::index::{
    additive_key, normalize_additive_code, normalize_additive_tag, ENumber, NameCollision,
    PreparedEntry, ReferenceIndex, SubstringMatcher, MIN_SUBSTRING_NAME_CHARS,
};
pub use crate::pattern::CompiledPattern;
pub use crate::types::{BannedIngredient, Category, MatchPattern, Severity};
