#![warn(missing_docs)]

//! Core engines for pairwise string comparison.
//!
//! Two engines carry nearly the whole catalog of string measures built on
//! top of this crate:
//!
//! * a configurable dynamic-programming **alignment engine**
//!   ([`align::Alignment`]) with pluggable substitution-cost models
//!   ([`cost::CostModel`]), four operation sets ([`mode::AlignMode`]) and
//!   backtrace extraction (edit script, LCS, longest common substring);
//! * a **token-multiset intersection framework**
//!   ([`intersect::Intersector`]) reducing two tokenized strings to four
//!   cardinalities under crisp, fuzzy, soft or group-linkage semantics.
//!
//! Configuration is validated eagerly and immutable afterwards; every call
//! allocates its own working state, so configured comparators are safe to
//! share between threads.
//!
//! One open question is inherited deliberately: fuzzy intersection pairs
//! leftover tokens greedily in descending similarity, an approximation of
//! the optimal bipartite assignment. Whether any caller needs the exact
//! assignment is unresolved; the greedy behavior is kept and pinned by
//! tests rather than silently "fixed".

pub mod align;
pub mod config;
pub mod cost;
pub mod error;
pub mod features;
pub mod groups;
pub mod intersect;
pub mod keyboard;
pub mod matrix;
pub mod mode;
pub mod multiset;
pub mod script;
pub mod task;
pub mod tokenize;
pub mod trace;

pub use align::Alignment;
pub use config::AlignConfig;
pub use cost::CostModel;
pub use error::{ConfigError, DomainError};
pub use intersect::{IntersectionKind, IntersectionResult, Intersector};
pub use mode::AlignMode;
pub use multiset::TokenMultiset;
pub use task::AlignTask;

/// Plain Levenshtein distance: unit costs, [`AlignMode::SimpleEdit`].
///
/// ### Example
/// ```
/// assert_eq!(strdist::distance("kitten", "sitting"), 3.0);
/// ```
pub fn distance(src: impl AsRef<str>, tar: impl AsRef<str>) -> f64 {
    // The default model is constant-cost and cannot hit a domain error.
    match Alignment::run(&AlignConfig::default(), src, tar) {
        Ok(alignment) => alignment.raw_cost,
        Err(_) => f64::NAN,
    }
}

/// Normalized plain Levenshtein distance, `raw / max(len(src), len(tar))`.
pub fn normalized_distance(src: impl AsRef<str>, tar: impl AsRef<str>) -> f64 {
    match Alignment::run(&AlignConfig::default(), src, tar) {
        Ok(alignment) => alignment.normalized,
        Err(_) => f64::NAN,
    }
}
