use thiserror::Error;

/// Invalid configuration, rejected eagerly when a cost model, tokenizer or
/// intersector is built. Never raised during a comparison call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An operation cost was negative. The engine computes with non-negative
    /// costs only; derived coefficient layers may invert sign downstream.
    #[error("negative {op} cost {value}")]
    NegativeCost {
        /// Operation the cost was configured for (`ins`, `del`, ...).
        op: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A keyboard layout name did not match any known layout.
    #[error("unknown keyboard layout {0:?}")]
    UnknownLayout(String),
    /// An alignment mode name did not match any known mode.
    #[error("unknown alignment mode {0:?}")]
    UnknownMode(String),
    /// An intersection kind name did not match any known kind.
    #[error("unknown intersection kind {0:?}")]
    UnknownIntersection(String),
    /// A phonetic feature-weight vector had the wrong arity.
    #[error("feature weight vector has length {got}, expected {expected}")]
    FeatureWeightLength {
        /// Width of the feature vector.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },
    /// A feature weight was negative.
    #[error("negative feature weight {0}")]
    NegativeFeatureWeight(f64),
    /// A q-gram tokenizer was configured with `q == 0`.
    #[error("q-gram length must be at least 1")]
    ZeroQ,
    /// A fuzzy/group-linkage similarity threshold was outside `(0, 1]`.
    #[error("similarity threshold {0} outside (0, 1]")]
    BadThreshold(f64),
    /// An intersection kind that compares tokens pairwise was configured
    /// without an auxiliary similarity metric.
    #[error("intersection kind {0} requires an auxiliary similarity metric")]
    MissingMetric(&'static str),
}

/// Input outside the configured model, raised per call. The computation is
/// deterministic and pure, so these are never retried and never swallowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A character was not present on any configured keyboard layout and no
    /// failsafe cost was set. Substitution must never silently cost zero.
    #[error("character {0:?} is on no configured keyboard layout and no failsafe cost is set")]
    UnknownKey(char),
    /// A character has no phonetic feature entry.
    #[error("character {0:?} has no phonetic feature entry")]
    UnknownPhone(char),
}
