//! Cost configuration for the alignment engine.
//!
//! A [`CostModel`] is fixed once at construction and shared by every call; it
//! holds no per-call state, so a model (and anything built on top of it) is
//! safe to use from multiple threads.

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, DomainError};
use crate::features::{self, FEATURE_COUNT};
use crate::groups;
use crate::keyboard::{self, KeyLayout, KeyMetric};

/// Per-operation base costs. All values must be non-negative; the engine
/// itself never works with negative costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Costs {
    /// Cost of inserting one symbol into the source.
    pub ins: f64,
    /// Cost of deleting one symbol from the source.
    pub del: f64,
    /// Cost of substituting one symbol for another (mismatch cost).
    pub sub: f64,
    /// Cost of transposing two symbols.
    pub trans: f64,
    /// Cost of opening a gap run, affine-gap mode only.
    pub gap_open: f64,
    /// Cost of extending an open gap run by one symbol, affine-gap mode only.
    pub gap_extend: f64,
}

impl Default for Costs {
    /// Unit edit costs; a single indel under affine gaps also costs 1.
    fn default() -> Self {
        Costs {
            ins: 1.0,
            del: 1.0,
            sub: 1.0,
            trans: 1.0,
            gap_open: 1.0,
            gap_extend: 0.5,
        }
    }
}

impl Costs {
    fn validate(&self) -> Result<(), ConfigError> {
        for (op, value) in [
            ("ins", self.ins),
            ("del", self.del),
            ("sub", self.sub),
            ("trans", self.trans),
            ("gap_open", self.gap_open),
            ("gap_extend", self.gap_extend),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeCost { op, value });
            }
        }
        Ok(())
    }
}

/// Strategy supplying the substitution cost `sub(a, b)`.
///
/// Chosen once at construction; every variant returns `0` for `a == b`.
#[derive(Debug, Clone, Default)]
pub enum SubstitutionModel {
    /// Plain edit distance: any mismatch costs `costs.sub`.
    #[default]
    Constant,
    /// Letter-group lookup: same phonetic group costs `1`, otherwise
    /// `costs.sub`, with the `h`/`w` digraph rule. See [`crate::groups`].
    LetterGroups,
    /// Weighted tri-state feature-vector agreement, scaled by `costs.sub`.
    /// See [`crate::features`].
    PhoneticFeatures {
        /// Per-feature weights; `None` weighs every feature equally. Length
        /// must equal [`FEATURE_COUNT`].
        weights: Option<Vec<f64>>,
    },
    /// Key-coordinate distance on a physical keyboard layout.
    Keyboard {
        /// Layout, or [`KeyLayout::Auto`] to detect per pair.
        layout: KeyLayout,
        /// Geometry metric between keys.
        metric: KeyMetric,
        /// Added once when exactly one of the keys is shifted.
        shift_penalty: f64,
        /// Cost for characters absent from the layout(s). With `None`, such
        /// characters fail the call with [`DomainError::UnknownKey`].
        failsafe: Option<f64>,
    },
}

/// Position taper. When enabled, every operation cost is multiplied by a
/// function of (position, length), weighting early-string edits more heavily.
#[derive(Clone, Default)]
pub enum Taper {
    /// No tapering (default).
    #[default]
    Off,
    /// `1 + (len - pos) / len`: factor 2 at the first position, decaying
    /// linearly towards 1.
    Linear,
    /// Caller-supplied multiplier `f(pos, len)`.
    Custom(Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>),
}

impl fmt::Debug for Taper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Taper::Off => write!(f, "Off"),
            Taper::Linear => write!(f, "Linear"),
            Taper::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Taper {
    /// Multiplier for an edit touching 0-based `pos` out of `len`.
    pub fn factor(&self, pos: usize, len: usize) -> f64 {
        match self {
            Taper::Off => 1.0,
            Taper::Linear => {
                if len == 0 {
                    1.0
                } else {
                    1.0 + (len - pos.min(len)) as f64 / len as f64
                }
            }
            Taper::Custom(f) => f(pos, len),
        }
    }

    /// Whether tapering is enabled at all.
    pub fn enabled(&self) -> bool {
        !matches!(self, Taper::Off)
    }
}

/// Validated cost configuration consumed by [`crate::align::Alignment`].
#[derive(Debug, Clone)]
pub struct CostModel {
    costs: Costs,
    substitution: SubstitutionModel,
    taper: Taper,
}

impl Default for CostModel {
    /// Unit costs, constant substitution, no taper. Cannot fail validation.
    fn default() -> Self {
        CostModel {
            costs: Costs::default(),
            substitution: SubstitutionModel::Constant,
            taper: Taper::Off,
        }
    }
}

impl CostModel {
    /// Start building a cost model.
    pub fn builder() -> CostModelBuilder {
        CostModelBuilder::default()
    }

    /// Base operation costs.
    pub fn costs(&self) -> &Costs {
        &self.costs
    }

    /// Position taper.
    pub fn taper(&self) -> &Taper {
        &self.taper
    }

    /// Substitution cost between `a` and `b`, before tapering.
    ///
    /// Only the keyboard and phonetic-feature models can fail, and only for
    /// characters outside their tables.
    pub fn sub_cost(&self, a: char, b: char) -> Result<f64, DomainError> {
        if a == b {
            return Ok(0.0);
        }
        match &self.substitution {
            SubstitutionModel::Constant => Ok(self.costs.sub),
            SubstitutionModel::LetterGroups => Ok(groups::group_cost(1.0, self.costs.sub, a, b)),
            SubstitutionModel::PhoneticFeatures { weights } => {
                features::feature_cost(weights.as_deref(), self.costs.sub, a, b)
            }
            SubstitutionModel::Keyboard {
                layout,
                metric,
                shift_penalty,
                failsafe,
            } => keyboard::key_cost(*layout, *metric, *shift_penalty, *failsafe, a, b),
        }
    }
}

/// Builder for [`CostModel`]. All validation happens in [`build`], so an
/// invalid configuration is rejected before the first comparison.
///
/// [`build`]: CostModelBuilder::build
///
/// ### Example
/// ```
/// use strdist::cost::{CostModel, Costs, SubstitutionModel, Taper};
///
/// let model = CostModel::builder()
///     .costs(Costs { sub: 2.0, ..Costs::default() })
///     .substitution(SubstitutionModel::LetterGroups)
///     .taper(Taper::Linear)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CostModelBuilder {
    costs: Costs,
    substitution: SubstitutionModel,
    taper: Taper,
}

impl CostModelBuilder {
    /// Set base operation costs.
    pub fn costs(mut self, costs: Costs) -> Self {
        self.costs = costs;
        self
    }

    /// Set the substitution strategy.
    pub fn substitution(mut self, substitution: SubstitutionModel) -> Self {
        self.substitution = substitution;
        self
    }

    /// Set the position taper.
    pub fn taper(mut self, taper: Taper) -> Self {
        self.taper = taper;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<CostModel, ConfigError> {
        self.costs.validate()?;
        match &self.substitution {
            SubstitutionModel::PhoneticFeatures {
                weights: Some(weights),
            } => {
                if weights.len() != FEATURE_COUNT {
                    return Err(ConfigError::FeatureWeightLength {
                        expected: FEATURE_COUNT,
                        got: weights.len(),
                    });
                }
                if let Some(&w) = weights.iter().find(|w| !(**w >= 0.0)) {
                    return Err(ConfigError::NegativeFeatureWeight(w));
                }
            }
            SubstitutionModel::Keyboard {
                shift_penalty,
                failsafe,
                ..
            } => {
                if !(*shift_penalty >= 0.0) {
                    return Err(ConfigError::NegativeCost {
                        op: "shift_penalty",
                        value: *shift_penalty,
                    });
                }
                if let Some(failsafe) = failsafe {
                    if !(*failsafe >= 0.0) {
                        return Err(ConfigError::NegativeCost {
                            op: "failsafe",
                            value: *failsafe,
                        });
                    }
                }
            }
            _ => {}
        }
        Ok(CostModel {
            costs: self.costs,
            substitution: self.substitution,
            taper: self.taper,
        })
    }
}

mod test {
    use super::*;

    #[test]
    fn test_default_model_unit_costs() {
        let model = CostModel::default();
        assert_eq!(model.costs().ins, 1.0);
        assert_eq!(model.sub_cost('a', 'a').unwrap(), 0.0);
        assert_eq!(model.sub_cost('a', 'b').unwrap(), 1.0);
    }

    #[test]
    fn test_negative_cost_rejected_at_build() {
        let res = CostModel::builder()
            .costs(Costs {
                del: -1.0,
                ..Costs::default()
            })
            .build();
        assert_eq!(
            res.unwrap_err(),
            ConfigError::NegativeCost {
                op: "del",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_nan_cost_rejected_at_build() {
        let res = CostModel::builder()
            .costs(Costs {
                ins: f64::NAN,
                ..Costs::default()
            })
            .build();
        assert!(matches!(res, Err(ConfigError::NegativeCost { op: "ins", .. })));
    }

    #[test]
    fn test_feature_weight_arity_checked() {
        let res = CostModel::builder()
            .substitution(SubstitutionModel::PhoneticFeatures {
                weights: Some(vec![1.0; 3]),
            })
            .build();
        assert_eq!(
            res.unwrap_err(),
            ConfigError::FeatureWeightLength {
                expected: FEATURE_COUNT,
                got: 3
            }
        );
    }

    #[test]
    fn test_linear_taper_decays() {
        let taper = Taper::Linear;
        assert_eq!(taper.factor(0, 10), 2.0);
        assert!(taper.factor(9, 10) < taper.factor(0, 10));
        assert_eq!(Taper::Off.factor(0, 10), 1.0);
    }

    #[test]
    fn test_custom_taper() {
        let taper = Taper::Custom(Arc::new(|pos, _| if pos == 0 { 3.0 } else { 1.0 }));
        assert_eq!(taper.factor(0, 5), 3.0);
        assert_eq!(taper.factor(4, 5), 1.0);
    }

    #[test]
    fn test_group_model_wired_through() {
        let model = CostModel::builder()
            .costs(Costs {
                sub: 2.0,
                ..Costs::default()
            })
            .substitution(SubstitutionModel::LetterGroups)
            .build()
            .unwrap();
        assert_eq!(model.sub_cost('d', 't').unwrap(), 1.0);
        assert_eq!(model.sub_cost('b', 'z').unwrap(), 2.0);
    }
}
