use std::str::FromStr;

use crate::error::ConfigError;

/// Which operation set the aligner may use.
///
/// Tie-break order between equal-cost predecessors is fixed for every mode:
/// **match > substitution > deletion > insertion > transposition**, evaluated
/// in that order. It decides which backtrace (and therefore which edit
/// script) a call produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignMode {
    /// Insert/delete/substitute only, no transposition.
    #[default]
    SimpleEdit,
    /// Optimal string alignment: adjacent swaps allowed, but a transposed
    /// pair may not be edited again. Distance is always `>=` the
    /// [`AlignMode::FullTransposition`] distance for the same inputs.
    RestrictedTransposition,
    /// True Damerau: unrestricted-distance transpositions, found through a
    /// last-seen-position table so the `O(n*m)` bound is kept.
    FullTransposition,
    /// Gotoh-style affine gaps: opening a gap run costs `gap_open`, each
    /// further symbol `gap_extend`.
    AffineGap(GapScope),
}

/// Scoring scope for [`AlignMode::AffineGap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapScope {
    /// Global (Needleman-Wunsch style): both sequences aligned end to end.
    #[default]
    Global,
    /// Local in the min-cost sense: gaps before and after the matched region
    /// of the target are free, the answer is the cheapest placement of the
    /// source inside the target.
    Local,
}

/// Parses a mode name. Unknown names fail here, at configuration time.
impl FromStr for AlignMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "simple-edit" | "levenshtein" => Ok(Self::SimpleEdit),
            "osa" | "restricted" | "restricted-transposition" => Ok(Self::RestrictedTransposition),
            "damerau" | "full" | "full-transposition" => Ok(Self::FullTransposition),
            "affine" | "affine-global" => Ok(Self::AffineGap(GapScope::Global)),
            "affine-local" => Ok(Self::AffineGap(GapScope::Local)),
            _ => Err(ConfigError::UnknownMode(s.to_owned())),
        }
    }
}

mod test {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(
            "osa".parse::<AlignMode>().unwrap(),
            AlignMode::RestrictedTransposition
        );
        assert_eq!(
            "affine-local".parse::<AlignMode>().unwrap(),
            AlignMode::AffineGap(GapScope::Local)
        );
        assert!(matches!(
            "hamming".parse::<AlignMode>(),
            Err(ConfigError::UnknownMode(_))
        ));
    }
}
