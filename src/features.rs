//! Tri-state phonetic feature vectors.
//!
//! Every supported letter maps to a fixed-width vector of articulatory
//! features, each `absent`, `-`, `+` or `±`. Substitution cost is the
//! weighted share of *disagreeing* features, scaled by the configured
//! substitution cost. The explicit vector is numerically equivalent to the
//! classic bit-packed encoding but can be inspected feature by feature.

use crate::error::DomainError;

/// Number of features in a vector.
pub const FEATURE_COUNT: usize = 16;

/// Articulatory features, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Feature {
    Syllabic,
    Consonantal,
    Sonorant,
    Continuant,
    Nasal,
    Lateral,
    Strident,
    Voice,
    Labial,
    Round,
    Coronal,
    Anterior,
    Dorsal,
    High,
    Low,
    Back,
}

/// Value of one feature for one phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureState {
    /// Feature does not apply to this phone; carries no weight.
    Absent,
    /// Feature negative.
    Minus,
    /// Feature positive.
    Plus,
    /// Phone occurs with either value; agrees with `-` and `+`.
    Either,
}

use FeatureState::{Absent as A, Either as E, Minus as M, Plus as P};

/// One feature vector.
pub type FeatureVec = [FeatureState; FEATURE_COUNT];

// Letters stand in for their most common English phone; `c`, `x` and `j`
// use `Either` where their realizations disagree.
//                  syl cons son cont nas lat str voi lab rnd cor ant dor hi  low back
const LETTER_A: FeatureVec = [P, M, P, P, M, M, A, P, M, M, M, A, P, M, P, E];
const LETTER_B: FeatureVec = [M, P, M, M, M, M, M, P, P, M, M, P, M, A, A, A];
const LETTER_C: FeatureVec = [M, P, M, E, M, M, E, M, M, M, E, E, E, E, A, E];
const LETTER_D: FeatureVec = [M, P, M, M, M, M, M, P, M, M, P, P, M, A, A, A];
const LETTER_E: FeatureVec = [P, M, P, P, M, M, A, P, M, M, M, A, P, M, M, M];
const LETTER_F: FeatureVec = [M, P, M, P, M, M, P, M, P, M, M, P, M, A, A, A];
const LETTER_G: FeatureVec = [M, P, M, M, M, M, M, P, M, M, M, M, P, P, A, P];
const LETTER_H: FeatureVec = [M, M, M, P, M, M, M, M, M, M, M, A, M, A, A, A];
const LETTER_I: FeatureVec = [P, M, P, P, M, M, A, P, M, M, M, A, P, P, M, M];
const LETTER_J: FeatureVec = [M, P, M, E, M, M, P, P, M, M, P, M, M, P, A, A];
const LETTER_K: FeatureVec = [M, P, M, M, M, M, M, M, M, M, M, M, P, P, A, P];
const LETTER_L: FeatureVec = [M, P, P, P, M, P, M, P, M, M, P, P, M, A, A, A];
const LETTER_M: FeatureVec = [M, P, P, M, P, M, M, P, P, M, M, P, M, A, A, A];
const LETTER_N: FeatureVec = [M, P, P, M, P, M, M, P, M, M, P, P, M, A, A, A];
const LETTER_O: FeatureVec = [P, M, P, P, M, M, A, P, P, P, M, A, P, M, M, P];
const LETTER_P: FeatureVec = [M, P, M, M, M, M, M, M, P, M, M, P, M, A, A, A];
const LETTER_Q: FeatureVec = [M, P, M, M, M, M, M, M, M, M, M, M, P, P, A, P];
const LETTER_R: FeatureVec = [M, P, P, P, M, M, M, P, M, M, P, M, M, A, A, A];
const LETTER_S: FeatureVec = [M, P, M, P, M, M, P, M, M, M, P, P, M, A, A, A];
const LETTER_T: FeatureVec = [M, P, M, M, M, M, M, M, M, M, P, P, M, A, A, A];
const LETTER_U: FeatureVec = [P, M, P, P, M, M, A, P, P, P, M, A, P, P, M, P];
const LETTER_V: FeatureVec = [M, P, M, P, M, M, P, P, P, M, M, P, M, A, A, A];
const LETTER_W: FeatureVec = [M, M, P, P, M, M, M, P, P, P, M, A, P, P, M, P];
const LETTER_X: FeatureVec = [M, P, M, E, M, M, P, M, M, M, E, E, E, E, A, A];
const LETTER_Y: FeatureVec = [E, M, P, P, M, M, M, P, M, M, M, A, P, P, M, M];
const LETTER_Z: FeatureVec = [M, P, M, P, M, M, P, P, M, M, P, P, M, A, A, A];

/// Feature vector for a letter, case-insensitive.
pub fn feature_vector(ch: char) -> Result<&'static FeatureVec, DomainError> {
    match ch.to_ascii_lowercase() {
        'a' => Ok(&LETTER_A),
        'b' => Ok(&LETTER_B),
        'c' => Ok(&LETTER_C),
        'd' => Ok(&LETTER_D),
        'e' => Ok(&LETTER_E),
        'f' => Ok(&LETTER_F),
        'g' => Ok(&LETTER_G),
        'h' => Ok(&LETTER_H),
        'i' => Ok(&LETTER_I),
        'j' => Ok(&LETTER_J),
        'k' => Ok(&LETTER_K),
        'l' => Ok(&LETTER_L),
        'm' => Ok(&LETTER_M),
        'n' => Ok(&LETTER_N),
        'o' => Ok(&LETTER_O),
        'p' => Ok(&LETTER_P),
        'q' => Ok(&LETTER_Q),
        'r' => Ok(&LETTER_R),
        's' => Ok(&LETTER_S),
        't' => Ok(&LETTER_T),
        'u' => Ok(&LETTER_U),
        'v' => Ok(&LETTER_V),
        'w' => Ok(&LETTER_W),
        'x' => Ok(&LETTER_X),
        'y' => Ok(&LETTER_Y),
        'z' => Ok(&LETTER_Z),
        other => Err(DomainError::UnknownPhone(other)),
    }
}

fn agrees(a: FeatureState, b: FeatureState) -> Option<bool> {
    match (a, b) {
        // Features applying to neither phone carry no weight.
        (A, A) => None,
        (E, _) | (_, E) => Some(true),
        _ => Some(a == b),
    }
}

/// Weighted agreement between the feature vectors of `a` and `b`, in `[0, 1]`.
///
/// `weights` must have [`FEATURE_COUNT`] entries; `None` weighs every feature
/// equally. Weight validation happens at cost-model construction.
pub fn feature_similarity(
    weights: Option<&[f64]>,
    a: char,
    b: char,
) -> Result<f64, DomainError> {
    let va = feature_vector(a)?;
    let vb = feature_vector(b)?;
    let mut agreed = 0.0;
    let mut counted = 0.0;
    for (idx, (&fa, &fb)) in va.iter().zip(vb.iter()).enumerate() {
        let w = weights.map_or(1.0, |ws| ws[idx]);
        if let Some(same) = agrees(fa, fb) {
            counted += w;
            if same {
                agreed += w;
            }
        }
    }
    if counted == 0.0 {
        // Every applicable feature was weighted out.
        Ok(if a.eq_ignore_ascii_case(&b) { 1.0 } else { 0.0 })
    } else {
        Ok(agreed / counted)
    }
}

/// Substitution cost: `scale * (1 - similarity)`.
pub(crate) fn feature_cost(
    weights: Option<&[f64]>,
    scale: f64,
    a: char,
    b: char,
) -> Result<f64, DomainError> {
    if a.eq_ignore_ascii_case(&b) {
        return Ok(0.0);
    }
    Ok(scale * (1.0 - feature_similarity(weights, a, b)?))
}

mod test {
    use super::*;

    #[test]
    fn test_self_similarity_is_one() {
        for ch in 'a'..='z' {
            assert_eq!(feature_similarity(None, ch, ch).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_voicing_pair_close() {
        // t/d differ only in voice; t/o differ in nearly everything.
        let td = feature_similarity(None, 't', 'd').unwrap();
        let to = feature_similarity(None, 't', 'o').unwrap();
        assert!(td > 0.9);
        assert!(td > to);
    }

    #[test]
    fn test_cost_scales() {
        let half = feature_cost(None, 0.5, 't', 'o').unwrap();
        let full = feature_cost(None, 1.0, 't', 'o').unwrap();
        assert!((full - 2.0 * half).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_phone() {
        assert_eq!(
            feature_similarity(None, '3', 'a'),
            Err(DomainError::UnknownPhone('3'))
        );
    }

    #[test]
    fn test_weights_steer_similarity() {
        // Zero out every feature except voice: t and d become maximally far.
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[Feature::Voice as usize] = 1.0;
        assert_eq!(feature_similarity(Some(&weights), 't', 'd').unwrap(), 0.0);
        assert_eq!(feature_similarity(Some(&weights), 'b', 'd').unwrap(), 1.0);
    }
}
