//! Letter-group substitution costs.
//!
//! Letters that tend to encode the same sound are binned into groups; a
//! substitution inside a group is cheap, across groups it costs the full
//! mismatch cost. `h` and `w` act as digraph letters (th, wh, sh, ...) and
//! substitute at group cost against anything.

/// Phonetic letter groups. A letter may sit in several groups.
const GROUPS: [&str; 10] = [
    "aeiouy", "bp", "ckq", "dt", "lr", "mn", "gj", "fpv", "sxz", "csz",
];

/// Letters subject to the digraph rule.
const DIGRAPH: [char; 2] = ['h', 'w'];

fn share_group(a: char, b: char) -> bool {
    GROUPS
        .iter()
        .any(|g| g.contains(a) && g.contains(b))
}

/// Substitution cost between `a` and `b` under the letter-group model.
///
/// * `0` on an exact (case-insensitive) match.
/// * `group_cost` when both letters share a group, or either is a digraph
///   letter.
/// * `mismatch_cost` otherwise. Characters outside `a..=z` never share a
///   group and always pay the mismatch cost.
pub(crate) fn group_cost(group_cost: f64, mismatch_cost: f64, a: char, b: char) -> f64 {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    if a == b {
        0.0
    } else if share_group(a, b) || DIGRAPH.contains(&a) || DIGRAPH.contains(&b) {
        group_cost
    } else {
        mismatch_cost
    }
}

mod test {
    use super::*;

    #[test]
    fn test_match_is_free() {
        assert_eq!(group_cost(1.0, 2.0, 'a', 'a'), 0.0);
        assert_eq!(group_cost(1.0, 2.0, 'a', 'A'), 0.0);
    }

    #[test]
    fn test_same_group() {
        assert_eq!(group_cost(1.0, 2.0, 'd', 't'), 1.0);
        assert_eq!(group_cost(1.0, 2.0, 'a', 'y'), 1.0);
        // p sits in both "bp" and "fpv".
        assert_eq!(group_cost(1.0, 2.0, 'p', 'v'), 1.0);
    }

    #[test]
    fn test_digraph_letters() {
        assert_eq!(group_cost(1.0, 2.0, 'h', 'x'), 1.0);
        assert_eq!(group_cost(1.0, 2.0, 'g', 'w'), 1.0);
    }

    #[test]
    fn test_cross_group_mismatch() {
        assert_eq!(group_cost(1.0, 2.0, 'b', 'z'), 2.0);
        assert_eq!(group_cost(1.0, 2.0, '1', '2'), 2.0);
    }
}
