//! Edit scripts.
//!
//! A script is an ordered sequence of operations which, replayed against the
//! source, reproduces the target exactly. Operations are emitted in target
//! order by the backtrace walk; [`apply`] is the replay side of that
//! contract.

/// One edit operation. Indices are 0-based positions in the source/target
/// the operation was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Copy `src[src]` through unchanged.
    Match {
        /// Source position.
        src: usize,
        /// Target position.
        tar: usize,
    },
    /// Replace `src[src]` with `ch`.
    Substitute {
        /// Source position.
        src: usize,
        /// Target position.
        tar: usize,
        /// Replacement character.
        ch: char,
    },
    /// Insert `ch` at target position `tar`.
    Insert {
        /// Target position.
        tar: usize,
        /// Inserted character.
        ch: char,
    },
    /// Drop `src[src]`.
    Delete {
        /// Source position.
        src: usize,
    },
    /// Swap the adjacent pair `src[src]`, `src[src + 1]` into target
    /// positions `tar`, `tar + 1`. Long-range transpositions are decomposed
    /// by the backtrace into substitutions plus the intervening
    /// inserts/deletes, so `Transpose` is always adjacent.
    Transpose {
        /// Source position of the first character of the pair.
        src: usize,
        /// Target position of the first character of the pair.
        tar: usize,
    },
}

/// Replay `script` against `src`, producing the target it encodes.
///
/// ### Example
/// ```
/// use strdist::script::{apply, EditOp};
///
/// let script = [
///     EditOp::Match { src: 0, tar: 0 },
///     EditOp::Substitute { src: 1, tar: 1, ch: 'x' },
///     EditOp::Insert { tar: 2, ch: '!' },
/// ];
/// assert_eq!(apply("ab", &script), "ax!");
/// ```
pub fn apply(src: &str, script: &[EditOp]) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    for op in script {
        match *op {
            EditOp::Match { src, .. } => out.push(chars[src]),
            EditOp::Substitute { ch, .. } => out.push(ch),
            EditOp::Insert { ch, .. } => out.push(ch),
            EditOp::Delete { .. } => {}
            EditOp::Transpose { src, .. } => {
                out.push(chars[src + 1]);
                out.push(chars[src]);
            }
        }
    }
    out
}

mod test {
    use super::*;

    #[test]
    fn test_apply_transpose() {
        let script = [EditOp::Transpose { src: 0, tar: 0 }];
        assert_eq!(apply("ab", &script), "ba");
    }

    #[test]
    fn test_apply_delete_only() {
        let script = [
            EditOp::Delete { src: 0 },
            EditOp::Match { src: 1, tar: 0 },
        ];
        assert_eq!(apply("ab", &script), "b");
    }

    #[test]
    fn test_apply_empty_script() {
        assert_eq!(apply("", &[]), "");
    }
}
