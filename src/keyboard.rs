//! Keyboard-geometry substitution costs.
//!
//! Layout tables are process-wide, read-only constant data. A key is
//! addressed by `(row, column)` on one of four physical layouts, each with an
//! unshifted and a shifted plane. Substituting two characters costs the
//! geometric distance between their keys under a selectable metric, plus a
//! fixed penalty when exactly one of the two keys sits on the shifted plane.

use std::str::FromStr;

use crate::error::{ConfigError, DomainError};

/// Rows of one keyboard plane, top row first.
type Plane = [&'static str; 4];

const QWERTY_BASE: Plane = ["`1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"];
const QWERTY_SHIFT: Plane = ["~!@#$%^&*()_+", "QWERTYUIOP{}|", "ASDFGHJKL:\"", "ZXCVBNM<>?"];

const QWERTZ_BASE: Plane = ["^1234567890\u{df}\u{b4}", "qwertzuiop\u{fc}+\\", "asdfghjkl\u{f6}\u{e4}#", "yxcvbnm,.-"];
const QWERTZ_SHIFT: Plane = ["\u{b0}!\"\u{a7}$%&/()=?`", "QWERTZUIOP\u{dc}*", "ASDFGHJKL\u{d6}\u{c4}'", "YXCVBNM;:_"];

const AZERTY_BASE: Plane = ["\u{b2}&\u{e9}\"'(-\u{e8}_\u{e7}\u{e0})=", "azertyuiop^$", "qsdfghjklm\u{f9}*", "<wxcvbn,;:!"];
const AZERTY_SHIFT: Plane = ["1234567890\u{b0}+", "AZERTYUIOP\u{a8}\u{a3}", "QSDFGHJKLM%\u{b5}", ">WXCVBN?./\u{a7}"];

const DVORAK_BASE: Plane = ["`1234567890[]", "',.pyfgcrl/=\\", "aoeuidhtns-", ";qjkxbmwvz"];
const DVORAK_SHIFT: Plane = ["~!@#$%^&*(){}", "\"<>PYFGCRL?+|", "AOEUIDHTNS_", ":QJKXBMWVZ"];

/// Physical keyboard layout, or automatic detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyLayout {
    /// US QWERTY.
    #[default]
    Qwerty,
    /// German QWERTZ.
    Qwertz,
    /// French AZERTY.
    Azerty,
    /// Dvorak simplified keyboard.
    Dvorak,
    /// Pick the first layout, in declaration order, that carries both
    /// characters of a substitution pair.
    Auto,
}

/// Parses a layout name. Unknown names fail here, at configuration time.
impl FromStr for KeyLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "qwerty" => Ok(Self::Qwerty),
            "qwertz" => Ok(Self::Qwertz),
            "azerty" => Ok(Self::Azerty),
            "dvorak" => Ok(Self::Dvorak),
            "auto" => Ok(Self::Auto),
            _ => Err(ConfigError::UnknownLayout(s.to_owned())),
        }
    }
}

/// Distance metric between two key coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Taxicab distance.
    Manhattan,
    /// `ln(1 + d)` of the Euclidean distance, compressing far keys.
    LogEuclidean,
    /// `ln(1 + d)` of the Manhattan distance.
    LogManhattan,
}

impl KeyMetric {
    fn between(&self, a: KeyPos, b: KeyPos) -> f64 {
        let dr = a.row - b.row;
        let dc = a.col - b.col;
        match self {
            KeyMetric::Euclidean => (dr * dr + dc * dc).sqrt(),
            KeyMetric::Manhattan => dr.abs() + dc.abs(),
            KeyMetric::LogEuclidean => (1.0 + (dr * dr + dc * dc).sqrt()).ln(),
            KeyMetric::LogManhattan => (1.0 + dr.abs() + dc.abs()).ln(),
        }
    }
}

/// Coordinates of one key.
#[derive(Debug, Clone, Copy)]
struct KeyPos {
    row: f64,
    col: f64,
    shifted: bool,
}

const CONCRETE_LAYOUTS: [KeyLayout; 4] = [
    KeyLayout::Qwerty,
    KeyLayout::Qwertz,
    KeyLayout::Azerty,
    KeyLayout::Dvorak,
];

fn planes(layout: KeyLayout) -> (Plane, Plane) {
    match layout {
        KeyLayout::Qwerty => (QWERTY_BASE, QWERTY_SHIFT),
        KeyLayout::Qwertz => (QWERTZ_BASE, QWERTZ_SHIFT),
        KeyLayout::Azerty => (AZERTY_BASE, AZERTY_SHIFT),
        KeyLayout::Dvorak => (DVORAK_BASE, DVORAK_SHIFT),
        // Auto carries no geometry of its own.
        KeyLayout::Auto => (QWERTY_BASE, QWERTY_SHIFT),
    }
}

/// Locate `ch` on a concrete layout, checking the unshifted plane first.
fn find_key(layout: KeyLayout, ch: char) -> Option<KeyPos> {
    let (base, shift) = planes(layout);
    for (shifted, plane) in [(false, base), (true, shift)] {
        for (row, keys) in plane.iter().enumerate() {
            if let Some(col) = keys.chars().position(|k| k == ch) {
                return Some(KeyPos {
                    row: row as f64,
                    col: col as f64,
                    shifted,
                });
            }
        }
    }
    None
}

fn on_any_layout(ch: char) -> bool {
    CONCRETE_LAYOUTS.iter().any(|&l| find_key(l, ch).is_some())
}

/// Substitution cost between `a` and `b` under keyboard geometry.
///
/// * Identical characters cost `0`.
/// * A shift-state change between the two keys adds `shift_penalty` once.
/// * A character absent from the relevant layout(s) costs `failsafe` when one
///   is configured; otherwise the call fails with [`DomainError::UnknownKey`].
///   It never silently defaults to zero.
pub(crate) fn key_cost(
    layout: KeyLayout,
    metric: KeyMetric,
    shift_penalty: f64,
    failsafe: Option<f64>,
    a: char,
    b: char,
) -> Result<f64, DomainError> {
    if a == b {
        return Ok(0.0);
    }
    let located = match layout {
        KeyLayout::Auto => CONCRETE_LAYOUTS
            .iter()
            .find_map(|&l| find_key(l, a).zip(find_key(l, b))),
        _ => find_key(layout, a).zip(find_key(layout, b)),
    };
    match located {
        Some((ka, kb)) => {
            let mut cost = metric.between(ka, kb);
            if ka.shifted != kb.shifted {
                cost += shift_penalty;
            }
            Ok(cost)
        }
        None => match failsafe {
            Some(cost) => Ok(cost),
            // Report the character that is typeable nowhere, if there is one.
            None if !on_any_layout(a) => Err(DomainError::UnknownKey(a)),
            None if !on_any_layout(b) => Err(DomainError::UnknownKey(b)),
            None => Err(DomainError::UnknownKey(b)),
        },
    }
}

mod test {
    use super::*;

    #[test]
    fn test_adjacent_keys_unit_apart() {
        // q and w are horizontal neighbours on QWERTY.
        let cost = key_cost(KeyLayout::Qwerty, KeyMetric::Euclidean, 0.5, None, 'q', 'w').unwrap();
        assert_eq!(cost, 1.0);
        let cost = key_cost(KeyLayout::Qwerty, KeyMetric::Manhattan, 0.5, None, 'q', 'w').unwrap();
        assert_eq!(cost, 1.0);
    }

    #[test]
    fn test_same_key_is_free() {
        let cost = key_cost(KeyLayout::Qwerty, KeyMetric::Euclidean, 0.5, None, 'a', 'a').unwrap();
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_shift_penalty_applied_once() {
        // 'a' unshifted vs 'A' on the shifted plane, same position.
        let cost = key_cost(KeyLayout::Qwerty, KeyMetric::Euclidean, 0.5, None, 'a', 'A').unwrap();
        assert_eq!(cost, 0.5);
    }

    #[test]
    fn test_log_metric_compresses() {
        let plain = key_cost(KeyLayout::Qwerty, KeyMetric::Manhattan, 0.0, None, 'q', 'p').unwrap();
        let log = key_cost(KeyLayout::Qwerty, KeyMetric::LogManhattan, 0.0, None, 'q', 'p').unwrap();
        assert!(log < plain);
        assert_eq!(log, (1.0 + plain).ln());
    }

    #[test]
    fn test_auto_layout_picks_first_match() {
        // 'é' exists only on AZERTY; auto must land there instead of failing.
        let cost = key_cost(KeyLayout::Auto, KeyMetric::Euclidean, 0.5, None, '\u{e9}', 'a');
        assert!(cost.is_ok());
    }

    #[test]
    fn test_unknown_key_without_failsafe_fails() {
        let res = key_cost(KeyLayout::Qwerty, KeyMetric::Euclidean, 0.5, None, '\u{3b1}', 'a');
        assert_eq!(res, Err(DomainError::UnknownKey('\u{3b1}')));
    }

    #[test]
    fn test_unknown_key_with_failsafe() {
        let cost =
            key_cost(KeyLayout::Qwerty, KeyMetric::Euclidean, 0.5, Some(3.0), '\u{3b1}', 'a').unwrap();
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("dvorak".parse::<KeyLayout>().unwrap(), KeyLayout::Dvorak);
        assert!(matches!(
            "colemak".parse::<KeyLayout>(),
            Err(ConfigError::UnknownLayout(_))
        ));
    }
}
