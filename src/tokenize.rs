//! Tokenizers.
//!
//! The intersection framework only ever consumes a [`TokenMultiset`]; any
//! scheme producing one satisfies the [`Tokenizer`] contract. The three
//! tokenizers here cover the common cases (q-grams, whitespace words,
//! single characters); nothing downstream inspects how tokens were made.

use crate::error::ConfigError;
use crate::multiset::TokenMultiset;

/// Anything that can turn a string into a token multiset.
pub trait Tokenizer {
    /// Tokenize `input` into a fresh multiset.
    fn tokenize(&self, input: &str) -> TokenMultiset;
}

/// Fixed-length contiguous substrings, optionally padded so that every
/// character participates in exactly `q` grams.
#[derive(Debug, Clone)]
pub struct QGramTokenizer {
    q: usize,
    pad: bool,
}

/// Pad character framing padded q-grams.
const PAD: char = '#';

impl QGramTokenizer {
    /// Padded q-gram tokenizer. Fails on `q == 0` at construction.
    pub fn new(q: usize) -> Result<Self, ConfigError> {
        if q == 0 {
            return Err(ConfigError::ZeroQ);
        }
        Ok(QGramTokenizer { q, pad: true })
    }

    /// Disable start/stop padding.
    pub fn without_padding(mut self) -> Self {
        self.pad = false;
        self
    }
}

impl Default for QGramTokenizer {
    /// Padded bigrams.
    fn default() -> Self {
        QGramTokenizer { q: 2, pad: true }
    }
}

impl Tokenizer for QGramTokenizer {
    fn tokenize(&self, input: &str) -> TokenMultiset {
        if input.is_empty() {
            return TokenMultiset::new();
        }
        let mut chars: Vec<char> = Vec::with_capacity(input.len() + 2 * (self.q - 1));
        if self.pad {
            chars.extend(std::iter::repeat(PAD).take(self.q - 1));
        }
        chars.extend(input.chars());
        if self.pad {
            chars.extend(std::iter::repeat(PAD).take(self.q - 1));
        }
        let mut set = TokenMultiset::new();
        if chars.len() >= self.q {
            for window in chars.windows(self.q) {
                set.insert(window.iter().collect::<String>());
            }
        }
        set
    }
}

/// Whitespace-separated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, input: &str) -> TokenMultiset {
        input.split_whitespace().collect()
    }
}

/// Single characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharTokenizer;

impl Tokenizer for CharTokenizer {
    fn tokenize(&self, input: &str) -> TokenMultiset {
        input.chars().map(String::from).collect()
    }
}

mod test {
    use super::*;

    #[test]
    fn test_bigrams_padded() {
        let set = QGramTokenizer::default().tokenize("ab");
        // #a, ab, b#
        assert_eq!(set.total(), 3.0);
        assert_eq!(set.count("ab"), 1.0);
        assert_eq!(set.count("#a"), 1.0);
        assert_eq!(set.count("b#"), 1.0);
    }

    #[test]
    fn test_bigrams_unpadded_short_input() {
        let set = QGramTokenizer::default().without_padding().tokenize("a");
        assert!(set.is_empty());
    }

    #[test]
    fn test_zero_q_rejected() {
        assert_eq!(QGramTokenizer::new(0).unwrap_err(), ConfigError::ZeroQ);
    }

    #[test]
    fn test_whitespace_words() {
        let set = WhitespaceTokenizer.tokenize("the quick the");
        assert_eq!(set.count("the"), 2.0);
        assert_eq!(set.count("quick"), 1.0);
    }

    #[test]
    fn test_chars() {
        let set = CharTokenizer.tokenize("aab");
        assert_eq!(set.count("a"), 2.0);
        assert_eq!(set.count("b"), 1.0);
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(WhitespaceTokenizer.tokenize("").is_empty());
        assert!(CharTokenizer.tokenize("").is_empty());
        // Padded q-grams of nothing are still nothing.
        assert!(QGramTokenizer::default().tokenize("").is_empty());
    }
}
