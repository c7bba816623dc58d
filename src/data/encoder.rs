// ============================================================
// Layer 4 — Sequence Encoder
// ============================================================
// Turns one text into a fixed-length sequence of word indices.
//
//   1. Tokenize with the same rule the vocabulary was built with
//   2. Replace each word by its index, dropping words that are
//      unknown or whose index is outside the word budget
//      (index >= max_words)
//   3. Pad or truncate to exactly `max_len` values
//
// Padding and truncation both default to the front ("pre"):
//
//   max_len = 5, indices [7, 3]              → [0, 0, 0, 7, 3]
//   max_len = 3, indices [9, 8, 7, 6, 5]     → [7, 6, 5]
//
// Keeping the trailing window of a long document is what the
// classifier is trained on, so this default must not change.
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::data::tokenizer::tokenize;
use crate::data::vocabulary::Vocabulary;

/// Index written into unused positions
pub const PAD_INDEX: u32 = 0;

/// Which end of a sequence padding or truncation applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The front of the sequence
    #[default]
    Pre,
    /// The back of the sequence
    Post,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pre"  => Ok(Side::Pre),
            "post" => Ok(Side::Post),
            other  => Err(format!("unknown side '{other}' (expected pre or post)")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Pre  => write!(f, "pre"),
            Side::Post => write!(f, "post"),
        }
    }
}

/// Encodes texts against a vocabulary into fixed-length sequences.
pub struct SequenceEncoder<'a> {
    vocabulary: &'a Vocabulary,
    max_words:  usize,
    max_len:    usize,
    padding:    Side,
    truncating: Side,
}

impl<'a> SequenceEncoder<'a> {
    /// Encoder using the vocabulary's own word budget
    pub fn new(vocabulary: &'a Vocabulary, max_len: usize) -> Self {
        Self::with_budget(vocabulary, vocabulary.max_words(), max_len)
    }

    pub fn with_budget(vocabulary: &'a Vocabulary, max_words: usize, max_len: usize) -> Self {
        Self {
            vocabulary,
            max_words,
            max_len,
            padding:    Side::Pre,
            truncating: Side::Pre,
        }
    }

    pub fn with_padding(mut self, side: Side) -> Self {
        self.padding = side;
        self
    }

    pub fn with_truncating(mut self, side: Side) -> Self {
        self.truncating = side;
        self
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Word indices of `text` inside the budget, before padding
    pub fn indices(&self, text: &str) -> Vec<u32> {
        tokenize(text)
            .iter()
            .filter_map(|w| self.vocabulary.index(w))
            .filter(|&i| i < self.max_words)
            .map(|i| i as u32)
            .collect()
    }

    /// Encode one text into exactly `max_len` indices
    pub fn encode(&self, text: &str) -> Vec<u32> {
        pad_sequence(self.indices(text), self.max_len, self.padding, self.truncating)
    }

    /// Encode every text, preserving order
    pub fn encode_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<u32>> {
        let sequences: Vec<Vec<u32>> = texts.iter().map(|t| self.encode(t.as_ref())).collect();
        tracing::debug!("Encoded {} texts to length {}", sequences.len(), self.max_len);
        sequences
    }
}

/// Pad with PAD_INDEX or truncate `seq` to exactly `max_len` values.
pub fn pad_sequence(mut seq: Vec<u32>, max_len: usize, padding: Side, truncating: Side) -> Vec<u32> {
    if seq.len() > max_len {
        match truncating {
            Side::Pre  => { seq.drain(..seq.len() - max_len); }
            Side::Post => seq.truncate(max_len),
        }
        return seq;
    }

    let missing = max_len - seq.len();
    match padding {
        Side::Pre => {
            let mut out = vec![PAD_INDEX; missing];
            out.extend_from_slice(&seq);
            out
        }
        Side::Post => {
            seq.resize(max_len, PAD_INDEX);
            seq
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// "w0 w1 ... w{n-1}" with every word distinct
    fn numbered_text(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_left_pads_short_sequences() {
        let v   = Vocabulary::build(&["a b"], 100);
        let enc = SequenceEncoder::new(&v, 5);
        assert_eq!(enc.encode("a b"), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_keeps_trailing_window_of_long_text() {
        let text = numbered_text(1500);
        let v    = Vocabulary::build(&[text.as_str()], 20_000);
        let enc  = SequenceEncoder::new(&v, 1000);
        let seq  = enc.encode(&text);

        // All counts tie, so w{i} has index i + 1
        let expected: Vec<u32> = (500..1500).map(|i| i as u32 + 1).collect();
        assert_eq!(seq, expected);
    }

    #[test]
    fn test_length_and_range_bound() {
        let corpus = [numbered_text(3000), "short text".to_string(), String::new()];
        let v      = Vocabulary::build(&corpus, 20_000);
        let enc    = SequenceEncoder::new(&v, 1000);
        for text in &corpus {
            let seq = enc.encode(text);
            assert_eq!(seq.len(), 1000);
            assert!(seq.iter().all(|&i| (i as usize) < 20_000));
        }
    }

    #[test]
    fn test_drops_out_of_budget_and_unknown_words() {
        // Indices: a=1 b=2 c=3
        let v   = Vocabulary::build(&["a a a b b c"], 3);
        let enc = SequenceEncoder::new(&v, 4);
        // c has index 3 >= budget 3, zzz is unknown
        assert_eq!(enc.indices("c a zzz b"), vec![1, 2]);
        assert_eq!(enc.encode("c a zzz b"), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_post_padding_and_truncating() {
        assert_eq!(pad_sequence(vec![1, 2], 4, Side::Post, Side::Pre), vec![1, 2, 0, 0]);
        assert_eq!(pad_sequence(vec![1, 2, 3, 4], 2, Side::Pre, Side::Post), vec![1, 2]);
        assert_eq!(pad_sequence(vec![1, 2, 3, 4], 2, Side::Pre, Side::Pre), vec![3, 4]);
    }

    #[test]
    fn test_zero_length_target() {
        assert!(pad_sequence(vec![1, 2, 3], 0, Side::Pre, Side::Pre).is_empty());
    }

    #[test]
    fn test_encode_all_preserves_order() {
        let v   = Vocabulary::build(&["x y"], 10);
        let enc = SequenceEncoder::new(&v, 2);
        assert_eq!(enc.encode_all(&["y", "x"]), vec![vec![0, 2], vec![0, 1]]);
    }
}
