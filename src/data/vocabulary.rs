// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Ranks every distinct word of the corpus by frequency and gives
// it a 1-based integer index:
//
//   "the cat saw the dog"  →  the:1  cat:2  saw:3  dog:4
//
// Index 0 is never assigned; encoded sequences use it for
// padding. Words with equal counts keep the order in which they
// first appeared in the corpus, so the mapping is deterministic.
//
// The mapping is unbounded: all distinct words get an index.
// The word budget (max_words) is stored alongside but only
// applied later, by the encoder and the embedding matrix
// builder, which ignore every index >= max_words.
//
// Reference: Rust Book §8 (HashMaps)
//            Rust Book §13 (Iterators)

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::data::tokenizer::tokenize;

/// Frequency-ranked word → index mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VocabularyRecord", into = "VocabularyRecord")]
pub struct Vocabulary {
    /// Word → 1-based index
    word_index: HashMap<String, usize>,
    /// words[i - 1] is the word with index i
    words: Vec<String>,
    /// Total occurrences, parallel to `words`
    counts: Vec<u64>,
    /// Number of documents containing the word, parallel to `words`
    doc_counts: Vec<u64>,
    /// Number of texts the vocabulary was built from
    document_count: usize,
    /// Budget applied when encoding and building the matrix
    max_words: usize,
}

/// On-disk form; the lookup map is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct VocabularyRecord {
    max_words:      usize,
    document_count: usize,
    words:          Vec<String>,
    counts:         Vec<u64>,
    doc_counts:     Vec<u64>,
}

impl From<VocabularyRecord> for Vocabulary {
    fn from(r: VocabularyRecord) -> Self {
        let word_index = r.words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i + 1))
            .collect();
        Self {
            word_index,
            words:          r.words,
            counts:         r.counts,
            doc_counts:     r.doc_counts,
            document_count: r.document_count,
            max_words:      r.max_words,
        }
    }
}

impl From<Vocabulary> for VocabularyRecord {
    fn from(v: Vocabulary) -> Self {
        Self {
            max_words:      v.max_words,
            document_count: v.document_count,
            words:          v.words,
            counts:         v.counts,
            doc_counts:     v.doc_counts,
        }
    }
}

impl Vocabulary {
    /// Count words over `texts` and rank them by descending frequency.
    pub fn build<S: AsRef<str>>(texts: &[S], max_words: usize) -> Self {
        // Slot per distinct word in first-seen order
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut seen:   Vec<(String, u64, u64)> = Vec::new();

        for text in texts {
            let mut in_doc: HashSet<usize> = HashSet::new();
            for word in tokenize(text.as_ref()) {
                let slot = match slots.get(&word) {
                    Some(&slot) => slot,
                    None => {
                        slots.insert(word.clone(), seen.len());
                        seen.push((word, 0, 0));
                        seen.len() - 1
                    }
                };
                seen[slot].1 += 1;
                if in_doc.insert(slot) {
                    seen[slot].2 += 1;
                }
            }
        }

        // sort_by is stable: equal counts keep first-seen order
        seen.sort_by(|a, b| b.1.cmp(&a.1));

        let mut words      = Vec::with_capacity(seen.len());
        let mut counts     = Vec::with_capacity(seen.len());
        let mut doc_counts = Vec::with_capacity(seen.len());
        let mut word_index = HashMap::with_capacity(seen.len());
        for (i, (word, count, docs)) in seen.into_iter().enumerate() {
            word_index.insert(word.clone(), i + 1);
            words.push(word);
            counts.push(count);
            doc_counts.push(docs);
        }

        tracing::info!(
            "Found {} unique tokens in {} texts (budget {})",
            words.len(),
            texts.len(),
            max_words
        );

        Self {
            word_index,
            words,
            counts,
            doc_counts,
            document_count: texts.len(),
            max_words,
        }
    }

    /// 1-based index of `word`, regardless of the budget
    pub fn index(&self, word: &str) -> Option<usize> {
        self.word_index.get(word).copied()
    }

    /// Word stored at 1-based `index`
    pub fn word(&self, index: usize) -> Option<&str> {
        index.checked_sub(1)
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    /// Occurrences of `word` across the corpus
    pub fn word_count(&self, word: &str) -> Option<u64> {
        self.index(word).map(|i| self.counts[i - 1])
    }

    /// Number of documents `word` appears in
    pub fn doc_count(&self, word: &str) -> Option<u64> {
        self.index(word).map(|i| self.doc_counts[i - 1])
    }

    /// Iterate (word, index) pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.words.iter().enumerate().map(|(i, w)| (w.as_str(), i + 1))
    }

    /// Number of distinct words (also the largest assigned index)
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Full word → index map
    pub fn word_index(&self) -> &HashMap<String, usize> {
        &self.word_index
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_by_descending_frequency() {
        let v = Vocabulary::build(&["b a b", "c b a"], 100);
        assert_eq!(v.index("b"), Some(1));
        assert_eq!(v.index("a"), Some(2));
        assert_eq!(v.index("c"), Some(3));
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let v = Vocabulary::build(&["zebra apple mango", "mango apple zebra"], 100);
        assert_eq!(v.word(1), Some("zebra"));
        assert_eq!(v.word(2), Some("apple"));
        assert_eq!(v.word(3), Some("mango"));
    }

    #[test]
    fn test_indices_are_dense_from_one() {
        let v = Vocabulary::build(&["one two three two three three"], 100);
        let mut indices: Vec<usize> = v.iter().map(|(_, i)| i).collect();
        indices.sort();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(v.word(0), None);
    }

    #[test]
    fn test_mapping_is_not_truncated_by_budget() {
        let v = Vocabulary::build(&["a b c d e"], 2);
        assert_eq!(v.len(), 5);
        assert_eq!(v.index("e"), Some(5));
        assert_eq!(v.max_words(), 2);
    }

    #[test]
    fn test_counts_and_doc_counts() {
        let v = Vocabulary::build(&["Cat cat dog", "cat"], 10);
        assert_eq!(v.word_count("cat"), Some(3));
        assert_eq!(v.doc_count("cat"), Some(2));
        assert_eq!(v.doc_count("dog"), Some(1));
        assert_eq!(v.document_count(), 2);
    }

    #[test]
    fn test_empty_corpus() {
        let texts: Vec<String> = Vec::new();
        let v = Vocabulary::build(&texts, 10);
        assert!(v.is_empty());
    }

    #[test]
    fn test_serde_rebuilds_lookup() {
        let v = Vocabulary::build(&["x y y"], 10);
        let json = serde_json::to_string(&v).unwrap();
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.index("y"), Some(1));
    }
}
