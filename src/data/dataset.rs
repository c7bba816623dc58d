// ============================================================
// Layer 4 — Classification Dataset
// ============================================================
// Implements Burn's Dataset trait over encoded samples so the
// classifier's DataLoader can call .get(index) and .len().

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One encoded, fixed-length sample ready for the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSample {
    pub sequence: Vec<u32>,
    pub label_id: usize,
}

impl EncodedSample {
    pub fn new(sequence: Vec<u32>, label_id: usize) -> Self {
        Self { sequence, label_id }
    }

    /// Positions holding a real word (not padding)
    pub fn word_count(&self) -> usize {
        self.sequence.iter().filter(|&&i| i != 0).count()
    }
}

pub struct ClassificationDataset {
    samples: Vec<EncodedSample>,
}

impl ClassificationDataset {
    pub fn new(samples: Vec<EncodedSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn label_ids(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label_id).collect()
    }
}

impl Dataset<EncodedSample> for ClassificationDataset {
    fn get(&self, index: usize) -> Option<EncodedSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let ds = ClassificationDataset::new(vec![
            EncodedSample::new(vec![0, 0, 4], 1),
            EncodedSample::new(vec![3, 2, 1], 0),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).map(|s| s.label_id), Some(0));
        assert!(ds.get(2).is_none());
        assert_eq!(ds.label_ids(), vec![1, 0]);
    }

    #[test]
    fn test_word_count_ignores_padding() {
        assert_eq!(EncodedSample::new(vec![0, 0, 5, 9], 0).word_count(), 2);
    }
}
