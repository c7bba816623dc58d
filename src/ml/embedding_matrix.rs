// ============================================================
// Layer 5 — Embedding Matrix Builder
// ============================================================
// Combines the vocabulary and the pre-trained embedding index
// into the dense weight table of the classifier's embedding
// layer:
//
//   rows = min(max_words, largest_vocabulary_index + 1)
//
//   row 0          → always zero (padding index)
//   row i (i ≥ 1)  → vector of the word with index i,
//                    or the OOV fill if the index has no vector
//
// OOV fill is an explicit option:
//   Zero    → leave the row at zero (the default)
//   Uniform → draw from [-scale, scale) with a seeded RNG
//
// Building is deterministic: the same vocabulary, index and
// policy always give bit-identical matrices. Rows are filled in
// vocabulary index order so even the Uniform fill is stable.
//
// Reference: Burn Book §3 (Tensors)
//            rand crate documentation (StdRng, Rng::gen_range)

use burn::tensor::{backend::Backend, Tensor, TensorData};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::Vocabulary;
use crate::error::{Error, Result};
use crate::ml::embedding_index::EmbeddingIndex;

/// How rows of words without a pre-trained vector are filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OovPolicy {
    #[default]
    Zero,
    Uniform { scale: f32, seed: u64 },
}

/// Coverage of the vocabulary rows by the embedding index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixStats {
    /// Vocabulary rows copied from the embedding index
    pub found: usize,
    /// Vocabulary rows without a pre-trained vector
    pub missing: usize,
}

impl MatrixStats {
    /// Fraction of vocabulary rows that received a pre-trained vector
    pub fn coverage(&self) -> f64 {
        let total = self.found + self.missing;
        if total == 0 { 0.0 } else { self.found as f64 / total as f64 }
    }
}

/// Row-major (rows × dim) embedding weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EmbeddingMatrixRecord", into = "EmbeddingMatrixRecord")]
pub struct EmbeddingMatrix {
    rows: usize,
    dim:  usize,
    /// Whether the classifier may fine-tune this table
    trainable: bool,
    stats: MatrixStats,
    data: Vec<f32>,
}

/// On-disk form; the weight count is checked against the shape on load.
#[derive(Serialize, Deserialize)]
struct EmbeddingMatrixRecord {
    rows:      usize,
    dim:       usize,
    trainable: bool,
    stats:     MatrixStats,
    data:      Vec<f32>,
}

impl TryFrom<EmbeddingMatrixRecord> for EmbeddingMatrix {
    type Error = Error;

    fn try_from(r: EmbeddingMatrixRecord) -> Result<Self> {
        let expected = r.rows.checked_mul(r.dim);
        if expected != Some(r.data.len()) {
            return Err(Error::InvalidConfig(format!(
                "embedding matrix {}x{} holds {} weights",
                r.rows,
                r.dim,
                r.data.len()
            )));
        }
        Ok(Self {
            rows:      r.rows,
            dim:       r.dim,
            trainable: r.trainable,
            stats:     r.stats,
            data:      r.data,
        })
    }
}

impl From<EmbeddingMatrix> for EmbeddingMatrixRecord {
    fn from(m: EmbeddingMatrix) -> Self {
        Self {
            rows:      m.rows,
            dim:       m.dim,
            trainable: m.trainable,
            stats:     m.stats,
            data:      m.data,
        }
    }
}

impl OovPolicy {
    /// Reject uniform ranges that cannot be sampled.
    /// `2 * scale` must stay finite for the sampler.
    pub fn validate(&self) -> Result<()> {
        match *self {
            OovPolicy::Zero => Ok(()),
            OovPolicy::Uniform { scale, .. } => {
                if scale > 0.0 && (2.0 * scale).is_finite() {
                    Ok(())
                } else {
                    Err(Error::InvalidConfig(format!(
                        "uniform OOV scale must be positive and finite, got {scale}"
                    )))
                }
            }
        }
    }
}

impl EmbeddingMatrix {
    /// Build the matrix for `vocabulary` under the word budget `max_words`.
    pub fn build(
        vocabulary: &Vocabulary,
        max_words:  usize,
        index:      &EmbeddingIndex,
        policy:     OovPolicy,
    ) -> Result<Self> {
        policy.validate()?;

        let dim  = index.dim();
        let rows = max_words.min(vocabulary.len() + 1);
        let mut data  = vec![0.0f32; rows * dim];
        let mut stats = MatrixStats::default();

        let mut rng = match policy {
            OovPolicy::Uniform { seed, .. } => Some(StdRng::seed_from_u64(seed)),
            OovPolicy::Zero => None,
        };

        for (word, i) in vocabulary.iter() {
            if i >= rows {
                // iter() is in index order: every later index is out of budget too
                break;
            }
            let row = &mut data[i * dim..(i + 1) * dim];
            match index.get(word) {
                Some(vector) => {
                    row.copy_from_slice(vector);
                    stats.found += 1;
                }
                None => {
                    stats.missing += 1;
                    if let (Some(rng), OovPolicy::Uniform { scale, .. }) = (rng.as_mut(), policy) {
                        row.iter_mut().for_each(|x| *x = rng.gen_range(-scale..scale));
                    }
                }
            }
        }

        tracing::info!(
            "Embedding matrix {}x{}: {} rows from pre-trained vectors, {} without ({:.1}% coverage)",
            rows,
            dim,
            stats.found,
            stats.missing,
            stats.coverage() * 100.0,
        );

        Ok(Self { rows, dim, trainable: false, stats, data })
    }

    /// Mark the table as fine-tunable (frozen by default)
    pub fn with_trainable(mut self, trainable: bool) -> Self {
        self.trainable = trainable;
        self
    }

    /// (rows, dim)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.dim)
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.rows).then(|| &self.data[i * self.dim..(i + 1) * self.dim])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn trainable(&self) -> bool {
        self.trainable
    }

    pub fn stats(&self) -> MatrixStats {
        self.stats
    }

    /// Copy the weights into a [rows, dim] tensor on `device`
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        let data = TensorData::new(self.data.clone(), [self.rows, self.dim])
            .convert::<B::FloatElem>();
        Tensor::<B, 2>::from_data(data, device)
    }
}
