// ============================================================
// Layer 4 — Classification Batcher
// ============================================================
// Implements Burn's Batcher trait to stack encoded samples into
// the tensors the convolutional classifier consumes:
//
//   Input:  Vec of N EncodedSamples, each a sequence of length L
//   Output: ClassificationBatch with
//             sequences [N, L]            (Int)
//             targets   [N, num_classes]  (Float, one-hot)
//             label_ids [N]               (Int)
//
// All sequences are padded to the same length by the encoder,
// so batching is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    tensor::{backend::Backend, ElementConversion, Int, Tensor, TensorData},
};

use crate::data::dataset::{ClassificationDataset, EncodedSample};
use crate::error::{Error, Result};
use crate::ml::embedding_matrix::EmbeddingMatrix;

/// Samples batched when checking a dataset against the embedding matrix
pub const CHECK_BATCH_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct ClassificationBatch<B: Backend> {
    /// Word index sequences — shape: [batch_size, seq_len]
    pub sequences: Tensor<B, 2, Int>,

    /// One-hot labels — shape: [batch_size, num_classes]
    pub targets: Tensor<B, 2>,

    /// Raw label ids — shape: [batch_size]
    pub label_ids: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct ClassificationBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,
    pub num_classes: usize,
}

impl<B: Backend> ClassificationBatcher<B> {
    pub fn new(device: B::Device, num_classes: usize) -> Self {
        Self { device, num_classes }
    }
}

impl<B: Backend> Batcher<EncodedSample, ClassificationBatch<B>> for ClassificationBatcher<B> {
    fn batch(&self, items: Vec<EncodedSample>) -> ClassificationBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |s| s.sequence.len());

        let seq_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.sequence.iter().map(|&x| x as i64))
            .collect();

        let label_ids: Vec<usize> = items.iter().map(|s| s.label_id).collect();

        // Rows are filled independently: an out-of-range id only
        // leaves its own target row at zero.
        let mut targets = vec![0.0f32; batch_size * self.num_classes];
        for (row, &label) in label_ids.iter().enumerate() {
            if label < self.num_classes {
                targets[row * self.num_classes + label] = 1.0;
            } else {
                tracing::error!(
                    "Label id {} out of range for {} classes (batch row {})",
                    label,
                    self.num_classes,
                    row
                );
            }
        }

        let labels_flat: Vec<i64> = label_ids.iter().map(|&l| l as i64).collect();

        let sequences = Tensor::<B, 2, Int>::from_data(
            TensorData::new(seq_flat, [batch_size, seq_len]).convert::<B::IntElem>(),
            &self.device,
        );

        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets, [batch_size, self.num_classes]).convert::<B::FloatElem>(),
            &self.device,
        );

        let label_ids = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels_flat, [batch_size]).convert::<B::IntElem>(),
            &self.device,
        );

        ClassificationBatch { sequences, targets, label_ids }
    }
}

/// Batch the head of `dataset` and check the tensors against what the
/// classifier expects: sequences of length `seq_len`, one-hot targets of
/// width `num_classes`, and every word index inside the embedding table.
pub fn check_dataset_fits<B: Backend>(
    dataset:     &ClassificationDataset,
    matrix:      &EmbeddingMatrix,
    num_classes: usize,
    seq_len:     usize,
    device:      &B::Device,
) -> Result<()> {
    let items: Vec<EncodedSample> = (0..dataset.len().min(CHECK_BATCH_SIZE))
        .filter_map(|i| dataset.get(i))
        .collect();
    if items.is_empty() {
        return Ok(());
    }

    let weights = matrix.to_tensor::<B>(device);
    let [rows, _] = weights.dims();

    let batch = ClassificationBatcher::<B>::new(device.clone(), num_classes).batch(items);
    let [n, len]   = batch.sequences.dims();
    let [_, width] = batch.targets.dims();

    if len != seq_len || width != num_classes {
        return Err(Error::InvalidConfig(format!(
            "batch shapes [{n}, {len}] / [{n}, {width}] do not match [{n}, {seq_len}] / [{n}, {num_classes}]"
        )));
    }
    if len > 0 {
        let max_index = batch.sequences.max().into_scalar().elem::<i64>();
        if max_index as usize >= rows {
            return Err(Error::InvalidConfig(format!(
                "word index {max_index} outside embedding matrix of {rows} rows"
            )));
        }
    }

    tracing::debug!("Checked batch of {} samples against {} embedding rows", n, rows);
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let device  = Default::default();
        let batcher = ClassificationBatcher::<TestBackend>::new(device, 3);

        let batch = batcher.batch(vec![
            EncodedSample::new(vec![0, 1, 2, 3], 2),
            EncodedSample::new(vec![0, 0, 5, 6], 0),
        ]);

        assert_eq!(batch.sequences.dims(), [2, 4]);
        assert_eq!(batch.targets.dims(), [2, 3]);
        assert_eq!(batch.label_ids.dims(), [2]);

        let seqs: Vec<i64> = batch.sequences.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(seqs, vec![0, 1, 2, 3, 0, 0, 5, 6]);

        let targets: Vec<f32> = batch.targets.into_data().convert::<f32>().to_vec().unwrap();
        assert_eq!(targets, vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bad_label_only_zeroes_its_own_row() {
        let batcher = ClassificationBatcher::<TestBackend>::new(Default::default(), 2);

        let batch = batcher.batch(vec![
            EncodedSample::new(vec![1], 0),
            EncodedSample::new(vec![2], 5),
        ]);

        let targets: Vec<f32> = batch.targets.into_data().convert::<f32>().to_vec().unwrap();
        assert_eq!(targets, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_dataset_fits_matrix() {
        use crate::data::vocabulary::Vocabulary;
        use crate::ml::embedding_index::EmbeddingIndex;
        use crate::ml::embedding_matrix::OovPolicy;
        use std::io::Cursor;

        let vocab  = Vocabulary::build(&["a b c"], 100);
        let index  = EmbeddingIndex::from_reader(Cursor::new("a 1 2\n"), None).unwrap();
        let matrix = EmbeddingMatrix::build(&vocab, 100, &index, OovPolicy::Zero).unwrap();
        let device = Default::default();

        let good = ClassificationDataset::new(vec![EncodedSample::new(vec![0, 1, 3], 1)]);
        assert!(check_dataset_fits::<TestBackend>(&good, &matrix, 2, 3, &device).is_ok());

        // Index 4 has no row in a 4-row matrix
        let out_of_range = ClassificationDataset::new(vec![EncodedSample::new(vec![0, 4, 3], 1)]);
        assert!(check_dataset_fits::<TestBackend>(&out_of_range, &matrix, 2, 3, &device).is_err());

        // Wrong sequence length
        assert!(check_dataset_fits::<TestBackend>(&good, &matrix, 2, 5, &device).is_err());
    }
}
