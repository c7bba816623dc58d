// ============================================================
// Layer 4 — Train/Validation Splitter and Label Encoding
// ============================================================
// Shuffles samples with a seeded RNG and splits them into two sets:
//   - Training set:   everything except the tail
//   - Validation set: the last floor(validation_split * n) samples
//
// Why shuffle before splitting?
//   The corpus is loaded class by class, so without shuffling
//   the validation set would hold only the last classes.
//
// Why a seed?
//   The same corpus and seed always produce the same split, so
//   two runs of `prepare` hand the classifier identical data.
//
// Labels are delivered to the classifier one-hot encoded:
//   label 2 of 4 classes → [0.0, 0.0, 1.0, 0.0]
//
// Reference: rand crate documentation (SliceRandom, SeedableRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{Error, Result};

/// Shuffle `samples` deterministically and split into (train, validation).
///
/// # Arguments
/// * `samples`          - All available samples (consumed by this function)
/// * `validation_split` - Fraction held out for validation, in [0, 1)
/// * `seed`             - RNG seed for the shuffle
pub fn split_train_val<T>(
    mut samples:      Vec<T>,
    validation_split: f64,
    seed:             u64,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..1.0).contains(&validation_split) {
        return Err(Error::InvalidConfig(format!(
            "validation_split must be in [0, 1), got {validation_split}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total          = samples.len();
    let num_validation = ((total as f64) * validation_split).floor() as usize;

    // split_off(n) removes elements [n..] and returns them
    let val = samples.split_off(total - num_validation);

    tracing::debug!(
        "Dataset split: {} training, {} validation (seed {})",
        samples.len(),
        val.len(),
        seed,
    );

    Ok((samples, val))
}

/// One-hot encode `label_ids` into a row-major `len × num_classes` matrix.
pub fn one_hot(label_ids: &[usize], num_classes: usize) -> Result<Vec<f32>> {
    let mut out = vec![0.0f32; label_ids.len() * num_classes];
    for (row, &label) in label_ids.iter().enumerate() {
        if label >= num_classes {
            return Err(Error::InvalidConfig(format!(
                "label id {label} out of range for {num_classes} classes"
            )));
        }
        out[row * num_classes + label] = 1.0;
    }
    Ok(out)
}
