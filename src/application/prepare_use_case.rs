// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates the full preparation pipeline in order:
//
//   Step 1: Load the labelled corpus      (Layer 4 - data)
//   Step 2: Build the vocabulary          (Layer 4 - data)
//   Step 3: Encode every text             (Layer 4 - data)
//   Step 4: Load pre-trained embeddings   (Layer 5 - ml)
//   Step 5: Build the embedding matrix    (Layer 5 - ml)
//   Step 6: Split train/validation        (Layer 4 - data)
//   Step 7: Build Burn datasets           (Layer 4 - data)
//   Step 8: Check the classifier boundary (Layer 4 - data)
//   Step 9: Save artifacts                (Layer 6 - infra)
//
// Every step takes the previous step's output by reference and
// returns a fresh value; nothing is accumulated in shared state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use burn::{backend::NdArray, tensor::backend::Backend};

use crate::data::{
    batcher::check_dataset_fits,
    dataset::{ClassificationDataset, EncodedSample},
    encoder::SequenceEncoder,
    loader::{CorpusLoader, DecodeErrorPolicy, TextEncoding},
    splitter::split_train_val,
    vocabulary::Vocabulary,
};
use crate::domain::{sample::LabelIndex, traits::CorpusSource};
use crate::infra::artifacts::ArtifactStore;
use crate::ml::{
    embedding_index::EmbeddingIndex,
    embedding_matrix::{EmbeddingMatrix, OovPolicy},
};

/// CPU backend used to check batches before handing them over
type CheckBackend = NdArray;

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// All settings for a preparation run. Saved next to the artifacts
// so `encode` applies the same sequence length and word budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub corpus_dir:          String,
    pub embeddings_path:     String,
    pub output_dir:          String,
    pub max_sequence_length: usize,
    pub max_num_words:       usize,
    pub embedding_dim:       usize,
    pub validation_split:    f64,
    pub seed:                u64,
    pub encoding:            TextEncoding,
    pub on_decode_error:     DecodeErrorPolicy,
    pub oov_policy:          OovPolicy,
    pub trainable_embeddings: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            corpus_dir:          "data/20_newsgroup".to_string(),
            embeddings_path:     "data/glove.6B.100d.txt".to_string(),
            output_dir:          "artifacts".to_string(),
            max_sequence_length: 1000,
            max_num_words:       20000,
            embedding_dim:       100,
            validation_split:    0.2,
            seed:                1337,
            encoding:            TextEncoding::Latin1,
            on_decode_error:     DecodeErrorPolicy::Skip,
            oov_policy:          OovPolicy::Zero,
            trainable_embeddings: false,
        }
    }
}

/// Everything the classifier needs, as produced by one run.
pub struct PreparedData {
    pub labels:     LabelIndex,
    pub vocabulary: Vocabulary,
    pub matrix:     EmbeddingMatrix,
    pub train:      ClassificationDataset,
    pub validation: ClassificationDataset,
}

impl PreparedData {
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PipelineConfig,
}

impl PrepareUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline and save the artifacts.
    pub fn execute(&self) -> Result<PreparedData> {
        let cfg = &self.config;

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        tracing::info!("Processing text dataset in '{}'", cfg.corpus_dir);
        let loader = CorpusLoader::new(&cfg.corpus_dir)
            .with_encoding(cfg.encoding)
            .with_decode_error_policy(cfg.on_decode_error);
        let corpus = loader
            .load_corpus()
            .with_context(|| format!("Cannot load corpus from '{}'", cfg.corpus_dir))?;

        // ── Step 2: Vocabulary ────────────────────────────────────────────────
        let texts      = corpus.texts();
        let vocabulary = Vocabulary::build(&texts, cfg.max_num_words);

        // ── Step 3: Encode ────────────────────────────────────────────────────
        let encoder   = SequenceEncoder::new(&vocabulary, cfg.max_sequence_length);
        let sequences = encoder.encode_all(&texts);
        let samples: Vec<EncodedSample> = sequences
            .into_iter()
            .zip(corpus.label_ids())
            .map(|(seq, label)| EncodedSample::new(seq, label))
            .collect();
        tracing::info!(
            "Data tensor shape: ({}, {}), label tensor shape: ({}, {})",
            samples.len(),
            cfg.max_sequence_length,
            samples.len(),
            corpus.num_classes(),
        );

        // ── Step 4: Pre-trained embeddings ────────────────────────────────────
        tracing::info!("Indexing word vectors from '{}'", cfg.embeddings_path);
        let index = EmbeddingIndex::from_file(&cfg.embeddings_path, Some(cfg.embedding_dim))
            .with_context(|| format!("Cannot load embeddings from '{}'", cfg.embeddings_path))?;

        // ── Step 5: Embedding matrix ──────────────────────────────────────────
        let matrix = EmbeddingMatrix::build(&vocabulary, cfg.max_num_words, &index, cfg.oov_policy)?
            .with_trainable(cfg.trainable_embeddings);

        // ── Step 6: Train / validation split ──────────────────────────────────
        let (train_samples, val_samples) =
            split_train_val(samples, cfg.validation_split, cfg.seed)?;
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 7: Burn datasets ─────────────────────────────────────────────
        let train      = ClassificationDataset::new(train_samples);
        let validation = ClassificationDataset::new(val_samples);

        // ── Step 8: Check the classifier boundary ─────────────────────────────
        // Batch the head of each split on the CPU backend and make sure
        // the tensors line up with the embedding table.
        let device = <CheckBackend as Backend>::Device::default();
        for (name, dataset) in [("training", &train), ("validation", &validation)] {
            check_dataset_fits::<CheckBackend>(
                dataset,
                &matrix,
                corpus.num_classes(),
                cfg.max_sequence_length,
                &device,
            )
            .with_context(|| format!("The {name} set does not fit the classifier inputs"))?;
        }

        // ── Step 9: Save artifacts ────────────────────────────────────────────
        let store = ArtifactStore::new(&cfg.output_dir);
        store.save_config(cfg)?;
        store.save_vocabulary(&vocabulary)?;
        store.save_labels(&corpus.labels)?;
        store.save_embedding_matrix(&matrix)?;
        tracing::info!("Artifacts saved to '{}'", store.dir().display());

        Ok(PreparedData {
            labels: corpus.labels,
            vocabulary,
            matrix,
            train,
            validation,
        })
    }
}
