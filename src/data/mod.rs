// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw corpus directory
// to the tensor batches handed to the classifier.
//
// The pipeline flows in this order:
//
//   corpus/<label>/<digits>
//       │
//       ▼
//   CorpusLoader      → reads files, strips headers, assigns labels
//       │
//       ▼
//   tokenize          → lowercase words, punctuation removed
//       │
//       ▼
//   Vocabulary        → word → index by descending frequency
//       │
//       ▼
//   SequenceEncoder   → fixed-length index sequences
//       │
//       ▼
//   split_train_val   → seeded shuffle, validation tail
//       │
//       ▼
//   ClassificationDataset / ClassificationBatcher
//                     → Burn Dataset and tensor batches
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Walks the label directories and reads sample files
pub mod loader;

/// The shared word-splitting rule
pub mod tokenizer;

/// Frequency-ranked word index
pub mod vocabulary;

/// Text → padded integer sequence
pub mod encoder;

/// Seeded train/validation split and one-hot labels
pub mod splitter;

/// Implements Burn's Dataset trait for encoded samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
