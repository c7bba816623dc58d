// ============================================================
// glove-textcls
// ============================================================
// Turns a directory of labelled text files and a GloVe vector
// file into the inputs of a convolutional text classifier:
// fixed-length index sequences, one-hot labels and a frozen
// (or trainable) embedding matrix, batched as Burn tensors.
//
//   cli          — Layer 1: clap commands
//   application  — Layer 2: prepare / encode use cases
//   domain       — Layer 3: samples, labels, corpus source trait
//   data         — Layer 4: loading, vocabulary, encoding, batching
//   ml           — Layer 5: embedding index and matrix
//   infra        — Layer 6: artifact persistence

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;

pub use error::{Error, Result};
