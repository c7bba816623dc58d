// ============================================================
// Layer 5 — Embedding Layer Inputs
// ============================================================
// Everything the classifier's embedding layer needs that is not
// derived from the corpus alone:
//
//   embedding_index.rs  — parses the pre-trained GloVe file
//                         into a word → vector map
//
//   embedding_matrix.rs — combines that map with the corpus
//                         vocabulary into the dense weight
//                         table (rows × dim) and converts it
//                         into a Burn tensor
//
// The convolutional network itself lives outside this crate;
// it receives the matrix through EmbeddingMatrix::to_tensor.
//
// Reference: Pennington et al. (2014) GloVe
//            Burn Book §3 (Building Blocks)

/// Pre-trained word vectors loaded from a text file
pub mod embedding_index;

/// Vocabulary-aligned embedding weight table
pub mod embedding_matrix;
