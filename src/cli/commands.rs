// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `encode`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::prepare_use_case::PipelineConfig;
use crate::data::loader::{DecodeErrorPolicy, TextEncoding};
use crate::ml::embedding_matrix::OovPolicy;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build vocabulary, sequences and embedding matrix from a corpus
    Prepare(PrepareArgs),

    /// Encode a text with the artifacts of a previous `prepare` run
    Encode(EncodeArgs),
}

/// Fill for vocabulary rows without a pre-trained vector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OovFill {
    /// Leave the row at zero
    Zero,
    /// Draw from [-oov_scale, oov_scale) seeded by --seed
    Uniform,
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Directory with one subdirectory of numbered text files per class
    #[arg(long, default_value = "data/20_newsgroup")]
    pub corpus_dir: String,

    /// Pre-trained word vectors, one `word v1 .. vD` line per word
    #[arg(long, default_value = "data/glove.6B.100d.txt")]
    pub embeddings_path: String,

    /// Directory to write the artifacts to
    #[arg(long, default_value = "artifacts")]
    pub output_dir: String,

    /// Length every encoded sequence is padded or truncated to
    #[arg(long, default_value_t = 1000)]
    pub max_sequence_length: usize,

    /// Word budget: indices at or above this are dropped
    #[arg(long, default_value_t = 20000)]
    pub max_num_words: usize,

    /// Dimension of the pre-trained vectors
    #[arg(long, default_value_t = 100)]
    pub embedding_dim: usize,

    /// Fraction of samples held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub validation_split: f64,

    /// Seed for the shuffle and the uniform OOV fill
    #[arg(long, default_value_t = 1337)]
    pub seed: u64,

    /// Encoding of the sample files (latin1 or utf8)
    #[arg(long, default_value = "latin1")]
    pub encoding: TextEncoding,

    /// What to do with files that fail to decode (skip or fail)
    #[arg(long, default_value = "skip")]
    pub on_decode_error: DecodeErrorPolicy,

    /// Fill for rows of words missing from the embedding file
    #[arg(long, value_enum, default_value_t = OovFill::Zero)]
    pub oov: OovFill,

    /// Half-width of the uniform OOV range
    #[arg(long, default_value_t = 0.05)]
    pub oov_scale: f32,

    /// Let the classifier fine-tune the embedding table
    #[arg(long)]
    pub trainable: bool,
}

/// Convert CLI PrepareArgs into the application-layer PipelineConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PipelineConfig {
    fn from(a: PrepareArgs) -> Self {
        let oov_policy = match a.oov {
            OovFill::Zero    => OovPolicy::Zero,
            OovFill::Uniform => OovPolicy::Uniform { scale: a.oov_scale, seed: a.seed },
        };
        PipelineConfig {
            corpus_dir:          a.corpus_dir,
            embeddings_path:     a.embeddings_path,
            output_dir:          a.output_dir,
            max_sequence_length: a.max_sequence_length,
            max_num_words:       a.max_num_words,
            embedding_dim:       a.embedding_dim,
            validation_split:    a.validation_split,
            seed:                a.seed,
            encoding:            a.encoding,
            on_decode_error:     a.on_decode_error,
            oov_policy,
            trainable_embeddings: a.trainable,
        }
    }
}

/// All arguments for the `encode` command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// The text to encode
    #[arg(long)]
    pub text: String,

    /// Directory where `prepare` saved its artifacts
    #[arg(long, default_value = "artifacts")]
    pub output_dir: String,

    /// Print the whole padded sequence instead of the word indices only
    #[arg(long)]
    pub full: bool,
}
