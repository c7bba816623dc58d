// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — builds the classifier inputs from a corpus
//   2. `encode`  — encodes a text with saved artifacts
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EncodeArgs, PrepareArgs};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "glove-textcls",
    version,
    about = "Prepare a text corpus and a GloVe embedding matrix for a convolutional classifier."
)]
pub struct Cli {
    /// The subcommand to run (prepare or encode)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Encode(args)  => run_encode(args),
        }
    }
}

/// Handles the `prepare` subcommand.
fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let use_case = PrepareUseCase::new(args.into());
    let prepared = use_case.execute()?;

    let (rows, dim) = prepared.matrix.shape();
    let stats       = prepared.matrix.stats();
    println!("Classes:          {}", prepared.num_classes());
    println!("Distinct words:   {}", prepared.vocabulary.len());
    println!("Training samples: {}", prepared.train.sample_count());
    println!("Validation:       {}", prepared.validation.sample_count());
    println!(
        "Embedding matrix: {rows} x {dim} ({} found, {} without vector, {})",
        stats.found,
        stats.missing,
        if prepared.matrix.trainable() { "trainable" } else { "frozen" },
    );
    Ok(())
}

/// Handles the `encode` subcommand.
fn run_encode(args: EncodeArgs) -> Result<()> {
    use crate::application::encode_use_case::EncodeUseCase;

    let use_case = EncodeUseCase::new(&args.output_dir)?;
    let sequence = if args.full {
        use_case.encode(&args.text)
    } else {
        use_case.indices(&args.text)
    };

    let line: Vec<String> = sequence.iter().map(u32::to_string).collect();
    println!("{}", line.join(" "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prepare_use_case::PipelineConfig;
    use crate::ml::embedding_matrix::OovPolicy;

    #[test]
    fn test_prepare_defaults_match_pipeline_defaults() {
        let cli = Cli::parse_from(["glove-textcls", "prepare"]);
        let Commands::Prepare(args) = cli.command else {
            panic!("expected prepare");
        };
        assert_eq!(PipelineConfig::from(args), PipelineConfig::default());
    }

    #[test]
    fn test_prepare_flags() {
        let cli = Cli::parse_from([
            "glove-textcls", "prepare",
            "--encoding", "utf8",
            "--on-decode-error", "fail",
            "--oov", "uniform",
            "--oov-scale", "0.1",
            "--seed", "7",
            "--trainable",
        ]);
        let Commands::Prepare(args) = cli.command else {
            panic!("expected prepare");
        };
        let cfg = PipelineConfig::from(args);
        assert_eq!(cfg.encoding.to_string(), "utf8");
        assert_eq!(cfg.on_decode_error.to_string(), "fail");
        assert_eq!(cfg.oov_policy, OovPolicy::Uniform { scale: 0.1, seed: 7 });
        assert!(cfg.trainable_embeddings);
    }

    #[test]
    fn test_rejects_unknown_encoding() {
        assert!(Cli::try_parse_from(["glove-textcls", "prepare", "--encoding", "ebcdic"]).is_err());
    }
}
