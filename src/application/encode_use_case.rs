// ============================================================
// Layer 2 — Encode Use Case
// ============================================================
// Encodes new text with the vocabulary and settings saved by a
// previous `prepare` run, producing exactly the sequences the
// classifier was given during training.

use anyhow::Result;

use crate::application::prepare_use_case::PipelineConfig;
use crate::data::{encoder::SequenceEncoder, vocabulary::Vocabulary};
use crate::infra::artifacts::ArtifactStore;

pub struct EncodeUseCase {
    config:     PipelineConfig,
    vocabulary: Vocabulary,
}

impl EncodeUseCase {
    /// Load config and vocabulary from the artifact directory
    pub fn new(artifact_dir: impl Into<std::path::PathBuf>) -> Result<Self> {
        let store      = ArtifactStore::new(artifact_dir);
        let config     = store.load_config()?;
        let vocabulary = store.load_vocabulary()?;
        tracing::debug!(
            "Loaded vocabulary of {} words from '{}'",
            vocabulary.len(),
            store.dir().display()
        );
        Ok(Self { config, vocabulary })
    }

    /// Full fixed-length sequence, padding included
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.encoder().encode(text)
    }

    /// In-budget word indices only, before padding
    pub fn indices(&self, text: &str) -> Vec<u32> {
        self.encoder().indices(text)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn encoder(&self) -> SequenceEncoder<'_> {
        SequenceEncoder::with_budget(
            &self.vocabulary,
            self.config.max_num_words,
            self.config.max_sequence_length,
        )
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_encodes_with_saved_settings() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let cfg   = PipelineConfig {
            max_sequence_length: 4,
            max_num_words:       3,
            ..PipelineConfig::default()
        };
        store.save_config(&cfg).unwrap();
        // the:1 cat:2 sat:3
        store.save_vocabulary(&Vocabulary::build(&["the the the cat cat sat"], 3)).unwrap();

        let uc = EncodeUseCase::new(dir.path()).unwrap();
        assert_eq!(uc.encode("The cat sat, unknown"), vec![0, 0, 1, 2]);
        assert_eq!(uc.indices("cat the"), vec![2, 1]);
    }

    #[test]
    fn test_fails_without_prepare() {
        let dir = tempdir().unwrap();
        assert!(EncodeUseCase::new(dir.path()).is_err());
    }
}
