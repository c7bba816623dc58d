// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores everything `prepare` produces, so `encode`
// (or a classifier in another process) can reuse it.
//
// File layout:
//   artifacts/
//     pipeline_config.json   ← settings the artifacts were built with
//     vocabulary.json        ← ranked words, counts, word budget
//     labels_index.json      ← class name → label id
//     embedding_matrix.json  ← rows, dim, trainable flag, weights
//
// Why save the config?
//   Encoding new text must use the same max sequence length and
//   word budget as the training data, otherwise the classifier
//   sees sequences it was never trained on.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::application::prepare_use_case::PipelineConfig;
use crate::data::vocabulary::Vocabulary;
use crate::domain::sample::LabelIndex;
use crate::ml::embedding_matrix::EmbeddingMatrix;

const CONFIG_FILE:     &str = "pipeline_config.json";
const VOCABULARY_FILE: &str = "vocabulary.json";
const LABELS_FILE:     &str = "labels_index.json";
const MATRIX_FILE:     &str = "embedding_matrix.json";

/// Reads and writes pipeline artifacts in one directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_config(&self, cfg: &PipelineConfig) -> Result<()> {
        self.write_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> Result<PipelineConfig> {
        self.read_json(CONFIG_FILE)
    }

    pub fn save_vocabulary(&self, vocabulary: &Vocabulary) -> Result<()> {
        self.write_json(VOCABULARY_FILE, vocabulary)
    }

    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        self.read_json(VOCABULARY_FILE)
    }

    /// Labels are stored as a readable name → id object
    pub fn save_labels(&self, labels: &LabelIndex) -> Result<()> {
        self.write_json(LABELS_FILE, &labels.to_map())
    }

    pub fn load_labels(&self) -> Result<LabelIndex> {
        let map: BTreeMap<String, usize> = self.read_json(LABELS_FILE)?;
        LabelIndex::from_map(&map).with_context(|| {
            format!("'{}' does not hold dense label ids", self.dir.join(LABELS_FILE).display())
        })
    }

    pub fn save_embedding_matrix(&self, matrix: &EmbeddingMatrix) -> Result<()> {
        self.write_json(MATRIX_FILE, matrix)
    }

    pub fn load_embedding_matrix(&self) -> Result<EmbeddingMatrix> {
        self.read_json(MATRIX_FILE)
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'prepare' first.",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::embedding_index::EmbeddingIndex;
    use crate::ml::embedding_matrix::OovPolicy;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_artifacts_round_trip() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("artifacts"));

        let cfg   = PipelineConfig::default();
        let vocab = Vocabulary::build(&["alpha beta beta"], 20);
        let mut labels = LabelIndex::new();
        labels.get_or_insert("neg");
        labels.get_or_insert("pos");
        let index  = EmbeddingIndex::from_reader(Cursor::new("beta 0.25 -1.5\n"), None).unwrap();
        let matrix = EmbeddingMatrix::build(&vocab, 20, &index, OovPolicy::Zero).unwrap();

        store.save_config(&cfg).unwrap();
        store.save_vocabulary(&vocab).unwrap();
        store.save_labels(&labels).unwrap();
        store.save_embedding_matrix(&matrix).unwrap();

        assert_eq!(store.load_config().unwrap(), cfg);
        assert_eq!(store.load_vocabulary().unwrap(), vocab);
        assert_eq!(store.load_labels().unwrap(), labels);
        assert_eq!(store.load_embedding_matrix().unwrap(), matrix);
    }

    #[test]
    fn test_missing_artifact_mentions_prepare() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let err   = store.load_vocabulary().unwrap_err();
        assert!(format!("{err:#}").contains("prepare"));
    }
}
