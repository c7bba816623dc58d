// ============================================================
// Layer 3 — Sample, LabelIndex and Corpus
// ============================================================
// A Sample is one text file from the corpus together with the
// integer id of the class (subdirectory) it was found in.
//
// Label ids are dense and 0-based. They are assigned in the
// order the class directories are visited, which is sorted
// lexicographically, so the same corpus always yields the
// same mapping.
//
// Example:
//   corpus/
//     alt.atheism/49960        → label 0
//     comp.graphics/37261      → label 1
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §8 (Collections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One labelled text sample. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Text content after header stripping
    pub text: String,

    /// Id of the class this sample belongs to
    pub label_id: usize,

    /// File the text was read from — kept for traceability
    pub source: PathBuf,
}

impl Sample {
    pub fn new(text: impl Into<String>, label_id: usize, source: impl Into<PathBuf>) -> Self {
        Self {
            text:   text.into(),
            label_id,
            source: source.into(),
        }
    }
}

/// Mapping from class name to a dense 0-based label id.
/// The position of a name in `names` is its id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelIndex {
    names: Vec<String>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, assigning the next free id
    /// if the name has not been seen yet.
    pub fn get_or_insert(&mut self, name: &str) -> usize {
        match self.get(name) {
            Some(id) => id,
            None => {
                self.names.push(name.to_string());
                self.names.len() - 1
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate (name, id) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names.iter().enumerate().map(|(id, n)| (n.as_str(), id))
    }

    /// Name → id as an ordered map (the on-disk representation)
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        self.iter().map(|(n, id)| (n.to_string(), id)).collect()
    }

    /// Rebuild from a name → id map. Ids must be dense from 0.
    pub fn from_map(map: &BTreeMap<String, usize>) -> Option<Self> {
        let mut names = vec![None; map.len()];
        for (name, &id) in map {
            let slot = names.get_mut(id)?;
            if slot.is_some() {
                return None;
            }
            *slot = Some(name.clone());
        }
        let names = names.into_iter().collect::<Option<Vec<_>>>()?;
        Some(Self { names })
    }
}

/// All samples of a corpus plus the label index they refer to.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub samples: Vec<Sample>,
    pub labels:  LabelIndex,
}

impl Corpus {
    pub fn new(samples: Vec<Sample>, labels: LabelIndex) -> Self {
        Self { samples, labels }
    }

    /// Texts in load order (parallel to `label_ids`)
    pub fn texts(&self) -> Vec<&str> {
        self.samples.iter().map(|s| s.text.as_str()).collect()
    }

    /// Label ids in load order (parallel to `texts`)
    pub fn label_ids(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label_id).collect()
    }

    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
