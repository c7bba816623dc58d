// ============================================================
// Layer 5 — Pre-trained Embedding Index
// ============================================================
// Parses a GloVe-style text file into a word → vector map.
//
// File format (no header row):
//   the 0.418 0.24968 -0.41242 0.1217 ...
//   ,   0.013441 0.23682 -0.16899 0.40951 ...
//
// The first token of each line is the word, kept exactly as
// written (case-sensitive). Every remaining token is one f32.
//
// All vectors must have the same length D. D comes from the
// expected dimension when one is given, otherwise from the
// first non-blank line. A malformed line aborts the parse with
// its 1-based line number: skipping it would leave a silently
// incomplete index.
//
// Reference: Pennington et al. (2014) GloVe
//            Rust Book §9 (Error Handling), §12 (BufRead)

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::Path,
};

use crate::error::{Error, Result};

/// Longest slice of an offending line quoted in an error message
const MAX_QUOTED_LINE: usize = 80;

/// Word → fixed-dimension vector. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    vectors: HashMap<String, Vec<f32>>,
    dim:     usize,
}

impl EmbeddingIndex {
    /// Parse an embedding file from disk.
    pub fn from_file(path: impl AsRef<Path>, expected_dim: Option<usize>) -> Result<Self> {
        let path  = path.as_ref();
        let file  = File::open(path)?;
        let index = Self::from_reader(BufReader::new(file), expected_dim)?;
        tracing::info!(
            "Found {} word vectors of dimension {} in '{}'",
            index.len(),
            index.dim(),
            path.display()
        );
        Ok(index)
    }

    /// Parse embedding lines from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, expected_dim: Option<usize>) -> Result<Self> {
        let mut vectors = HashMap::new();
        let mut dim     = expected_dim;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line    = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => Error::InvalidUtf8 { line: line_no },
                _ => Error::Io(e),
            })?;

            let mut tokens = line.split_whitespace();
            let Some(word) = tokens.next() else {
                continue;
            };

            let coefs = tokens
                .map(|t| {
                    t.parse::<f32>().map_err(|_| Error::Parse {
                        line:    line_no,
                        token:   t.to_string(),
                        content: quote(&line),
                    })
                })
                .collect::<Result<Vec<f32>>>()?;

            let expected = *dim.get_or_insert(coefs.len());
            if coefs.len() != expected || expected == 0 {
                return Err(Error::DimensionMismatch {
                    line:     line_no,
                    expected,
                    found:    coefs.len(),
                    content:  quote(&line),
                });
            }

            vectors.insert(word.to_string(), coefs);
        }

        Ok(Self { vectors, dim: dim.unwrap_or(0) })
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Vector dimension D (0 for an empty index without an expected dimension)
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

fn quote(line: &str) -> String {
    line.chars().take(MAX_QUOTED_LINE).collect()
}
