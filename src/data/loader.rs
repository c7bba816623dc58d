// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads a labelled text corpus from a directory tree:
//
//   corpus/
//     alt.atheism/          ← label 0 (sorted first)
//       49960               ← one text sample per file
//       51060
//     comp.graphics/        ← label 1
//       37261
//       README.txt          ← ignored: name is not all digits
//
// Every sample file may begin with a header block (mail headers
// in the newsgroup corpus) terminated by the first blank line.
// We cut the header off at the first "\n\n". The double newline
// itself stays at the start of the text:
//
//   "From: a@b\nSubject: x\n\nBody"  →  "\n\nBody"
//
// Decoding:
//   Latin-1 maps every byte to the code point of the same value,
//   so it can never fail. UTF-8 can fail; what happens then is
//   chosen by DecodeErrorPolicy (skip with a warning, or abort).
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading Files)

use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::domain::sample::{Corpus, LabelIndex, Sample};
use crate::domain::traits::CorpusSource;
use crate::error::{Error, Result};

/// Character encoding assumed for every sample file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Latin1,
    Utf8,
}

/// What to do with a file that is not valid in the chosen encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrorPolicy {
    /// Log a warning and leave the file out of the corpus
    #[default]
    Skip,
    /// Abort the whole load with Error::Decode
    Fail,
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            other => Err(format!("unknown encoding '{other}' (expected latin1 or utf8)")),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Latin1 => write!(f, "latin1"),
            TextEncoding::Utf8   => write!(f, "utf8"),
        }
    }
}

impl FromStr for DecodeErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(DecodeErrorPolicy::Skip),
            "fail" => Ok(DecodeErrorPolicy::Fail),
            other  => Err(format!("unknown decode policy '{other}' (expected skip or fail)")),
        }
    }
}

impl fmt::Display for DecodeErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorPolicy::Skip => write!(f, "skip"),
            DecodeErrorPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Loads every labelled sample below a root directory.
/// Implements the CorpusSource trait from Layer 3.
pub struct CorpusLoader {
    /// Root directory holding one subdirectory per class
    root: PathBuf,
    encoding: TextEncoding,
    on_decode_error: DecodeErrorPolicy,
}

impl CorpusLoader {
    /// Create a loader with Latin-1 decoding
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:            root.into(),
            encoding:        TextEncoding::default(),
            on_decode_error: DecodeErrorPolicy::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_decode_error_policy(mut self, policy: DecodeErrorPolicy) -> Self {
        self.on_decode_error = policy;
        self
    }
}

impl CorpusSource for CorpusLoader {
    fn load_corpus(&self) -> Result<Corpus> {
        // Unlike a missing docs folder, a missing corpus is fatal:
        // there is nothing meaningful to prepare without it.
        if !self.root.is_dir() {
            return Err(Error::CorpusNotFound(self.root.clone()));
        }

        let mut labels  = LabelIndex::new();
        let mut samples = Vec::new();

        for class_dir in sorted_entries(&self.root)? {
            if !class_dir.is_dir() {
                continue;
            }
            let Some(label_name) = class_dir.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping directory with non-UTF-8 name: {}", class_dir.display());
                continue;
            };
            let label_id = labels.get_or_insert(label_name);
            let before   = samples.len();

            for path in sorted_entries(&class_dir)? {
                if !path.is_file() || !is_sample_file(&path) {
                    continue;
                }
                match read_sample_text(&path, self.encoding) {
                    Ok(text) => {
                        samples.push(Sample::new(strip_header(&text), label_id, path));
                    }
                    Err(Error::Decode(p)) if self.on_decode_error == DecodeErrorPolicy::Skip => {
                        tracing::warn!("Skipping '{}': not valid {}", p.display(), self.encoding);
                    }
                    Err(e) => return Err(e),
                }
            }

            tracing::debug!(
                "Label {} '{}': {} samples",
                label_id,
                label_name,
                samples.len() - before
            );
        }

        tracing::info!(
            "Loaded {} samples in {} classes from '{}'",
            samples.len(),
            labels.len(),
            self.root.display()
        );
        Ok(Corpus::new(samples, labels))
    }
}

/// Cut everything before the first "\n\n" when it occurs at a
/// positive offset. The blank-line separator itself is kept.
pub fn strip_header(text: &str) -> &str {
    match text.find("\n\n") {
        Some(i) if i > 0 => &text[i..],
        _ => text,
    }
}

/// Sample files are named with ASCII digits only, e.g. "49960"
fn is_sample_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Directory entries sorted by file name for a deterministic walk
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

fn read_sample_text(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path)?;
    match encoding {
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        TextEncoding::Utf8 => {
            String::from_utf8(bytes).map_err(|_| Error::Decode(path.to_path_buf()))
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_strip_header_keeps_separator() {
        assert_eq!(strip_header("Header line\n\nBody text"), "\n\nBody text");
    }

    #[test]
    fn test_strip_header_without_blank_line() {
        assert_eq!(strip_header("no header here"), "no header here");
    }

    #[test]
    fn test_strip_header_at_offset_zero_is_noop() {
        assert_eq!(strip_header("\n\nBody"), "\n\nBody");
    }

    #[test]
    fn test_single_label_gets_id_zero() {
        let dir = tempdir().unwrap();
        write(dir.path(), "comp.graphics/100", b"Subject: hi\n\nhello world");

        let corpus = CorpusLoader::new(dir.path()).load_corpus().unwrap();
        assert_eq!(corpus.labels.to_map().into_iter().collect::<Vec<_>>(),
                   vec![("comp.graphics".to_string(), 0)]);
        assert_eq!(corpus.samples[0].text, "\n\nhello world");
        assert_eq!(corpus.samples[0].label_id, 0);
    }

    #[test]
    fn test_labels_follow_sorted_directory_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "zeta/1", b"z");
        write(dir.path(), "alpha/2", b"a");
        write(dir.path(), "mid/3", b"m");

        let corpus = CorpusLoader::new(dir.path()).load_corpus().unwrap();
        assert_eq!(corpus.labels.get("alpha"), Some(0));
        assert_eq!(corpus.labels.get("mid"), Some(1));
        assert_eq!(corpus.labels.get("zeta"), Some(2));
        assert_eq!(corpus.label_ids(), vec![0, 1, 2]);
    }

    #[test]
    fn test_files_sorted_and_non_digit_names_ignored() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/20", b"second");
        write(dir.path(), "a/10", b"first");
        write(dir.path(), "a/notes.txt", b"ignored");
        write(dir.path(), "a/12a", b"ignored");
        write(dir.path(), "stray_file", b"ignored");

        let corpus = CorpusLoader::new(dir.path()).load_corpus().unwrap();
        assert_eq!(corpus.texts(), vec!["first", "second"]);
    }

    #[test]
    fn test_latin1_never_fails() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/1", &[b'c', b'a', b'f', 0xE9]);

        let corpus = CorpusLoader::new(dir.path()).load_corpus().unwrap();
        assert_eq!(corpus.samples[0].text, "café");
    }

    #[test]
    fn test_utf8_skip_policy_drops_bad_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/1", &[0xFF, 0xFE]);
        write(dir.path(), "a/2", "ok ✓".as_bytes());

        let corpus = CorpusLoader::new(dir.path())
            .with_encoding(TextEncoding::Utf8)
            .load_corpus()
            .unwrap();
        assert_eq!(corpus.texts(), vec!["ok ✓"]);
    }

    #[test]
    fn test_utf8_fail_policy_aborts() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/1", &[0xFF, 0xFE]);

        let err = CorpusLoader::new(dir.path())
            .with_encoding(TextEncoding::Utf8)
            .with_decode_error_policy(DecodeErrorPolicy::Fail)
            .load_corpus()
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let err = CorpusLoader::new(dir.path().join("nope")).load_corpus().unwrap_err();
        assert!(matches!(err, Error::CorpusNotFound(_)));
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!("UTF-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("fail".parse::<DecodeErrorPolicy>(), Ok(DecodeErrorPolicy::Fail));
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }
}
