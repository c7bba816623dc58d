// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only sees CorpusSource, so the
// directory-tree loader can be swapped for another source
// (an archive, an in-memory fixture) without touching the
// pipeline code.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::sample::Corpus;
use crate::error::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a labelled corpus.
///
/// Implementations:
///   - CorpusLoader → walks a directory of label-named subdirectories
pub trait CorpusSource {
    /// Load every sample together with the label index.
    fn load_corpus(&self) -> Result<Corpus>;
}
