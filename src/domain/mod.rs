// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that define the core concepts
// of the preparation pipeline:
//
//   - a Sample is one labelled text read from the corpus
//   - a LabelIndex maps class names to dense integer ids
//   - a Corpus is the full ordered list of samples plus labels
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labelled samples, the label index and the corpus container
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;
