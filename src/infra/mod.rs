// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence that doesn't belong in the data or
// embedding layers:
//
//   artifacts.rs — JSON persistence of the pipeline config,
//                  vocabulary, label index and embedding matrix,
//                  so `encode` reuses exactly what `prepare`
//                  built.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Saving and loading of pipeline artifacts
pub mod artifacts;
