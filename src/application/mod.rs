// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish a
// specific goal (preparing classifier inputs, or encoding new
// text with saved artifacts).
//
// Rules for this layer:
//   - No tokenisation or matrix math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The full preparation workflow
pub mod prepare_use_case;

// Encoding new text with saved artifacts
pub mod encode_use_case;
