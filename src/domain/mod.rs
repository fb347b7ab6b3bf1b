// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// The heart of the application — pure Rust structs and traits
// that define the core concepts of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - NO ML-specific code
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no GPU needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One utterance from the conversation corpus
pub mod record;

// Reserved vocabulary symbols and their resolved ids
pub mod vocab;

// Core abstractions (traits) that other layers implement
pub mod traits;
