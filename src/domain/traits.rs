// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types we can
// swap implementations without changing the code that uses them.
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::record::Record;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load conversation records from a source.
///
/// Implementations:
///   - NdjsonLoader → loads a newline-delimited JSON corpus file
///   - (future) SqliteLoader → loads from an exported chat database
pub trait RecordSource {
    /// Load all available records from this source, in source order.
    /// Returns a Vec of Records or an error.
    fn load_all(&self) -> Result<Vec<Record>>;
}
