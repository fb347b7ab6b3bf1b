// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw corpus file to GPU-ready tensor batches.
//
// The pipeline flows in this order:
//
//   corpus file (newline-delimited JSON)
//       │
//       ▼
//   NdjsonLoader      → decodes ISO-8859-1, parses one record per line
//       │
//       ▼
//   Tokenizer         → BPE subwords trained over the whole corpus
//       │                 (Layer 6, infra::tokenizer_store)
//       ▼
//   Encoder           → token ids wrapped in [BOS] ... [EOS]
//       │
//       ▼
//   DialogDataset     → (question, answer) pairs via the reply-to index
//       │
//       ▼
//   DialogBatcher     → pads each side to the batch maximum, stacks tensors
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads the newline-delimited JSON corpus
pub mod loader;

/// Encodes record text into bounded token-id sequences
pub mod encoder;

/// Implements Burn's Dataset trait over conversation pairs
pub mod dataset;

/// Implements Burn's Batcher trait with per-batch padding
pub mod batcher;

/// Shuffles and splits pairs into train/test sets
pub mod splitter;
