// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any business layer:
//
//   tokenizer_store.rs — Tokenizer training and persistence
//                        Trains a BPE tokenizer over the corpus
//                        if none exists, or loads a previously
//                        saved one. Ensures the same vocabulary
//                        is used across runs.
//
//   checkpoint.rs      — Saving model weights per epoch with
//                        Burn's CompactRecorder, plus the
//                        TrainConfig as JSON so a later run can
//                        rebuild the exact architecture.
//
//   metrics.rs         — Epoch-level metrics (losses, learning
//                        rate) appended to a CSV file for later
//                        analysis and plotting.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint and config persistence
pub mod checkpoint;

/// Tokenizer training, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
