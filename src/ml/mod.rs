// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer builds tensors or models — only this one
// (the batcher in Layer 4 is the single exception, since Burn's
// DataLoader contract lives there).
//
// What's in this layer:
//
//   model.rs     — Encoder-decoder transformer
//                  Token + positional embeddings, Burn's
//                  TransformerEncoder/TransformerDecoder with
//                  pad and autoregressive masks, and a linear
//                  projection to vocabulary logits.
//
//   scheduler.rs — Warmup learning-rate schedule
//                  rate = d_model^-0.5 * min(step^-0.5,
//                                            step * warmup^-1.5)
//
//   trainer.rs   — The training loop
//                  Forward pass, label-smoothed cross-entropy,
//                  gradient accumulation, scheduled optimizer
//                  updates, per-epoch evaluation and metrics.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Vaswani et al. (2017) Attention Is All You Need

/// Encoder-decoder transformer over token-id sequences
pub mod model;

/// Inverse-square-root warmup learning-rate schedule
pub mod scheduler;

/// Full training loop with evaluation and checkpointing
pub mod trainer;
