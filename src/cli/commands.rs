// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand and all its configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// Top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the chatbot on a conversation corpus
    Train(TrainArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
/// Only --data is required; everything else has a sensible default.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the corpus file: one JSON record per line with
    /// fields {id, text, reply-to}, ISO-8859-1 encoded
    #[arg(short = 'd', long, required = true)]
    pub data: String,

    /// Directory for the trained tokenizer, checkpoints and metrics
    #[arg(long, default_value = "checkpoints")]
    pub out_dir: String,

    /// Size of the subword vocabulary, reserved tokens included
    #[arg(long, default_value_t = 8000)]
    pub vocab_size: usize,

    /// Number of conversation pairs per batch
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Fraction of pairs used for training; the rest is held out
    /// for per-epoch evaluation
    #[arg(long, default_value_t = 0.9)]
    pub split_ratio: f64,

    /// Maximum number of tokens per encoded utterance
    #[arg(long, default_value_t = 256)]
    pub max_seq_len: usize,

    /// Hidden dimension of the transformer (d_model in the paper).
    /// Also the `dim` term of the warmup learning-rate formula.
    #[arg(long, default_value_t = 512)]
    pub d_model: usize,

    /// Number of attention heads — d_model must be divisible by this
    #[arg(long, default_value_t = 8)]
    pub num_heads: usize,

    /// Number of stacked encoder and decoder layers
    #[arg(long, default_value_t = 6)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    #[arg(long, default_value_t = 2048)]
    pub d_ff: usize,

    /// Dropout probability applied to embeddings and sublayers
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Warmup step count of the learning-rate schedule
    #[arg(long, default_value_t = 4000)]
    pub warmup_steps: usize,

    /// Number of batches whose gradients are accumulated before
    /// each optimizer update
    #[arg(long, default_value_t = 4)]
    pub accum_steps: usize,

    /// Number of full passes through the training pairs
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Label smoothing factor for the cross-entropy loss
    #[arg(long, default_value_t = 0.1)]
    pub label_smoothing: f64,

    /// Device selector: "cpu" or "gpu"
    #[arg(long, default_value = "gpu")]
    pub device: String,

    /// Base optimizer learning rate. The warmup schedule overwrites
    /// the rate on every update, so this value never takes effect
    /// at runtime; it is kept in the saved config for completeness.
    #[arg(long, default_value_t = 1e-4)]
    pub lr: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:       a.data,
            out_dir:         a.out_dir,
            vocab_size:      a.vocab_size,
            batch_size:      a.batch_size,
            split_ratio:     a.split_ratio,
            max_seq_len:     a.max_seq_len,
            d_model:         a.d_model,
            num_heads:       a.num_heads,
            num_layers:      a.num_layers,
            d_ff:            a.d_ff,
            dropout:         a.dropout,
            warmup_steps:    a.warmup_steps,
            accum_steps:     a.accum_steps,
            epochs:          a.epochs,
            label_smoothing: a.label_smoothing,
            device:          a.device,
            lr:              a.lr,
        }
    }
}
