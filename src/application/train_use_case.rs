// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the corpus             (Layer 4 - data)
//   Step 2: Train / load the tokenizer  (Layer 6 - infra)
//   Step 3: Resolve reserved token ids  (Layer 6 - infra)
//   Step 4: Encode every record once    (Layer 4 - data)
//   Step 5: Build the pair dataset      (Layer 4 - data)
//   Step 6: Split train/test            (Layer 4 - data)
//   Step 7: Save config                 (Layer 6 - infra)
//   Step 8: Run training loop           (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::DialogDataset,
    encoder::Encoder,
    loader::NdjsonLoader,
};
use crate::domain::traits::RecordSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    tokenizer_store::{special_tokens, TokenizerStore},
};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk alongside the checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:       String,
    pub out_dir:         String,
    pub vocab_size:      usize,
    pub batch_size:      usize,
    pub split_ratio:     f64,
    pub max_seq_len:     usize,
    pub d_model:         usize,
    pub num_heads:       usize,
    pub num_layers:      usize,
    pub d_ff:            usize,
    pub dropout:         f64,
    pub warmup_steps:    usize,
    pub accum_steps:     usize,
    pub epochs:          usize,
    pub label_smoothing: f64,
    pub device:          String,
    pub lr:              f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:       "data/corpus.json".to_string(),
            out_dir:         "checkpoints".to_string(),
            vocab_size:      8000,
            batch_size:      64,
            split_ratio:     0.9,
            max_seq_len:     256,
            d_model:         512,
            num_heads:       8,
            num_layers:      6,
            d_ff:            2048,
            dropout:         0.1,
            warmup_steps:    4000,
            accum_steps:     4,
            epochs:          10,
            label_smoothing: 0.1,
            device:          "gpu".to_string(),
            lr:              1e-4,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the conversation corpus ──────────────────────────────
        // One JSON record per line; a malformed line fails the load.
        tracing::info!("Loading corpus from '{}'", cfg.data_path);
        let loader  = NdjsonLoader::new(&cfg.data_path);
        let records = loader.load_all()?;

        // ── Step 2: Train / load the subword tokenizer ────────────────────────
        // Trained once over every record's text, then frozen.
        let tok_store = TokenizerStore::new(&cfg.out_dir);
        let tokenizer = tok_store.load_or_build(&records, cfg.vocab_size)?;

        // ── Step 3: Resolve reserved token ids ────────────────────────────────
        // Components receive these ids explicitly — no global constants.
        let specials = special_tokens(&tokenizer)?;
        tracing::debug!("Reserved token ids: {:?}", specials);

        // ── Step 4: Encode every record once ──────────────────────────────────
        // [BOS] subword-ids [EOS], cached for the dataset's lifetime.
        let encoder = Encoder::new(tokenizer, specials, cfg.max_seq_len);
        let encoded = encoder.encode_all(records)?;
        tracing::info!("Encoded {} records", encoded.len());

        // ── Step 5 & 6: Pair dataset, then train/test split ───────────────────
        // Eligible pairs are answers with a non-empty reply-to id.
        let dataset = DialogDataset::new(encoded);
        let (train_dataset, test_dataset) = dataset.split(cfg.split_ratio);
        tracing::info!(
            "Pairs: {} train, {} test",
            train_dataset.pair_count(),
            test_dataset.pair_count(),
        );

        // ── Step 7: Persist the run configuration ─────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.out_dir);
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.out_dir)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, train_dataset, test_dataset, specials, ckpt_manager, metrics)?;

        Ok(())
    }
}
