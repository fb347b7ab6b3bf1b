// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + evaluation loop using Burn's DataLoader and Adam.
//
// Key backend split:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on MyInnerBackend (Wgpu)
//     with dropout disabled and no gradient tracking — the
//     evaluate half of the train/evaluate toggle
//
// Gradient accumulation: each batch contributes its gradients to
// a GradientsAccumulator; every `accum_steps` batches the warmup
// schedule advances one step and the optimizer applies the
// accumulated gradients at the scheduled rate. Gradients left
// over when the epoch ends are flushed as one final update.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam,
//            Vaswani et al. (2017) §5.3

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsAccumulator, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::DialogBatcher, dataset::DialogDataset};
use crate::domain::vocab::SpecialTokens;
use crate::infra::{checkpoint::CheckpointManager, metrics::{EpochMetrics, MetricsLogger}};
use crate::ml::model::{Seq2SeqConfig, Seq2SeqModel};
use crate::ml::scheduler::WarmupSchedule;

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: DialogDataset,
    test_dataset:  DialogDataset,
    specials:      SpecialTokens,
    ckpt_manager:  CheckpointManager,
    metrics:       MetricsLogger,
) -> Result<()> {
    let device = select_device(&cfg.device);
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, train_dataset, test_dataset, specials, ckpt_manager, metrics, device)
}

/// Map the configured device selector onto a WGPU device.
fn select_device(selector: &str) -> burn::backend::wgpu::WgpuDevice {
    use burn::backend::wgpu::WgpuDevice;
    match selector {
        "cpu" => WgpuDevice::Cpu,
        "gpu" => WgpuDevice::default(),
        other => {
            tracing::warn!("Unknown device selector '{}', using default device", other);
            WgpuDevice::default()
        }
    }
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: DialogDataset,
    test_dataset:  DialogDataset,
    specials:      SpecialTokens,
    ckpt_manager:  CheckpointManager,
    metrics:       MetricsLogger,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<()> {
    let smoothing = cfg.label_smoothing as f32;

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = Seq2SeqConfig::new(
        cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
        cfg.num_heads, cfg.num_layers, cfg.d_ff, cfg.dropout,
        specials.pad as usize,
    );
    let mut model: Seq2SeqModel<MyBackend> = model_cfg.init(&device);
    tracing::info!("Model ready: {} parameters", model.num_params());

    // ── Adam optimiser, rate driven by the warmup schedule ────────────────────
    // Betas (0.9, 0.98) and eps 1e-9 are the transformer-paper values.
    let optim_cfg = AdamConfig::new()
        .with_beta_1(0.9)
        .with_beta_2(0.98)
        .with_epsilon(1e-9);
    let mut optim = optim_cfg.init();
    let mut schedule = WarmupSchedule::new(cfg.d_model, cfg.warmup_steps);

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = DialogBatcher::<MyBackend>::new(device.clone(), specials.pad);
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Evaluation data loader (InnerBackend — no autodiff overhead) ──────────
    let test_batcher = DialogBatcher::<MyInnerBackend>::new(device.clone(), specials.pad);
    let test_loader  = DataLoaderBuilder::new(test_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(test_dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;
        let mut accumulator    = GradientsAccumulator::new();
        let mut accumulated    = 0usize;

        for batch in train_loader.iter() {
            let loss = model.forward_loss(batch.questions, batch.answers, smoothing);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            let grads = loss.backward();
            accumulator.accumulate(&model, GradientsParams::from_grads(grads, &model));
            accumulated += 1;

            if accumulated == cfg.accum_steps {
                let lr = schedule.next();
                model = optim.step(lr, model, accumulator.grads());
                accumulated = 0;
            }
        }

        // Flush gradients from a trailing partial accumulation window
        if accumulated > 0 {
            let lr = schedule.next();
            model = optim.step(lr, model, accumulator.grads());
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Evaluation phase ──────────────────────────────────────────────────
        // model.valid() → Seq2SeqModel<MyInnerBackend>
        // dropout disabled, no gradients, no optimizer updates
        let model_valid = model.valid();

        let mut test_loss_sum = 0.0f64;
        let mut test_batches  = 0usize;

        for batch in test_loader.iter() {
            let loss = model_valid.forward_loss(batch.questions, batch.answers, smoothing);
            test_loss_sum += loss.into_scalar().elem::<f64>();
            test_batches  += 1;
        }

        let avg_test_loss = if test_batches > 0 {
            test_loss_sum / test_batches as f64
        } else { f64::NAN };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4} | lr={:.2e} | steps={}",
            epoch, cfg.epochs, avg_train_loss, avg_test_loss,
            schedule.last_rate(), schedule.current_step(),
        );

        metrics.log(&EpochMetrics::new(
            epoch, avg_train_loss, avg_test_loss, schedule.last_rate(),
        ))?;

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(())
}
