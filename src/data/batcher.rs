// ============================================================
// Layer 4 — Dialog Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<DialogPair>
// into GPU-ready tensors.
//
// Pairs arrive with variable-length sequences, so the collation
// step pads each side of the batch independently to that side's
// maximum length using the pad id, preserving batch order:
//
//   questions: [q1; q2; q3]  → [batch, max_q_len] padded
//   answers:   [a1; a2; a3]  → [batch, max_a_len] padded
//
// The pad id participates nowhere in the loss — the trainer's
// cross-entropy ignores pad positions — so padding only buys
// rectangular tensors, never gradient signal.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::DialogPair;

// ─── DialogBatch ──────────────────────────────────────────────────────────────
/// A batch of conversation pairs ready for the model forward pass.
///
/// B is the Burn Backend (e.g. Wgpu) — generic so the same batcher
/// works for the autodiff training backend and the plain
/// evaluation backend.
#[derive(Debug, Clone)]
pub struct DialogBatch<B: Backend> {
    /// Encoded questions — shape: [batch_size, max_question_len]
    pub questions: Tensor<B, 2, Int>,

    /// Encoded answers — shape: [batch_size, max_answer_len]
    pub answers: Tensor<B, 2, Int>,
}

// ─── DialogBatcher ────────────────────────────────────────────────────────────
/// Holds the target device and the pad id resolved from the
/// trained vocabulary.
#[derive(Clone, Debug)]
pub struct DialogBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,
    /// Fill value for positions past a sequence's end
    pub pad_id: u32,
}

impl<B: Backend> DialogBatcher<B> {
    pub fn new(device: B::Device, pad_id: u32) -> Self {
        Self { device, pad_id }
    }

    /// Pad a list of sequences to one rectangle and upload it
    /// as a [batch, max_len] Int tensor.
    fn to_tensor(&self, seqs: &[Vec<u32>]) -> Tensor<B, 2, Int> {
        let padded = pad_to_longest(seqs, self.pad_id);
        let batch_size = padded.len();
        let seq_len = padded.first().map_or(0, Vec::len);

        let flat: Vec<i32> = padded
            .iter()
            .flat_map(|s| s.iter().map(|&x| x as i32))
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len])
    }
}

impl<B: Backend> Batcher<DialogPair, DialogBatch<B>> for DialogBatcher<B> {
    fn batch(&self, items: Vec<DialogPair>) -> DialogBatch<B> {
        let questions: Vec<Vec<u32>> = items.iter().map(|p| p.question.clone()).collect();
        let answers: Vec<Vec<u32>> = items.iter().map(|p| p.answer.clone()).collect();

        DialogBatch {
            questions: self.to_tensor(&questions),
            answers:   self.to_tensor(&answers),
        }
    }
}

/// Pad every sequence to the length of the longest one, in place of
/// order: output[i] is input[i] followed by pad ids.
pub(crate) fn pad_to_longest(seqs: &[Vec<u32>], pad_id: u32) -> Vec<Vec<u32>> {
    let max_len = seqs.iter().map(Vec::len).max().unwrap_or(0);

    seqs.iter()
        .map(|s| {
            let mut padded = s.clone();
            padded.resize(max_len, pad_id);
            padded
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const PAD: u32 = 0;

    #[test]
    fn test_pads_to_batch_maximum() {
        let seqs = vec![vec![2, 5, 3], vec![2, 3], vec![2, 5, 6, 7, 3]];
        let padded = pad_to_longest(&seqs, PAD);

        assert!(padded.iter().all(|s| s.len() == 5));
        assert_eq!(padded[1], vec![2, 3, PAD, PAD, PAD]);
    }

    #[test]
    fn test_preserves_batch_order() {
        let seqs = vec![vec![9], vec![8], vec![7]];
        let padded = pad_to_longest(&seqs, PAD);

        assert_eq!(padded[0][0], 9);
        assert_eq!(padded[1][0], 8);
        assert_eq!(padded[2][0], 7);
    }

    #[test]
    fn test_already_uniform_batch_is_unchanged() {
        let seqs = vec![vec![2, 5, 3], vec![2, 6, 3]];
        assert_eq!(pad_to_longest(&seqs, PAD), seqs);
    }

    #[test]
    fn test_empty_batch() {
        let padded = pad_to_longest(&[], PAD);
        assert!(padded.is_empty());
    }
}
