// ============================================================
// Layer 3 — Reserved Vocabulary Symbols
// ============================================================
// Names of the control tokens reserved in the trained vocabulary
// and the SpecialTokens struct carrying their resolved ids.
//
// The ids are not hard-coded anywhere outside the tokenizer
// trainer: every component that needs a pad or marker id receives
// a SpecialTokens value resolved from the actual vocabulary.
// That keeps tokenizer and model agreement in one place instead
// of scattered module-level constants.
//
// Id layout after training (reserved tokens are registered first,
// in this order):
//   [PAD]=0  [UNK]=1  [BOS]=2  [EOS]=3  [SEP]=4  [CLS]=5  [MASK]=6
//
// [CLS] and [MASK] are reserved so the vocabulary keeps fixed ids
// for classification and masking heads trained on the same corpus;
// the seq2seq pipeline itself never emits them.

/// Padding token — fills sequences up to the batch length
pub const PAD_TOKEN: &str = "[PAD]";
/// Unknown token — stands in for unseen subwords
pub const UNK_TOKEN: &str = "[UNK]";
/// Beginning-of-sequence marker
pub const BOS_TOKEN: &str = "[BOS]";
/// End-of-sequence marker
pub const EOS_TOKEN: &str = "[EOS]";
/// Separator between text segments of one record
pub const SEP_TOKEN: &str = "[SEP]";
/// Classification slot, reserved but unused here
pub const CLS_TOKEN: &str = "[CLS]";
/// Masking slot, reserved but unused here
pub const MASK_TOKEN: &str = "[MASK]";

/// All reserved tokens in id order. The tokenizer trainer registers
/// them before any learned subword, so their ids are 0..=6.
pub const RESERVED_TOKENS: [&str; 7] = [
    PAD_TOKEN, UNK_TOKEN, BOS_TOKEN, EOS_TOKEN, SEP_TOKEN, CLS_TOKEN, MASK_TOKEN,
];

/// Resolved ids of the control tokens the pipeline actually uses.
/// Built once from the trained vocabulary and passed explicitly to
/// the encoder, collator and trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTokens {
    pub pad: u32,
    pub unk: u32,
    pub bos: u32,
    pub eos: u32,
    pub sep: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_comes_first() {
        // Pad must sit at id 0 so zero-filled tensors are padding.
        assert_eq!(RESERVED_TOKENS[0], PAD_TOKEN);
    }
}
