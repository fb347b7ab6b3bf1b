// ============================================================
// Layer 4 — Record Encoder
// ============================================================
// Turns record text into the integer sequences the model consumes.
//
// Sequence format for a record with segments s1, s2, ..., sn:
//
//   [BOS] ids(s1) [SEP] ids(s2) [SEP] ... ids(sn) [EOS]
//
// The encoder always appends a separator after each segment and
// then overwrites the final trailing separator with the end
// marker, so single-segment records come out as
// [BOS] ids [EOS] with no separator at all.
//
// Encoding happens exactly once per record at pipeline start;
// the result is stored alongside the record and reused for every
// epoch and every pair lookup.

use anyhow::Result;
use tokenizers::Tokenizer;

use crate::domain::record::Record;
use crate::domain::vocab::SpecialTokens;

/// A record together with its cached token-id sequence.
#[derive(Debug, Clone)]
pub struct EncodedRecord {
    pub record:    Record,
    pub token_ids: Vec<u32>,
}

/// Encodes records with a trained tokenizer and explicit marker ids.
pub struct Encoder {
    tokenizer:   Tokenizer,
    specials:    SpecialTokens,
    max_seq_len: usize,
}

impl Encoder {
    pub fn new(tokenizer: Tokenizer, specials: SpecialTokens, max_seq_len: usize) -> Self {
        Self { tokenizer, specials, max_seq_len }
    }

    /// Encode every record once, in order.
    pub fn encode_all(&self, records: Vec<Record>) -> Result<Vec<EncodedRecord>> {
        records
            .into_iter()
            .map(|record| {
                let token_ids = self.encode_record(&record)?;
                Ok(EncodedRecord { record, token_ids })
            })
            .collect()
    }

    /// Encode one record's text segments into a bounded id sequence.
    ///
    /// The sequence always starts with [BOS] and ends with [EOS];
    /// when truncation cuts the tail off, [EOS] is re-pinned at the
    /// last position so the end-marker invariant survives.
    pub fn encode_record(&self, record: &Record) -> Result<Vec<u32>> {
        let mut ids = vec![self.specials.bos];

        for segment in &record.text {
            let encoding = self
                .tokenizer
                .encode(segment.as_str(), false)
                .map_err(|e| anyhow::anyhow!("Cannot encode record '{}': {e}", record.id))?;
            ids.extend_from_slice(encoding.get_ids());
            ids.push(self.specials.sep);
        }

        // Collapse the trailing separator into the end marker
        let last = ids.len() - 1;
        ids[last] = self.specials.eos;

        if ids.len() > self.max_seq_len {
            ids.truncate(self.max_seq_len);
            ids[self.max_seq_len - 1] = self.specials.eos;
        }

        Ok(ids)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;
    use std::collections::HashMap;
    use tokenizers::models::wordlevel::WordLevel;

    // A tiny in-memory word-level tokenizer stands in for the trained
    // BPE model: the encoder only needs text → ids.
    fn test_encoder(max_seq_len: usize) -> Encoder {
        let mut vocab: HashMap<String, u32> = HashMap::new();
        for (i, tok) in ["[PAD]", "[UNK]", "[BOS]", "[EOS]", "[SEP]"].iter().enumerate() {
            vocab.insert(tok.to_string(), i as u32);
        }
        for (i, word) in ["hello", "world", "how", "are", "you"].iter().enumerate() {
            vocab.insert(word.to_string(), 5 + i as u32);
        }

        let model = WordLevel::builder()
            .vocab(vocab)
            .unk_token("[UNK]".to_string())
            .build()
            .unwrap();
        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_pre_tokenizer(
            tokenizers::pre_tokenizers::whitespace::Whitespace::default(),
        );

        let specials = SpecialTokens { pad: 0, unk: 1, bos: 2, eos: 3, sep: 4 };
        Encoder::new(tokenizer, specials, max_seq_len)
    }

    #[test]
    fn test_wraps_with_bos_and_eos() {
        let enc = test_encoder(64);
        let ids = enc.encode_record(&Record::new("L1", "hello world", None)).unwrap();

        assert_eq!(ids.first(), Some(&2));
        assert_eq!(ids.last(), Some(&3));
        // [BOS] hello world [EOS]
        assert_eq!(ids, vec![2, 5, 6, 3]);
    }

    #[test]
    fn test_separator_between_segments_collapses_at_end() {
        let enc = test_encoder(64);
        let mut record = Record::new("L1", "hello", None);
        record.text.push("world".to_string());

        let ids = enc.encode_record(&record).unwrap();
        // [BOS] hello [SEP] world [EOS] — the final separator became [EOS]
        assert_eq!(ids, vec![2, 5, 4, 6, 3]);
    }

    #[test]
    fn test_truncation_keeps_end_marker() {
        let enc = test_encoder(4);
        let ids = enc
            .encode_record(&Record::new("L1", "hello world how are you", None))
            .unwrap();

        assert_eq!(ids.len(), 4);
        assert_eq!(ids.first(), Some(&2));
        assert_eq!(ids.last(), Some(&3));
    }

    #[test]
    fn test_encode_once_is_stable() {
        // The encode-once contract: repeated calls over the same
        // frozen record and vocabulary must agree.
        let enc = test_encoder(64);
        let record = Record::new("L1", "how are you", None);
        assert_eq!(
            enc.encode_record(&record).unwrap(),
            enc.encode_record(&record).unwrap()
        );
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let enc = test_encoder(64);
        let ids = enc.encode_record(&Record::new("L1", "hello zzz", None)).unwrap();
        // [BOS] hello [UNK] [EOS]
        assert_eq!(ids, vec![2, 5, 1, 3]);
    }
}
