use burn::data::dataset::Dataset;
use std::collections::HashMap;
use std::sync::Arc;

use crate::data::encoder::EncodedRecord;
use crate::data::splitter::split_train_test;

/// One training example: the encoded question and its encoded reply.
#[derive(Debug, Clone)]
pub struct DialogPair {
    pub question: Vec<u32>,
    pub answer:   Vec<u32>,
}

/// Exposes (question, answer) pairs over the encoded record table.
///
/// An answer is eligible when its `reply_to` id is non-empty; the
/// parent lookup happens at access time. A `reply_to` id that is
/// missing from the table is a corpus consistency violation and
/// panics on access — it is deliberately not checked defensively.
pub struct DialogDataset {
    /// All encoded records keyed by id, shared between splits
    records: Arc<HashMap<String, EncodedRecord>>,
    /// Ids of eligible answer records, in corpus order
    answer_ids: Vec<String>,
}

impl DialogDataset {
    /// Build the dataset from records in corpus order.
    pub fn new(encoded: Vec<EncodedRecord>) -> Self {
        let answer_ids: Vec<String> = encoded
            .iter()
            .filter(|e| e.record.is_answer())
            .map(|e| e.record.id.clone())
            .collect();

        let records: HashMap<String, EncodedRecord> = encoded
            .into_iter()
            .map(|e| (e.record.id.clone(), e))
            .collect();

        Self { records: Arc::new(records), answer_ids }
    }

    /// Number of eligible (question, answer) pairs
    pub fn pair_count(&self) -> usize {
        self.answer_ids.len()
    }

    /// Shuffle the eligible pairs and split them into
    /// (train, test) datasets sharing the same record table.
    pub fn split(self, train_fraction: f64) -> (Self, Self) {
        let (train_ids, test_ids) = split_train_test(self.answer_ids, train_fraction);
        (
            Self { records: Arc::clone(&self.records), answer_ids: train_ids },
            Self { records: self.records, answer_ids: test_ids },
        )
    }
}

impl Dataset<DialogPair> for DialogDataset {
    fn get(&self, index: usize) -> Option<DialogPair> {
        let answer_id = self.answer_ids.get(index)?;
        let answer = &self.records[answer_id.as_str()];

        // Eligibility guarantees reply_to is Some; the indexing panics
        // if the parent record is absent from the table.
        let question_id = answer.record.reply_to.as_deref()?;
        let question = &self.records[question_id];

        Some(DialogPair {
            question: question.token_ids.clone(),
            answer:   answer.token_ids.clone(),
        })
    }

    fn len(&self) -> usize {
        self.answer_ids.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;

    const BOS: u32 = 2;
    const EOS: u32 = 3;

    fn encoded(id: &str, reply_to: Option<&str>, interior: &[u32]) -> EncodedRecord {
        let mut token_ids = vec![BOS];
        token_ids.extend_from_slice(interior);
        token_ids.push(EOS);
        EncodedRecord {
            record: Record::new(id, "text", reply_to.map(String::from)),
            token_ids,
        }
    }

    fn small_corpus() -> Vec<EncodedRecord> {
        vec![
            encoded("L1", None, &[10, 11]),
            encoded("L2", Some("L1"), &[12]),
            encoded("L3", Some("L2"), &[13, 14]),
            encoded("L4", None, &[15]),
        ]
    }

    #[test]
    fn test_length_counts_eligible_answers_only() {
        // 4 records, exactly 2 with a non-empty parent id
        let ds = DialogDataset::new(small_corpus());
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_pairs_resolve_parent_at_access_time() {
        let ds = DialogDataset::new(small_corpus());

        let pair = ds.get(0).unwrap();
        assert_eq!(pair.question, vec![BOS, 10, 11, EOS]); // L1
        assert_eq!(pair.answer, vec![BOS, 12, EOS]);       // L2

        let pair = ds.get(1).unwrap();
        assert_eq!(pair.question, vec![BOS, 12, EOS]);     // L2
        assert_eq!(pair.answer, vec![BOS, 13, 14, EOS]);   // L3
    }

    #[test]
    fn test_both_sides_carry_sequence_markers() {
        let ds = DialogDataset::new(small_corpus());
        for i in 0..ds.len() {
            let pair = ds.get(i).unwrap();
            assert_eq!(pair.question.first(), Some(&BOS));
            assert_eq!(pair.question.last(), Some(&EOS));
            assert_eq!(pair.answer.first(), Some(&BOS));
            assert_eq!(pair.answer.last(), Some(&EOS));
        }
    }

    #[test]
    fn test_out_of_range_returns_none() {
        let ds = DialogDataset::new(small_corpus());
        assert!(ds.get(2).is_none());
    }

    #[test]
    fn test_repeated_access_returns_same_pair() {
        // Sequences are encoded once and cached; two lookups of the
        // same index must return identical ids.
        let ds = DialogDataset::new(small_corpus());
        let a = ds.get(0).unwrap();
        let b = ds.get(0).unwrap();
        assert_eq!(a.question, b.question);
        assert_eq!(a.answer, b.answer);
    }

    #[test]
    #[should_panic]
    fn test_missing_parent_panics() {
        let ds = DialogDataset::new(vec![encoded("L2", Some("L999"), &[12])]);
        let _ = ds.get(0);
    }

    #[test]
    fn test_split_preserves_all_pairs() {
        let ds = DialogDataset::new(small_corpus());
        let (train, test) = ds.split(0.5);
        assert_eq!(train.len() + test.len(), 2);
    }
}
