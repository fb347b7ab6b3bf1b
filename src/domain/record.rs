// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// Represents a single utterance from the conversation corpus.
// This is a plain data struct with no behaviour — an id, the
// utterance text, and optionally the id of the message it
// replies to.
//
// The reply-to link is what turns a flat corpus into training
// pairs: a record whose `reply_to` points at another record is
// an *answer*, and the record it points at is its *question*.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One utterance loaded from the corpus.
///
/// `text` holds one or more segments: the loader produces a single
/// segment per record, but the encoder supports multi-segment texts
/// by joining them with a separator token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Corpus-wide unique identifier of this utterance
    pub id: String,

    /// The utterance text, split into segments
    pub text: Vec<String>,

    /// Id of the utterance this one replies to.
    /// None for conversation starters — those records can still
    /// serve as questions but never as answers.
    pub reply_to: Option<String>,
}

impl Record {
    /// Create a new single-segment Record.
    /// An empty or missing parent id normalises to None so that
    /// "no parent" has exactly one representation.
    pub fn new(
        id:       impl Into<String>,
        text:     impl Into<String>,
        reply_to: Option<String>,
    ) -> Self {
        Self {
            id:       id.into(),
            text:     vec![text.into()],
            reply_to: reply_to.filter(|p| !p.is_empty()),
        }
    }

    /// Returns true if this record replies to another record,
    /// i.e. it is eligible to be the answer half of a pair.
    pub fn is_answer(&self) -> bool {
        self.reply_to.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parent_normalises_to_none() {
        let r = Record::new("L1", "hello", Some(String::new()));
        assert!(r.reply_to.is_none());
        assert!(!r.is_answer());
    }

    #[test]
    fn test_present_parent_is_kept() {
        let r = Record::new("L2", "hi there", Some("L1".into()));
        assert_eq!(r.reply_to.as_deref(), Some("L1"));
        assert!(r.is_answer());
    }
}
