// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads a newline-delimited JSON conversation corpus.
//
// File format, one record per line:
//   {"id": "L1045", "text": "They do not!", "reply-to": "L1044"}
//
// The historical corpus export is ISO-8859-1 encoded, not UTF-8.
// ISO-8859-1 maps every byte to the Unicode code point of the same
// value, so decoding is a direct byte→char widening — no external
// encoding crate needed for this one legacy charset.
//
// Unlike lenient loaders that skip bad entries, a malformed line
// fails the whole load: a corpus with undetected holes would
// silently bias the reply-to pairing.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::domain::record::Record;
use crate::domain::traits::RecordSource;

/// The on-disk shape of one corpus line.
/// Kept private to this module — the rest of the system only
/// sees the domain Record.
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    text: String,
    #[serde(rename = "reply-to")]
    reply_to: Option<String>,
}

/// Loads all records from a newline-delimited JSON file.
/// Implements the RecordSource trait from Layer 3.
pub struct NdjsonLoader {
    /// Path to the corpus file
    path: PathBuf,
}

impl NdjsonLoader {
    /// Create a new NdjsonLoader pointed at a corpus file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for NdjsonLoader {
    fn load_all(&self) -> Result<Vec<Record>> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        // ISO-8859-1 → String: each byte is its own code point
        let text = decode_latin1(&bytes);

        let mut records = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            // Blank lines are malformed too: every line must be a record
            let raw: RawRecord = serde_json::from_str(line).with_context(|| {
                format!(
                    "Malformed corpus line {} in '{}'",
                    line_no + 1,
                    self.path.display()
                )
            })?;

            records.push(Record::new(raw.id, raw.text.trim(), raw.reply_to));
        }

        tracing::info!("Loaded {} records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

/// Decode ISO-8859-1 bytes into a String.
/// Every byte value 0x00..=0xFF maps to U+0000..=U+00FF.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_loads_records_in_file_order() {
        let f = write_corpus(
            br#"{"id": "L1", "text": "hello", "reply-to": null}
{"id": "L2", "text": "hi back", "reply-to": "L1"}
"#,
        );
        let records = NdjsonLoader::new(f.path()).load_all().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "L1");
        assert!(records[0].reply_to.is_none());
        assert_eq!(records[1].reply_to.as_deref(), Some("L1"));
    }

    #[test]
    fn test_decodes_iso_8859_1() {
        // 0xE9 is 'é' in ISO-8859-1 and invalid as standalone UTF-8
        let mut line = br#"{"id": "L1", "text": "caf"#.to_vec();
        line.push(0xE9);
        line.extend_from_slice(br#"", "reply-to": null}"#);

        let f = write_corpus(&line);
        let records = NdjsonLoader::new(f.path()).load_all().unwrap();
        assert_eq!(records[0].text[0], "caf\u{e9}");
    }

    #[test]
    fn test_malformed_line_fails_whole_load() {
        let f = write_corpus(
            br#"{"id": "L1", "text": "ok", "reply-to": null}
not json at all
"#,
        );
        let err = NdjsonLoader::new(f.path()).load_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_blank_line_fails_whole_load() {
        // No leniency: a blank interior line is a malformed record
        let f = write_corpus(
            br#"{"id": "L1", "text": "ok", "reply-to": null}

{"id": "L2", "text": "also ok", "reply-to": "L1"}
"#,
        );
        let err = NdjsonLoader::new(f.path()).load_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_text_is_trimmed() {
        let f = write_corpus(br#"{"id": "L1", "text": "  padded  ", "reply-to": null}"#);
        let records = NdjsonLoader::new(f.path()).load_all().unwrap();
        assert_eq!(records[0].text[0], "padded");
    }
}
