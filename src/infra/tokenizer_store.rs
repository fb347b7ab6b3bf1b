// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Trains, saves, and reloads the BPE subword tokenizer.
//
// Training path:
//   1. Every record's text is written, one line per record, to a
//      NamedTempFile — the trainer wants a file, and the temp
//      handle guarantees the intermediate corpus is deleted when
//      this function returns, success or error.
//   2. BpeTrainer learns merges with the reserved control tokens
//      registered first, pinning [PAD]=0 [UNK]=1 [BOS]=2 [EOS]=3
//      and the user-defined symbols right after.
//   3. The trained model is persisted as tokenizer.json plus a
//      plain vocab.json dump.
//
// On later runs the saved tokenizer.json is loaded instead, so
// training and any downstream use share one frozen vocabulary.
//
// Reference: Sennrich et al. (2016) BPE paper
//            tokenizers crate documentation

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tokenizers::{
    models::bpe::{BpeTrainer, BPE},
    models::TrainerWrapper,
    pre_tokenizers::whitespace::Whitespace,
    AddedToken, Tokenizer,
};

use crate::domain::record::Record;
use crate::domain::vocab::{
    SpecialTokens, BOS_TOKEN, EOS_TOKEN, PAD_TOKEN, RESERVED_TOKENS, SEP_TOKEN, UNK_TOKEN,
};

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the existing tokenizer or train a new one on the records.
    pub fn load_or_build(&self, records: &[Record], vocab_size: usize) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Training new BPE tokenizer (vocab_size={})", vocab_size);
            self.train_and_save(records, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from its JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Cannot load tokenizer from '{}': {e}", path.display()))
    }

    /// Train a BPE model over all record texts and persist it.
    fn train_and_save(&self, records: &[Record], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output dir '{}'", self.dir.display()))?;

        // ── Step 1: Flat training corpus in a temp file ───────────────────────
        // The handle owns the file: dropped on every exit path,
        // so no stray corpus artifact survives the training step.
        let mut corpus = tempfile::NamedTempFile::new()
            .context("Cannot create temp corpus file")?;
        for record in records {
            writeln!(corpus, "{}", record.text.join(" "))
                .context("Cannot write temp corpus file")?;
        }
        corpus.flush()?;

        // ── Step 2: Train the BPE model ───────────────────────────────────────
        let bpe = BPE::builder()
            .unk_token(UNK_TOKEN.to_string())
            .build()
            .map_err(|e| anyhow::anyhow!("Cannot build BPE model: {e}"))?;

        let mut tokenizer = Tokenizer::new(bpe);
        tokenizer.with_pre_tokenizer(Whitespace::default());

        // Reserved tokens first, so their ids are 0..=6 in declared order
        let specials: Vec<AddedToken> = RESERVED_TOKENS
            .iter()
            .map(|tok| AddedToken::from(*tok, true))
            .collect();

        let mut trainer: TrainerWrapper = BpeTrainer::builder()
            .vocab_size(vocab_size)
            .special_tokens(specials)
            .build()
            .into();

        let corpus_path = corpus.path().to_string_lossy().into_owned();
        tokenizer
            .train_from_files(&mut trainer, vec![corpus_path])
            .map_err(|e| anyhow::anyhow!("Tokenizer training failed: {e}"))?;

        // ── Step 3: Persist model and vocabulary ──────────────────────────────
        let tok_path = self.dir.join("tokenizer.json");
        tokenizer
            .save(&tok_path, false)
            .map_err(|e| anyhow::anyhow!("Cannot save tokenizer to '{}': {e}", tok_path.display()))?;

        // Sorted token → id dump, handy for eyeballing the vocabulary
        let vocab: BTreeMap<String, u32> = tokenizer.get_vocab(true).into_iter().collect();
        let vocab_path = self.dir.join("vocab.json");
        std::fs::write(&vocab_path, serde_json::to_string_pretty(&vocab)?)
            .with_context(|| format!("Cannot write '{}'", vocab_path.display()))?;

        tracing::info!(
            "Tokenizer trained with {} symbols, saved to '{}'",
            vocab.len(),
            tok_path.display()
        );

        Ok(tokenizer)
    }
}

/// Resolve the control-token ids from a trained vocabulary.
/// Fails if any reserved token is missing — that means the
/// tokenizer on disk was not trained by this pipeline.
pub fn special_tokens(tokenizer: &Tokenizer) -> Result<SpecialTokens> {
    let resolve = |token: &str| {
        tokenizer
            .token_to_id(token)
            .ok_or_else(|| anyhow::anyhow!("Vocabulary is missing reserved token '{token}'"))
    };

    Ok(SpecialTokens {
        pad: resolve(PAD_TOKEN)?,
        unk: resolve(UNK_TOKEN)?,
        bos: resolve(BOS_TOKEN)?,
        eos: resolve(EOS_TOKEN)?,
        sep: resolve(SEP_TOKEN)?,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokenizers::models::wordlevel::WordLevel;

    #[test]
    fn test_special_tokens_resolved_from_vocab() {
        let mut vocab: HashMap<String, u32> = HashMap::new();
        for (i, tok) in RESERVED_TOKENS.iter().enumerate() {
            vocab.insert(tok.to_string(), i as u32);
        }
        let model = WordLevel::builder()
            .vocab(vocab)
            .unk_token(UNK_TOKEN.to_string())
            .build()
            .unwrap();
        let tokenizer = Tokenizer::new(model);

        let specials = special_tokens(&tokenizer).unwrap();
        assert_eq!(specials.pad, 0);
        assert_eq!(specials.unk, 1);
        assert_eq!(specials.bos, 2);
        assert_eq!(specials.eos, 3);
        assert_eq!(specials.sep, 4);
    }

    #[test]
    fn test_missing_reserved_token_is_an_error() {
        let model = WordLevel::builder()
            .vocab(HashMap::from([(UNK_TOKEN.to_string(), 0u32)]))
            .unk_token(UNK_TOKEN.to_string())
            .build()
            .unwrap();
        let tokenizer = Tokenizer::new(model);

        assert!(special_tokens(&tokenizer).is_err());
    }
}
