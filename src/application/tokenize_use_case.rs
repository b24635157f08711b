// ============================================================
// Layer 2 — TokenizeUseCase
// ============================================================
// Loads the family tokenizer (with entity markers) and encodes
// one entity-marked sentence. Used to check that a pretrained
// resource resolves and that the markers survive tokenization.

use anyhow::Result;
use serde::Serialize;
use tokenizers::Tokenizer;

use crate::infra::tokenizer_factory::{load_tokenizer, TokenizerConfig, ADDITIONAL_SPECIAL_TOKENS};

/// Encoded view of one sentence
#[derive(Debug, Clone, Serialize)]
pub struct TokenizedText {
    pub tokens: Vec<String>,
    pub ids:    Vec<u32>,
    /// Position of each entity marker that appears in the output
    pub marker_positions: Vec<(String, usize)>,
}

pub struct TokenizeUseCase {
    tokenizer: Tokenizer,
}

impl TokenizeUseCase {
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        Ok(Self { tokenizer: load_tokenizer(config)? })
    }

    pub fn tokenize(&self, text: &str, add_special_tokens: bool) -> Result<TokenizedText> {
        let enc = self.tokenizer
            .encode(text, add_special_tokens)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

        let tokens = enc.get_tokens().to_vec();
        let marker_positions = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| ADDITIONAL_SPECIAL_TOKENS.contains(&t.as_str()))
            .map(|(i, t)| (t.clone(), i))
            .collect();

        Ok(TokenizedText {
            tokens,
            ids: enc.get_ids().to_vec(),
            marker_positions,
        })
    }
}
