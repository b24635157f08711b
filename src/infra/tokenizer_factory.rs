// ============================================================
// Layer 6 — Tokenizer Factory
// ============================================================
// Builds the subword tokenizer for the chosen encoder family
// and extends it with the entity boundary markers:
//
//   "The <e1> company </e1> was founded by <e2> Jobs </e2> ."
//
// Resolution of model_name_or_path:
//   1. existing directory → <dir>/tokenizer.json
//   2. existing file      → loaded as a tokenizer JSON
//   3. anything else      → pretrained identifier on the hub
//
// The loaded tokenizer's subword model must match the family
// (WordPiece for BERT, BPE for RoBERTa, Unigram for ALBERT).
//
// Reference: HuggingFace tokenizers crate documentation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokenizers::{models::ModelWrapper, AddedToken, Tokenizer};

use crate::ml::model_type::{ModelType, SubwordKind};

/// Markers delimiting the head (e1) and tail (e2) entity spans
pub const ADDITIONAL_SPECIAL_TOKENS: [&str; 4] = ["<e1>", "</e1>", "<e2>", "</e2>"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub model_type:         ModelType,
    pub model_name_or_path: String,
}

impl TokenizerConfig {
    /// Config pointing at the family's default pretrained checkpoint
    pub fn for_family(model_type: ModelType) -> Self {
        Self {
            model_type,
            model_name_or_path: model_type.default_path().to_string(),
        }
    }
}

/// Load the family's tokenizer and register the entity markers.
pub fn load_tokenizer(cfg: &TokenizerConfig) -> Result<Tokenizer> {
    let mut tokenizer = resolve(&cfg.model_name_or_path)?;

    let found = subword_kind(&tokenizer);
    let expected = cfg.model_type.subword_kind();
    if found != expected {
        anyhow::bail!(
            "Tokenizer at '{}' uses a {} model but {} expects {}",
            cfg.model_name_or_path,
            found,
            cfg.model_type,
            expected,
        );
    }

    let markers: Vec<AddedToken> = ADDITIONAL_SPECIAL_TOKENS
        .iter()
        .map(|t| AddedToken::from(*t, true))
        .collect();
    let added = tokenizer.add_special_tokens(&markers);

    tracing::info!(
        "Loaded {} tokenizer from '{}' ({} entity markers added, vocab={})",
        cfg.model_type,
        cfg.model_name_or_path,
        added,
        tokenizer.get_vocab_size(true),
    );
    Ok(tokenizer)
}

fn resolve(model_name_or_path: &str) -> Result<Tokenizer> {
    let path = Path::new(model_name_or_path);

    if path.is_dir() {
        let file: PathBuf = path.join("tokenizer.json");
        tracing::debug!("Loading tokenizer from directory '{}'", path.display());
        return from_file(&file);
    }
    if path.is_file() {
        return from_file(path);
    }

    tracing::info!("Fetching pretrained tokenizer '{}'", model_name_or_path);
    Tokenizer::from_pretrained(model_name_or_path, None)
        .map_err(|e| anyhow::anyhow!(
            "Cannot resolve pretrained tokenizer '{}': {}", model_name_or_path, e
        ))
}

fn from_file(path: &Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path)
        .map_err(|e| anyhow::anyhow!(
            "Cannot load tokenizer from '{}': {}", path.display(), e
        ))
}

fn subword_kind(tokenizer: &Tokenizer) -> SubwordKind {
    match tokenizer.get_model() {
        ModelWrapper::WordPiece(_) => SubwordKind::WordPiece,
        ModelWrapper::BPE(_)       => SubwordKind::Bpe,
        ModelWrapper::Unigram(_)   => SubwordKind::Unigram,
        ModelWrapper::WordLevel(_) => SubwordKind::WordLevel,
    }
}
