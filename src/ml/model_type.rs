// ============================================================
// Layer 5 — Encoder Families
// ============================================================
// The relation classifier runs on top of one of three encoder
// families. Each family fixes:
//   - a default pretrained checkpoint identifier
//   - the subword model its tokenizer must use
//
//   family   default checkpoint     tokenizer model
//   bert     bert-base-uncased      WordPiece
//   roberta  roberta-base           BPE (byte level)
//   albert   albert-xxlarge-v1      Unigram (SentencePiece)

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Bert,
    Roberta,
    Albert,
}

/// Subword model a family's tokenizer is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubwordKind {
    WordPiece,
    Bpe,
    Unigram,
    WordLevel,
}

impl fmt::Display for SubwordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubwordKind::WordPiece => "WordPiece",
            SubwordKind::Bpe       => "BPE",
            SubwordKind::Unigram   => "Unigram",
            SubwordKind::WordLevel => "WordLevel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("unknown model type '{0}' (expected one of: bert, roberta, albert)")]
pub struct UnknownModelType(pub String);

impl ModelType {
    pub const ALL: [ModelType; 3] = [ModelType::Bert, ModelType::Roberta, ModelType::Albert];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Bert    => "bert",
            ModelType::Roberta => "roberta",
            ModelType::Albert  => "albert",
        }
    }

    /// Pretrained checkpoint used when no path is given
    pub fn default_path(&self) -> &'static str {
        match self {
            ModelType::Bert    => "bert-base-uncased",
            ModelType::Roberta => "roberta-base",
            ModelType::Albert  => "albert-xxlarge-v1",
        }
    }

    pub fn subword_kind(&self) -> SubwordKind {
        match self {
            ModelType::Bert    => SubwordKind::WordPiece,
            ModelType::Roberta => SubwordKind::Bpe,
            ModelType::Albert  => SubwordKind::Unigram,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = UnknownModelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ModelType::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| UnknownModelType(s.to_string()))
    }
}
