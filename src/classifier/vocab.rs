//! Label vocabularies for the supported pretrained emotion models.
//!
//! Two vocabularies are supported: the 28-label GoEmotions taxonomy (primary)
//! and a 7-label basic-emotion taxonomy (fallback). Consumers must treat the
//! vocabulary as opaque label sets — nothing downstream may assume a fixed
//! label count or ordering.

use serde::{Deserialize, Serialize};

/// GoEmotions label set, in the model's output order.
pub const GO_EMOTIONS_LABELS: &[&str] = &[
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// Basic-emotion label set, in the model's output order.
pub const BASIC_LABELS: &[&str] = &[
    "anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise",
];

/// How raw model logits are mapped to `[0, 1]` scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Independent per-label sigmoid (multi-label models).
    Sigmoid,
    /// Softmax over all labels (single-label models).
    Softmax,
}

/// A supported model vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    /// 28-label GoEmotions taxonomy (multi-label).
    #[serde(rename = "goemotions")]
    GoEmotions,
    /// 7-label basic-emotion taxonomy (single-label).
    Basic,
}

impl Vocabulary {
    /// Label names in the model's output order.
    #[must_use]
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Vocabulary::GoEmotions => GO_EMOTIONS_LABELS,
            Vocabulary::Basic => BASIC_LABELS,
        }
    }

    /// Logit activation used by models with this vocabulary.
    #[must_use]
    pub fn activation(&self) -> Activation {
        match self {
            Vocabulary::GoEmotions => Activation::Sigmoid,
            Vocabulary::Basic => Activation::Softmax,
        }
    }

    /// Number of labels in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels().len()
    }

    /// Vocabularies are never empty; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels().is_empty()
    }
}
