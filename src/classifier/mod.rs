//! Emotion classifier boundary.
//!
//! The core treats the classifier as a black-box scoring oracle: text in, one
//! confidence per vocabulary label out. [`EmotionClassifier`] is the
//! capability seam; [`OnnxEmotionClassifier`] is the concrete pretrained-model
//! implementation. [`load_classifier`] performs the one-time startup load with
//! the primary → fallback chain — callers hold on to the returned handle and
//! reuse it for every turn.

pub mod onnx;
pub mod vocab;

use crate::config::ClassifierConfig;
use crate::error::{AsyticError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use onnx::OnnxEmotionClassifier;
pub use vocab::{Activation, Vocabulary};

/// One (label, confidence) pair from a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

/// Full per-label confidence distribution for one input, sorted by
/// descending score. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    entries: Vec<ScoredLabel>,
}

impl ScoreDistribution {
    /// Build a distribution from parallel label/score slices.
    ///
    /// Entries are sorted by descending score. Ties keep the model's label
    /// order, so results are deterministic.
    #[must_use]
    pub fn from_scores(labels: &[&str], scores: &[f32]) -> Self {
        let mut entries: Vec<ScoredLabel> = labels
            .iter()
            .zip(scores)
            .map(|(label, &score)| ScoredLabel {
                label: (*label).to_owned(),
                score,
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    /// The highest-scoring entry, or `None` for an empty distribution.
    #[must_use]
    pub fn top(&self) -> Option<&ScoredLabel> {
        self.entries.first()
    }

    /// The top `n` entries by score (fewer if the vocabulary is smaller).
    #[must_use]
    pub fn top_n(&self, n: usize) -> &[ScoredLabel] {
        &self.entries[..self.entries.len().min(n)]
    }

    /// All entries, descending by score.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredLabel> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capability seam: scores text over some label vocabulary.
///
/// Implementations are interchangeable; consumers only rely on the label
/// names inside the returned distribution, never on vocabulary size.
pub trait EmotionClassifier {
    /// The vocabulary this classifier scores over.
    fn vocabulary(&self) -> Vocabulary;

    /// Score `text` against every label in the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization or inference fails. Failures are not
    /// retried; the caller surfaces them.
    fn classify(&mut self, text: &str) -> Result<ScoreDistribution>;
}

/// Load the emotion classifier once at startup.
///
/// Tries the configured primary model first; on failure logs a warning and
/// tries the fallback model. If both fail the error is fatal — there is no
/// further fallback.
///
/// # Errors
///
/// Returns [`AsyticError::Model`] when neither model can be loaded.
pub fn load_classifier(config: &ClassifierConfig) -> Result<Box<dyn EmotionClassifier>> {
    match OnnxEmotionClassifier::load(&config.primary) {
        Ok(classifier) => {
            info!(
                model = config.primary.repo_id.as_str(),
                "primary emotion model ready"
            );
            Ok(Box::new(classifier))
        }
        Err(primary_err) => {
            warn!(
                model = config.primary.repo_id.as_str(),
                error = %primary_err,
                "primary emotion model unavailable, trying fallback"
            );
            let classifier = OnnxEmotionClassifier::load(&config.fallback).map_err(|e| {
                AsyticError::Model(format!(
                    "no emotion model available (primary: {primary_err}; fallback: {e})"
                ))
            })?;
            info!(
                model = config.fallback.repo_id.as_str(),
                "fallback emotion model ready"
            );
            Ok(Box::new(classifier))
        }
    }
}
