//! Configuration types for the chat companion core.
//!
//! Every section has serde defaults, so a partial (or absent) TOML file
//! yields a working configuration.

use crate::classifier::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyticConfig {
    /// Emotion model settings.
    pub classifier: ClassifierConfig,
    /// Chart data settings.
    pub charts: ChartConfig,
}

/// One pretrained emotion model on HuggingFace Hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSource {
    /// HuggingFace repo ID.
    pub repo_id: String,
    /// ONNX model filename within the repo.
    pub model_file: String,
    /// Label vocabulary the model scores over.
    pub vocabulary: Vocabulary,
}

impl Default for ModelSource {
    fn default() -> Self {
        ClassifierConfig::default().primary
    }
}

/// Emotion classifier configuration: a primary model and a startup fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Model tried first at startup.
    pub primary: ModelSource,
    /// Model tried when the primary fails to load. If this also fails,
    /// startup aborts.
    pub fallback: ModelSource,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            primary: ModelSource {
                repo_id: "SamLowe/roberta-base-go_emotions-onnx".to_owned(),
                model_file: "onnx/model_quantized.onnx".to_owned(),
                vocabulary: Vocabulary::GoEmotions,
            },
            fallback: ModelSource {
                repo_id: "j-hartmann/emotion-english-distilroberta-base".to_owned(),
                model_file: "onnx/model.onnx".to_owned(),
                vocabulary: Vocabulary::Basic,
            },
        }
    }
}

/// Chart data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// How many of the highest-scoring labels the per-message bar chart shows.
    pub bar_top_n: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { bar_top_n: 10 }
    }
}

impl AsyticConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::AsyticError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::AsyticError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file path inside [`crate::asytic_dirs::config_dir`].
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        crate::asytic_dirs::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_models_match_known_vocabularies() {
        let config = AsyticConfig::default();
        assert_eq!(config.classifier.primary.vocabulary, Vocabulary::GoEmotions);
        assert_eq!(config.classifier.fallback.vocabulary, Vocabulary::Basic);
        assert!(config.classifier.primary.repo_id.contains("go_emotions"));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AsyticConfig = toml::from_str("").unwrap();
        assert_eq!(config.charts.bar_top_n, 10);
        assert_eq!(
            config.classifier.primary.repo_id,
            AsyticConfig::default().classifier.primary.repo_id
        );
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let toml_str = r#"
            [charts]
            bar_top_n = 5
        "#;
        let config: AsyticConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.charts.bar_top_n, 5);
        // Untouched section keeps defaults.
        assert_eq!(config.classifier.primary.vocabulary, Vocabulary::GoEmotions);
    }

    #[test]
    fn model_source_round_trips_through_toml() {
        let toml_str = r#"
            [classifier.primary]
            repo_id = "someone/some-model"
            model_file = "model.onnx"
            vocabulary = "basic"
        "#;
        let config: AsyticConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.classifier.primary.repo_id, "someone/some-model");
        assert_eq!(config.classifier.primary.vocabulary, Vocabulary::Basic);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AsyticConfig::default();
        config.charts.bar_top_n = 3;
        config.save_to_file(&path).unwrap();

        let loaded = AsyticConfig::from_file(&path).unwrap();
        assert_eq!(loaded.charts.bar_top_n, 3);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = AsyticConfig::from_file(std::path::Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        assert!(AsyticConfig::from_file(&path).is_err());
    }
}
