//! ONNX inference for pretrained emotion-classification models.
//!
//! Single-model text classification: tokenize → ONNX inference → activation
//! over the logits. Model files are fetched from HuggingFace Hub on first use
//! (cached by `hf-hub`) and loaded once; the session is reused for every turn.

use super::{EmotionClassifier, ScoreDistribution};
use crate::classifier::vocab::{Activation, Vocabulary};
use crate::config::ModelSource;
use crate::error::{AsyticError, Result};
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

/// Maximum input length in tokens (RoBERTa-family context size).
const MAX_CONTEXT: usize = 512;

/// Paths to downloaded model assets.
pub struct ModelPaths {
    /// Path to the ONNX model file.
    pub model_onnx: PathBuf,
    /// Path to `tokenizer.json`.
    pub tokenizer_json: PathBuf,
}

/// Download (or verify cache of) model assets from HuggingFace Hub.
///
/// # Errors
///
/// Returns an error if any download fails.
pub fn download_model_assets(source: &ModelSource) -> Result<ModelPaths> {
    let api = hf_hub::api::sync::Api::new()
        .map_err(|e| AsyticError::Model(format!("HF Hub API init failed: {e}")))?;
    let repo = api.model(source.repo_id.clone());

    info!(
        "ensuring emotion model: {}/{}",
        source.repo_id, source.model_file
    );
    let model_onnx = repo.get(&source.model_file).map_err(|e| {
        AsyticError::Model(format!("failed to download {}: {e}", source.model_file))
    })?;

    info!("ensuring tokenizer.json");
    let tokenizer_json = repo
        .get("tokenizer.json")
        .map_err(|e| AsyticError::Model(format!("failed to download tokenizer.json: {e}")))?;

    Ok(ModelPaths {
        model_onnx,
        tokenizer_json,
    })
}

/// Pretrained emotion classifier backed by an ONNX session.
///
/// Wraps the session, the HF tokenizer, and the model's label vocabulary.
pub struct OnnxEmotionClassifier {
    session: Session,
    tokenizer: tokenizers::Tokenizer,
    vocabulary: Vocabulary,
}

impl OnnxEmotionClassifier {
    /// Load the classifier, downloading model files on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if download or model loading fails.
    pub fn load(source: &ModelSource) -> Result<Self> {
        let paths = download_model_assets(source)?;
        Self::from_paths(paths, source.vocabulary)
    }

    /// Load the classifier from pre-downloaded paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the ONNX model or tokenizer cannot be loaded.
    pub fn from_paths(paths: ModelPaths, vocabulary: Vocabulary) -> Result<Self> {
        info!("loading emotion ONNX model");
        let session = Session::builder()
            .and_then(|b| b.with_intra_threads(2))
            .and_then(|b| b.commit_from_file(&paths.model_onnx))
            .map_err(|e| AsyticError::Model(format!("failed to load ONNX model: {e}")))?;

        info!("loading tokenizer");
        let tokenizer = tokenizers::Tokenizer::from_file(&paths.tokenizer_json)
            .map_err(|e| AsyticError::Model(format!("failed to load tokenizer: {e}")))?;

        info!(
            "emotion classifier ready ({} labels)",
            vocabulary.labels().len()
        );

        Ok(Self {
            session,
            tokenizer,
            vocabulary,
        })
    }

    /// Run a single ONNX inference call, returning the raw logits.
    fn run_inference(&mut self, input_ids: &[i64], attention_mask: &[i64]) -> Result<Vec<f32>> {
        use ort::session::{SessionInputValue, SessionInputs};

        let seq_len = input_ids.len();

        // input_ids / attention_mask: shape [1, seq_len]
        let ids_tensor = Tensor::from_array(([1_usize, seq_len], input_ids.to_vec()))
            .map_err(|e| AsyticError::Classifier(format!("failed to create input_ids: {e}")))?;
        let mask_tensor = Tensor::from_array(([1_usize, seq_len], attention_mask.to_vec()))
            .map_err(|e| {
                AsyticError::Classifier(format!("failed to create attention_mask: {e}"))
            })?;

        let mut feed: HashMap<String, SessionInputValue> = HashMap::new();
        feed.insert("input_ids".to_string(), ids_tensor.into());
        feed.insert("attention_mask".to_string(), mask_tensor.into());

        let outputs = self
            .session
            .run(SessionInputs::from(feed))
            .map_err(|e| AsyticError::Classifier(format!("ONNX inference failed: {e}")))?;

        // Logits: shape [1, num_labels]
        let output_value = &outputs[0_usize];
        let (_shape, data) = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| AsyticError::Classifier(format!("failed to extract logits: {e}")))?;

        Ok(data.to_vec())
    }
}

impl EmotionClassifier for OnnxEmotionClassifier {
    fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    fn classify(&mut self, text: &str) -> Result<ScoreDistribution> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| AsyticError::Classifier(format!("tokenization failed: {e}")))?;

        let mut input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let mut attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();

        // Truncate rather than fail on long input; the leading tokens carry
        // enough signal for a per-message mood read.
        input_ids.truncate(MAX_CONTEXT);
        attention_mask.truncate(MAX_CONTEXT);

        if input_ids.is_empty() {
            return Err(AsyticError::Classifier(
                "tokenizer produced no tokens".to_owned(),
            ));
        }

        let logits = self.run_inference(&input_ids, &attention_mask)?;

        let labels = self.vocabulary.labels();
        if logits.len() != labels.len() {
            return Err(AsyticError::Classifier(format!(
                "model returned {} logits for a {}-label vocabulary",
                logits.len(),
                labels.len()
            )));
        }

        let scores = match self.vocabulary.activation() {
            Activation::Sigmoid => sigmoid(&logits),
            Activation::Softmax => softmax(&logits),
        };

        Ok(ScoreDistribution::from_scores(labels, &scores))
    }
}

/// Element-wise logistic sigmoid.
fn sigmoid(logits: &[f32]) -> Vec<f32> {
    logits.iter().map(|&x| 1.0 / (1.0 + (-x).exp())).collect()
}

/// Numerically stable softmax.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}
