// Local ONNX scorer: one binary profanity model per locale.
//
// Each locale ships two files in the model directory:
//   <namespace>.<locale>.model           ONNX graph
//   <namespace>.<locale>.tokenizer.json  HuggingFace tokenizer
//
// The graph takes `input_ids` and `attention_mask` ([1, seq_len], i64) and
// returns either a single logit (sigmoid head) or two logits (softmax head,
// class 1 = profane).

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::traits::{Prediction, Scorer};
use super::ModelStore;
use crate::error::DetectorError;
use crate::locale::Locale;

/// ONNX-backed scorer for a single locale.
pub struct OnnxScorer {
    // ort::Session::run takes &mut self; the mutex serializes inference so the
    // scorer can be shared across threads through &self.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    threshold: f32,
}

impl OnnxScorer {
    /// Load the model and tokenizer for `locale` from `store`.
    ///
    /// A missing model file means the locale isn't packaged; anything else
    /// that goes wrong is a load failure.
    pub fn load(store: &ModelStore, locale: Locale, threshold: f32) -> Result<Self, DetectorError> {
        let key = store.model_key(locale);
        let model_path = store.model_path(locale);
        let tokenizer_path = store.tokenizer_path(locale);

        if !model_path.exists() {
            return Err(DetectorError::UnsupportedLocale {
                locale: locale.to_string(),
                reason: format!(
                    "model file not found: {}\nRun `badword download-model` to download it.",
                    model_path.display()
                ),
            });
        }

        let load_err = |source: anyhow::Error| DetectorError::ModelLoad {
            key: key.clone(),
            path: model_path.clone(),
            source,
        };

        if !tokenizer_path.exists() {
            return Err(load_err(anyhow::anyhow!(
                "tokenizer file not found: {}",
                tokenizer_path.display()
            )));
        }

        let session = open_session(&model_path).map_err(load_err)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_err(anyhow::anyhow!("Failed to load tokenizer: {}", e)))?;

        info!(%locale, key = %key, "Loaded ONNX profanity model");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            threshold,
        })
    }
}

impl Scorer for OnnxScorer {
    fn predict(&self, normalized_word: &str) -> Result<Prediction> {
        let encoding = self
            .tokenizer
            .encode(normalized_word, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let shape = [1_i64, input_ids.len() as i64];

        let input_ids_tensor = Tensor::from_array((shape, input_ids))
            .context("Failed to create input_ids tensor")?;
        let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
            .context("Failed to create attention_mask tensor")?;

        let logits = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor
                })
                .context("ONNX inference failed")?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract output tensor")?;

            data.to_vec()
        };

        let probability = logits_to_probability(&logits)?;
        let prediction = Prediction::from_probability(probability, self.threshold);

        debug!(
            probability = prediction.probability,
            is_profane = prediction.is_profane,
            word = %crate::output::truncate_chars(normalized_word, 32),
            "ONNX scored word"
        );

        Ok(prediction)
    }
}

fn open_session(model_path: &Path) -> Result<Session> {
    let session = Session::builder()
        .context("Failed to create ONNX session builder")?
        .commit_from_file(model_path)
        .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;
    Ok(session)
}

/// Map a classifier head to P(profane).
///
/// One logit: sigmoid. Two logits: softmax, probability of class 1.
fn logits_to_probability(logits: &[f32]) -> Result<f32> {
    match logits {
        [logit] => Ok(sigmoid(*logit)),
        [clean, profane] => {
            // Shift by the max so exp never overflows.
            let max = clean.max(*profane);
            let clean = (clean - max).exp();
            let profane = (profane - max).exp();
            Ok(profane / (clean + profane))
        }
        other => anyhow::bail!(
            "Unexpected model output width {} (expected 1 or 2 logits)",
            other.len()
        ),
    }
}

/// Sigmoid activation: maps any real number to (0, 1).
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
