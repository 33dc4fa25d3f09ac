use candle_core::{DType, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::SimilarityScorer;
use super::classifier::{CheckpointLayout, SequenceRegressor};
use super::config::ScorerConfig;
use super::device::{device_label, dtype_for, select_device};
use super::error::SimilarityError;
use super::text::prepare_pair;
use super::tokenizer::{TokenizerSource, load_pair_tokenizer};

/// Sentence-pair similarity model: tokenizer + regressor, loaded once and
/// shared read-only by every request.
pub struct SentenceSimilarity {
    device: Device,
    config: ScorerConfig,
    model: SequenceRegressor,
    tokenizer: Tokenizer,
    tokenizer_source: TokenizerSource,
}

impl std::fmt::Debug for SentenceSimilarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceSimilarity")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("layout", &self.model.layout())
            .field("tokenizer_source", &self.tokenizer_source)
            .finish()
    }
}

impl SentenceSimilarity {
    /// Loads on the best available device.
    pub fn load(config: ScorerConfig) -> Result<Self, SimilarityError> {
        let device = select_device();
        debug!(?device, "Selected compute device for similarity model");
        Self::load_on(config, device)
    }

    /// Loads on an explicit device.
    pub fn load_on(config: ScorerConfig, device: Device) -> Result<Self, SimilarityError> {
        if let Err(msg) = config.validate() {
            return Err(SimilarityError::InvalidConfig { reason: msg });
        }

        let model_path = &config.model_path;
        if !model_path.exists() {
            return Err(SimilarityError::ModelNotFound {
                path: model_path.clone(),
            });
        }

        let config_path = model_path.join("config.json");
        if !config_path.exists() {
            return Err(SimilarityError::ModelLoadFailed {
                reason: format!("Missing config.json in {}", model_path.display()),
            });
        }

        let weights_path = model_path.join("model.safetensors");
        if !weights_path.exists() {
            return Err(SimilarityError::ModelLoadFailed {
                reason: format!("Missing model.safetensors in {}", model_path.display()),
            });
        }

        let dtype = dtype_for(&device);
        info!(
            model_path = %model_path.display(),
            device = device_label(&device),
            dtype = ?dtype,
            score_output = config.score_output.as_str(),
            "Loading similarity model"
        );

        let model = SequenceRegressor::load(model_path, &device, dtype).map_err(|e| {
            SimilarityError::ModelLoadFailed {
                reason: format!("Failed to load classifier: {}", e),
            }
        })?;

        let (tokenizer, tokenizer_source) =
            load_pair_tokenizer(model_path, &config.model_name, config.max_seq_len).map_err(
                |e| SimilarityError::ModelLoadFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                },
            )?;

        info!(
            layout = ?model.layout(),
            tokenizer = ?tokenizer_source,
            max_seq_len = config.max_seq_len,
            "Similarity model loaded successfully"
        );

        Ok(Self {
            device,
            config,
            model,
            tokenizer,
            tokenizer_source,
        })
    }

    /// Normalizes both sentences, runs one forward pass and returns the score.
    pub fn compute_similarity(
        &self,
        sentence1: &str,
        sentence2: &str,
    ) -> Result<f32, SimilarityError> {
        let (sentence1, sentence2) = prepare_pair(sentence1, sentence2)?;

        let tokens = self
            .tokenizer
            .encode((sentence1.as_ref(), sentence2.as_ref()), true)
            .map_err(|e| SimilarityError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        debug!(
            sentence1_len = sentence1.len(),
            sentence2_len = sentence2.len(),
            num_tokens = tokens.get_ids().len(),
            "Scoring sentence pair"
        );

        // The regressor was fine-tuned without segment ids, so both sentences
        // are fed as segment 0.
        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = token_ids.zeros_like()?;
        let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| SimilarityError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let logit = logits
            .flatten_all()?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?
            .first()
            .copied()
            .ok_or_else(|| SimilarityError::InferenceFailed {
                reason: "classifier returned no logits".to_string(),
            })?;

        let score = self.config.score_output.apply(logit);
        debug!(logit, score, "Computed similarity");

        Ok(score)
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn layout(&self) -> CheckpointLayout {
        self.model.layout()
    }

    pub fn tokenizer_source(&self) -> &TokenizerSource {
        &self.tokenizer_source
    }
}

impl SimilarityScorer for SentenceSimilarity {
    fn score(&self, sentence1: &str, sentence2: &str) -> Result<f32, SimilarityError> {
        self.compute_similarity(sentence1, sentence2)
    }

    fn is_model_loaded(&self) -> bool {
        true
    }

    fn device_label(&self) -> &'static str {
        device_label(&self.device)
    }
}
