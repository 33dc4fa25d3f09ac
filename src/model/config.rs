use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_MODEL_NAME};

/// Post-processing applied to the single regression logit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreOutput {
    /// `1 / (1 + e^-x)`, reported in `[0, 1]`.
    #[default]
    Sigmoid,
    /// The squeezed logit as produced by the classifier head.
    Logit,
}

impl ScoreOutput {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Some(ScoreOutput::Sigmoid),
            "logit" | "raw" => Some(ScoreOutput::Logit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreOutput::Sigmoid => "sigmoid",
            ScoreOutput::Logit => "logit",
        }
    }

    pub fn apply(&self, logit: f32) -> f32 {
        match self {
            ScoreOutput::Sigmoid => 1.0 / (1.0 + (-logit).exp()),
            ScoreOutput::Logit => logit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Directory with `config.json`, `model.safetensors` and optionally a tokenizer.
    pub model_path: PathBuf,

    /// Hub repository consulted when the model directory carries no tokenizer.
    pub model_name: String,

    pub max_seq_len: usize,

    pub score_output: ScoreOutput,
}

impl ScorerConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            score_output: ScoreOutput::default(),
        }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn with_score_output(mut self, score_output: ScoreOutput) -> Self {
        self.score_output = score_output;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model_path.as_os_str().is_empty() {
            return Err("model_path cannot be empty".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than zero".to_string());
        }

        Ok(())
    }
}
