//! Encoder + regression head for sentence-pair scoring.
//!
//! Fine-tuned ELECTRA discriminators and BERT-style cross-encoders share the
//! BERT encoder; they differ in the tensor prefix and in the head:
//!
//! - ELECTRA: `classifier.dense` → GELU → `classifier.out_proj`
//! - BERT/RoBERTa cross-encoders: a single `classifier` linear layer
//!
//! Both heads read the first (`[CLS]`) token and emit one logit.

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Number of outputs of the regression head.
pub const NUM_LABELS: usize = 1;

const ENCODER_PREFIXES: [&str; 3] = ["electra", "bert", "roberta"];

/// Where the encoder lives in the checkpoint and which head sits on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointLayout {
    pub encoder_prefix: Option<&'static str>,
    pub head: HeadKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadKind {
    /// Two-layer ELECTRA classification head.
    Electra,
    /// Single linear layer.
    Linear,
}

impl CheckpointLayout {
    pub const ELECTRA: Self = Self {
        encoder_prefix: Some("electra"),
        head: HeadKind::Electra,
    };

    /// Inspects tensor names to find the encoder prefix and head kind.
    pub fn detect(vb: &VarBuilder) -> Self {
        let encoder_prefix = ENCODER_PREFIXES.into_iter().find(|prefix| {
            vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight"))
        });

        let head = if vb.contains_tensor("classifier.out_proj.weight") {
            HeadKind::Electra
        } else {
            HeadKind::Linear
        };

        Self {
            encoder_prefix,
            head,
        }
    }
}

/// Fields of `config.json` that the BERT config does not carry.
#[derive(Debug, Default, Deserialize)]
struct EncoderExtras {
    #[serde(default)]
    embedding_size: Option<usize>,
}

enum ClassificationHead {
    Electra { dense: Linear, out_proj: Linear },
    Linear(Linear),
}

impl ClassificationHead {
    fn load(vb: VarBuilder, kind: HeadKind, hidden_size: usize) -> Result<Self> {
        match kind {
            HeadKind::Electra => Ok(Self::Electra {
                dense: candle_nn::linear(hidden_size, hidden_size, vb.pp("dense"))?,
                out_proj: candle_nn::linear(hidden_size, NUM_LABELS, vb.pp("out_proj"))?,
            }),
            HeadKind::Linear => Ok(Self::Linear(candle_nn::linear(
                hidden_size,
                NUM_LABELS,
                vb,
            )?)),
        }
    }

    fn forward(&self, cls_token: &Tensor) -> Result<Tensor> {
        match self {
            Self::Electra { dense, out_proj } => {
                let hidden = dense.forward(cls_token)?.gelu_erf()?;
                out_proj.forward(&hidden)
            }
            Self::Linear(classifier) => classifier.forward(cls_token),
        }
    }
}

struct SequenceRegressorImpl {
    encoder: BertModel,
    head: ClassificationHead,
}

impl SequenceRegressorImpl {
    fn load(vb: VarBuilder, config: &Config, layout: CheckpointLayout) -> Result<Self> {
        let encoder_vb = match layout.encoder_prefix {
            Some(prefix) => vb.pp(prefix),
            None => vb.clone(),
        };
        let encoder = BertModel::load(encoder_vb, config)?;
        let head = ClassificationHead::load(vb.pp("classifier"), layout.head, config.hidden_size)?;

        Ok(Self { encoder, head })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .encoder
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.head.forward(&cls_token)
    }
}

/// Shared handle to a loaded regressor; cloning is cheap.
#[derive(Clone)]
pub struct SequenceRegressor {
    inner: Arc<SequenceRegressorImpl>,
    layout: CheckpointLayout,
    dtype: DType,
}

impl SequenceRegressor {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device, dtype: DType) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
        let extras: EncoderExtras = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        if let Some(embedding_size) = extras.embedding_size
            && embedding_size != config.hidden_size
        {
            return Err(candle::Error::Msg(format!(
                "factorized embeddings are not supported (embedding_size {} != hidden_size {})",
                embedding_size, config.hidden_size
            )));
        }

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, device)? };
        let layout = CheckpointLayout::detect(&vb);

        Self::from_var_builder(vb, &config, layout, dtype)
    }

    /// Builds the network from an already opened var builder.
    pub fn from_var_builder(
        vb: VarBuilder,
        config: &Config,
        layout: CheckpointLayout,
        dtype: DType,
    ) -> Result<Self> {
        let inner = SequenceRegressorImpl::load(vb, config, layout)?;
        Ok(Self {
            inner: Arc::new(inner),
            layout,
            dtype,
        })
    }

    /// Returns one logit per batch row, shape `(batch, 1)`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.inner.forward(input_ids, token_type_ids, attention_mask)
    }

    pub fn layout(&self) -> CheckpointLayout {
        self.layout
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }
}
