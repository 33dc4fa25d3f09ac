//! Tiny randomly initialised checkpoints for tests.
//!
//! Writes `config.json`, `model.safetensors` and `vocab.txt` into a directory
//! so the real loading path can run without downloading anything.

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::bert::Config;
use std::path::Path;

use super::classifier::{CheckpointLayout, SequenceRegressor};
use super::error::SimilarityError;

pub const FIXTURE_HIDDEN_SIZE: usize = 16;

const FIXTURE_VOCAB: &[&str] = &[
    "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", ".", "!", "?", ",", "the", "a", "cat", "dog",
    "sat", "ran", "on", "mat", "park", "in", "is", "weather", "nice", "today", "rain", "##s",
    "##ing", "hello", "world", "오늘", "날씨", "##가", "좋다",
];

fn fixture_config_json() -> serde_json::Value {
    serde_json::json!({
        "model_type": "electra",
        "vocab_size": FIXTURE_VOCAB.len(),
        "embedding_size": FIXTURE_HIDDEN_SIZE,
        "hidden_size": FIXTURE_HIDDEN_SIZE,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 32,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "attention_probs_dropout_prob": 0.1,
        "max_position_embeddings": 64,
        "type_vocab_size": 2,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-12,
        "pad_token_id": 0,
        "position_embedding_type": "absolute",
        "num_labels": 1,
        "problem_type": "regression"
    })
}

/// Writes a one-layer checkpoint with the given layout into `dir`.
pub fn write_tiny_checkpoint(dir: &Path, layout: CheckpointLayout) -> Result<(), SimilarityError> {
    std::fs::create_dir_all(dir)?;

    let config_json = fixture_config_json();
    let config: Config = serde_json::from_value(config_json.clone()).map_err(|e| {
        SimilarityError::InvalidConfig {
            reason: e.to_string(),
        }
    })?;

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    SequenceRegressor::from_var_builder(vb, &config, layout, DType::F32)?;

    {
        let vars = varmap
            .data()
            .lock()
            .map_err(|_| SimilarityError::ModelLoadFailed {
                reason: "fixture var map poisoned".to_string(),
            })?;
        for (name, var) in vars.iter() {
            if name.ends_with("LayerNorm.weight") {
                var.set(&var.ones_like()?)?;
            }
        }
    }

    varmap.save(dir.join("model.safetensors"))?;

    let config_text = serde_json::to_string_pretty(&config_json).map_err(|e| {
        SimilarityError::InvalidConfig {
            reason: e.to_string(),
        }
    })?;
    std::fs::write(dir.join("config.json"), config_text)?;
    std::fs::write(dir.join("vocab.txt"), FIXTURE_VOCAB.join("\n"))?;

    Ok(())
}

/// Same as [`write_tiny_checkpoint`] with the ELECTRA layout.
pub fn write_tiny_electra(dir: &Path) -> Result<(), SimilarityError> {
    write_tiny_checkpoint(dir, CheckpointLayout::ELECTRA)
}
