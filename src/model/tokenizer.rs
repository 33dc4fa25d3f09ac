//! Tokenizer resolution for sentence pairs.
//!
//! Lookup order:
//! 1. `tokenizer.json` in the model directory
//! 2. `vocab.txt` in the model directory (WordPiece with the BERT pipeline)
//! 3. `tokenizer.json` from the hub repository named by the scorer config
//! 4. `vocab.txt` from the same hub repository

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};
use tracing::{debug, info, warn};

pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const VOCAB_FILE: &str = "vocab.txt";
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

const CLS_TOKEN: &str = "[CLS]";
const SEP_TOKEN: &str = "[SEP]";
const UNK_TOKEN: &str = "[UNK]";

#[derive(Debug, Default, Deserialize)]
struct TokenizerSettings {
    #[serde(default)]
    do_lower_case: bool,
}

/// Where a tokenizer was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    Local(PathBuf),
    Hub { repo: String, file: PathBuf },
}

/// Resolves a tokenizer and enables longest-first truncation at `max_len`.
pub fn load_pair_tokenizer(
    model_dir: &Path,
    model_name: &str,
    max_len: usize,
) -> io::Result<(Tokenizer, TokenizerSource)> {
    let (mut tokenizer, source) = resolve_tokenizer(model_dir, model_name)?;

    let truncation = TruncationParams {
        max_length: max_len,
        strategy: TruncationStrategy::LongestFirst,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    Ok((tokenizer, source))
}

fn resolve_tokenizer(
    model_dir: &Path,
    model_name: &str,
) -> io::Result<(Tokenizer, TokenizerSource)> {
    let local_json = model_dir.join(TOKENIZER_FILE);
    if local_json.is_file() {
        debug!(path = %local_json.display(), "Using local tokenizer.json");
        let tokenizer = Tokenizer::from_file(&local_json).map_err(io::Error::other)?;
        return Ok((tokenizer, TokenizerSource::Local(local_json)));
    }

    let local_vocab = model_dir.join(VOCAB_FILE);
    if local_vocab.is_file() {
        debug!(path = %local_vocab.display(), "Building WordPiece tokenizer from local vocab");
        let lowercase = read_lowercase_flag(&model_dir.join(TOKENIZER_CONFIG_FILE));
        let tokenizer = wordpiece_from_vocab(&local_vocab, lowercase)?;
        return Ok((tokenizer, TokenizerSource::Local(local_vocab)));
    }

    info!(
        repo = model_name,
        "No tokenizer in model directory, fetching from hub"
    );
    fetch_from_hub(model_name)
}

fn fetch_from_hub(model_name: &str) -> io::Result<(Tokenizer, TokenizerSource)> {
    let api = hf_hub::api::sync::Api::new().map_err(io::Error::other)?;
    let repo = api.model(model_name.to_string());

    match repo.get(TOKENIZER_FILE) {
        Ok(path) => {
            let tokenizer = Tokenizer::from_file(&path).map_err(io::Error::other)?;
            return Ok((
                tokenizer,
                TokenizerSource::Hub {
                    repo: model_name.to_string(),
                    file: path,
                },
            ));
        }
        Err(e) => {
            warn!(
                repo = model_name,
                error = %e,
                "tokenizer.json unavailable on hub, trying vocab.txt"
            );
        }
    }

    let vocab = repo.get(VOCAB_FILE).map_err(io::Error::other)?;
    let lowercase = repo
        .get(TOKENIZER_CONFIG_FILE)
        .map(|path| read_lowercase_flag(&path))
        .unwrap_or(false);
    let tokenizer = wordpiece_from_vocab(&vocab, lowercase)?;

    Ok((
        tokenizer,
        TokenizerSource::Hub {
            repo: model_name.to_string(),
            file: vocab,
        },
    ))
}

/// Reads `do_lower_case` from a `tokenizer_config.json`; missing or
/// unreadable files mean cased.
fn read_lowercase_flag(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<TokenizerSettings>(&content).ok())
        .map(|settings| settings.do_lower_case)
        .unwrap_or(false)
}

/// Builds a BERT-style pair tokenizer (`[CLS] a [SEP] b [SEP]`) from a WordPiece vocabulary.
///
/// Accents are never stripped so Hangul syllables stay composed.
pub fn wordpiece_from_vocab(vocab_path: &Path, lowercase: bool) -> io::Result<Tokenizer> {
    let vocab = vocab_path
        .to_str()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "vocab path is not UTF-8"))?;

    let wordpiece = WordPiece::from_file(vocab)
        .unk_token(UNK_TOKEN.to_string())
        .build()
        .map_err(io::Error::other)?;

    let mut tokenizer = Tokenizer::new(wordpiece);

    let cls_id = special_token_id(&tokenizer, CLS_TOKEN)?;
    let sep_id = special_token_id(&tokenizer, SEP_TOKEN)?;

    tokenizer
        .with_normalizer(Some(BertNormalizer::new(true, true, Some(false), lowercase)))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(
            (SEP_TOKEN.to_string(), sep_id),
            (CLS_TOKEN.to_string(), cls_id),
        )));

    Ok(tokenizer)
}

fn special_token_id(tokenizer: &Tokenizer, token: &str) -> io::Result<u32> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("vocabulary is missing special token {token}"),
        )
    })
}
