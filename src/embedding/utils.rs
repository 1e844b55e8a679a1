use std::io;
use std::path::{Path, PathBuf};

use tokenizers::{Tokenizer, TruncationParams};

pub(crate) const CONFIG_FILE: &str = "config.json";
pub(crate) const WEIGHTS_FILE: &str = "model.safetensors";
pub(crate) const TOKENIZER_FILE: &str = "tokenizer.json";

/// Files a model directory must contain to be loadable.
pub(crate) const REQUIRED_MODEL_FILES: [&str; 3] = [CONFIG_FILE, WEIGHTS_FILE, TOKENIZER_FILE];

/// Returns the first required file missing from `model_dir`, if any.
pub(crate) fn missing_model_file(model_dir: &Path) -> Option<PathBuf> {
    REQUIRED_MODEL_FILES
        .iter()
        .map(|name| model_dir.join(name))
        .find(|path| !path.exists())
}

/// Loads `tokenizer.json` from a model directory (or an explicit tokenizer path).
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join(TOKENIZER_FILE)
    } else {
        model_path.to_path_buf()
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer that truncates every encoding to `max_len` tokens.
///
/// Encoder models have a hard positional limit; longer page text would
/// otherwise fail inside the forward pass.
pub fn load_tokenizer_with_truncation(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("failed to configure truncation: {e}")))?;

    Ok(tokenizer)
}
