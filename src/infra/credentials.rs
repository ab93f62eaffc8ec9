// src/infra/credentials.rs — API key lookup

use std::path::Path;

use crate::infra::errors::SheetChatError;
use crate::infra::paths;

/// Fixed name the key is stored under, in the environment and on disk.
pub const API_KEY_NAME: &str = "GEMINI_API_KEY";

/// Resolve the Gemini API key: environment first, then the key file.
pub fn load_api_key() -> Result<String, SheetChatError> {
    let key_path = paths::credentials_dir().join("gemini.key");
    resolve_api_key(std::env::var(API_KEY_NAME).ok(), &key_path)
}

fn resolve_api_key(from_env: Option<String>, key_path: &Path) -> Result<String, SheetChatError> {
    if let Some(key) = from_env.map(|k| k.trim().to_string()) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    match std::fs::read_to_string(key_path) {
        Ok(s) if !s.trim().is_empty() => {
            tracing::debug!("Using API key from {}", key_path.display());
            Ok(s.trim().to_string())
        }
        _ => Err(SheetChatError::MissingCredential {
            path: key_path.display().to_string(),
        }),
    }
}
