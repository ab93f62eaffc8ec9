// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::types::GenerationParams;
use crate::infra::errors::SheetChatError;
use crate::infra::paths;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a writing tutor for students' experiment \
reports. Read the text you are given and point out expressions that are vague, subjective or \
unsupported, such as intensifiers without evidence. For each one, say briefly why it is a \
problem and ask a question that helps the writer find a more precise wording. Do not rewrite \
the text for them. Answer in the language of the text.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub sheet: SheetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub base_url: String,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".into(),
            base_url: DEFAULT_BASE_URL.into(),
            temperature: 0.7,
            top_p: 0.95,
            timeout_seconds: 30,
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub system_instruction: String,
    /// Read the instruction from this file instead.
    pub instruction_file: Option<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.into(),
            instruction_file: None,
        }
    }
}

impl PromptConfig {
    /// The fixed instruction string sent with every request.
    pub fn resolve(&self) -> Result<String, SheetChatError> {
        match self.instruction_file {
            Some(ref path) => std::fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .map_err(|e| {
                    SheetChatError::Config(format!("cannot read instruction file {path}: {e}"))
                }),
            None => Ok(self.system_instruction.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Encodings tried in order when decoding an input file.
    pub encodings: Vec<String>,
    /// Label for the result column when the input has none.
    pub result_column: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            encodings: vec!["shift_jis".into(), "utf-8".into()],
            result_column: "result".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, SheetChatError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SheetChatError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SheetChatError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SheetChatError> {
        if self.model.name.trim().is_empty() {
            return Err(SheetChatError::Config("model.name must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(SheetChatError::Config(format!(
                "model.temperature must be 0.0-2.0, got {}",
                self.model.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.model.top_p) {
            return Err(SheetChatError::Config(format!(
                "model.top_p must be 0.0-1.0, got {}",
                self.model.top_p
            )));
        }
        if self.model.timeout_seconds == 0 {
            return Err(SheetChatError::Config(
                "model.timeout_seconds must be positive".into(),
            ));
        }
        if self.sheet.encodings.is_empty() {
            return Err(SheetChatError::Config(
                "sheet.encodings must list at least one encoding".into(),
            ));
        }
        Ok(())
    }
}
