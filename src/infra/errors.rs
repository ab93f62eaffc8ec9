// src/infra/errors.rs — Error types for sheetchat

use thiserror::Error;

/// Display text for a generation response that carried no reply text.
pub const NO_REPLY_MESSAGE: &str = "The model returned no reply text.";

#[derive(Error, Debug)]
pub enum SheetChatError {
    // Generation errors (recovered per action)
    #[error("Request to '{model}' failed: {detail}")]
    Transport { model: String, detail: String },

    #[error("{}", NO_REPLY_MESSAGE)]
    UnparseableResponse { detail: String },

    // Input errors (halt the current operation)
    #[error("Input needs at least {required} columns, found {found}")]
    MissingColumn { required: usize, found: usize },

    #[error("Could not decode input with any of: {}", .tried.join(", "))]
    DecodeFailure { tried: Vec<String> },

    // User errors
    #[error("No API key found. Set GEMINI_API_KEY or write it to {path}.")]
    MissingCredential { path: String },

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetChatError {
    /// True for errors a single generation call can produce. These are shown
    /// to the user as text instead of aborting the surrounding operation.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            SheetChatError::Transport { .. } | SheetChatError::UnparseableResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_display_is_fixed() {
        let a = SheetChatError::UnparseableResponse {
            detail: "no candidates".into(),
        };
        let b = SheetChatError::UnparseableResponse {
            detail: "parts[0].text missing".into(),
        };
        assert_eq!(a.to_string(), NO_REPLY_MESSAGE);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_transport_display_carries_detail() {
        let e = SheetChatError::Transport {
            model: "gemini-2.0-flash".into(),
            detail: "HTTP 503 Service Unavailable: overloaded".into(),
        };
        let s = e.to_string();
        assert!(s.contains("gemini-2.0-flash"));
        assert!(s.contains("HTTP 503"));
    }

    #[test]
    fn test_decode_failure_lists_candidates() {
        let e = SheetChatError::DecodeFailure {
            tried: vec!["Shift_JIS".into(), "UTF-8".into()],
        };
        assert_eq!(
            e.to_string(),
            "Could not decode input with any of: Shift_JIS, UTF-8"
        );
    }

    #[test]
    fn test_generation_failure_classification() {
        assert!(SheetChatError::Transport {
            model: "m".into(),
            detail: "timeout".into()
        }
        .is_generation_failure());
        assert!(SheetChatError::UnparseableResponse { detail: String::new() }
            .is_generation_failure());
        assert!(!SheetChatError::MissingColumn {
            required: 2,
            found: 1
        }
        .is_generation_failure());
        assert!(!SheetChatError::Config("bad".into()).is_generation_failure());
    }
}
