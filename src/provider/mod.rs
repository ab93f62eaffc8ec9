// src/provider/mod.rs — Generation client layer

pub mod google;

use async_trait::async_trait;

use crate::core::types::GenerationRequest;
use crate::infra::errors::SheetChatError;

/// A remote text-generation endpoint.
///
/// One call is one attempt: implementations never retry. Failures come back
/// as `Transport` or `UnparseableResponse` so callers decide whether to
/// display, log, or move on.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Model name used for display and logging.
    fn model(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, SheetChatError>;
}
