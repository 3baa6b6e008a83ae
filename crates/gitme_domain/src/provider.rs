//! Domain interface for language-model text generation

use async_trait::async_trait;

use crate::error::ProviderError;

/// A single-turn text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the generated text verbatim.
    ///
    /// Implementations report HTTP 429 as [`ProviderError::RateLimited`] so
    /// callers can retry; every other failure is final for this call.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Human readable provider name used in logs and errors
    fn name(&self) -> &str;
}
