//! AI Provider Gateway: bounded 429 backoff per provider, then failover

use std::sync::Arc;

use gitme_domain::{ProviderError, RetryConfig, TextGenerator};
use tracing::{info, warn};

use crate::error::GatewayError;

/// Sends prompts to a primary provider and fails over to a secondary one.
///
/// Each provider gets its own attempt budget of `retry.max_attempts` calls.
/// Only rate limiting is retried; any other failure moves on immediately.
pub struct AiGateway {
    primary: Arc<dyn TextGenerator>,
    secondary: Arc<dyn TextGenerator>,
    retry: RetryConfig,
}

impl AiGateway {
    pub fn new(
        primary: Arc<dyn TextGenerator>,
        secondary: Arc<dyn TextGenerator>,
        retry: RetryConfig,
    ) -> Self {
        Self { primary, secondary, retry }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let primary_error = match self.call_with_backoff(self.primary.as_ref(), prompt).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };

        warn!(
            provider = self.primary.name(),
            fallback = self.secondary.name(),
            error = %primary_error,
            body = primary_error.response_body().unwrap_or_default(),
            "Primary provider failed, falling back"
        );

        match self.call_with_backoff(self.secondary.as_ref(), prompt).await {
            Ok(text) => Ok(text),
            Err(secondary_error) => {
                warn!(
                    provider = self.secondary.name(),
                    error = %secondary_error,
                    body = secondary_error.response_body().unwrap_or_default(),
                    "Secondary provider failed"
                );
                Err(GatewayError::combine(primary_error, secondary_error))
            }
        }
    }

    async fn call_with_backoff(
        &self,
        provider: &dyn TextGenerator,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match provider.generate(prompt).await {
                Ok(text) => {
                    if attempt > 0 {
                        info!(
                            provider = provider.name(),
                            attempt = attempt + 1,
                            "Succeeded after retry"
                        );
                    }
                    return Ok(text);
                }
                Err(e) if e.is_rate_limited() && attempt + 1 < max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        provider = provider.name(),
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
