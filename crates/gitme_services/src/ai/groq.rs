//! Groq provider over the OpenAI-compatible chat completions endpoint

use async_trait::async_trait;
use gitme_domain::{GenerationConfig, ProviderError, ProviderSettings, TextGenerator};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const PROVIDER: &str = "Groq";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct GroqProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
    generation: GenerationConfig,
}

impl GroqProvider {
    pub fn new(
        client: reqwest::Client,
        settings: ProviderSettings,
        generation: GenerationConfig,
    ) -> Self {
        Self { client, settings, generation }
    }
}

#[async_trait]
impl TextGenerator for GroqProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::missing_credential(PROVIDER))?;

        let body = json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.generation.temperature,
            "max_tokens": self.generation.max_output_tokens,
        });

        let response = self
            .client
            .post(format!(
                "{}/openai/v1/chat/completions",
                self.settings.base_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e.without_url().to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::rate_limited(PROVIDER));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::status(PROVIDER, status.as_u16(), body));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e.without_url().to_string()))?;

        debug!(provider = PROVIDER, model = %self.settings.model, "Received completion");
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::empty_response(PROVIDER))
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
