//! Gemini `generateContent` provider

use async_trait::async_trait;
use gitme_domain::{GenerationConfig, ProviderError, ProviderSettings, TextGenerator};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const PROVIDER: &str = "Gemini";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

pub struct GeminiProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
    generation: GenerationConfig,
}

impl GeminiProvider {
    pub fn new(
        client: reqwest::Client,
        settings: ProviderSettings,
        generation: GenerationConfig,
    ) -> Self {
        Self { client, settings, generation }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::missing_credential(PROVIDER))?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.generation.temperature,
                "maxOutputTokens": self.generation.max_output_tokens,
            },
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
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

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e.without_url().to_string()))?;

        debug!(provider = PROVIDER, model = %self.settings.model, "Received completion");
        payload
            .into_text()
            .ok_or_else(|| ProviderError::empty_response(PROVIDER))
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use gitme_domain::HttpConfig;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::http::build_client;

    const PATH: &str = "/v1beta/models/gemini-2.0-flash-exp:generateContent";

    fn provider_for(server: &mockito::ServerGuard, api_key: Option<&str>) -> GeminiProvider {
        let mut settings = ProviderSettings::gemini().base_url(server.url());
        settings.api_key = api_key.map(str::to_string);
        GeminiProvider::new(
            build_client(&HttpConfig::default()).unwrap(),
            settings,
            GenerationConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_gemini_returns_first_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": { "maxOutputTokens": 8192 },
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"candidates":[{"content":{"parts":[{"text":"# Title"}]}}]}"##)
            .create_async()
            .await;
        let fixture = provider_for(&server, Some("key"));

        let actual = fixture.generate("hello").await;
        let expected = Ok("# Title".to_string());

        mock.assert_async().await;
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_gemini_maps_429_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", PATH).with_status(429).create_async().await;
        let fixture = provider_for(&server, Some("key"));

        let actual = fixture.generate("hello").await;
        let expected = Err(ProviderError::rate_limited("Gemini"));

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_gemini_maps_server_error_to_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;
        let fixture = provider_for(&server, Some("key"));

        let actual = fixture.generate("hello").await;
        let expected = Err(ProviderError::status("Gemini", 503, "overloaded"));

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_gemini_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;
        let fixture = provider_for(&server, Some("key"));

        let actual = fixture.generate("hello").await;
        let expected = Err(ProviderError::empty_response("Gemini"));

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_gemini_without_key_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", PATH).expect(0).create_async().await;
        let fixture = provider_for(&server, None);

        let actual = fixture.generate("hello").await;
        let expected = Err(ProviderError::missing_credential("Gemini"));

        mock.assert_async().await;
        assert_eq!(actual, expected);
    }
}
