use thiserror::Error;

/// The input did not contain a `github.com/<owner>/<repo>` reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid GitHub URL format: {url}")]
pub struct InvalidRepoUrl {
    pub url: String,
}

impl InvalidRepoUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Failure of a single call to a text generation provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{provider} rate limited the request (HTTP 429)")]
    RateLimited { provider: String },

    #[error("{provider} API error: {status}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Empty response from {provider}")]
    EmptyResponse { provider: String },

    #[error("{provider} API key not configured")]
    MissingCredential { provider: String },

    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },
}

impl ProviderError {
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited { provider: provider.into() }
    }

    pub fn status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status { provider: provider.into(), status, body: body.into() }
    }

    pub fn empty_response(provider: impl Into<String>) -> Self {
        Self::EmptyResponse { provider: provider.into() }
    }

    pub fn missing_credential(provider: impl Into<String>) -> Self {
        Self::MissingCredential { provider: provider.into() }
    }

    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport { provider: provider.into(), message: message.into() }
    }

    /// Only HTTP 429 is retried against the same provider
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Response body returned alongside a non-success status, if any
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::RateLimited { provider }
            | Self::Status { provider, .. }
            | Self::EmptyResponse { provider }
            | Self::MissingCredential { provider }
            | Self::Transport { provider, .. } => provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_only_rate_limit_is_retryable() {
        let fixtures = vec![
            (ProviderError::rate_limited("gemini"), true),
            (ProviderError::status("gemini", 500, "boom"), false),
            (ProviderError::empty_response("gemini"), false),
            (ProviderError::missing_credential("gemini"), false),
            (ProviderError::transport("gemini", "connection reset"), false),
        ];

        for (error, expected) in fixtures {
            let actual = error.is_rate_limited();
            assert_eq!(actual, expected, "error: {}", error);
        }
    }

    #[test]
    fn test_response_body_only_for_non_empty_status() {
        let fixtures = vec![
            (ProviderError::status("Gemini", 400, "API key not valid"), Some("API key not valid")),
            (ProviderError::status("Gemini", 503, ""), None),
            (ProviderError::rate_limited("Gemini"), None),
        ];

        for (error, expected) in fixtures {
            let actual = error.response_body();
            assert_eq!(actual, expected, "error: {}", error);
        }
    }

    #[test]
    fn test_provider_error_messages() {
        let actual = ProviderError::status("Gemini", 503, "").to_string();
        let expected = "Gemini API error: 503".to_string();
        assert_eq!(actual, expected);

        let actual = ProviderError::missing_credential("Groq").to_string();
        let expected = "Groq API key not configured".to_string();
        assert_eq!(actual, expected);
    }
}
