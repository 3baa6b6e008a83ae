//! Error handling for the HTTP surface

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gitme_services::PipelineError;
use serde::Serialize;
use thiserror::Error;

/// Main error type for gitme-server operations
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    PayloadTooLarge { message: String },

    #[error("Invalid GitHub URL format: {url}")]
    InvalidRepositoryUrl { url: String },

    #[error("Repository not found or not accessible: {repo}")]
    RepositoryNotFound { repo: String },

    #[error("{message}")]
    UpstreamFailure { message: String },

    #[error("{message}")]
    ProviderFailure { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ServerError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Get the error code for HTTP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::InvalidRepositoryUrl { .. } => "INVALID_REPOSITORY_URL",
            Self::RepositoryNotFound { .. } => "REPOSITORY_NOT_FOUND",
            Self::UpstreamFailure { .. } => "UPSTREAM_ERROR",
            Self::ProviderFailure { .. } => "AI_PROVIDER_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::InvalidRepositoryUrl { .. } => 400,
            Self::RepositoryNotFound { .. } => 404,
            Self::UpstreamFailure { .. } => 502,
            Self::ProviderFailure { .. } => 502,
            Self::Internal { .. } => 500,
        }
    }

    /// Attach the request id and render the JSON error body
    pub fn with_request_id(self, request_id: impl Into<String>) -> ApiError {
        ApiError { error: self, request_id: request_id.into() }
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidUrl(e) => Self::InvalidRepositoryUrl { url: e.url },
            PipelineError::RepositoryNotFound { repo, .. } => Self::RepositoryNotFound { repo },
            PipelineError::Gateway(e) => Self::ProviderFailure { message: e.to_string() },
            other @ (PipelineError::TreeFetch { .. }
            | PipelineError::BlobFetch { .. }
            | PipelineError::BlobDecode { .. }
            | PipelineError::GitHubRequest(_)) => {
                Self::UpstreamFailure { message: other.to_string() }
            }
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                Self::PayloadTooLarge { message: rejection.body_text() }
            }
            _ => Self::validation("body", rejection.body_text()),
        }
    }
}

/// Error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub request_id: String,
}

/// A [`ServerError`] bound to the request it failed
#[derive(Debug)]
pub struct ApiError {
    pub error: ServerError,
    pub request_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.error.to_string(),
            code: self.error.error_code().to_string(),
            request_id: self.request_id,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for gitme-server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Convert anyhow::Error to ServerError
impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use gitme_domain::{InvalidRepoUrl, ProviderError};
    use gitme_services::GatewayError;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_pipeline_errors_map_to_status_codes() {
        let fixtures = vec![
            (PipelineError::InvalidUrl(InvalidRepoUrl::new("nope")), 400, "INVALID_REPOSITORY_URL"),
            (
                PipelineError::RepositoryNotFound { repo: "octo/demo".into(), status: 404 },
                404,
                "REPOSITORY_NOT_FOUND",
            ),
            (
                PipelineError::TreeFetch { repo: "octo/demo".into(), status: 409 },
                502,
                "UPSTREAM_ERROR",
            ),
            (
                PipelineError::Gateway(GatewayError::combine(
                    ProviderError::rate_limited("Gemini"),
                    ProviderError::rate_limited("Groq"),
                )),
                502,
                "AI_PROVIDER_ERROR",
            ),
        ];

        for (error, status, code) in fixtures {
            let description = error.to_string();
            let actual = ServerError::from(error);
            assert_eq!(actual.http_status_code(), status, "error: {}", description);
            assert_eq!(actual.error_code(), code, "error: {}", description);
        }
    }

    #[test]
    fn test_gateway_message_is_preserved() {
        let fixture = PipelineError::Gateway(GatewayError::combine(
            ProviderError::rate_limited("Gemini"),
            ProviderError::rate_limited("Groq"),
        ));

        let actual = ServerError::from(fixture).to_string();
        let expected =
            "Rate limit exceeded on both Gemini and Groq. Please try again in a few moments.";

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let fixture =
            ServerError::validation("repoUrl", "repoUrl is required").with_request_id("req-1");

        let response = fixture.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let actual: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let expected = serde_json::json!({
            "error": "repoUrl is required",
            "code": "VALIDATION_ERROR",
            "request_id": "req-1",
        });

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(actual, expected);
    }
}
