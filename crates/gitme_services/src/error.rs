//! Error types for the README pipeline

use gitme_domain::{InvalidRepoUrl, ProviderError};
use thiserror::Error;

/// Terminal failure of the gateway after both providers were tried
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(
        "Rate limit exceeded on both {} and {}. Please try again in a few moments.",
        .primary.provider(),
        .secondary.provider()
    )]
    RateLimited {
        primary: ProviderError,
        secondary: ProviderError,
    },

    #[error("Both AI providers failed: {primary}; {secondary}")]
    AllProvidersFailed {
        primary: ProviderError,
        secondary: ProviderError,
    },
}

impl GatewayError {
    pub fn combine(primary: ProviderError, secondary: ProviderError) -> Self {
        if primary.is_rate_limited() && secondary.is_rate_limited() {
            Self::RateLimited { primary, secondary }
        } else {
            Self::AllProvidersFailed { primary, secondary }
        }
    }

    pub fn primary(&self) -> &ProviderError {
        match self {
            Self::RateLimited { primary, .. } | Self::AllProvidersFailed { primary, .. } => primary,
        }
    }

    pub fn secondary(&self) -> &ProviderError {
        match self {
            Self::RateLimited { secondary, .. } | Self::AllProvidersFailed { secondary, .. } => {
                secondary
            }
        }
    }
}

/// Main error type for pipeline operations
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidUrl(#[from] InvalidRepoUrl),

    #[error("Repository not found or not accessible: {repo} (HTTP {status})")]
    RepositoryNotFound { repo: String, status: u16 },

    #[error("Failed to fetch repository tree for {repo} (HTTP {status})")]
    TreeFetch { repo: String, status: u16 },

    #[error("Failed to fetch file content for {sha} (HTTP {status})")]
    BlobFetch { sha: String, status: u16 },

    #[error("File content for {sha} could not be decoded: {reason}")]
    BlobDecode { sha: String, reason: String },

    #[error("GitHub request failed")]
    GitHubRequest(#[source] reqwest::Error),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl PipelineError {
    pub fn blob_decode(sha: impl Into<String>, reason: impl ToString) -> Self {
        Self::BlobDecode { sha: sha.into(), reason: reason.to_string() }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubRequest(err.without_url())
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
