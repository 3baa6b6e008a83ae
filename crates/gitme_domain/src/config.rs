//! Configuration values consumed by the services
//!
//! All sections deserialize with defaults so a partial file or an empty
//! environment still yields a usable configuration.

use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Bounds applied by the pipeline stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
pub struct PipelineLimits {
    /// Filtered files whose content is downloaded
    pub max_fetched_files: usize,
    /// Decoded files longer than this many characters are dropped
    pub max_file_chars: usize,
    /// Paths listed in the selector prompt
    pub max_selector_paths: usize,
    /// Prefix returned when the selector response cannot be parsed
    pub selector_fallback_count: usize,
    /// Selected files that get a summary
    pub max_summarized_files: usize,
    /// Characters of each file included in its summary prompt
    pub summary_content_chars: usize,
    /// Pause before every summary call after the first
    pub summary_delay_ms: u64,
    /// Paths listed in the README prompt's structure sample
    pub tree_sample_size: usize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_fetched_files: 20,
            max_file_chars: 50_000,
            max_selector_paths: 100,
            selector_fallback_count: 15,
            max_summarized_files: 5,
            summary_content_chars: 10_000,
            summary_delay_ms: 1000,
            tree_sample_size: 30,
        }
    }
}

/// Worst-case JSON encoding of one character (`\u001f`)
const MAX_JSON_BYTES_PER_CHAR: usize = 6;

/// Room for the request envelope around the file contents
const REQUEST_ENVELOPE_BYTES: usize = 1024 * 1024;

impl PipelineLimits {
    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }

    /// Largest request body that can carry `max_fetched_files` files of
    /// `max_file_chars` characters each.
    pub fn max_request_body_bytes(&self) -> usize {
        self.max_fetched_files
            .saturating_mul(self.max_file_chars)
            .saturating_mul(MAX_JSON_BYTES_PER_CHAR)
            .saturating_add(REQUEST_ENVELOPE_BYTES)
    }
}

/// Backoff policy for rate-limited provider calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
pub struct RetryConfig {
    /// Total calls made to one provider for one prompt
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for every further retry
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay_ms: 2000 }
    }
}

impl RetryConfig {
    /// Delay after the failed attempt with 0-based index `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }
}

/// Sampling parameters shared by every provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { temperature: 0.7, max_output_tokens: 8192 }
    }
}

/// Connection settings for one model provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option, into)]
pub struct ProviderSettings {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderSettings {
    pub fn gemini() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            api_key: None,
        }
    }

    pub fn groq() -> Self {
        Self {
            base_url: "https://api.groq.com".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
#[setters(strip_option, into)]
pub struct GitHubSettings {
    pub api_url: String,
    /// Optional token for higher rate limits
    pub token: Option<String>,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self { api_url: "https://api.github.com".to_string(), token: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
pub struct HttpConfig {
    /// Applied to every outbound request
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { request_timeout_secs: 60 }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
