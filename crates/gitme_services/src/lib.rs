//! Services behind README generation: the GitHub fetcher, model providers
//! with failover, and the select / summarize / synthesize stages.

pub mod ai;
mod error;
pub mod github;
mod http;
mod pipeline;
mod selector;
mod summarizer;
mod synthesizer;

pub use ai::{AiGateway, GatewayFactory, GeminiProvider, GroqProvider, MockProvider};
pub use error::{GatewayError, PipelineError, Result};
pub use github::{FetchedRepository, GitHubClient, RepositoryFetcher};
pub use http::build_client;
pub use pipeline::ReadmePipeline;
pub use selector::FileSelector;
pub use summarizer::FileSummarizer;
pub use synthesizer::ReadmeSynthesizer;
