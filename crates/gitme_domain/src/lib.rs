//! Domain model for README generation: repository data, request metadata,
//! progress events, streamed messages and provider interfaces.

pub mod config;
mod error;
pub mod filter;
mod log;
mod metadata;
mod provider;
mod repo;
mod stream;

pub use config::{
    GenerationConfig, GitHubSettings, HttpConfig, PipelineLimits, ProviderSettings, RetryConfig,
};
pub use error::{InvalidRepoUrl, ProviderError};
pub use filter::is_relevant_path;
pub use log::{LogEvent, LogKind, LogSink, MemorySink, TracingSink};
pub use metadata::RequestMetadata;
pub use provider::TextGenerator;
pub use repo::{FileData, FileSummary, FileTreeEntry, RepoInfo, RepoReference};
pub use stream::StreamMessage;

/// Fixed closing line every generated README must carry
pub const ATTRIBUTION_LINE: &str = "Generated with GitMe – https://readme-generator-phi.vercel.app";
