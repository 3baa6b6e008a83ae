//! GitHub access: REST client and the bounded repository fetcher

mod client;
mod fetcher;

pub use client::GitHubClient;
pub use fetcher::{FetchedRepository, RepositoryFetcher};
