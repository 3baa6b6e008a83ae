use std::sync::Arc;

use gitme_domain::PipelineLimits;
use gitme_services::{
    GatewayFactory, GitHubClient, ReadmePipeline, RepositoryFetcher, build_client,
};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReadmePipeline>,
    pub limits: PipelineLimits,
}

impl AppState {
    pub fn new(pipeline: ReadmePipeline, limits: PipelineLimits) -> Self {
        Self { pipeline: Arc::new(pipeline), limits }
    }

    /// Wire the GitHub client, providers and pipeline from configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = build_client(&config.http)?;
        let github = GitHubClient::new(client.clone(), &config.github);
        let gateway = GatewayFactory::gemini_then_groq(
            client,
            config.providers.gemini.clone(),
            config.providers.groq.clone(),
            config.generation.clone(),
            config.retry.clone(),
        );
        let pipeline = ReadmePipeline::new(
            RepositoryFetcher::new(github, config.limits.clone()),
            Arc::new(gateway),
            config.limits.clone(),
        );

        Ok(Self::new(pipeline, config.limits.clone()))
    }
}
