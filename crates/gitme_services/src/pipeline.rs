//! End-to-end README generation: fetch, select, summarize, synthesize

use std::collections::HashSet;
use std::sync::Arc;

use gitme_domain::{FileData, LogSink, PipelineLimits, RepoInfo, RequestMetadata};
use tracing::info;

use crate::ai::AiGateway;
use crate::error::Result;
use crate::github::RepositoryFetcher;
use crate::selector::FileSelector;
use crate::summarizer::FileSummarizer;
use crate::synthesizer::ReadmeSynthesizer;

pub struct ReadmePipeline {
    fetcher: RepositoryFetcher,
    selector: FileSelector,
    summarizer: FileSummarizer,
    synthesizer: ReadmeSynthesizer,
}

impl ReadmePipeline {
    pub fn new(
        fetcher: RepositoryFetcher,
        gateway: Arc<AiGateway>,
        limits: PipelineLimits,
    ) -> Self {
        Self {
            fetcher,
            selector: FileSelector::new(gateway.clone(), limits.clone()),
            summarizer: FileSummarizer::new(gateway.clone(), limits.clone()),
            synthesizer: ReadmeSynthesizer::new(gateway, limits),
        }
    }

    /// Generate a README from files the caller already holds.
    pub async fn generate_from_files(
        &self,
        files: &[FileData],
        repo_info: &RepoInfo,
        metadata: &RequestMetadata,
        sink: &dyn LogSink,
    ) -> Result<String> {
        sink.info(&format!("Processing {} files for {}", files.len(), repo_info.name));
        let tree_paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
        self.analyze_and_write(files, repo_info, metadata, &tree_paths, sink).await
    }

    /// Fetch `url` from GitHub and generate its README.
    pub async fn generate_from_url(
        &self,
        url: &str,
        metadata: &RequestMetadata,
        sink: &dyn LogSink,
    ) -> Result<String> {
        sink.info("Starting README generation...");
        sink.info(&format!("Repository: {url}"));

        let fetched = self.fetcher.fetch(url, sink).await?;
        info!(
            owner = fetched.reference.owner(),
            repo = fetched.reference.repo(),
            files = fetched.files.len(),
            "Fetched repository"
        );

        self.analyze_and_write(
            &fetched.files,
            &fetched.repo_info,
            metadata,
            &fetched.tree_paths,
            sink,
        )
        .await
    }

    async fn analyze_and_write(
        &self,
        files: &[FileData],
        repo_info: &RepoInfo,
        metadata: &RequestMetadata,
        tree_paths: &[String],
        sink: &dyn LogSink,
    ) -> Result<String> {
        sink.info("AI analyzing important files...");
        let paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
        let chosen: HashSet<String> =
            self.selector.select(&paths, repo_info).await?.into_iter().collect();
        let selected: Vec<FileData> = files
            .iter()
            .filter(|f| chosen.contains(&f.path))
            .cloned()
            .collect();
        sink.success(&format!("Selected {} key files for analysis", selected.len()));

        sink.info("Reading file contents...");
        let summaries = self.summarizer.summarize(&selected, sink).await;
        sink.success("File analysis complete");

        sink.info("Generating comprehensive README...");
        let readme = self
            .synthesizer
            .synthesize(repo_info, &summaries, metadata, tree_paths)
            .await?;
        sink.success("README generated successfully!");

        info!(
            repo = %repo_info.name,
            selected = selected.len(),
            summarized = summaries.len(),
            "README generated"
        );
        Ok(readme)
    }
}
