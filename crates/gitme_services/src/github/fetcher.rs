//! Repository Fetcher: URL -> metadata, filtered tree and bounded file contents

use gitme_domain::{
    FileData, FileTreeEntry, LogSink, PipelineLimits, RepoInfo, RepoReference, is_relevant_path,
};
use tracing::{info, warn};

use super::client::GitHubClient;
use crate::error::Result;

/// Everything the downstream stages need from the repository
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRepository {
    pub reference: RepoReference,
    pub repo_info: RepoInfo,
    /// Downloaded files, in tree order
    pub files: Vec<FileData>,
    /// Every path that passed the denylist, in tree order
    pub tree_paths: Vec<String>,
}

pub struct RepositoryFetcher {
    github: GitHubClient,
    limits: PipelineLimits,
}

impl RepositoryFetcher {
    pub fn new(github: GitHubClient, limits: PipelineLimits) -> Self {
        Self { github, limits }
    }

    /// Resolve `url`, fetch its metadata and tree, and download the first
    /// `max_fetched_files` relevant files.
    ///
    /// Metadata and tree failures are terminal. A file that cannot be read or
    /// exceeds `max_file_chars` is reported through `sink` and skipped.
    pub async fn fetch(&self, url: &str, sink: &dyn LogSink) -> Result<FetchedRepository> {
        sink.info("Parsing repository URL...");
        let reference = RepoReference::parse(url)?;
        sink.info(&format!("Analyzing {reference}..."));

        sink.info(&format!("Fetching repository information for {reference}..."));
        let repo_info = self.github.repository(&reference).await?;
        sink.success("Repository data fetched");

        sink.info("Fetching repository file tree...");
        let entries = self.github.tree(&reference, &repo_info.default_branch).await?;

        sink.info(&format!("Found {} files, filtering relevant ones...", entries.len()));
        let relevant: Vec<FileTreeEntry> = entries
            .into_iter()
            .filter(|entry| is_relevant_path(&entry.path))
            .collect();
        sink.success(&format!("Selected {} relevant files for analysis", relevant.len()));

        let to_fetch = &relevant[..relevant.len().min(self.limits.max_fetched_files)];
        let files = self.fetch_contents(&reference, to_fetch, sink).await;

        sink.success(&format!("Successfully fetched {} files", files.len()));
        info!(
            repo = %reference,
            relevant = relevant.len(),
            fetched = files.len(),
            "Repository fetch complete"
        );

        Ok(FetchedRepository {
            reference,
            repo_info,
            files,
            tree_paths: relevant.into_iter().map(|entry| entry.path).collect(),
        })
    }

    async fn fetch_contents(
        &self,
        reference: &RepoReference,
        entries: &[FileTreeEntry],
        sink: &dyn LogSink,
    ) -> Vec<FileData> {
        let mut files = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            sink.info(&format!(
                "Reading file {}/{}: {}",
                index + 1,
                entries.len(),
                entry.path
            ));

            match self.github.blob(reference, &entry.sha).await {
                Ok(content) if content.chars().count() > self.limits.max_file_chars => {
                    sink.warning(&format!("Skipping large file: {}", entry.path));
                }
                Ok(content) => files.push(FileData::new(&entry.path, content)),
                Err(e) => {
                    warn!(path = %entry.path, error = %e, "Failed to fetch file content");
                    sink.warning(&format!("Failed to read: {}", entry.path));
                }
            }
        }

        files
    }
}
