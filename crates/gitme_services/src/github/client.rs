//! Thin client over the GitHub REST endpoints the fetcher needs

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gitme_domain::{FileTreeEntry, GitHubSettings, RepoInfo, RepoReference};
use reqwest::RequestBuilder;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    default_branch: String,
}

impl From<RepositoryPayload> for RepoInfo {
    fn from(payload: RepositoryPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            language: payload.language.or_else(|| Some("Unknown".to_string())),
            stars: payload.stargazers_count,
            forks: payload.forks_count,
            default_branch: payload.default_branch,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TreePayload {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct BlobPayload {
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, settings: &GitHubSettings) -> Self {
        Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token.clone().filter(|t| !t.is_empty()),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .header("Accept", "application/vnd.github.v3+json");

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Repository metadata; any non-2xx status means the repository is
    /// missing or private.
    pub async fn repository(&self, reference: &RepoReference) -> Result<RepoInfo> {
        let response = self
            .get(&format!("/repos/{}/{}", reference.owner(), reference.repo()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::RepositoryNotFound {
                repo: reference.to_string(),
                status: status.as_u16(),
            });
        }

        let payload: RepositoryPayload = response.json().await?;
        debug!(repo = %reference, branch = %payload.default_branch, "Fetched repository metadata");
        Ok(payload.into())
    }

    /// Every blob in the recursive tree of `branch`, in tree order.
    pub async fn tree(
        &self,
        reference: &RepoReference,
        branch: &str,
    ) -> Result<Vec<FileTreeEntry>> {
        let response = self
            .get(&format!(
                "/repos/{}/{}/git/trees/{}",
                reference.owner(),
                reference.repo(),
                branch
            ))
            .query(&[("recursive", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::TreeFetch {
                repo: reference.to_string(),
                status: status.as_u16(),
            });
        }

        let payload: TreePayload = response.json().await?;
        if payload.truncated {
            warn!(repo = %reference, "GitHub truncated the recursive tree listing");
        }

        Ok(payload
            .tree
            .into_iter()
            .filter(|item| item.kind == "blob")
            .map(|item| FileTreeEntry::new(item.path, item.sha))
            .collect())
    }

    /// Decoded content of the blob addressed by `sha`.
    pub async fn blob(&self, reference: &RepoReference, sha: &str) -> Result<String> {
        let response = self
            .get(&format!(
                "/repos/{}/{}/git/blobs/{}",
                reference.owner(),
                reference.repo(),
                sha
            ))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::BlobFetch { sha: sha.to_string(), status: status.as_u16() });
        }

        let payload: BlobPayload = response.json().await?;
        decode_blob(sha, payload)
    }
}

fn decode_blob(sha: &str, payload: BlobPayload) -> Result<String> {
    if payload.encoding != "base64" {
        return Ok(payload.content);
    }

    let compact: String = payload.content.split_whitespace().collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| PipelineError::blob_decode(sha, e))?;

    String::from_utf8(bytes).map_err(|e| PipelineError::blob_decode(sha, e))
}
