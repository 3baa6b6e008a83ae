use gitme_domain::{FileData, RepoInfo, RequestMetadata};
use serde::{Deserialize, Serialize};

/// Body of `POST /generate-readme`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReadmeRequest {
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
}

/// Body of `POST /generate-readme-from-files`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromFilesRequest {
    pub files: Vec<FileData>,
    pub repo_info: RepoInfo,
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
}

#[derive(Debug, Serialize)]
pub struct ReadmeResponse {
    pub readme: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
