//! Repository data model shared by every pipeline stage

use derive_setters::Setters;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidRepoUrl;

lazy_static! {
    static ref GITHUB_URL: Regex =
        Regex::new(r"github\.com/([^/\s?#]+)/([^/\s?#]+)").expect("valid github url pattern");
}

/// Owner/repository pair resolved from a GitHub URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoReference {
    owner: String,
    repo: String,
}

impl RepoReference {
    /// Resolve `github.com/<owner>/<repo>[.git]` anywhere in the input.
    pub fn parse(url: &str) -> Result<Self, InvalidRepoUrl> {
        let captures = GITHUB_URL
            .captures(url.trim())
            .ok_or_else(|| InvalidRepoUrl::new(url))?;

        let owner = captures[1].to_string();
        let repo = captures[2].trim_end_matches(".git").to_string();

        if repo.is_empty() {
            return Err(InvalidRepoUrl::new(url));
        }

        Ok(Self { owner, repo })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl std::fmt::Display for RepoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn default_branch() -> String {
    "main".to_string()
}

/// Repository metadata fetched once and handed to every downstream stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct RepoInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

impl RepoInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            language: None,
            stars: 0,
            forks: 0,
            default_branch: default_branch(),
        }
    }

    /// Description, or `fallback` when absent or blank
    pub fn description_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(fallback)
    }

    /// Primary language, or "Unknown"
    pub fn language_or_unknown(&self) -> &str {
        self.language
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("Unknown")
    }
}

/// One blob in the recursive repository tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeEntry {
    pub path: String,
    /// Content hash used to address the blob
    pub sha: String,
}

impl FileTreeEntry {
    pub fn new(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self { path: path.into(), sha: sha.into() }
    }
}

/// A file whose content has been downloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    pub path: String,
    pub content: String,
}

impl FileData {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub summary: String,
}

impl FileSummary {
    pub fn new(path: impl Into<String>, summary: impl Into<String>) -> Self {
        Self { path: path.into(), summary: summary.into() }
    }
}
