//! File Selector: asks the model which paths matter most

use std::collections::HashSet;
use std::sync::Arc;

use gitme_domain::{PipelineLimits, RepoInfo};
use tracing::{debug, warn};

use crate::ai::AiGateway;
use crate::error::GatewayError;

pub struct FileSelector {
    gateway: Arc<AiGateway>,
    limits: PipelineLimits,
}

impl FileSelector {
    pub fn new(gateway: Arc<AiGateway>, limits: PipelineLimits) -> Self {
        Self { gateway, limits }
    }

    /// Paths from `paths` the model judged most important, in their original
    /// order.
    ///
    /// An unparseable reply degrades to the first `selector_fallback_count`
    /// paths. Gateway failures are returned to the caller.
    pub async fn select(
        &self,
        paths: &[String],
        repo_info: &RepoInfo,
    ) -> Result<Vec<String>, GatewayError> {
        let listed = &paths[..paths.len().min(self.limits.max_selector_paths)];
        let prompt = build_prompt(listed, repo_info);
        let response = self.gateway.generate(&prompt).await?;

        match parse_selection(&response) {
            Some(chosen) => {
                let chosen: HashSet<String> = chosen.into_iter().collect();
                let selected: Vec<String> =
                    paths.iter().filter(|p| chosen.contains(*p)).cloned().collect();
                debug!(requested = chosen.len(), matched = selected.len(), "Parsed file selection");
                Ok(selected)
            }
            None => {
                warn!("Selector reply held no JSON array of paths, using fallback");
                Ok(paths
                    .iter()
                    .take(self.limits.selector_fallback_count)
                    .cloned()
                    .collect())
            }
        }
    }
}

pub(crate) fn build_prompt(paths: &[String], repo_info: &RepoInfo) -> String {
    format!(
        "Analyze this repository file structure and select the 10-15 most important files for understanding the project.
Focus on: main source files, configuration files, package manifests, and documentation.
Exclude: test files, build outputs, node_modules, .git folders, images, and minified files.

Repository: {name}
Description: {description}
Language: {language}

Files (first {count}):
{files}

Return ONLY a JSON array of file paths, nothing else:
[\"path/to/file1.js\", \"path/to/file2.json\"]",
        name = repo_info.name,
        description = repo_info.description_or("No description"),
        language = repo_info.language_or_unknown(),
        count = paths.len(),
        files = paths.join("\n"),
    )
}

/// Decode the first balanced `[...]` in `response` as a list of paths
pub(crate) fn parse_selection(response: &str) -> Option<Vec<String>> {
    let array = extract_json_array(response)?;
    serde_json::from_str(array).ok()
}

/// First balanced bracket span, ignoring brackets inside JSON strings
fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
