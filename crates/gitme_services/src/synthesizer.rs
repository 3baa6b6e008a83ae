//! README Synthesizer: the final prompt and model call

use std::sync::Arc;

use gitme_domain::{ATTRIBUTION_LINE, FileSummary, PipelineLimits, RepoInfo, RequestMetadata};

use crate::ai::AiGateway;
use crate::error::GatewayError;

pub struct ReadmeSynthesizer {
    gateway: Arc<AiGateway>,
    limits: PipelineLimits,
}

impl ReadmeSynthesizer {
    pub fn new(gateway: Arc<AiGateway>, limits: PipelineLimits) -> Self {
        Self { gateway, limits }
    }

    /// Generate the README. The model output is returned unmodified.
    pub async fn synthesize(
        &self,
        repo_info: &RepoInfo,
        summaries: &[FileSummary],
        metadata: &RequestMetadata,
        tree_paths: &[String],
    ) -> Result<String, GatewayError> {
        let sample = &tree_paths[..tree_paths.len().min(self.limits.tree_sample_size)];
        let prompt = build_prompt(repo_info, summaries, metadata, sample);
        self.gateway.generate(&prompt).await
    }
}

pub(crate) fn build_prompt(
    repo_info: &RepoInfo,
    summaries: &[FileSummary],
    metadata: &RequestMetadata,
    tree_sample: &[String],
) -> String {
    let custom: String = metadata
        .prompt_fields()
        .into_iter()
        .map(|(label, value)| format!("\n{label}: {value}\n"))
        .collect();

    let analysis = summaries
        .iter()
        .map(|s| format!("{}:\n{}", s.path, s.summary))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Generate a comprehensive, professional README.md for this GitHub repository.

REPOSITORY INFORMATION:
- Name: {name}
- Description: {description}
- Language: {language}
- Stars: {stars}
- Forks: {forks}
{custom}
FILE STRUCTURE (sample):
{tree}

KEY FILES ANALYSIS:
{analysis}

Generate a README with these sections:
1. Project Title and Description
2. Key Features (bullet points)
3. Installation Instructions
4. Usage Examples
5. Project Structure
6. Technologies Used
7. Contributing Guidelines
8. License Information

Use proper markdown formatting, emojis for visual appeal, and make it developer-friendly.
End with: \"{ATTRIBUTION_LINE}\"",
        name = repo_info.name,
        description = repo_info.description_or("No description provided"),
        language = repo_info.language_or_unknown(),
        stars = repo_info.stars,
        forks = repo_info.forks,
        tree = tree_sample.join("\n"),
    )
}
