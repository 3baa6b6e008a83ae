//! File Summarizer: one short model summary per selected file

use std::sync::Arc;

use gitme_domain::{FileData, FileSummary, LogSink, PipelineLimits};
use tracing::warn;

use crate::ai::AiGateway;

pub struct FileSummarizer {
    gateway: Arc<AiGateway>,
    limits: PipelineLimits,
}

impl FileSummarizer {
    pub fn new(gateway: Arc<AiGateway>, limits: PipelineLimits) -> Self {
        Self { gateway, limits }
    }

    /// Summarize the first `max_summarized_files` of `files`, one call at a
    /// time with `summary_delay` between calls.
    ///
    /// A file whose summary fails is reported and left out of the result.
    pub async fn summarize(&self, files: &[FileData], sink: &dyn LogSink) -> Vec<FileSummary> {
        let batch = &files[..files.len().min(self.limits.max_summarized_files)];
        let mut summaries = Vec::with_capacity(batch.len());

        for (index, file) in batch.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.limits.summary_delay()).await;
            }

            sink.info(&format!("Analyzing {}...", file.path));
            let prompt = build_prompt(file, self.limits.summary_content_chars);

            match self.gateway.generate(&prompt).await {
                Ok(summary) => {
                    sink.success(&format!("Analyzed {}", file.path));
                    summaries.push(FileSummary::new(&file.path, summary));
                }
                Err(e) => {
                    warn!(path = %file.path, error = %e, "Failed to summarize file");
                    sink.warning(&format!("Failed to analyze {}: {}", file.path, e));
                }
            }
        }

        summaries
    }
}

pub(crate) fn build_prompt(file: &FileData, max_chars: usize) -> String {
    format!(
        "Briefly summarize this file's purpose and key functionality (2-3 sentences):

File: {path}
Content:
{content}",
        path = file.path,
        content = truncate_chars(&file.content, max_chars),
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
