use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gitme_domain::{RequestMetadata, TracingSink};
use gitme_server::{AppConfig, AppState};
use tracing::info;

/// Generation inputs collected from the command line
#[derive(Debug)]
pub struct GenerateArgs {
    pub repo_url: String,
    pub config: Option<PathBuf>,
    pub metadata: RequestMetadata,
    pub output: Option<PathBuf>,
}

/// Run the URL pipeline in-process and write the README
pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let state = AppState::from_config(&config)?;

    let readme = state
        .pipeline
        .generate_from_url(&args.repo_url, &args.metadata, &TracingSink)
        .await?;

    write_readme(&readme, args.output.as_deref())
}

fn write_readme(readme: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, readme)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "README written");
        }
        None => println!("{readme}"),
    }
    Ok(())
}
