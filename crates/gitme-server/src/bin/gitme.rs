//! GitMe command line: serve the API or generate a single README

use anyhow::{Result, anyhow};
use clap::Parser;
use gitme_domain::RequestMetadata;
use gitme_server::{init_development_logging, init_production_logging};
use tracing::info;

mod cli;

use cli::{Args, Commands, run_generate, run_serve};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    match args.command {
        Commands::Serve { config, host, port } => {
            init_production_logging().map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;
            info!(version = env!("CARGO_PKG_VERSION"), "Starting GitMe API");
            run_serve(config.as_deref(), host, port).await
        }
        Commands::Generate {
            repo_url,
            config,
            description,
            features,
            license,
            context,
            output,
        } => {
            init_development_logging().map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;
            run_generate(cli::generate::GenerateArgs {
                repo_url,
                config,
                metadata: RequestMetadata {
                    description,
                    features,
                    license,
                    additional_context: context,
                },
                output,
            })
            .await
        }
    }
}
