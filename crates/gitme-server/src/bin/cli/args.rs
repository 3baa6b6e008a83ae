use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate README files for GitHub repositories",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Configuration file (defaults to ./gitme.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind, overriding the configuration
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate a README for one repository and print it
    Generate {
        /// Repository URL, e.g. https://github.com/owner/repo
        repo_url: String,

        /// Configuration file (defaults to ./gitme.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Custom project description
        #[arg(long)]
        description: Option<String>,

        /// Key features to highlight
        #[arg(long)]
        features: Option<String>,

        /// License name
        #[arg(long)]
        license: Option<String>,

        /// Any additional context for the model
        #[arg(long)]
        context: Option<String>,

        /// Write the README here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
