use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::generate::GroqClient;
use crate::history::HistoryLog;
use crate::load_config::load_config;
use crate::pipeline::generate_docs;

/// CLI for autodoc: generate README and API documentation for a repository.
#[derive(Parser)]
#[clap(
    name = "autodoc",
    version,
    about = "Generate README and API documentation for a git repository with a hosted LLM"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Acquire a repository and generate the configured documents
    Generate {
        /// HTTPS URL of the repository (an optional .git suffix is fine)
        #[clap(long)]
        repo_url: String,
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate { repo_url, config } => {
            let config = load_config(config)?;
            let api_key = resolve_api_key(config.api_key.clone())?;
            let client = GroqClient::new(api_key);

            let mut history = HistoryLog::new();
            println!("Generating documentation...");
            match generate_docs(&config, &client, &repo_url, &mut history).await {
                Ok(report) => {
                    println!("Documentation complete.\nReport:");
                    println!("{:#?}", report);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("[ERROR] Documentation generation failed: {}", e);
                    Err(anyhow::Error::msg(e))
                }
            }
        }
    }
}

/// The key comes from the environment when present (a `.env` file is
/// honored via dotenvy in main); otherwise the user is prompted once.
/// A still-missing key is a blocking validation error raised before any
/// network activity.
fn resolve_api_key(from_env: Option<String>) -> Result<String> {
    if let Some(key) = from_env {
        return Ok(key);
    }

    let entered = dialoguer::Password::new()
        .with_prompt("Groq API key")
        .allow_empty_password(true)
        .interact()
        .unwrap_or_default();
    if entered.is_empty() {
        anyhow::bail!("Groq API key is missing. Set GROQ_API_KEY or enter it when prompted.");
    }
    Ok(entered)
}
