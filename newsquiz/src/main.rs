/*
newsquiz - single-binary main.rs
This binary loads configuration, builds the LLM provider and starts the Rocket HTTP server.
*/

use anyhow::{Context, Result};
use clap::Parser;
use common::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use newsquiz::llm;
use newsquiz::server::launch_rocket;

#[derive(Parser, Debug)]
#[command(name = "newsquiz", about = "NewsQuiz single-binary server")]
struct Args {
    /// Path to config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override log level (info, debug, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // Resolve config paths
    let default_path = PathBuf::from("config.default.toml");

    let override_path = if let Some(p) = args.config {
        if !p.exists() {
            error!(path = ?p, "specified config file not found");
            return Err(anyhow::anyhow!("Config file not found: {}", p.display()));
        }
        Some(p)
    } else {
        let p = PathBuf::from("config.toml");
        if p.exists() {
            Some(p)
        } else {
            None
        }
    };

    // Load configuration with defaults
    let config = match Config::load_with_defaults(
        if default_path.exists() {
            Some(&default_path)
        } else {
            None
        },
        override_path.as_deref(),
    )
    .await
    {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(%e, "failed to load configuration");
            return Err(e);
        }
    };
    info!(default = ?default_path, override_path = ?override_path, "configuration loaded");

    // Initialize the LLM provider used for quiz synthesis
    let llm_provider: Option<Arc<dyn llm::LlmProvider>> = if let Some(ref llm_config) = config.llm {
        match create_llm_provider(llm_config) {
            Ok(provider) => {
                info!(
                    "LLM provider initialized: {:?}",
                    llm_config
                        .remote
                        .as_ref()
                        .and_then(|c| c.model.as_deref())
                        .unwrap_or("unknown")
                );
                Some(Arc::from(provider))
            }
            Err(e) => {
                error!("Failed to initialize LLM provider: {}", e);
                None
            }
        }
    } else {
        warn!("No [llm] section in configuration; /quiz will be unavailable");
        None
    };

    // Launch the Rocket server (blocking until Rocket shuts down)
    info!("Launching Rocket HTTP server");
    launch_rocket(Arc::new(config), llm_provider).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Create an LLM provider based on configuration
fn create_llm_provider(llm_config: &common::LlmConfig) -> Result<Box<dyn llm::LlmProvider>> {
    let adapter = llm_config.adapter.as_deref().unwrap_or("none");
    match adapter {
        "remote" => {
            let remote_config = llm_config
                .remote
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Remote adapter selected but no [llm.remote] config found"))?;

            // Fetch API key from env var
            let api_key_env = remote_config.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY");
            let api_key = std::env::var(api_key_env)
                .with_context(|| format!("LLM API key env var '{}' not set", api_key_env))?;

            let model = remote_config
                .model
                .clone()
                .unwrap_or_else(|| "gpt-4o-2024-08-06".to_string());
            let api_url = remote_config
                .api_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());
            let timeout_secs = remote_config.timeout_seconds.unwrap_or(30);
            let max_tokens = remote_config.max_tokens.unwrap_or(1500);

            let provider = llm::remote::RemoteLlmProvider::new(api_url, api_key, model)
                .with_defaults(timeout_secs, max_tokens, 0.7);
            Ok(Box::new(provider))
        }
        "none" => {
            anyhow::bail!("LLM adapter 'none' cannot synthesize quizzes")
        }
        _ => anyhow::bail!("Unknown LLM adapter type: {}", adapter),
    }
}
