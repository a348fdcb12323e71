//! One-shot advisory probe
//!
//! Sends a single performance profile to the advisory model and prints
//! the weights it proposes, or why they were rejected.

use boss_brain::core::config::{AdvisoryConfig, BrainConfig};
use boss_brain::core::error::Result;
use boss_brain::llm::{AdvisoryClient, LlmClient, PlayerPerformanceProfile};

use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Ask the advisory model for boss tactics once
#[derive(Parser, Debug)]
#[command(name = "advise")]
#[command(about = "Request boss attack weights for a player profile")]
struct Args {
    /// Jumps the player made before the trigger
    #[arg(long, default_value_t = 0)]
    jumps: u32,

    /// Shot accuracy in percent (0-100)
    #[arg(long, default_value_t = 0.0)]
    accuracy: f64,

    /// TOML configuration file (only the [advisory] section is used)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the model name
    #[arg(long)]
    model: Option<String>,

    /// Override the endpoint URL
    #[arg(long)]
    url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boss_brain=info")),
        )
        .init();

    let args = Args::parse();

    let mut advisory: AdvisoryConfig = match &args.config {
        Some(path) => BrainConfig::load(path)?.advisory,
        None => AdvisoryConfig::default(),
    }
    .with_env_overrides();
    if let Some(model) = args.model {
        advisory.model = model;
    }
    if let Some(url) = args.url {
        advisory.api_url = url;
    }

    let profile = PlayerPerformanceProfile {
        jumps: args.jumps,
        accuracy_percent: args.accuracy.clamp(0.0, 100.0),
    };

    let rt = Runtime::new()?;
    let client = AdvisoryClient::new(LlmClient::new(&advisory)?);

    match rt.block_on(client.request_tactics(&profile)) {
        Ok(weights) => {
            println!("{}", serde_json::to_string_pretty(&weights.to_raw())?);
            Ok(())
        }
        Err(err) => {
            eprintln!("Advisory failed ({}): {}", err.kind(), err);
            Err(err.into())
        }
    }
}
