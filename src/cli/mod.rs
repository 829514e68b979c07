use clap::{Parser, Subcommand};

use crate::clients::perspective::PerspectiveRemote;
use crate::domain::{AnalyzeRequest, CommentAnalyzer, DEFAULT_ATTRIBUTE};
use crate::infra::config::Config;

#[derive(Parser)]
#[command(name = "perspective-mcp-gateway")]
#[command(about = "Perspective MCP Gateway - serve by default, admin subcommands below")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Health check a running gateway
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration without starting the service
    Config,
    /// Run one live analyze round-trip against the Perspective API
    TestAnalyze {
        /// Test text to score
        #[arg(short, long, default_value = "hello world")]
        text: String,
    },
}

pub async fn run_commands(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Health { url } => {
            health_check(&url).await?;
            println!("service is healthy");
            Ok(())
        }
        Commands::Config => {
            validate_config()?;
            println!("configuration is valid");
            Ok(())
        }
        Commands::TestAnalyze { text } => test_analyze(&text).await,
    }
}

async fn health_check(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("health check failed: HTTP {}", response.status())
    }
}

fn validate_config() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    if !matches!(cfg.mode.as_str(), "server" | "stdio") {
        anyhow::bail!("Invalid MODE: {}. Must be 'server' or 'stdio'", cfg.mode);
    }
    if cfg.mode == "server" && cfg.port == 0 {
        anyhow::bail!("PORT cannot be 0");
    }
    Ok(())
}

async fn test_analyze(text: &str) -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    let client = PerspectiveRemote::from_config(&cfg);
    let req = AnalyzeRequest {
        text: text.to_owned(),
        attributes: vec![DEFAULT_ATTRIBUTE.to_owned()],
        languages: None,
    };
    let payload = client
        .analyze(&req)
        .await
        .map_err(|e| anyhow::anyhow!("analyze failed: {e}"))?;

    println!("analyze result for {text:?}:");
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
