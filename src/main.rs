use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use perspective_mcp_gateway::clients::perspective::PerspectiveRemote;
use perspective_mcp_gateway::domain::CommentAnalyzer;
use perspective_mcp_gateway::infra::config::Config;
use perspective_mcp_gateway::{cli, infra, tools};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    infra::logging::init();

    let args = cli::Cli::parse();
    if let Some(cmd) = args.command {
        return cli::run_commands(cmd).await;
    }

    let cfg = Config::from_env()?;
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        api_base = %cfg.api_base,
        "BOOT perspective-mcp-gateway"
    );

    let client = PerspectiveRemote::from_config(&cfg);

    // Stdio mode: run MCP over stdio ONLY (no HTTP).
    if cfg.mode == "stdio" {
        let analyzer: Arc<dyn CommentAnalyzer> = Arc::new(client);
        tracing::info!("Perspective MCP gateway running on stdio");
        infra::mcp::serve_stdio(move || infra::mcp::factory_with_analyzer(analyzer))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    // HTTP server: /healthz + streamable MCP at /mcp + JSON-RPC shim at /rpc.
    let registry = tools::registry::build_registry(Arc::new(client.clone()));
    let app = infra::http_app::build_app(client, registry);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("interrupt received, shutting down");
}
