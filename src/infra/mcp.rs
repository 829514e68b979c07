//! MCP server integration (Streamable HTTP + stdio) for perspective-mcp-gateway.
//!
//! - Exposes the two Perspective tools (`analyze_text`, `suggest_score`)
//! - Mounts Streamable HTTP services (POST frames, GET SSE) at `/mcp`
//! - Supports stdio mode when `MODE=stdio`
//!
//! Tool results are plain text content blocks carrying the upstream JSON,
//! matching what a protocol client renders directly.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use rmcp::{
    ErrorData as McpError,
    ServerHandler,
    model::JsonObject,
    handler::server::{
        router::Router,
        tool::{Parameters, ToolRouter},
    },
    serve_server,
};

use rmcp::transport::streamable_http_server::tower::{
    StreamableHttpServerConfig, StreamableHttpService,
};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;

use crate::domain::{AnalyzeRequest, CommentAnalyzer, SuggestRequest, ToolError};

/// The MCP server handler. Holds whichever implementation of
/// `CommentAnalyzer` it is given from `main.rs` (the real remote client, or
/// a stub in tests).
#[derive(Clone)]
pub struct GatewaySvc {
    analyzer: Arc<dyn CommentAnalyzer>,
}

impl GatewaySvc {
    pub fn new(analyzer: Arc<dyn CommentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl ServerHandler for GatewaySvc {}

fn to_mcp_error(e: ToolError) -> McpError {
    match e {
        ToolError::InvalidArguments(msg) => McpError::invalid_params(msg, None),
        ToolError::Upstream(msg) => McpError::internal_error(msg, None),
    }
}

#[rmcp::tool_router]
impl GatewaySvc {
    #[rmcp::tool(
        name = "analyze_text",
        description = "Analyze a text with the Perspective API and return attribute scores such as TOXICITY"
    )]
    async fn analyze_text(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<String, McpError> {
        tracing::debug!(params = ?params.0, "analyze_text invoked");
        let args = JsonValue::Object(params.0);
        let req = AnalyzeRequest::from_args(&args).map_err(to_mcp_error)?;

        let payload = self
            .analyzer
            .analyze(&req)
            .await
            .map_err(|e| McpError::internal_error(format!("Perspective API error: {e}"), None))?;
        tracing::trace!(payload = %payload, "analyze_text returning payload");

        serde_json::to_string_pretty(&payload)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    #[rmcp::tool(
        name = "suggest_score",
        description = "Submit a suggested score for a text/attribute pair back to the Perspective API"
    )]
    async fn suggest_score(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<String, McpError> {
        tracing::debug!(params = ?params.0, "suggest_score invoked");
        let args = JsonValue::Object(params.0);
        let req = SuggestRequest::from_args(&args).map_err(to_mcp_error)?;

        let payload = self
            .analyzer
            .suggest_score(&req)
            .await
            .map_err(|e| McpError::internal_error(format!("Perspective API error: {e}"), None))?;
        Ok(format!("Score suggestion submitted: {payload}"))
    }
}

/// Factory required by rmcp Streamable HTTP & stdio transports:
/// must return a `(handler, ToolRouter<handler>)` pair.
pub fn factory_with_analyzer(
    analyzer: Arc<dyn CommentAnalyzer>,
) -> (GatewaySvc, ToolRouter<GatewaySvc>) {
    let handler = GatewaySvc::new(analyzer);
    let tools = GatewaySvc::tool_router();
    (handler, tools)
}

/// Run stdio MCP server when `MODE=stdio`.
/// This uses rmcp io transport to speak JSON-RPC over stdin/stdout.
/// An interrupt signal closes the session and returns Ok, so the process
/// exits with code 0.
pub async fn serve_stdio(
    factory: impl FnOnce() -> (GatewaySvc, ToolRouter<GatewaySvc>),
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (handler, tools) = factory();
    let service = Router::new(handler).with_tools(tools);
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let running = serve_server(service, (stdin, stdout)).await?;
    wait_or_interrupt(running.waiting(), async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;
    Ok(())
}

/// Drive the session to completion unless interrupted first; dropping the
/// session future closes the transport.
async fn wait_or_interrupt<T, E>(
    waiting: impl Future<Output = Result<T, E>>,
    interrupt: impl Future<Output = ()>,
) -> Result<(), E> {
    tokio::select! {
        res = waiting => {
            let _ = res?;
        }
        _ = interrupt => {
            tracing::info!("interrupt received, closing transport");
        }
    }
    Ok(())
}

pub type GatewayRouter = Router<GatewaySvc>;

pub fn make_streamable_http_service(
    factory: impl Fn() -> (GatewaySvc, ToolRouter<GatewaySvc>) + Send + Sync + Clone + 'static,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<GatewayRouter, LocalSessionManager> {
    let cfg = StreamableHttpServerConfig::default();
    let service_factory = move || {
        let (handler, tools) = factory();
        let service = Router::new(handler).with_tools(tools);
        Ok(service)
    };
    StreamableHttpService::new(service_factory, session_mgr, cfg)
}
