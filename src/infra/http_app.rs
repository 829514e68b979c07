use std::sync::Arc;

use axum::{
    routing::{any_service, get, post},
    Router,
};

use crate::clients::perspective::PerspectiveRemote;
use crate::domain::CommentAnalyzer;
use crate::infra::mcp;
use crate::tools::registry::Registry;

/// HTTP app: `/healthz`, streamable MCP at `/mcp`, JSON-RPC shim at `/rpc`.
pub fn build_app(client: PerspectiveRemote, registry: Registry) -> Router {
    let session_mgr = Arc::new(mcp::LocalSessionManager::default());
    let factory = move || {
        let analyzer: Arc<dyn CommentAnalyzer> = Arc::new(client.clone());
        mcp::factory_with_analyzer(analyzer)
    };
    let mcp_service = mcp::make_streamable_http_service(factory, session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
        .route("/rpc", post(crate::api::mcp::http))
        .with_state(registry)
}
