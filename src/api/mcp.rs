use axum::Json;
use serde_json::{json, Value as J};

use crate::core::mcp::{RpcReq, RpcResp, METHOD_NOT_FOUND};
use crate::domain::ToolError;
use crate::infra::http::json as http_json;
use crate::tools::registry::Registry;

fn tools_list(reg: &Registry) -> J {
    let tools: Vec<J> = reg
        .list()
        .into_iter()
        .map(|t| {
            json!({ "name": t.name, "description": t.description, "inputSchema": t.input_schema })
        })
        .collect();
    json!({ "tools": tools })
}

enum CallError {
    UnknownTool(String),
    Tool(ToolError),
    BadParams(String),
}

async fn call_tool(reg: &Registry, params: &J) -> Result<J, CallError> {
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CallError::BadParams("missing tool name".into()))?;
    let tool = reg
        .get(name)
        .ok_or_else(|| CallError::UnknownTool(name.to_owned()))?;
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    tool.call(&args).await.map_err(CallError::Tool)
}

// HTTP handler for the plain JSON-RPC shim at /rpc.
pub async fn http(
    axum::extract::State(reg): axum::extract::State<Registry>,
    body: String,
) -> Json<RpcResp> {
    let req: RpcReq = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return http_json::parse_error(format!("parse error: {e}")),
    };
    tracing::debug!(method = %req.method, id = ?req.id, "rpc handler invoked");
    let id = req.id.clone();
    match req.method.as_str() {
        "initialize" => http_json::ok(
            id,
            json!({
                "serverInfo": { "name": "perspective-mcp-gateway", "version": env!("CARGO_PKG_VERSION") },
                "capabilities": { "tools": {} }
            }),
        ),
        "shutdown" => http_json::ok(id, J::Null),
        "tools.list" | "tools/list" => http_json::ok(id, tools_list(&reg)),
        "tools.call" | "tools/call" => match call_tool(&reg, &req.params).await {
            Ok(out) => http_json::ok(id, out),
            Err(CallError::UnknownTool(name)) => {
                http_json::error(id, METHOD_NOT_FOUND, format!("Unknown tool: {name}"))
            }
            Err(CallError::BadParams(msg)) => {
                http_json::from_tool_error(id, ToolError::InvalidArguments(msg))
            }
            Err(CallError::Tool(e)) => {
                tracing::warn!(error = %e, "tools.call failed");
                http_json::from_tool_error(id, e)
            }
        },
        other => http_json::error(id, METHOD_NOT_FOUND, format!("unknown method: {other}")),
    }
}
