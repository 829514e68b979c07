use axum::Json;

use crate::core::mcp::{err as rpc_err, ok as rpc_ok, RpcErr, RpcResp, INTERNAL_ERROR, INVALID_PARAMS};
use crate::domain::ToolError;

pub fn ok(id: serde_json::Value, result: serde_json::Value) -> Json<RpcResp> {
    Json(rpc_ok(id, result))
}

pub fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Json<RpcResp> {
    Json(rpc_err(id, code, message, None))
}

pub fn parse_error(message: impl Into<String>) -> Json<RpcResp> {
    Json(RpcResp {
        jsonrpc: "2.0",
        id: serde_json::Value::Null,
        result: None,
        error: Some(RpcErr {
            code: -32700,
            message: message.into(),
            data: None,
        }),
    })
}

/// Map a ToolError onto the JSON-RPC error taxonomy: bad arguments are
/// invalid-params, anything from the remote call is an internal error.
pub fn from_tool_error(id: serde_json::Value, err: ToolError) -> Json<RpcResp> {
    let code = match err {
        ToolError::InvalidArguments(_) => INVALID_PARAMS,
        ToolError::Upstream(_) => INTERNAL_ERROR,
    };
    error(id, code, err.to_string())
}
