//! Shared MCP protocol surface (lightweight shim to avoid tool coupling)

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

// --- JSON-RPC structures used by the /rpc shim and tests ---

#[derive(Deserialize, Debug)]
pub struct RpcReq {
    pub jsonrpc: String,
    pub id: J,
    pub method: String,
    #[serde(default)]
    pub params: J,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcResp {
    pub jsonrpc: &'static str,
    pub id: J,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

pub fn ok(id: J, result: J) -> RpcResp {
    RpcResp { jsonrpc: "2.0", id, result: Some(result), error: None }
}
pub fn err(id: J, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp { jsonrpc: "2.0", id, result: None, error: Some(RpcErr { code, message: msg.into(), data }) }
}
