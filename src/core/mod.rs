//! Protocol wire types shared by the JSON-RPC shim and tests.

pub mod mcp;
