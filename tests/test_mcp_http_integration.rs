use std::sync::Arc;

use axum::{routing::any_service, Router};
use http_body_util::BodyExt; // for .collect
use hyper::{header, Request, StatusCode};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tower::ServiceExt; // for .oneshot

use perspective_mcp_gateway::clients::perspective::PerspectiveRemote;
use perspective_mcp_gateway::domain::CommentAnalyzer;
use perspective_mcp_gateway::infra::mcp;

#[tokio::test]
async fn initialize_list_and_call_over_streamable_http() {
    // Mock the Perspective backend the tool will hit.
    let server = httpmock::MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/comments:analyze")
            .json_body(json!({
                "comment": { "text": "hello" },
                "requestedAttributes": { "TOXICITY": {} }
            }));
        then.status(200).json_body(json!({
            "attributeScores": {
                "TOXICITY": { "summaryScore": { "value": 0.02, "type": "PROBABILITY" } }
            }
        }));
    });

    let factory = {
        let base = server.base_url();
        move || {
            let analyzer: Arc<dyn CommentAnalyzer> =
                Arc::new(PerspectiveRemote::new(base.clone(), "test-key"));
            mcp::factory_with_analyzer(analyzer)
        }
    };

    let session_mgr = Arc::new(mcp::LocalSessionManager::default());
    let app = mcp::make_streamable_http_service(factory, session_mgr);
    let app = Router::new().route_service("/mcp", any_service(app));

    // Initialize
    let init = json!({
        "jsonrpc":"2.0","id":1,"method":"initialize",
        "params":{ "protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"0.1"} }
    });
    let init_req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(init.to_string()))
        .unwrap();
    let init_res = app.clone().oneshot(init_req).await.unwrap();
    assert!(init_res.status().is_success());
    let session_id = init_res
        .headers()
        .get("MCP-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    // notifications/initialized
    let initialized_notif =
        json!({"jsonrpc":"2.0","method":"notifications/initialized","params":{}});
    let initialized_req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json")
        .header("MCP-Session-Id", session_id.clone())
        .body(axum::body::Body::from(initialized_notif.to_string()))
        .unwrap();
    let initialized_res = app.clone().oneshot(initialized_req).await.unwrap();
    assert_eq!(initialized_res.status(), StatusCode::ACCEPTED);

    // tools/list
    let list = json!({"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}});
    let list_req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json")
        .header("MCP-Session-Id", session_id.clone())
        .body(axum::body::Body::from(list.to_string()))
        .unwrap();
    let list_res = timeout(Duration::from_secs(20), app.clone().oneshot(list_req))
        .await
        .unwrap()
        .unwrap();
    assert!(list_res.status().is_success());
    let bytes = list_res.into_body().collect().await.unwrap().to_bytes();
    let s = String::from_utf8_lossy(&bytes);
    let v = sse_rpc_response(&s).expect("no rpc response for tools/list");
    let tools = v["result"]["tools"].as_array().expect("tools array");
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(names.contains(&"analyze_text"), "got: {names:?}");
    assert!(names.contains(&"suggest_score"), "got: {names:?}");

    // tools/call
    let call = json!({
        "jsonrpc":"2.0","id":3,"method":"tools/call",
        "params": {"name":"analyze_text","arguments":{"text":"hello"}}
    });
    let call_req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json")
        .header("MCP-Session-Id", session_id.clone())
        .body(axum::body::Body::from(call.to_string()))
        .unwrap();
    let call_res = app.clone().oneshot(call_req).await.unwrap();
    assert!(call_res.status().is_success());
    let bytes = call_res.into_body().collect().await.unwrap().to_bytes();
    let s = String::from_utf8_lossy(&bytes);
    let v = sse_rpc_response(&s).expect("no rpc response for tools/call");
    let text = v["result"]["content"][0]["text"]
        .as_str()
        .expect("text content block");
    assert!(text.contains("attributeScores"));
    assert!(text.contains("TOXICITY"));
}

fn sse_rpc_response(body: &str) -> Option<Value> {
    body.lines()
        .find_map(|line| line.strip_prefix("data: ").map(|d| d.to_string()))
        .and_then(|d| serde_json::from_str::<Value>(&d).ok())
}
