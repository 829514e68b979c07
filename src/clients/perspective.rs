use std::time::Instant;

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};

use crate::domain::{AnalyzeRequest, CommentAnalyzer, SuggestRequest};
use crate::infra::config::Config;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::make_http_client;

pub const DEFAULT_API_BASE: &str = "https://commentanalyzer.googleapis.com/v1alpha1";

/// Remote client for the Perspective comment-analysis API.
///
/// One outbound POST per call, no retries. The key travels as a query
/// parameter per the upstream API contract; endpoints are logged without it.
#[derive(Clone)]
pub struct PerspectiveRemote {
    base: String,
    key: String,
    http: Client,
}

impl PerspectiveRemote {
    pub fn new(base: impl Into<String>, key: impl Into<String>) -> Self {
        let http = make_http_client();
        Self { base: base.into(), key: key.into(), http }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.api_base.clone(), cfg.api_key.clone())
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/comments:{}", self.base.trim_end_matches('/'), method)
    }

    async fn post_json(&self, method: &str, body: &impl Serialize) -> Result<JsonValue, String> {
        let url = self.endpoint(method);
        tracing::debug!(endpoint = %url, "perspective request");
        let req_id = generate_request_id();
        let start = Instant::now();

        let (builder, _rid) = add_standard_headers(
            self.http.post(&url).query(&[("key", self.key.as_str())]),
            Some(req_id),
        );
        let res = async {
            let resp = builder.json(body).send().await.map_err(|e| e.to_string())?;
            if !resp.status().is_success() {
                return Err(format!("upstream status {}", resp.status()));
            }
            resp.json::<JsonValue>().await.map_err(|e| e.to_string())
        }
        .await;

        let metric_name = format!("perspective.{method}");
        if res.is_err() {
            crate::infra::logging::log_metric(&metric_name, "remote_error_total", 1.0);
        }
        let elapsed_ms = start.elapsed().as_millis() as f64;
        crate::infra::logging::log_metric(&metric_name, "remote_latency_ms", elapsed_ms);
        res
    }
}

#[async_trait::async_trait]
impl CommentAnalyzer for PerspectiveRemote {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<JsonValue, String> {
        self.post_json("analyze", &AnalyzeWire::from(req)).await
    }

    async fn suggest_score(&self, req: &SuggestRequest) -> Result<JsonValue, String> {
        self.post_json("suggestscore", &SuggestWire::from(req)).await
    }
}

#[derive(Serialize)]
struct CommentWire<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeWire<'a> {
    comment: CommentWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    languages: Option<&'a [String]>,
    requested_attributes: Map<String, JsonValue>,
}

impl<'a> From<&'a AnalyzeRequest> for AnalyzeWire<'a> {
    fn from(req: &'a AnalyzeRequest) -> Self {
        let mut requested_attributes = Map::new();
        for attr in &req.attributes {
            requested_attributes.insert(attr.clone(), json!({}));
        }
        Self {
            comment: CommentWire { text: &req.text },
            languages: req.languages.as_deref(),
            requested_attributes,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestWire<'a> {
    comment: CommentWire<'a>,
    attribute_scores: Map<String, JsonValue>,
}

impl<'a> From<&'a SuggestRequest> for SuggestWire<'a> {
    fn from(req: &'a SuggestRequest) -> Self {
        let mut attribute_scores = Map::new();
        attribute_scores.insert(
            req.attribute.clone(),
            json!({ "summaryScore": { "value": req.suggested_score, "type": "PROBABILITY" } }),
        );
        Self { comment: CommentWire { text: &req.text }, attribute_scores }
    }
}
