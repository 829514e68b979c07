use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Attribute scored when the caller does not ask for anything specific.
pub const DEFAULT_ATTRIBUTE: &str = "TOXICITY";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Upstream(String),
}

/// Typed form of `analyze_text` arguments.
///
/// `attributes` defaults to TOXICITY; `languages: None` means auto-detect.
/// Attribute names are passed through unvalidated, the remote API rejects
/// unknown ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeRequest {
    pub text: String,
    pub attributes: Vec<String>,
    pub languages: Option<Vec<String>>,
}

impl AnalyzeRequest {
    pub fn from_args(args: &JsonValue) -> Result<Self, ToolError> {
        let text = require_str(args, "text")?;
        let attributes = match args.get("attributes") {
            None | Some(JsonValue::Null) => vec![DEFAULT_ATTRIBUTE.to_string()],
            Some(v) => string_array(v, "attributes")?,
        };
        let languages = match args.get("languages") {
            None | Some(JsonValue::Null) => None,
            Some(v) => Some(string_array(v, "languages")?),
        };
        Ok(Self { text, attributes, languages })
    }
}

/// Typed form of `suggest_score` arguments.
///
/// `suggested_score` is documented as [0,1] but not bound-checked here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestRequest {
    pub text: String,
    pub attribute: String,
    pub suggested_score: f64,
}

impl SuggestRequest {
    pub fn from_args(args: &JsonValue) -> Result<Self, ToolError> {
        let text = require_str(args, "text")?;
        let attribute = require_str(args, "attribute")?;
        let suggested_score = args
            .get("suggestedScore")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| {
                ToolError::InvalidArguments("missing required field: suggestedScore".into())
            })?;
        Ok(Self { text, attribute, suggested_score })
    }
}

fn require_str(args: &JsonValue, field: &str) -> Result<String, ToolError> {
    args.get(field)
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing required field: {field}")))
}

fn string_array(v: &JsonValue, field: &str) -> Result<Vec<String>, ToolError> {
    let arr = v
        .as_array()
        .ok_or_else(|| ToolError::InvalidArguments(format!("{field} must be an array of strings")))?;
    arr.iter()
        .map(|e| {
            e.as_str()
                .map(str::to_owned)
                .ok_or_else(|| ToolError::InvalidArguments(format!("{field} must be an array of strings")))
        })
        .collect()
}

/// Seam over the remote comment-analysis API so the MCP layer and the
/// registry tools can be exercised against a stub.
#[async_trait::async_trait]
pub trait CommentAnalyzer: Send + Sync + 'static {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<JsonValue, String>;
    async fn suggest_score(&self, req: &SuggestRequest) -> Result<JsonValue, String>;
}

/// Tool contract served by the registry and the JSON-RPC shim.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analyze_defaults_attributes_to_toxicity() {
        let req = AnalyzeRequest::from_args(&json!({"text": "hello"})).unwrap();
        assert_eq!(req.text, "hello");
        assert_eq!(req.attributes, vec!["TOXICITY"]);
        assert!(req.languages.is_none());
    }

    #[test]
    fn analyze_keeps_explicit_attributes_and_languages() {
        let req = AnalyzeRequest::from_args(&json!({
            "text": "hello",
            "attributes": ["INSULT", "THREAT"],
            "languages": ["en", "ja"]
        }))
        .unwrap();
        assert_eq!(req.attributes, vec!["INSULT", "THREAT"]);
        assert_eq!(req.languages.as_deref(), Some(&["en".to_string(), "ja".to_string()][..]));
    }

    #[test]
    fn analyze_missing_text_is_invalid_arguments() {
        let err = AnalyzeRequest::from_args(&json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn analyze_rejects_non_string_attributes() {
        let err = AnalyzeRequest::from_args(&json!({"text": "x", "attributes": [1]})).unwrap_err();
        assert!(err.to_string().contains("attributes"));
    }

    #[test]
    fn suggest_parses_all_fields() {
        let req = SuggestRequest::from_args(&json!({
            "text": "x",
            "attribute": "TOXICITY",
            "suggestedScore": 0.5
        }))
        .unwrap();
        assert_eq!(req.attribute, "TOXICITY");
        assert_eq!(req.suggested_score, 0.5);
    }

    #[test]
    fn suggest_missing_score_is_invalid_arguments() {
        let err =
            SuggestRequest::from_args(&json!({"text": "x", "attribute": "TOXICITY"})).unwrap_err();
        assert!(err.to_string().contains("suggestedScore"));
    }

    #[test]
    fn suggest_score_is_not_bound_checked_locally() {
        // Out-of-range values go through; the remote API is the authority.
        let req = SuggestRequest::from_args(&json!({
            "text": "x",
            "attribute": "TOXICITY",
            "suggestedScore": 1.5
        }))
        .unwrap();
        assert_eq!(req.suggested_score, 1.5);
    }
}
