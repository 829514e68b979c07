use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{AnalyzeRequest, CommentAnalyzer, Tool, ToolError};

#[derive(Clone)]
pub struct AnalyzeTool {
    analyzer: Arc<dyn CommentAnalyzer>,
}

impl AnalyzeTool {
    pub fn new(analyzer: Arc<dyn CommentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl Tool for AnalyzeTool {
    fn name(&self) -> &'static str {
        "analyze_text"
    }
    fn description(&self) -> &'static str {
        "Analyze a text with the Perspective API and return attribute scores such as TOXICITY"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to analyze"
                },
                "attributes": {
                    "type": "array",
                    "description": "Attributes to score (e.g. TOXICITY, SEVERE_TOXICITY, IDENTITY_ATTACK, INSULT, PROFANITY, THREAT)",
                    "items": { "type": "string" }
                },
                "languages": {
                    "type": "array",
                    "description": "Languages of the text (e.g. en, ja). Auto-detected when omitted.",
                    "items": { "type": "string" }
                }
            },
            "required": ["text"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let req = AnalyzeRequest::from_args(arguments)?;
        let payload = self
            .analyzer
            .analyze(&req)
            .await
            .map_err(|e| ToolError::Upstream(format!("Perspective API error: {e}")))?;
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| ToolError::Upstream(e.to_string()))?;
        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }
}
