use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{CommentAnalyzer, SuggestRequest, Tool, ToolError};

#[derive(Clone)]
pub struct SuggestTool {
    analyzer: Arc<dyn CommentAnalyzer>,
}

impl SuggestTool {
    pub fn new(analyzer: Arc<dyn CommentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl Tool for SuggestTool {
    fn name(&self) -> &'static str {
        "suggest_score"
    }
    fn description(&self) -> &'static str {
        "Submit a suggested score for a text/attribute pair back to the Perspective API"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text the suggestion applies to"
                },
                "attribute": {
                    "type": "string",
                    "description": "Attribute being rescored (e.g. TOXICITY)"
                },
                "suggestedScore": {
                    "type": "number",
                    "description": "Suggested score in the range 0-1",
                    "minimum": 0,
                    "maximum": 1
                }
            },
            "required": ["text", "attribute", "suggestedScore"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let req = SuggestRequest::from_args(arguments)?;
        let payload = self
            .analyzer
            .suggest_score(&req)
            .await
            .map_err(|e| ToolError::Upstream(format!("Perspective API error: {e}")))?;
        Ok(json!({
            "content": [{
                "type": "text",
                "text": format!("Score suggestion submitted: {payload}")
            }]
        }))
    }
}
