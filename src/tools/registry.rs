use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{CommentAnalyzer, Tool};

use super::analyze::AnalyzeTool;
use super::suggest::SuggestTool;

/// Static tool catalog, built once at startup.
#[derive(Clone)]
pub struct Registry(pub Arc<HashMap<&'static str, Arc<dyn Tool>>>);

impl Registry {
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.0.get(name)
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.0
            .values()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

pub fn build_registry(analyzer: Arc<dyn CommentAnalyzer>) -> Registry {
    let mut map: HashMap<&'static str, Arc<dyn Tool>> = HashMap::new();
    let analyze: Arc<dyn Tool> = Arc::new(AnalyzeTool::new(analyzer.clone()));
    let suggest: Arc<dyn Tool> = Arc::new(SuggestTool::new(analyzer));
    map.insert(analyze.name(), analyze);
    map.insert(suggest.name(), suggest);
    Registry(Arc::new(map))
}
