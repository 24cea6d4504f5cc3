use std::collections::HashMap;
use std::sync::Arc;

use crate::tools::{Tool, ToolSpec};

/// Name-keyed tool collection shared by the reasoning and dispatch nodes.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name, replacing any previous entry.
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Schemas for LLM binding, sorted by name for a stable request shape.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|t| t.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolContext, ToolError, ToolOutcome};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct Named(&'static str);

    #[async_trait]
    impl Tool for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: self.0.to_string(),
                description: None,
                input_schema: json!({"type": "object"}),
            }
        }
        async fn call(&self, _args: Value, _ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
            Ok(ToolOutcome::response("ok"))
        }
    }

    /// **Scenario**: lookup resolves registered names and misses unknown ones;
    /// specs come out sorted by name.
    #[test]
    fn register_lookup_and_specs() {
        let registry = ToolRegistry::new()
            .register(Arc::new(Named("web_search")))
            .register(Arc::new(Named("get_recent_prices")));
        assert!(registry.get("web_search").is_some());
        assert!(registry.get("nope").is_none());
        let names: Vec<_> = registry.specs().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["get_recent_prices", "web_search"]);
    }
}
