//! Workflow configuration.
//!
//! All model and runtime settings travel through explicit records. Nothing in
//! the core reads the environment; `from_env` exists for binaries that want
//! to load a `.env` file at the edge.

use std::time::Duration;

/// Chat-model settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    pub temperature: f32,
    /// Per-invoke deadline. A timed-out call is a recoverable failure.
    pub timeout: Duration,
    pub api_key: Option<String>,
    /// Override for the API base URL (e.g. an Azure or proxy endpoint).
    pub api_base: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout: Duration::from_secs(60),
            api_key: None,
            api_base: None,
        }
    }
}

/// Settings for one workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub llm: LlmConfig,
    /// Reasoning steps allowed before routing forces termination.
    pub loop_ceiling: u32,
    /// Per-tool-call deadline; a timed-out tool degrades, it does not abort.
    pub tool_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            loop_ceiling: 3,
            tool_timeout: Duration::from_secs(30),
        }
    }
}

impl WorkflowConfig {
    /// Loads `.env` (if present) and builds a config from `OPENAI_API_KEY`,
    /// `OPENAI_API_BASE` and `OPENAI_MODEL`. Intended for binaries only.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let mut config = Self::default();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            config.llm.api_base = Some(base);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.llm.model = model;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: defaults carry the documented ceiling and timeouts.
    #[test]
    fn default_config() {
        let config = WorkflowConfig::default();
        assert_eq!(config.loop_ceiling, 3);
        assert_eq!(config.tool_timeout, Duration::from_secs(30));
        assert_eq!(config.llm.timeout, Duration::from_secs(60));
        assert!(config.llm.api_key.is_none());
    }
}
