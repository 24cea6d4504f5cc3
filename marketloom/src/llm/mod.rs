//! LLM provider seam.
//!
//! [`LlmClient`] is the trait graph nodes talk to; [`ChatOpenAI`] is the real
//! provider, [`MockLlm`] the scripted one for tests and offline demos.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// One model reply: assistant text plus any tool calls it requested.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl LlmResponse {
    /// A plain text reply with no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
        }
    }
}

/// Chat-model client.
///
/// `tools` are the schemas to bind for this call; an empty slice means the
/// model cannot request tool calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError>;
}
