//! The `"agent"` graph node.
//!
//! Invokes the chat model over the full message history with the registry's
//! tool schemas bound. A failed or timed-out invoke is recovered with a fixed
//! apology reply so the run still terminates with a usable answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::{ActivityType, ExecutionEvent, RunState, StateUpdate};
use crate::tools::ToolRegistry;

const APOLOGY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

pub struct ReasonNode {
    llm: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
}

impl ReasonNode {
    pub fn new(llm: Arc<dyn LlmClient>, registry: Arc<ToolRegistry>) -> Self {
        Self { llm, registry }
    }

    /// Builds the update for one reasoning step from the model's reply (or
    /// the recovery reply when the invoke failed).
    fn apply_response(state: &RunState, response: LlmResponse, status: String) -> StateUpdate {
        let activity_type = if response.tool_calls.is_empty() {
            ActivityType::Ai
        } else {
            ActivityType::ToolCall
        };
        // A non-empty reply is always the current best candidate answer.
        let final_output = (!response.content.is_empty()).then(|| response.content.clone());

        StateUpdate {
            messages: vec![Message::assistant_with_tool_calls(
                response.content,
                response.tool_calls,
            )],
            execution_log: vec![ExecutionEvent {
                activity: "agent".to_string(),
                activity_type,
                status,
            }],
            loop_count: Some(state.loop_count + 1),
            final_output,
            ..Default::default()
        }
    }
}

#[async_trait]
impl Node<RunState> for ReasonNode {
    fn id(&self) -> &str {
        "agent"
    }

    async fn run(&self, state: &RunState) -> Result<StateUpdate, AgentError> {
        let specs = self.registry.specs();
        match self.llm.invoke(&state.messages, &specs).await {
            Ok(response) => Ok(Self::apply_response(state, response, "success".to_string())),
            Err(e) => {
                warn!(error = %e, "model invoke failed, substituting apology reply");
                Ok(Self::apply_response(
                    state,
                    LlmResponse::text(APOLOGY),
                    e.to_string(),
                ))
            }
        }
    }
}
