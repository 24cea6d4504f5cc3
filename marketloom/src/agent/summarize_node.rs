//! The `"summarize"` graph node.
//!
//! Synthesizes the research transcript into a short final verdict. Only
//! assistant and tool content feeds the synthesis. If the model call fails,
//! the best candidate answer already in state stands.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::summary_prompt;
use crate::state::{ActivityType, ExecutionEvent, RunState, StateUpdate};

pub struct SummarizeNode {
    llm: Arc<dyn LlmClient>,
}

impl SummarizeNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Gathers the non-empty assistant and tool content to summarize.
    fn synthesis_input(state: &RunState) -> Vec<Message> {
        let mut input = vec![Message::system(summary_prompt())];
        for msg in &state.messages {
            match msg {
                Message::Assistant { content, .. } | Message::Tool { content, .. }
                    if !content.is_empty() =>
                {
                    input.push(Message::assistant(content.clone()));
                }
                _ => {}
            }
        }
        input
    }
}

#[async_trait]
impl Node<RunState> for SummarizeNode {
    fn id(&self) -> &str {
        "summarize"
    }

    async fn run(&self, state: &RunState) -> Result<StateUpdate, AgentError> {
        let input = Self::synthesis_input(state);
        match self.llm.invoke(&input, &[]).await {
            Ok(response) if !response.content.is_empty() => Ok(StateUpdate {
                execution_log: vec![ExecutionEvent::success("summarize", ActivityType::Ai)],
                final_output: Some(response.content),
                ..Default::default()
            }),
            Ok(_) => Ok(StateUpdate::with_event(ExecutionEvent::failure(
                "summarize",
                ActivityType::Ai,
                "empty summary, keeping candidate output",
            ))),
            Err(e) => {
                warn!(error = %e, "summarize invoke failed, keeping candidate output");
                Ok(StateUpdate::with_event(ExecutionEvent::failure(
                    "summarize",
                    ActivityType::Ai,
                    e.to_string(),
                )))
            }
        }
    }
}
