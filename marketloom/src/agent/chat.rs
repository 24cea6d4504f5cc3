//! Portfolio chat workflow.
//!
//! Graph: `agent` reasons with `web_search` and `get_recent_prices` bound,
//! `tools` dispatches. The workflow ends on the first plain answer; callers
//! can thread a conversation by passing the prior messages back in.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::reason_node::ReasonNode;
use crate::agent::routing::{call_tool_condition, tool_return_condition};
use crate::agent::RunError;
use crate::config::WorkflowConfig;
use crate::graph::{CompiledStateGraph, StateGraph, END, START};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::message::Message;
use crate::prompts::CHAT_INSTRUCTIONS;
use crate::state::{ExecutionEvent, RunState};
use crate::tools::{
    HttpPriceProvider, HttpSearchProvider, PricesTool, ToolDispatchNode, ToolRegistry,
    WebSearchTool,
};

/// Result of one chat turn.
#[derive(Debug)]
pub struct ChatOutcome {
    /// The assistant's answer to this turn.
    pub final_output: String,
    /// Full conversation including this turn, for threading the next one.
    pub messages: Vec<Message>,
    pub execution_log: Vec<ExecutionEvent>,
}

/// Owns the compiled chat graph; reusable across turns.
pub struct ChatRunner {
    graph: CompiledStateGraph<RunState>,
}

impl ChatRunner {
    /// Builds the chat graph over the given model and tool registry.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        registry: Arc<ToolRegistry>,
        config: &WorkflowConfig,
    ) -> Result<Self, RunError> {
        let ceiling = config.loop_ceiling;
        let graph = StateGraph::new()
            .add_node(Arc::new(ReasonNode::new(llm.clone(), registry.clone())))
            .add_node(Arc::new(ToolDispatchNode::new(registry, config.tool_timeout)))
            .add_edge(START, "agent")
            .add_conditional_edges(
                "agent",
                Arc::new(move |s: &RunState| call_tool_condition(s, ceiling)),
                Some(HashMap::from([
                    ("tools".to_string(), "tools".to_string()),
                    // A plain answer is the reply; no synthesis step.
                    ("agent".to_string(), END.to_string()),
                    ("end".to_string(), END.to_string()),
                ])),
            )
            .add_conditional_edges(
                "tools",
                Arc::new(move |s: &RunState| tool_return_condition(s, ceiling)),
                Some(HashMap::from([
                    ("agent".to_string(), "agent".to_string()),
                    ("end".to_string(), END.to_string()),
                ])),
            )
            .compile()?;
        Ok(Self { graph })
    }

    /// Answers one question. `prior_messages` threads an existing
    /// conversation; when empty a fresh one is seeded with the system
    /// instructions.
    pub async fn run(
        &self,
        question: impl Into<String>,
        prior_messages: Vec<Message>,
    ) -> Result<ChatOutcome, RunError> {
        let question = question.into();
        let mut messages = if prior_messages.is_empty() {
            vec![Message::system(CHAT_INSTRUCTIONS)]
        } else {
            prior_messages
        };
        messages.push(Message::user(question.clone()));

        let seed = RunState::seeded(question, messages);
        let state = self.graph.invoke(seed).await?;
        Ok(ChatOutcome {
            final_output: state.final_output,
            messages: state.messages,
            execution_log: state.execution_log,
        })
    }
}

/// Runs one chat turn with the live model and providers.
pub async fn run_chat_workflow(
    question: impl Into<String>,
    prior_messages: Vec<Message>,
    config: &WorkflowConfig,
) -> Result<ChatOutcome, RunError> {
    let registry = Arc::new(
        ToolRegistry::new()
            .register(Arc::new(WebSearchTool::new(Arc::new(
                HttpSearchProvider::new(),
            ))))
            .register(Arc::new(PricesTool::new(Arc::new(HttpPriceProvider::new())))),
    );
    let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::new(config.llm.clone()));
    let runner = ChatRunner::new(llm, registry, config)?;
    runner.run(question, prior_messages).await
}
