//! Stock-news research workflow.
//!
//! Graph: `agent` reasons with `web_search` and `reach_conclusion` bound,
//! `tools` dispatches, and `summarize` synthesizes the final verdict. The
//! workflow terminates on the first plain answer, an explicit conclusion, or
//! the loop ceiling; every path runs through `summarize` before END.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::reason_node::ReasonNode;
use crate::agent::routing::{call_tool_condition, tool_return_condition};
use crate::agent::summarize_node::SummarizeNode;
use crate::agent::RunError;
use crate::config::WorkflowConfig;
use crate::graph::{CompiledStateGraph, StateGraph, END, START};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::message::Message;
use crate::prompts::RESEARCH_INSTRUCTIONS;
use crate::state::{ExecutionEvent, RunState};
use crate::tools::{
    ConclusionTool, HttpSearchProvider, ToolDispatchNode, ToolRegistry, WebSearchTool,
};

/// Result of one research run.
#[derive(Debug)]
pub struct ResearchOutcome {
    /// The synthesized verdict (or best candidate answer on a degraded run).
    pub final_output: String,
    pub execution_log: Vec<ExecutionEvent>,
    /// Source URLs gathered by the search tool, in discovery order.
    pub urls: Vec<String>,
}

/// Owns the compiled research graph; reusable across runs.
pub struct ResearchRunner {
    graph: CompiledStateGraph<RunState>,
}

impl ResearchRunner {
    /// Builds the research graph over the given model and tool registry.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        registry: Arc<ToolRegistry>,
        config: &WorkflowConfig,
    ) -> Result<Self, RunError> {
        let ceiling = config.loop_ceiling;
        let graph = StateGraph::new()
            .add_node(Arc::new(ReasonNode::new(llm.clone(), registry.clone())))
            .add_node(Arc::new(ToolDispatchNode::new(registry, config.tool_timeout)))
            .add_node(Arc::new(SummarizeNode::new(llm)))
            .add_edge(START, "agent")
            .add_conditional_edges(
                "agent",
                Arc::new(move |s: &RunState| call_tool_condition(s, ceiling)),
                Some(HashMap::from([
                    ("tools".to_string(), "tools".to_string()),
                    // A plain answer is the verdict; synthesize and stop.
                    ("agent".to_string(), "summarize".to_string()),
                    ("end".to_string(), "summarize".to_string()),
                ])),
            )
            .add_conditional_edges(
                "tools",
                Arc::new(move |s: &RunState| tool_return_condition(s, ceiling)),
                Some(HashMap::from([
                    ("agent".to_string(), "agent".to_string()),
                    ("end".to_string(), "summarize".to_string()),
                ])),
            )
            .add_edge("summarize", END)
            .compile()?;
        Ok(Self { graph })
    }

    /// Researches one stock code and returns the verdict.
    pub async fn run(&self, subject: impl Into<String>) -> Result<ResearchOutcome, RunError> {
        let subject = subject.into();
        let seed = RunState::seeded(
            subject.clone(),
            vec![
                Message::system(RESEARCH_INSTRUCTIONS),
                Message::user(format!(
                    "Research the latest news for this stock code: {}",
                    subject
                )),
            ],
        );
        let state = self.graph.invoke(seed).await?;
        Ok(ResearchOutcome {
            final_output: state.final_output,
            execution_log: state.execution_log,
            urls: state.urls,
        })
    }
}

/// Runs the research workflow with the live model and search provider.
pub async fn run_research_workflow(
    subject: impl Into<String>,
    config: &WorkflowConfig,
) -> Result<ResearchOutcome, RunError> {
    let registry = Arc::new(
        ToolRegistry::new()
            .register(Arc::new(WebSearchTool::new(Arc::new(
                HttpSearchProvider::new(),
            ))))
            .register(Arc::new(ConclusionTool)),
    );
    let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::new(config.llm.clone()));
    let runner = ResearchRunner::new(llm, registry, config)?;
    runner.run(subject).await
}
