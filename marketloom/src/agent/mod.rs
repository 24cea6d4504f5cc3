//! Workflow nodes, routing, and entry points.

mod chat;
mod reason_node;
mod research;
pub mod routing;
mod summarize_node;

pub use chat::{run_chat_workflow, ChatOutcome, ChatRunner};
pub use reason_node::ReasonNode;
pub use research::{run_research_workflow, ResearchOutcome, ResearchRunner};
pub use summarize_node::SummarizeNode;

use thiserror::Error;

use crate::error::AgentError;
use crate::graph::CompilationError;

/// Workflow-level failure: either the graph would not build or a run died on
/// a programming defect.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("graph compilation failed: {0}")]
    Compilation(#[from] CompilationError),

    #[error("agent execution failed: {0}")]
    Execution(#[from] AgentError),
}
