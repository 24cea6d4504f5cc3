//! Marketloom: stock research and portfolio chat agents as state graphs.
//!
//! The crate is built around a small step-graph executor: nodes read a shared
//! run state and return partial updates, conditional routers pick the next
//! node, and the run ends at the END sentinel. On top of it sit two
//! workflows:
//!
//! - [`agent::run_research_workflow`] researches recent news for a stock code
//!   and synthesizes a short verdict with source URLs.
//! - [`agent::run_chat_workflow`] answers portfolio questions, threading a
//!   conversation across turns.
//!
//! Tools (web search, recent prices, the conclusion signal) are dispatched
//! through a registry with per-call timeouts; tool and model failures degrade
//! into the conversation instead of aborting the run.

pub mod agent;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod state;
pub mod tools;

pub use agent::{
    run_chat_workflow, run_research_workflow, ChatOutcome, ChatRunner, ResearchOutcome,
    ResearchRunner, RunError,
};
pub use config::{LlmConfig, WorkflowConfig};
pub use error::AgentError;
pub use message::{Message, ToolCall};
pub use state::{ActivityType, ExecutionEvent, RunState, StateUpdate};
