//! Tool trait, registry, and the dispatch node.
//!
//! Tools declare what context they need (state, call id) up front via
//! capability flags; the dispatcher injects only what is declared. A tool
//! returns either a plain response, which the dispatcher wraps into a
//! tool-result message, or a raw state update for tools that steer the run
//! directly.

mod conclusion;
mod dispatch;
mod headlines;
mod prices;
mod registry;
mod web_search;

pub use conclusion::ConclusionTool;
pub use dispatch::ToolDispatchNode;
pub use headlines::{canned_headlines, HeadlineSector};
pub use prices::{HttpPriceProvider, PriceBar, PriceProvider, PricesTool, StaticPriceProvider};
pub use registry::ToolRegistry;
pub use web_search::{HttpSearchProvider, SearchHit, SearchProvider, StaticSearchProvider, WebSearchTool};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::state::{RunState, StateUpdate};

/// Tool failure. Dispatch degrades these into tool-result messages; they
/// never abort the run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Network or provider failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Arguments did not match the tool's schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Schema advertised to the LLM for one tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema for the arguments object.
    pub input_schema: Value,
}

/// Context injected into a tool call, driven by the tool's capability flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolContext<'a> {
    /// Present iff the tool declares `wants_state`.
    pub state: Option<&'a RunState>,
    /// Present iff the tool declares `wants_call_id`.
    pub call_id: Option<&'a str>,
}

/// Result of one tool call.
pub enum ToolOutcome {
    /// Raw state update applied verbatim. The tool is responsible for
    /// including its own tool-result message.
    Command(StateUpdate),
    /// Text response, wrapped by the dispatcher into a tool-result message,
    /// plus any extra state the tool gathered (e.g. urls).
    Response {
        response: String,
        update: StateUpdate,
    },
}

impl ToolOutcome {
    /// A plain text response with no extra state.
    pub fn response(text: impl Into<String>) -> Self {
        Self::Response {
            response: text.into(),
            update: StateUpdate::default(),
        }
    }

    /// A text response carrying extra state.
    pub fn response_with(text: impl Into<String>, update: StateUpdate) -> Self {
        Self::Response {
            response: text.into(),
            update,
        }
    }
}

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registry and dispatch key; must match `spec().name`.
    fn name(&self) -> &str;

    /// Schema advertised to the LLM.
    fn spec(&self) -> ToolSpec;

    /// Declares that `call` needs a view of the run state.
    fn wants_state(&self) -> bool {
        false
    }

    /// Declares that `call` needs the provider-assigned call id.
    fn wants_call_id(&self) -> bool {
        false
    }

    async fn call(&self, args: Value, ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError>;
}
