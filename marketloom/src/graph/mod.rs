//! State-graph builder and executor.
//!
//! A graph is built with [`StateGraph`], validated by `compile()`, and run
//! with [`CompiledStateGraph::invoke`]. Nodes produce partial updates; the
//! executor owns the only mutable state and folds each update in before
//! resolving the next node.

mod compile_error;
mod compiled;
mod conditional;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn};
pub use node::Node;
pub use state_graph::{StateGraph, END, START};

/// Couples a state type to the partial-update type its nodes produce.
pub trait GraphState: Send + Sync {
    /// Partial update produced by nodes running over this state.
    type Update: Send;

    /// Folds `update` into the state, honoring per-field merge semantics.
    fn apply(&mut self, update: Self::Update);
}
