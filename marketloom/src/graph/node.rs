use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::GraphState;

/// A unit of work in the graph.
///
/// A node reads the current state and returns the partial update it wants
/// applied. It never mutates the state itself.
#[async_trait]
pub trait Node<S: GraphState>: Send + Sync {
    /// Stable identifier used for edges and routing.
    fn id(&self) -> &str;

    /// Runs the node against a read-only view of the state.
    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}
