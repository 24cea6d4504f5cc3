//! Agent execution error types.
//!
//! Used by graph nodes and the compiled graph run loop.

use thiserror::Error;

/// Agent execution error.
///
/// Returned by `Node::run` and `CompiledStateGraph::invoke` when a step fails.
/// Transient LLM and tool failures are recovered inside the nodes and never
/// surface here; these variants are reserved for programming defects.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. empty graph, step limit hit).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The run loop could not resolve a next node from the current one.
    ///
    /// Compile-time validation should make this unreachable; hitting it means
    /// the graph wiring is defective, so it raises loudly instead of stalling.
    #[error("no route resolved from node: {0}")]
    NoRouteResolved(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display format of ExecutionFailed contains "execution failed" and the message.
    #[test]
    fn agent_error_display_execution_failed() {
        let err = AgentError::ExecutionFailed("msg".to_string());
        let s = err.to_string();
        assert!(
            s.contains("execution failed"),
            "Display should contain 'execution failed': {}",
            s
        );
        assert!(s.contains("msg"), "Display should contain message: {}", s);
    }

    /// **Scenario**: Display of NoRouteResolved names the offending node.
    #[test]
    fn agent_error_display_no_route() {
        let err = AgentError::NoRouteResolved("tools".to_string());
        let s = err.to_string();
        assert!(s.contains("no route resolved"), "Display: {}", s);
        assert!(s.contains("tools"), "Display should contain node id: {}", s);
    }
}
