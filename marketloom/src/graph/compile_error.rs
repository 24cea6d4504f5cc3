use thiserror::Error;

/// Graph construction error reported by `StateGraph::compile`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// An edge or router references a node id that was never added.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves the START sentinel.
    #[error("no entry edge from START")]
    MissingStart,

    /// No path from any node reaches the END sentinel.
    #[error("no edge reaches END")]
    MissingEnd,

    /// A node has both an unconditional edge and conditional edges.
    #[error("node has both unconditional and conditional edges: {0}")]
    ConflictingEdges(String),

    /// A conditional path map targets a node id that does not exist.
    #[error("path map target not found: {0}")]
    InvalidPathTarget(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: each variant's Display names the problem and, where one
    /// exists, the offending node id.
    #[test]
    fn display_messages() {
        assert_eq!(
            CompilationError::NodeNotFound("agent".into()).to_string(),
            "node not found: agent"
        );
        assert_eq!(
            CompilationError::MissingStart.to_string(),
            "no entry edge from START"
        );
        assert_eq!(CompilationError::MissingEnd.to_string(), "no edge reaches END");
        assert_eq!(
            CompilationError::ConflictingEdges("tools".into()).to_string(),
            "node has both unconditional and conditional edges: tools"
        );
        assert_eq!(
            CompilationError::InvalidPathTarget("summarise".into()).to_string(),
            "path map target not found: summarise"
        );
    }
}
