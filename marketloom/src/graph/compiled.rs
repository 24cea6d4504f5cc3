use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::conditional::ConditionalRouter;
use crate::graph::state_graph::END;
use crate::graph::{GraphState, Node};

/// Hard cap on node executions per invoke. Routing policies terminate well
/// below this; reaching it means the policy never routes to END.
const DEFAULT_STEP_LIMIT: usize = 64;

/// How to leave a node after it runs.
pub(crate) enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}

/// Validated, runnable graph produced by `StateGraph::compile`.
pub struct CompiledStateGraph<S: GraphState> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    entry: String,
    next: HashMap<String, NextEntry<S>>,
    step_limit: usize,
}

// Manual impl: the node map holds trait objects, so derive is unavailable.
impl<S: GraphState> fmt::Debug for CompiledStateGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        nodes.sort_unstable();
        f.debug_struct("CompiledStateGraph")
            .field("entry", &self.entry)
            .field("nodes", &nodes)
            .field("step_limit", &self.step_limit)
            .finish()
    }
}

impl<S: GraphState> CompiledStateGraph<S> {
    pub(crate) fn new(
        nodes: HashMap<String, Arc<dyn Node<S>>>,
        entry: String,
        next: HashMap<String, NextEntry<S>>,
    ) -> Self {
        Self {
            nodes,
            entry,
            next,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Overrides the defensive step limit.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    /// Runs the graph to completion over `seed` and returns the final state.
    ///
    /// One node runs at a time; its update is folded into the state before
    /// the next node is resolved. Errors only on a node failure, an
    /// unresolvable route, or the step limit.
    pub async fn invoke(&self, seed: S) -> Result<S, AgentError> {
        let mut state = seed;
        let mut current = self.entry.clone();
        let mut steps = 0usize;

        while current != END {
            steps += 1;
            if steps > self.step_limit {
                return Err(AgentError::ExecutionFailed(format!(
                    "step limit {} exceeded at node {}",
                    self.step_limit, current
                )));
            }

            // Compile validated every edge and path-map target.
            let node = self
                .nodes
                .get(&current)
                .expect("compiled graph has all nodes");
            tracing::debug!(node = %current, step = steps, "running node");
            let update = node.run(&state).await?;
            state.apply(update);

            let target = match self.next.get(&current) {
                Some(NextEntry::Unconditional(to)) => to.clone(),
                Some(NextEntry::Conditional(router)) => router.resolve_next(&state),
                None => return Err(AgentError::NoRouteResolved(current)),
            };
            tracing::debug!(from = %current, to = %target, "routing");

            if target != END && !self.nodes.contains_key(&target) {
                return Err(AgentError::NoRouteResolved(target));
            }
            current = target;
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{StateGraph, START};
    use async_trait::async_trait;

    #[derive(Debug, Default)]
    struct Trace(Vec<&'static str>);

    impl GraphState for Trace {
        type Update = Vec<&'static str>;
        fn apply(&mut self, update: Vec<&'static str>) {
            self.0.extend(update);
        }
    }

    struct Step(&'static str);

    #[async_trait]
    impl Node<Trace> for Step {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, _state: &Trace) -> Result<Vec<&'static str>, AgentError> {
            Ok(vec![self.0])
        }
    }

    /// **Scenario**: invoke visits nodes in edge order and applies every
    /// update before returning the final state.
    #[tokio::test]
    async fn invoke_runs_linear_graph() {
        let graph = StateGraph::new()
            .add_node(Arc::new(Step("a")))
            .add_node(Arc::new(Step("b")))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END)
            .compile()
            .unwrap();
        let out = graph.invoke(Trace::default()).await.unwrap();
        assert_eq!(out.0, vec!["a", "b"]);
    }

    /// **Scenario**: conditional routing resolves against the state after the
    /// node's update is applied.
    #[tokio::test]
    async fn invoke_routes_on_updated_state() {
        let graph = StateGraph::new()
            .add_node(Arc::new(Step("a")))
            .add_node(Arc::new(Step("b")))
            .add_conditional_edges(
                "a",
                Arc::new(|s: &Trace| {
                    if s.0.contains(&"a") {
                        "b".to_string()
                    } else {
                        END.to_string()
                    }
                }),
                None,
            )
            .add_edge(START, "a")
            .add_edge("b", END)
            .compile()
            .unwrap();
        let out = graph.invoke(Trace::default()).await.unwrap();
        assert_eq!(out.0, vec!["a", "b"]);
    }

    /// **Scenario**: a routing policy that never reaches END trips the step
    /// limit instead of spinning forever.
    #[tokio::test]
    async fn invoke_step_limit_guards_nontermination() {
        let graph = StateGraph::new()
            .add_node(Arc::new(Step("a")))
            .add_conditional_edges("a", Arc::new(|_: &Trace| "a".to_string()), None)
            .add_edge(START, "a")
            .compile()
            .unwrap()
            .with_step_limit(5);
        let err = graph.invoke(Trace::default()).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }

    /// **Scenario**: the compiled graph is usable in Debug assertions and its
    /// output names the entry node and the registered node ids.
    #[test]
    fn debug_output_names_entry_and_nodes() {
        let graph = StateGraph::new()
            .add_node(Arc::new(Step("a")))
            .add_edge(START, "a")
            .add_edge("a", END)
            .compile()
            .unwrap();
        let rendered = format!("{:?}", graph);
        assert!(rendered.contains("entry: \"a\""));
        assert!(rendered.contains("nodes"));
    }

    /// **Scenario**: a map-less router returning an unknown node id is a loud
    /// routing error, not a stall.
    #[tokio::test]
    async fn invoke_unknown_route_is_loud() {
        let graph = StateGraph::new()
            .add_node(Arc::new(Step("a")))
            .add_conditional_edges("a", Arc::new(|_: &Trace| "ghost".to_string()), None)
            .add_edge(START, "a")
            .compile()
            .unwrap();
        let err = graph.invoke(Trace::default()).await.unwrap_err();
        assert!(matches!(err, AgentError::NoRouteResolved(id) if id == "ghost"));
    }
}
