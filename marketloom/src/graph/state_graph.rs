use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::compiled::{CompiledStateGraph, NextEntry};
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn};
use crate::graph::{CompilationError, GraphState, Node};

/// Entry sentinel: the edge leaving START names the first node to run.
pub const START: &str = "__start__";
/// Exit sentinel: routing to END stops the run.
pub const END: &str = "__end__";

/// Graph builder.
///
/// Add nodes and edges, then `compile()` to validate the wiring and obtain a
/// runnable [`CompiledStateGraph`].
pub struct StateGraph<S: GraphState> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    routers: HashMap<String, ConditionalRouter<S>>,
}

impl<S: GraphState> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GraphState> StateGraph<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            routers: HashMap::new(),
        }
    }

    /// Registers a node under its own id.
    pub fn add_node(mut self, node: Arc<dyn Node<S>>) -> Self {
        self.nodes.insert(node.id().to_string(), node);
        self
    }

    /// Adds an unconditional edge. `from` may be [`START`], `to` may be [`END`].
    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Adds conditional edges out of `source`.
    ///
    /// `path` maps the state to a routing key; `path_map` (when given)
    /// translates keys to node ids, with unmapped keys used verbatim.
    pub fn add_conditional_edges(
        mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> Self {
        self.routers
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    /// Validates the wiring and produces a runnable graph.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let mut unconditional: HashMap<String, String> = HashMap::new();
        let mut reaches_end = false;

        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
            if to == END {
                reaches_end = true;
            }
            unconditional.insert(from.clone(), to.clone());
        }

        for (source, router) in &self.routers {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if unconditional.contains_key(source) {
                return Err(CompilationError::ConflictingEdges(source.clone()));
            }
            match router.targets() {
                Some(targets) => {
                    for target in targets {
                        if target == END {
                            reaches_end = true;
                        } else if !self.nodes.contains_key(target) {
                            return Err(CompilationError::InvalidPathTarget(target.clone()));
                        }
                    }
                }
                // No path map means targets are resolved at run time; assume
                // the path function can produce END.
                None => reaches_end = true,
            }
        }

        let entry = unconditional
            .get(START)
            .cloned()
            .ok_or(CompilationError::MissingStart)?;
        if !reaches_end {
            return Err(CompilationError::MissingEnd);
        }

        let mut next: HashMap<String, NextEntry<S>> = self
            .routers
            .into_iter()
            .map(|(source, router)| (source, NextEntry::Conditional(router)))
            .collect();
        for (from, to) in unconditional {
            if from != START {
                next.insert(from, NextEntry::Unconditional(to));
            }
        }

        Ok(CompiledStateGraph::new(self.nodes, entry, next))
    }
}
