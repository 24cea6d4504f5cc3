//! The `"tools"` graph node.
//!
//! Reads the tool calls from the last assistant message and executes them.
//! Calls run concurrently, but their messages and events are folded into one
//! update in call order, so the conversation reads as if they ran serially.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::Node;
use crate::message::{Message, ToolCall};
use crate::state::{ActivityType, ExecutionEvent, RunState, StateUpdate};
use crate::tools::{ToolContext, ToolOutcome, ToolRegistry};

/// Graph node that dispatches the pending tool calls.
pub struct ToolDispatchNode {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
}

impl ToolDispatchNode {
    pub fn new(registry: Arc<ToolRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Parses a tool-call argument string. Empty or malformed input degrades
    /// to an empty object so the tool still runs.
    fn parse_arguments(name: &str, raw: &str) -> Value {
        if raw.trim().is_empty() {
            return json!({});
        }
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = %name, error = %e, "malformed tool arguments, using empty object");
                json!({})
            }
        }
    }

    /// Executes one call. Returns `None` for an unknown tool (silent skip);
    /// every other path yields exactly one tool-result message and one event.
    async fn dispatch_one(&self, state: &RunState, call: &ToolCall) -> Option<StateUpdate> {
        let Some(tool) = self.registry.get(&call.name) else {
            debug!(tool = %call.name, "unknown tool requested, skipping");
            return None;
        };

        let args = Self::parse_arguments(&call.name, &call.arguments);
        let ctx = ToolContext {
            state: tool.wants_state().then_some(state),
            call_id: tool.wants_call_id().then(|| call.id.as_deref()).flatten(),
        };
        debug!(tool = %call.name, args = ?args, "calling tool");

        let outcome = match tokio::time::timeout(self.timeout, tool.call(args, ctx)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                warn!(tool = %call.name, error = %e, "tool call failed");
                return Some(Self::degraded(call, e.to_string()));
            }
            Err(_) => {
                let reason = format!("timed out after {:?}", self.timeout);
                warn!(tool = %call.name, %reason, "tool call timed out");
                return Some(Self::degraded(call, reason));
            }
        };

        let mut update = match outcome {
            // The tool supplied its own message; apply its update verbatim.
            ToolOutcome::Command(update) => update,
            ToolOutcome::Response { response, update } => {
                let mut folded = update;
                folded
                    .messages
                    .push(Message::tool(response, &call.name, call.id.clone()));
                folded
            }
        };
        update.execution_log.push(ExecutionEvent::success(
            format!("Executed tool {}", call.name),
            ActivityType::Tool,
        ));
        Some(update)
    }

    /// Failure result: a degraded tool message plus a failure event. The
    /// conversation still gets a result for the call id.
    fn degraded(call: &ToolCall, reason: String) -> StateUpdate {
        let mut update = StateUpdate::with_message(Message::tool(
            format!("Tool {} failed: {}", call.name, reason),
            &call.name,
            call.id.clone(),
        ));
        update.execution_log.push(ExecutionEvent::failure(
            format!("Executed tool {}", call.name),
            ActivityType::Tool,
            reason,
        ));
        update
    }
}

#[async_trait]
impl Node<RunState> for ToolDispatchNode {
    fn id(&self) -> &str {
        "tools"
    }

    async fn run(&self, state: &RunState) -> Result<StateUpdate, AgentError> {
        let calls: Vec<ToolCall> = state
            .last_message()
            .map(|m| m.tool_calls().to_vec())
            .unwrap_or_default();
        if calls.is_empty() {
            debug!("no pending tool calls");
            return Ok(StateUpdate::default());
        }

        let results =
            futures::future::join_all(calls.iter().map(|call| self.dispatch_one(state, call)))
                .await;

        // join_all preserves input order, so folding here keeps call order.
        let mut update = StateUpdate::default();
        for result in results.into_iter().flatten() {
            update.merge(result);
        }
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Tool, ToolError, ToolSpec};

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "echo".into(),
                description: None,
                input_schema: json!({"type": "object"}),
            }
        }
        async fn call(&self, args: Value, _ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
            let text = args["text"].as_str().unwrap_or("(none)").to_string();
            Ok(ToolOutcome::response(text))
        }
    }

    struct Slow;

    #[async_trait]
    impl Tool for Slow {
        fn name(&self) -> &str {
            "slow"
        }
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "slow".into(),
                description: None,
                input_schema: json!({"type": "object"}),
            }
        }
        async fn call(&self, _args: Value, _ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(ToolOutcome::response("too late"))
        }
    }

    struct Failing;

    #[async_trait]
    impl Tool for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "failing".into(),
                description: None,
                input_schema: json!({"type": "object"}),
            }
        }
        async fn call(&self, _args: Value, _ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
            Err(ToolError::Transport("connection refused".into()))
        }
    }

    fn seeded_with_calls(calls: Vec<ToolCall>) -> RunState {
        RunState::seeded(
            "TEST",
            vec![
                Message::user("q"),
                Message::assistant_with_tool_calls("", calls),
            ],
        )
    }

    fn node() -> ToolDispatchNode {
        let registry = ToolRegistry::new()
            .register(Arc::new(Echo))
            .register(Arc::new(Failing));
        ToolDispatchNode::new(Arc::new(registry), Duration::from_secs(5))
    }

    /// **Scenario**: two known calls produce two tool messages in call order,
    /// each tagged with its call id.
    #[tokio::test]
    async fn dispatch_preserves_call_order() {
        let state = seeded_with_calls(vec![
            ToolCall {
                name: "echo".into(),
                arguments: r#"{"text":"first"}"#.into(),
                id: Some("call-1".into()),
            },
            ToolCall {
                name: "echo".into(),
                arguments: r#"{"text":"second"}"#.into(),
                id: Some("call-2".into()),
            },
        ]);
        let update = node().run(&state).await.unwrap();
        assert_eq!(update.messages.len(), 2);
        assert_eq!(update.messages[0].content(), "first");
        assert_eq!(update.messages[1].content(), "second");
        assert!(
            matches!(&update.messages[1], Message::Tool { call_id, .. } if call_id.as_deref() == Some("call-2"))
        );
        assert_eq!(update.execution_log.len(), 2);
    }

    /// **Scenario**: an unknown tool is skipped with zero state change while
    /// the known call in the same batch still runs.
    #[tokio::test]
    async fn unknown_tool_is_silently_skipped() {
        let state = seeded_with_calls(vec![
            ToolCall {
                name: "nonexistent".into(),
                arguments: "{}".into(),
                id: Some("call-1".into()),
            },
            ToolCall {
                name: "echo".into(),
                arguments: r#"{"text":"hi"}"#.into(),
                id: Some("call-2".into()),
            },
        ]);
        let update = node().run(&state).await.unwrap();
        assert_eq!(update.messages.len(), 1);
        assert_eq!(update.messages[0].content(), "hi");
        assert_eq!(update.execution_log.len(), 1);
    }

    /// **Scenario**: a failing tool degrades into a tool message and a
    /// failure event instead of an error from the node.
    #[tokio::test]
    async fn failing_tool_degrades() {
        let state = seeded_with_calls(vec![ToolCall {
            name: "failing".into(),
            arguments: "{}".into(),
            id: Some("call-1".into()),
        }]);
        let update = node().run(&state).await.unwrap();
        assert_eq!(update.messages.len(), 1);
        assert!(update.messages[0].content().contains("failed"));
        assert_eq!(update.execution_log[0].activity_type, ActivityType::Tool);
        assert_ne!(update.execution_log[0].status, "success");
    }

    /// **Scenario**: a tool that outruns the per-call deadline degrades into
    /// a tool message and a failure event; the batch still completes.
    #[tokio::test]
    async fn slow_tool_times_out_and_degrades() {
        let registry = ToolRegistry::new()
            .register(Arc::new(Slow))
            .register(Arc::new(Echo));
        let node = ToolDispatchNode::new(Arc::new(registry), Duration::from_millis(20));
        let state = seeded_with_calls(vec![
            ToolCall {
                name: "slow".into(),
                arguments: "{}".into(),
                id: Some("call-1".into()),
            },
            ToolCall {
                name: "echo".into(),
                arguments: r#"{"text":"still here"}"#.into(),
                id: Some("call-2".into()),
            },
        ]);

        let update = node.run(&state).await.unwrap();

        assert_eq!(update.messages.len(), 2);
        assert!(update.messages[0].content().contains("timed out"));
        assert!(
            matches!(&update.messages[0], Message::Tool { call_id, .. } if call_id.as_deref() == Some("call-1"))
        );
        assert_eq!(update.messages[1].content(), "still here");
        assert_ne!(update.execution_log[0].status, "success");
        assert_eq!(update.execution_log[1].status, "success");
    }

    /// **Scenario**: malformed argument JSON degrades to an empty object and
    /// the tool still runs.
    #[tokio::test]
    async fn malformed_arguments_degrade_to_empty_object() {
        let state = seeded_with_calls(vec![ToolCall {
            name: "echo".into(),
            arguments: "{not json".into(),
            id: None,
        }]);
        let update = node().run(&state).await.unwrap();
        assert_eq!(update.messages[0].content(), "(none)");
    }

    /// **Scenario**: no pending tool calls is a no-op.
    #[tokio::test]
    async fn no_calls_is_noop() {
        let state = RunState::seeded("TEST", vec![Message::assistant("plain")]);
        let update = node().run(&state).await.unwrap();
        assert!(update.is_empty());
    }
}
