//! Routing conditions.
//!
//! Pure functions over the run state returning a routing key. Workflow path
//! maps translate the keys into node ids, so the same conditions drive both
//! the research and chat graphs.

use crate::message::Message;
use crate::state::RunState;

/// Routing key: return to the reasoning node (or its terminal mapping).
pub const ROUTE_AGENT: &str = "agent";
/// Routing key: dispatch the pending tool calls.
pub const ROUTE_TOOLS: &str = "tools";
/// Routing key: move toward termination.
pub const ROUTE_END: &str = "end";

/// Routes out of the reasoning node.
///
/// Conclusion and the loop ceiling are checked before anything else, so a
/// concluded or over-budget run can never re-enter the tool loop.
pub fn call_tool_condition(state: &RunState, ceiling: u32) -> String {
    if state.concluded {
        return ROUTE_END.to_string();
    }
    if state.loop_count > ceiling {
        return ROUTE_END.to_string();
    }
    match state.last_message() {
        Some(Message::Assistant { tool_calls, .. }) if !tool_calls.is_empty() => {
            ROUTE_TOOLS.to_string()
        }
        Some(Message::Assistant { .. }) => ROUTE_AGENT.to_string(),
        _ => ROUTE_END.to_string(),
    }
}

/// Routes out of the tool dispatch node.
///
/// Returning to the reasoning node requires a non-empty tool result, no
/// conclusion, and an unexceeded ceiling; anything else terminates.
pub fn tool_return_condition(state: &RunState, ceiling: u32) -> String {
    if state.concluded || state.loop_count > ceiling {
        return ROUTE_END.to_string();
    }
    match state.last_message() {
        Some(Message::Tool { content, .. }) if !content.is_empty() => ROUTE_AGENT.to_string(),
        _ => ROUTE_END.to_string(),
    }
}
