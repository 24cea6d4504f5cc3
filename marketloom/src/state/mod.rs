//! Run state shared across graph nodes.
//!
//! Nodes never mutate state directly. Each node (and each tool) produces a
//! [`StateUpdate`], and the executor folds updates into the one mutable
//! [`RunState`] it owns. Vector fields accumulate; scalar fields are
//! latest-wins `Option`s that replace only when set.

use serde::{Deserialize, Serialize};

use crate::graph::GraphState;
use crate::message::Message;

/// Kind of activity recorded in the execution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// A reasoning step that produced a plain answer.
    Ai,
    /// A reasoning step that requested one or more tool calls.
    ToolCall,
    /// A dispatched tool execution.
    Tool,
}

/// One entry in the execution audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionEvent {
    /// Human-readable description of what happened.
    pub activity: String,
    pub activity_type: ActivityType,
    /// `"success"` or a short failure reason.
    pub status: String,
}

impl ExecutionEvent {
    pub fn success(activity: impl Into<String>, activity_type: ActivityType) -> Self {
        Self {
            activity: activity.into(),
            activity_type,
            status: "success".to_string(),
        }
    }

    pub fn failure(
        activity: impl Into<String>,
        activity_type: ActivityType,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            activity: activity.into(),
            activity_type,
            status: reason.into(),
        }
    }
}

/// Partial update produced by a node or tool.
///
/// Accumulating fields (`messages`, `execution_log`, `urls`) extend the state;
/// latest-wins fields replace it only when `Some`. The empty update is a
/// no-op under both [`StateUpdate::merge`] and [`RunState::apply`].
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub messages: Vec<Message>,
    pub execution_log: Vec<ExecutionEvent>,
    pub urls: Vec<String>,
    pub loop_count: Option<u32>,
    pub concluded: Option<bool>,
    pub final_output: Option<String>,
}

impl StateUpdate {
    /// An update carrying a single message.
    pub fn with_message(message: Message) -> Self {
        Self {
            messages: vec![message],
            ..Default::default()
        }
    }

    /// An update carrying a single execution event.
    pub fn with_event(event: ExecutionEvent) -> Self {
        Self {
            execution_log: vec![event],
            ..Default::default()
        }
    }

    /// Folds `other` into `self`, keeping update semantics per field:
    /// vectors append in order, `Option`s replace when the incoming side is
    /// `Some`.
    pub fn merge(&mut self, other: StateUpdate) {
        self.messages.extend(other.messages);
        self.execution_log.extend(other.execution_log);
        self.urls.extend(other.urls);
        if other.loop_count.is_some() {
            self.loop_count = other.loop_count;
        }
        if other.concluded.is_some() {
            self.concluded = other.concluded;
        }
        if other.final_output.is_some() {
            self.final_output = other.final_output;
        }
    }

    /// True when applying this update would leave any state unchanged.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.execution_log.is_empty()
            && self.urls.is_empty()
            && self.loop_count.is_none()
            && self.concluded.is_none()
            && self.final_output.is_none()
    }
}

/// Shared state for both the research and chat workflows.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Workflow input: stock code for research, user question for chat.
    /// Set once at seed time; nothing updates it afterwards.
    pub subject: String,
    /// Conversation history, accumulating.
    pub messages: Vec<Message>,
    /// Audit trail of reasoning and tool activity, accumulating.
    pub execution_log: Vec<ExecutionEvent>,
    /// Source URLs surfaced by tools, accumulating. Duplicates are kept.
    pub urls: Vec<String>,
    /// Number of completed reasoning steps.
    pub loop_count: u32,
    /// Terminal latch. Once set it is never cleared by any produced update.
    pub concluded: bool,
    /// Current best answer; each reasoning step replaces it.
    pub final_output: String,
}

impl RunState {
    /// Seed state for a fresh run over `subject` with an initial message list.
    pub fn seeded(subject: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            subject: subject.into(),
            messages,
            ..Default::default()
        }
    }

    /// Last message in the conversation, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl GraphState for RunState {
    type Update = StateUpdate;

    fn apply(&mut self, update: StateUpdate) {
        self.messages.extend(update.messages);
        self.execution_log.extend(update.execution_log);
        self.urls.extend(update.urls);
        if let Some(n) = update.loop_count {
            self.loop_count = n;
        }
        if let Some(c) = update.concluded {
            self.concluded = c;
        }
        if let Some(out) = update.final_output {
            self.final_output = out;
        }
    }
}
