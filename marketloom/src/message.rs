//! Message types for agent state.
//!
//! Message roles: System (usually first in the list), User, Assistant, Tool.
//! An assistant message carries the tool calls it requested; a tool message
//! carries the originating tool name and call id so results can be correlated.

use serde::{Deserialize, Serialize};

/// A single tool invocation requested by the assistant.
///
/// `arguments` is the raw JSON string from the provider; the dispatcher parses
/// it (and tolerates malformed JSON by substituting an empty object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name, resolved against the registry at dispatch time.
    pub name: String,
    /// JSON-encoded arguments as produced by the provider.
    pub arguments: String,
    /// Provider-assigned call id; used to tag the tool-result message.
    pub id: Option<String>,
}

/// A single message in the conversation.
///
/// Roles: system prompt, user input, assistant reply (with optional tool
/// calls), and tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model reply; `tool_calls` is empty for a plain answer.
    Assistant {
        content: String,
        tool_calls: Vec<ToolCall>,
    },
    /// Result of one tool invocation, tagged with its origin.
    Tool {
        content: String,
        name: String,
        call_id: Option<String>,
    },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates a plain assistant message (no tool calls).
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    /// Creates an assistant message carrying tool calls.
    pub fn assistant_with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Creates a tool-result message tagged with tool name and call id.
    pub fn tool(
        content: impl Into<String>,
        name: impl Into<String>,
        call_id: Option<String>,
    ) -> Self {
        Self::Tool {
            content: content.into(),
            name: name.into(),
            call_id,
        }
    }

    /// Text content of the message, whatever the role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(c) | Self::User(c) => c,
            Self::Assistant { content, .. } | Self::Tool { content, .. } => content,
        }
    }

    /// Tool calls requested by this message; empty unless it is an assistant
    /// message that requested tools.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: constructors produce the correct variant with content.
    #[test]
    fn message_constructors() {
        let sys = Message::system("s");
        assert!(matches!(&sys, Message::System(c) if c == "s"));
        let usr = Message::user("u");
        assert!(matches!(&usr, Message::User(c) if c == "u"));
        let ast = Message::assistant("a");
        assert!(matches!(&ast, Message::Assistant { content, tool_calls } if content == "a" && tool_calls.is_empty()));
        let tool = Message::tool("out", "web_search", Some("call-1".into()));
        assert!(
            matches!(&tool, Message::Tool { content, name, call_id }
                if content == "out" && name == "web_search" && call_id.as_deref() == Some("call-1"))
        );
    }

    /// **Scenario**: tool_calls() is non-empty only for assistant messages that requested tools.
    #[test]
    fn tool_calls_accessor() {
        let tc = ToolCall {
            name: "web_search".into(),
            arguments: r#"{"query":"x"}"#.into(),
            id: Some("1".into()),
        };
        let with = Message::assistant_with_tool_calls("searching", vec![tc]);
        assert_eq!(with.tool_calls().len(), 1);
        assert_eq!(with.tool_calls()[0].name, "web_search");
        assert!(Message::assistant("plain").tool_calls().is_empty());
        assert!(Message::user("q").tool_calls().is_empty());
    }

    /// **Scenario**: Each Message variant round-trips through serde.
    #[test]
    fn message_serialize_deserialize_roundtrip() {
        for msg in [
            Message::system("sys"),
            Message::user("usr"),
            Message::assistant_with_tool_calls(
                "ast",
                vec![ToolCall {
                    name: "t".into(),
                    arguments: "{}".into(),
                    id: None,
                }],
            ),
            Message::tool("res", "t", Some("id".into())),
        ] {
            let json = serde_json::to_string(&msg).expect("serialize");
            let back: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(msg.content(), back.content());
            assert_eq!(msg.tool_calls().len(), back.tool_calls().len());
        }
    }
}
