//! Scripted LLM for tests and offline demos.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// One scripted step: a reply or a failure.
enum Scripted {
    Reply(LlmResponse),
    Failure(String),
}

/// Mock LLM that plays back a scripted sequence of replies.
///
/// Each `invoke` consumes the next step; once the script is exhausted the
/// last reply repeats. A `Failure` step makes that invoke return an error so
/// recovery paths can be exercised.
pub struct MockLlm {
    script: Vec<Scripted>,
    call_count: AtomicUsize,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            script: Vec::new(),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Appends a plain assistant answer.
    pub fn then_answer(mut self, content: impl Into<String>) -> Self {
        self.script.push(Scripted::Reply(LlmResponse::text(content)));
        self
    }

    /// Appends a reply that requests the given tool calls.
    pub fn then_tool_calls(
        mut self,
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        self.script.push(Scripted::Reply(LlmResponse {
            content: content.into(),
            tool_calls,
        }));
        self
    }

    /// Appends a reply requesting a single tool call.
    pub fn then_tool_call(
        self,
        tool: impl Into<String>,
        arguments: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        let call = ToolCall {
            name: tool.into(),
            arguments: arguments.into(),
            id: Some(id.into()),
        };
        self.then_tool_calls("", vec![call])
    }

    /// Appends a failing invoke.
    pub fn then_failure(mut self, reason: impl Into<String>) -> Self {
        self.script.push(Scripted::Failure(reason.into()));
        self
    }

    /// Number of invokes observed so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        _messages: &[Message],
        _tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        let step = if self.script.is_empty() {
            return Ok(LlmResponse::text("(no scripted reply)"));
        } else if n < self.script.len() {
            &self.script[n]
        } else {
            // Script exhausted, repeat the final step.
            &self.script[self.script.len() - 1]
        };
        match step {
            Scripted::Reply(r) => Ok(r.clone()),
            Scripted::Failure(reason) => Err(AgentError::ExecutionFailed(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: steps play back in order and the last step repeats once
    /// the script is exhausted.
    #[tokio::test]
    async fn script_plays_in_order_then_repeats() {
        let llm = MockLlm::new()
            .then_tool_call("web_search", r#"{"query":"x"}"#, "call-1")
            .then_answer("done");

        let first = llm.invoke(&[], &[]).await.unwrap();
        assert_eq!(first.tool_calls[0].name, "web_search");

        let second = llm.invoke(&[], &[]).await.unwrap();
        assert_eq!(second.content, "done");

        let third = llm.invoke(&[], &[]).await.unwrap();
        assert_eq!(third.content, "done");
        assert_eq!(llm.call_count(), 3);
    }

    /// **Scenario**: a failure step surfaces as an error for that invoke only.
    #[tokio::test]
    async fn failure_step_errors() {
        let llm = MockLlm::new().then_failure("model overloaded").then_answer("ok");
        assert!(llm.invoke(&[], &[]).await.is_err());
        assert_eq!(llm.invoke(&[], &[]).await.unwrap().content, "ok");
    }
}
