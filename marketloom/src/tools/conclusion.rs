//! Terminal-signal tool for the research workflow.
//!
//! When the model decides research is done it calls `reach_conclusion` with
//! its verdict. The tool flips the conclusion latch and records the verdict
//! directly, so routing moves to termination at the next check.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::message::Message;
use crate::state::StateUpdate;
use crate::tools::{Tool, ToolContext, ToolError, ToolOutcome, ToolSpec};

pub struct ConclusionTool;

#[async_trait]
impl Tool for ConclusionTool {
    fn name(&self) -> &str {
        "reach_conclusion"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "reach_conclusion".to_string(),
            description: Some(
                "Record the final research verdict once enough evidence has been gathered. \
                 Ends the research loop."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "verdict": {
                        "type": "string",
                        "description": "The final conclusion about the stock"
                    }
                },
                "required": ["verdict"]
            }),
        }
    }

    fn wants_call_id(&self) -> bool {
        true
    }

    async fn call(&self, args: Value, ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
        let verdict = args["verdict"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("verdict must be a string".into()))?
            .to_string();

        let update = StateUpdate {
            messages: vec![Message::tool(
                format!("Conclusion recorded: {}", verdict),
                "reach_conclusion",
                ctx.call_id.map(str::to_string),
            )],
            concluded: Some(true),
            final_output: Some(verdict),
            ..Default::default()
        };
        Ok(ToolOutcome::Command(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: the tool sets the latch and verdict and supplies its own
    /// tool-result message tagged with the call id.
    #[tokio::test]
    async fn conclusion_sets_latch_and_verdict() {
        let ctx = ToolContext {
            state: None,
            call_id: Some("call-9"),
        };
        let outcome = ConclusionTool
            .call(json!({"verdict": "hold"}), ctx)
            .await
            .unwrap();
        let ToolOutcome::Command(update) = outcome else {
            panic!("expected a command outcome");
        };
        assert_eq!(update.concluded, Some(true));
        assert_eq!(update.final_output.as_deref(), Some("hold"));
        assert!(
            matches!(&update.messages[0], Message::Tool { call_id, .. } if call_id.as_deref() == Some("call-9"))
        );
    }

    /// **Scenario**: a missing verdict is an argument error, which dispatch
    /// will degrade rather than conclude the run.
    #[tokio::test]
    async fn missing_verdict_is_invalid() {
        let result = ConclusionTool.call(json!({}), ToolContext::default()).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
