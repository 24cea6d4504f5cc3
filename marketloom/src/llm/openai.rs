//! OpenAI Chat Completions client.
//!
//! Maps the crate's message roles onto the Chat Completions request format,
//! binds tool schemas when given, and enforces the configured per-call
//! deadline. Requires an API key in [`LlmConfig`] or `OPENAI_API_KEY`.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::config::LlmConfig;
use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestToolMessageArgs,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
        ChatCompletionTools, CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
        ToolChoiceOptions,
    },
    Client,
};

/// Chat Completions client implementing [`LlmClient`].
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl ChatOpenAI {
    /// Builds a client from explicit settings. Falls back to `OPENAI_API_KEY`
    /// in the environment when the config carries no key.
    pub fn new(config: LlmConfig) -> Self {
        let mut openai_config = OpenAIConfig::new();
        if let Some(key) = &config.api_key {
            openai_config = openai_config.with_api_key(key.clone());
        }
        if let Some(base) = &config.api_base {
            openai_config = openai_config.with_api_base(base.clone());
        }
        Self {
            client: Client::with_config(openai_config),
            config,
        }
    }

    fn messages_to_request(
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        let build_err =
            |e| AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e));
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => Ok(ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                )),
                Message::User(s) => Ok(ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                )),
                Message::Assistant {
                    content,
                    tool_calls,
                } => {
                    let mut args = ChatCompletionRequestAssistantMessageArgs::default();
                    if !content.is_empty() {
                        args.content(content.as_str());
                    }
                    if !tool_calls.is_empty() {
                        let calls: Vec<ChatCompletionMessageToolCalls> = tool_calls
                            .iter()
                            .map(|tc| {
                                ChatCompletionMessageToolCalls::Function(
                                    ChatCompletionMessageToolCall {
                                        id: tc.id.clone().unwrap_or_default(),
                                        function: FunctionCall {
                                            name: tc.name.clone(),
                                            arguments: tc.arguments.clone(),
                                        },
                                    },
                                )
                            })
                            .collect();
                        args.tool_calls(calls);
                    }
                    Ok(ChatCompletionRequestMessage::Assistant(
                        args.build().map_err(build_err)?,
                    ))
                }
                Message::Tool {
                    content, call_id, ..
                } => Ok(ChatCompletionRequestMessage::Tool(
                    ChatCompletionRequestToolMessageArgs::default()
                        .content(content.as_str())
                        .tool_call_id(call_id.clone().unwrap_or_default())
                        .build()
                        .map_err(build_err)?,
                )),
            })
            .collect()
    }

    fn tools_to_request(tools: &[ToolSpec]) -> Vec<ChatCompletionTools> {
        tools
            .iter()
            .map(|t| {
                ChatCompletionTools::Function(ChatCompletionTool {
                    function: FunctionObject {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: Some(t.input_schema.clone()),
                        ..Default::default()
                    },
                })
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        let openai_messages = Self::messages_to_request(messages)?;
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.config.model.clone());
        args.messages(openai_messages);
        args.temperature(self.config.temperature);
        if !tools.is_empty() {
            args.tools(Self::tools_to_request(tools));
            args.tool_choice(ChatCompletionToolChoiceOption::Mode(ToolChoiceOptions::Auto));
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        debug!(
            model = %self.config.model,
            message_count = messages.len(),
            tools_count = tools.len(),
            temperature = self.config.temperature,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(request = %js, "OpenAI request body");
        }

        let response = tokio::time::timeout(self.config.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                AgentError::ExecutionFailed(format!(
                    "OpenAI call timed out after {:?}",
                    self.config.timeout
                ))
            })?
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
        })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        name: f.function.name,
                        arguments: f.function.arguments,
                        id: Some(f.id),
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(LlmResponse {
            content,
            tool_calls,
        })
    }
}
