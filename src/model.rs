//! Model abstraction for LLM interactions
//!
//! Wraps the async-openai crate behind the [`ModelProvider`] trait so the
//! runner stays transport-agnostic. Tests drive the runner with a scripted
//! provider instead; any transient-fault retry policy is the provider's
//! concern, not the pipeline's.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionTool, ChatCompletionToolArgs,
        ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionObjectArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::items::{Message, ModelResponse, Role, ToolCall};

/// A tool (or handoff pseudo-tool) as advertised to the model.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait for model providers. One provider instance serves every agent in a
/// run; the model identifier comes from the agent being invoked.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate the next completion for the conversation.
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        tools: &[ToolSpec],
        temperature: Option<f32>,
    ) -> Result<ModelResponse>;
}

/// OpenAI model provider using async-openai
pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAIProvider {
    /// Create a provider from the ambient `OPENAI_API_KEY` configuration.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create with a custom client
    pub fn with_client(client: Client<OpenAIConfig>) -> Self {
        Self { client }
    }

    fn convert_message(msg: &Message) -> Result<ChatCompletionRequestMessage> {
        let converted = match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()?
                .into(),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()?
                .into(),
            Role::Assistant => {
                let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
                builder.content(msg.content.clone());

                if let Some(tool_calls) = &msg.tool_calls {
                    let openai_tool_calls: Vec<_> = tool_calls
                        .iter()
                        .map(|tc| async_openai::types::ChatCompletionMessageToolCall {
                            id: tc.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: async_openai::types::FunctionCall {
                                name: tc.name.clone(),
                                arguments: tc.arguments.to_string(),
                            },
                        })
                        .collect();
                    builder.tool_calls(openai_tool_calls);
                }

                builder.build()?.into()
            }
            Role::Tool => ChatCompletionRequestToolMessageArgs::default()
                .content(msg.content.clone())
                .tool_call_id(msg.tool_call_id.clone().unwrap_or_default())
                .build()?
                .into(),
        };
        Ok(converted)
    }

    fn convert_tools(tools: &[ToolSpec]) -> Result<Vec<ChatCompletionTool>> {
        tools
            .iter()
            .map(|tool| {
                Ok(ChatCompletionToolArgs::default()
                    .r#type(ChatCompletionToolType::Function)
                    .function(
                        FunctionObjectArgs::default()
                            .name(&tool.name)
                            .description(&tool.description)
                            .parameters(tool.parameters.clone())
                            .build()?,
                    )
                    .build()?)
            })
            .collect()
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        tools: &[ToolSpec],
        temperature: Option<f32>,
    ) -> Result<ModelResponse> {
        let openai_messages = messages
            .iter()
            .map(Self::convert_message)
            .collect::<Result<Vec<_>>>()?;

        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(model).messages(openai_messages);

        if !tools.is_empty() {
            request.tools(Self::convert_tools(tools)?);
        }
        if let Some(temp) = temperature {
            request.temperature(temp);
        }

        let response = self.client.chat().create(request.build()?).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| PlannerError::ModelBehaviorError {
                message: "no choices in response".to_string(),
            })?;

        let tool_calls = choice
            .message
            .tool_calls
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|tc| ToolCall {
                id: tc.id.clone(),
                name: tc.function.name.clone(),
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(Value::Null),
            })
            .collect();

        Ok(ModelResponse {
            id: response.id.clone(),
            content: choice.message.content.clone(),
            tool_calls,
            finish_reason: choice.finish_reason.as_ref().map(|r| format!("{r:?}")),
            created_at: chrono::Utc::now(),
        })
    }
}
