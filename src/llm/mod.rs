pub mod messages;


use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType,
        CreateChatCompletionRequestArgs, FunctionCall, FunctionObjectArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::AdvisorError;

pub use messages::{AssistantTurn, ConversationMessage, ToolCall, ToolDefinition};

/// A chat model that can optionally call tools.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn model(&self) -> &str;

    /// Send the transcript and return the model's next turn. `tools` may be empty.
    async fn complete(
        &self,
        transcript: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, AdvisorError>;
}

#[derive(Clone)]
pub struct LLMClient {
    pub client: Client<OpenAIConfig>,
    pub model: String,
}

impl LLMClient {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        let client = Client::with_config(config);
        Self { client, model }
    }
}

#[async_trait]
impl ChatModel for LLMClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        transcript: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, AdvisorError> {
        info!(
            "🤖 Sending request to LLM (Model: {}, messages: {}, tools: {})...",
            self.model,
            transcript.len(),
            tools.len()
        );

        let messages = transcript
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);
        if !tools.is_empty() {
            args.tools(
                tools
                    .iter()
                    .map(to_request_tool)
                    .collect::<Result<Vec<_>, _>>()?,
            );
        }
        let request = args.build()?;

        let response = self.client.chat().create(request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(AdvisorError::EmptyCompletion)?;

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        info!("🤖 LLM Response received ({} tool calls).", tool_calls.len());
        debug!("🤖 LLM content: {:?}", choice.message.content);

        Ok(AssistantTurn {
            content: choice.message.content,
            tool_calls,
        })
    }
}

pub(crate) fn to_request_message(
    message: &ConversationMessage,
) -> Result<ChatCompletionRequestMessage, AdvisorError> {
    let converted: ChatCompletionRequestMessage = match message {
        ConversationMessage::System { content } => ChatCompletionRequestSystemMessageArgs::default()
            .content(content.as_str())
            .build()?
            .into(),
        ConversationMessage::Human { content } => ChatCompletionRequestUserMessageArgs::default()
            .content(content.as_str())
            .build()?
            .into(),
        ConversationMessage::Ai(turn) => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(content) = &turn.content {
                args.content(content.as_str());
            }
            if turn.requests_tools() {
                args.tool_calls(
                    turn.tool_calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.clone(),
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            args.build()?.into()
        }
        ConversationMessage::ToolResult { call_id, content } => {
            ChatCompletionRequestToolMessageArgs::default()
                .content(content.as_str())
                .tool_call_id(call_id.as_str())
                .build()?
                .into()
        }
    };
    Ok(converted)
}

pub(crate) fn to_request_tool(tool: &ToolDefinition) -> Result<ChatCompletionTool, AdvisorError> {
    let function = FunctionObjectArgs::default()
        .name(tool.name.as_str())
        .description(tool.description.as_str())
        .parameters(tool.parameters.clone())
        .build()?;

    Ok(ChatCompletionToolArgs::default()
        .r#type(ChatCompletionToolType::Function)
        .function(function)
        .build()?)
}
