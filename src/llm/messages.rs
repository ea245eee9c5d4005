//! Transcript types exchanged with the chat model.

use serde_json::Value;

/// A function call requested by the model
#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded argument mapping, exactly as the model produced it
    pub arguments: String,
}

/// One reply from the model: free text, tool calls, or both
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssistantTurn {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantTurn {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
        }
    }

    pub fn requests_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConversationMessage {
    System { content: String },
    Human { content: String },
    Ai(AssistantTurn),
    ToolResult { call_id: String, content: String },
}

impl ConversationMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ConversationMessage::System {
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        ConversationMessage::Human {
            content: content.into(),
        }
    }

    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        ConversationMessage::ToolResult {
            call_id: call_id.into(),
            content: content.into(),
        }
    }
}

/// Function definition advertised to the model
#[derive(Clone, Debug, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: Value,
}
