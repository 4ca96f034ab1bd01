//! Conversation message types

use serde::{Deserialize, Serialize};

use super::tool::ToolCallRequest;

/// A single message in a conversation.
///
/// The working list for a query holds all three variants; the persistent
/// cross-query history only ever holds `User` and text-only `Assistant`
/// messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationMessage {
    /// A message typed by the human user
    User { text: String },
    /// A model reply; may carry text, tool-call requests, or both
    Assistant {
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    /// The output of one dispatched tool call
    ToolResult {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        content: String,
    },
}

impl ConversationMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        ConversationMessage::User { text: text.into() }
    }

    /// Create a text-only assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        ConversationMessage::Assistant {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Create an assistant message carrying tool-call requests
    pub fn tool_calls(calls: Vec<ToolCallRequest>) -> Self {
        ConversationMessage::Assistant {
            text: None,
            tool_calls: calls,
        }
    }

    /// Create a tool-result message
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        ConversationMessage::ToolResult {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    /// Get the text content if this is a plain text message
    pub fn text(&self) -> Option<&str> {
        match self {
            ConversationMessage::User { text } => Some(text),
            ConversationMessage::Assistant { text, .. } => text.as_deref(),
            ConversationMessage::ToolResult { .. } => None,
        }
    }

    /// Whether this message is a tool result
    pub fn is_tool_result(&self) -> bool {
        matches!(self, ConversationMessage::ToolResult { .. })
    }
}
