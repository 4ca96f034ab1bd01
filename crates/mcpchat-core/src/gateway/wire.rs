//! Chat-completion wire format
//!
//! Serde types for the OpenAI-compatible `/chat/completions` request and
//! response bodies, plus conversions to and from the typed conversation
//! messages. Tool-call arguments cross the wire as JSON-in-a-string and are
//! parsed into structured values on receipt.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GatewayReply, GatewayResult, ToolDefinition};
use crate::types::{ConversationMessage, ToolCallRequest};

/// Cap on completion length, matching typical interactive use
pub(crate) const MAX_TOKENS: u32 = 2048;

#[derive(Serialize, Debug)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct WireMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct WireToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: WireFunctionCall,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct WireFunctionCall {
    pub name: String,
    /// Arguments as a JSON-encoded string, per the wire contract
    pub arguments: String,
}

#[derive(Serialize, Debug)]
pub(crate) struct WireTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: WireFunctionDef,
}

#[derive(Serialize, Debug)]
pub(crate) struct WireFunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<WireToolCall>,
}

/// Encode a tool definition in the `{"type":"function",...}` envelope
pub(crate) fn tool_to_wire(tool: &ToolDefinition) -> WireTool {
    WireTool {
        kind: "function".to_string(),
        function: WireFunctionDef {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

/// Encode the working list as wire messages
pub(crate) fn messages_to_wire(messages: &[ConversationMessage]) -> Vec<WireMessage> {
    messages
        .iter()
        .map(|m| match m {
            ConversationMessage::User { text } => WireMessage {
                role: "user".to_string(),
                content: Some(text.clone()),
                tool_calls: Vec::new(),
                tool_call_id: None,
            },
            ConversationMessage::Assistant { text, tool_calls } => WireMessage {
                role: "assistant".to_string(),
                content: text.clone(),
                tool_calls: tool_calls.iter().map(call_to_wire).collect(),
                tool_call_id: None,
            },
            ConversationMessage::ToolResult {
                tool_call_id,
                content,
            } => WireMessage {
                role: "tool".to_string(),
                content: Some(content.clone()),
                tool_calls: Vec::new(),
                tool_call_id: Some(tool_call_id.clone()),
            },
        })
        .collect()
}

fn call_to_wire(call: &ToolCallRequest) -> WireToolCall {
    WireToolCall {
        id: call.id.clone(),
        kind: "function".to_string(),
        function: WireFunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.to_string(),
        },
    }
}

/// Decode the first-choice message into a gateway reply, parsing the
/// string-encoded arguments of each tool call
pub(crate) fn reply_from_message(message: ResponseMessage) -> GatewayResult<GatewayReply> {
    let mut tool_calls = Vec::with_capacity(message.tool_calls.len());
    for call in message.tool_calls {
        let arguments: Value = if call.function.arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&call.function.arguments)?
        };
        tool_calls.push(ToolCallRequest {
            id: call.id,
            name: call.function.name,
            arguments,
        });
    }

    Ok(GatewayReply {
        text: message.content.filter(|c| !c.is_empty()),
        tool_calls,
    })
}
