//! LLM gateway
//!
//! The [`Gateway`] trait is the single seam between the conversation
//! orchestrator and the model endpoint. [`OpenAiGateway`] talks to any
//! OpenAI-compatible `/chat/completions` endpoint; [`MockGateway`] scripts
//! replies for tests.

mod mock;
mod openai;
mod wire;

pub use mock::MockGateway;
pub use openai::OpenAiGateway;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::types::{ConversationMessage, ToolCallRequest};

/// Gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Endpoint returned no choices")]
    EmptyResponse,
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// One tool offered to the model on a completion call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    /// Model-facing composite name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for the arguments
    pub parameters: Value,
}

/// What the model produced for one completion call.
///
/// `text` and `tool_calls` are not exclusive: a reply may carry prose
/// alongside the calls it requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayReply {
    /// Prose content, if any
    pub text: Option<String>,
    /// Tool invocations the model requested, in order
    pub tool_calls: Vec<ToolCallRequest>,
}

impl GatewayReply {
    /// A reply carrying only prose
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A reply carrying only tool calls
    pub fn tool_calls(calls: Vec<ToolCallRequest>) -> Self {
        Self {
            text: None,
            tool_calls: calls,
        }
    }

    /// Whether the model requested any tool invocations
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Interface to a chat-completion endpoint
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submit the working list plus the available tools and return the
    /// model's reply
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> GatewayResult<GatewayReply>;
}
