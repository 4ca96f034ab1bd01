//! OpenAI-compatible gateway
//!
//! Talks to any endpoint implementing the `/chat/completions` contract.
//! Endpoint, credential, and model name come from the environment:
//! `target_base_url`, `target_api_key`, `target_model_name`.

use std::sync::Arc;

use async_trait::async_trait;

use super::wire::{
    messages_to_wire, reply_from_message, tool_to_wire, ChatCompletionRequest,
    ChatCompletionResponse, MAX_TOKENS,
};
use super::{Gateway, GatewayError, GatewayReply, GatewayResult, ToolDefinition};
use crate::logging::Logger;
use crate::types::ConversationMessage;

/// Environment variable naming the endpoint base URL
pub const ENV_BASE_URL: &str = "target_base_url";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "target_api_key";
/// Environment variable naming the model
pub const ENV_MODEL_NAME: &str = "target_model_name";

/// Gateway to an OpenAI-compatible chat-completion endpoint
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    logger: Arc<dyn Logger>,
}

impl OpenAiGateway {
    /// Create a gateway with explicit settings
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            logger,
        }
    }

    /// Create a gateway from the environment.
    ///
    /// All three variables are required; a missing one is a
    /// [`GatewayError::Config`] naming it.
    pub fn from_env(logger: Arc<dyn Logger>) -> GatewayResult<Self> {
        let base_url = require_env(ENV_BASE_URL)?;
        let api_key = require_env(ENV_API_KEY)?;
        let model = require_env(ENV_MODEL_NAME)?;
        Ok(Self::new(base_url, api_key, model, logger))
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

fn require_env(name: &str) -> GatewayResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GatewayError::Config(format!("environment variable '{}' is not set", name)))
}

#[async_trait]
impl Gateway for OpenAiGateway {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> GatewayResult<GatewayReply> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages_to_wire(messages),
            max_tokens: MAX_TOKENS,
            tools: tools.iter().map(tool_to_wire).collect(),
        };

        self.logger.debug(&format!(
            "[OpenAiGateway] Completing with {} message(s), {} tool(s)",
            messages.len(),
            tools.len()
        ));

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            self.logger.error(&format!(
                "[OpenAiGateway] Endpoint returned {}: {}",
                status, message
            ));
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatCompletionResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)?;

        reply_from_message(choice.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let gateway = OpenAiGateway::new("https://api.example.com/v1/", "key", "m", logger());
        assert_eq!(gateway.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_from_env_reports_missing_variable() {
        // Runs without the target_* variables set in the test environment
        std::env::remove_var(ENV_BASE_URL);
        let err = OpenAiGateway::from_env(logger());
        match err {
            Err(GatewayError::Config(msg)) => assert!(msg.contains(ENV_BASE_URL)),
            _ => panic!("expected Config error"),
        }
    }
}
