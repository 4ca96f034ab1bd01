//! MCP client using the official rmcp SDK
//!
//! Spawns tool-provider servers as child processes (stdio transport).

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::{
    model::{
        CallToolRequestParams, ClientCapabilities, ClientInfo, Implementation, RawContent,
        Tool as RmcpTool,
    },
    service::RunningService,
    transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;

use crate::logging::Logger;
use crate::types::ToolDescriptor;

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Failed to spawn server process: {0}")]
    Spawn(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

/// Output of one remote tool invocation, reduced to its text content.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Concatenated text content returned by the server
    pub content: String,
    /// Whether the server flagged the result as an error
    pub is_error: bool,
}

/// Transport seam between the session registry and a live server connection.
///
/// `McpClient` is the production implementation; tests substitute recording
/// fakes so registry and orchestrator behavior is checkable without spawning
/// subprocesses.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Invoke a tool on the remote server
    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolOutput>;

    /// Close the connection, releasing the underlying process
    async fn close(self: Box<Self>) -> McpResult<()>;
}

/// MCP client bound to one tool-provider subprocess
pub struct McpClient {
    /// The underlying rmcp running service
    client: RunningService<RoleClient, ClientInfo>,
    /// Logger
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// Spawn `command args...` as a child process and perform the MCP
    /// handshake over its stdio.
    pub async fn connect_command(
        command: &str,
        args: &[String],
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        logger.info(&format!(
            "[McpClient] Spawning server: {} {}",
            command,
            args.join(" ")
        ));

        let mut cmd = Command::new(command);
        cmd.args(args);

        let transport = TokioChildProcess::new(cmd).map_err(|e| McpError::Spawn(e.to_string()))?;

        let client_info = ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "mcpchat".to_string(),
                title: Some("mcpchat".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        };

        let client = client_info
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self { client, logger })
    }

    /// List the tools the server advertises, as descriptor snapshots
    pub async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        let result = self
            .client
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        self.logger
            .info(&format!("[McpClient] Listed {} tools", result.tools.len()));

        Ok(result.tools.into_iter().map(descriptor_from_rmcp).collect())
    }
}

/// Convert an rmcp tool definition into our connect-time snapshot
fn descriptor_from_rmcp(tool: RmcpTool) -> ToolDescriptor {
    ToolDescriptor {
        original_name: tool.name.to_string(),
        description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
        // input_schema is Arc<JsonObject>, convert to Value
        input_schema: serde_json::to_value(tool.input_schema.as_ref()).unwrap_or_default(),
    }
}

#[async_trait]
impl ToolTransport for McpClient {
    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolOutput> {
        self.logger
            .info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        let result = self
            .client
            .call_tool(params)
            .await
            .map_err(|e| McpError::ToolCallFailed(e.to_string()))?;

        // Content is Annotated<RawContent>; .raw gives the RawContent
        let content = result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ToolOutput {
            content,
            is_error: result.is_error.unwrap_or(false),
        })
    }

    async fn close(self: Box<Self>) -> McpResult<()> {
        self.logger.info("[McpClient] Closing connection");
        self.client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}
