//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to launch tool-provider servers as child
//! processes and talk to them over stdio.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use mcpchat_core::logging::{Logger, NoOpLogger};
//! use mcpchat_core::mcp::{McpClient, ToolTransport};
//! use serde_json::json;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
//!
//! // Spawn a server subprocess and complete the handshake
//! let client = McpClient::connect_command("uvx", &["mcp-server-fetch".into()], logger).await?;
//!
//! // Snapshot the advertised tools
//! let tools = client.list_tools().await?;
//!
//! // Call a tool (`call_tool` lives on the `ToolTransport` trait)
//! let output = client.call_tool("fetch", json!({"url": "https://example.com"})).await?;
//! ```

mod client;

pub use client::{McpClient, McpError, McpResult, ToolOutput, ToolTransport};
