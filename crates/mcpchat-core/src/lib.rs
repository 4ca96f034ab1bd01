//! mcpchat-core
//!
//! Core library for an LLM chat client whose tools come from MCP (Model
//! Context Protocol) servers run as child processes. The pieces:
//!
//! - [`registry::SessionRegistry`]: owns the live server connections
//! - [`catalog::ToolCatalog`]: flattens their tools into one model-facing
//!   namespace of `server:tool` names
//! - [`gateway::Gateway`]: the chat-completion endpoint seam, with an
//!   OpenAI-compatible implementation
//! - [`orchestrator::ConversationOrchestrator`]: drives each query through
//!   the model/tool round-trip loop and keeps bounded history across queries

pub mod catalog;
pub mod config;
pub mod gateway;
pub mod history;
pub mod logging;
pub mod mcp;
pub mod orchestrator;
pub mod registry;
pub mod types;

pub use catalog::{CompositeToolEntry, ToolCatalog};
pub use config::{ClientConfig, ConfigError, HistorySettings, ServerSpec};
pub use gateway::{Gateway, GatewayError, GatewayReply, MockGateway, OpenAiGateway, ToolDefinition};
pub use history::ConversationHistory;
pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};
pub use mcp::{McpClient, McpError, ToolOutput, ToolTransport};
pub use orchestrator::{ConversationOrchestrator, OrchestratorError};
pub use registry::{RegistryError, ServerSession, SessionRegistry};
pub use types::{ConversationMessage, ToolCallRequest, ToolDescriptor};
