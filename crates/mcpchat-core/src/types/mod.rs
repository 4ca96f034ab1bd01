//! Core types shared across the client
//!
//! This module contains the conversation message variants and tool types used
//! by the registry, catalog, gateway, and orchestrator.

mod message;
mod tool;

pub use message::ConversationMessage;
pub use tool::{ToolCallRequest, ToolDescriptor};
