//! Mock gateway for testing
//!
//! Plays back a scripted queue of replies and records what each call was
//! given, so orchestrator tests can assert on both sides of the seam.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Gateway, GatewayError, GatewayReply, GatewayResult, ToolDefinition};
use crate::types::ConversationMessage;

/// Snapshot of one `complete` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The working list as submitted
    pub messages: Vec<ConversationMessage>,
    /// Names of the tools offered on this call
    pub tool_names: Vec<String>,
}

/// Gateway that replays scripted replies
#[derive(Default)]
pub struct MockGateway {
    replies: Mutex<VecDeque<GatewayReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    /// Create a mock with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that will play back `replies` in order
    pub fn with_replies(replies: Vec<GatewayReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue one more reply
    pub fn push_reply(&self, reply: GatewayReply) {
        self.replies.lock().push_back(reply);
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls recorded so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> GatewayResult<GatewayReply> {
        self.calls.lock().push(RecordedCall {
            messages: messages.to_vec(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
        });

        self.replies
            .lock()
            .pop_front()
            .ok_or(GatewayError::EmptyResponse)
    }
}
