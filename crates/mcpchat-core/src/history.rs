//! Persistent conversation history
//!
//! A bounded ring of user/assistant turns kept across queries. Only plain
//! text survives here: tool-call records and tool results live in the working
//! list for a single query and never enter history. Once the bound is
//! exceeded, the oldest turn is evicted.

use std::collections::VecDeque;

use crate::types::ConversationMessage;

/// One retained user/assistant exchange
#[derive(Debug, Clone, PartialEq)]
struct Turn {
    user: String,
    assistant: String,
}

/// Bounded ring of completed turns
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<Turn>,
    max_turns: usize,
}

impl ConversationHistory {
    /// Create a history keeping at most `max_turns` exchanges
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns.min(64)),
            max_turns,
        }
    }

    /// Append a completed turn, evicting the oldest once over the bound
    pub fn push_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push_back(Turn {
            user: user.into(),
            assistant: assistant.into(),
        });
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// The retained turns as messages, oldest first, for seeding a new
    /// query's working list
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.turns
            .iter()
            .flat_map(|t| {
                [
                    ConversationMessage::user(t.user.clone()),
                    ConversationMessage::assistant(t.assistant.clone()),
                ]
            })
            .collect()
    }

    /// Drop all retained turns
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Number of retained turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns are retained
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
