//! Conversation orchestrator
//!
//! Drives one user query through the model round-trip loop: submit the
//! working list, dispatch any tool calls the model requested strictly in
//! order, feed the results back, and repeat until the model answers in plain
//! text. Only the final user/assistant exchange enters persistent history;
//! tool traffic stays in the per-query working list.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::ToolCatalog;
use crate::gateway::{Gateway, GatewayError, GatewayReply};
use crate::history::ConversationHistory;
use crate::logging::Logger;
use crate::registry::{RegistryError, SessionRegistry};
use crate::types::ConversationMessage;

/// Orchestrator errors
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Where a query stands in its round-trip loop
enum QueryState {
    /// Waiting on the model
    ModelPending,
    /// The model requested tool calls that have not been dispatched yet
    ToolDispatchPending(GatewayReply),
    /// The model answered in plain text; the query is complete
    Responding(String),
}

/// Drives queries against the gateway and a session registry
pub struct ConversationOrchestrator {
    gateway: Arc<dyn Gateway>,
    history: ConversationHistory,
    logger: Arc<dyn Logger>,
}

impl ConversationOrchestrator {
    /// Create an orchestrator retaining at most `max_turns` exchanges
    pub fn new(gateway: Arc<dyn Gateway>, max_turns: usize, logger: Arc<dyn Logger>) -> Self {
        Self {
            gateway,
            history: ConversationHistory::new(max_turns),
            logger,
        }
    }

    /// Process one user query to completion and return the reply text.
    ///
    /// The catalog is rebuilt from the registry at the start of every query,
    /// and the full tool list is offered on every model call within it. Tool
    /// calls are dispatched one at a time in the order the model gave them.
    /// A name the catalog cannot resolve becomes an inline error fragment in
    /// the answer; a dispatch failure aborts the query.
    pub async fn process_query(
        &mut self,
        registry: &SessionRegistry,
        query: &str,
    ) -> OrchestratorResult<String> {
        let catalog = ToolCatalog::build(registry);
        let tools = catalog.gateway_tools();

        self.logger.debug(&format!(
            "[Orchestrator] Processing query with {} tool(s) available",
            tools.len()
        ));

        let mut working = self.history.messages();
        working.push(ConversationMessage::user(query));

        let mut fragments: Vec<String> = Vec::new();
        let mut state = QueryState::ModelPending;

        let answer = loop {
            state = match state {
                QueryState::ModelPending => {
                    let reply = self.gateway.complete(&working, &tools).await?;
                    if reply.has_tool_calls() {
                        QueryState::ToolDispatchPending(reply)
                    } else {
                        QueryState::Responding(reply.text.unwrap_or_default())
                    }
                }

                QueryState::ToolDispatchPending(reply) => {
                    if let Some(text) = reply.text {
                        fragments.push(text);
                    }

                    for call in reply.tool_calls {
                        let Some((server, tool)) = catalog.resolve(&call.name) else {
                            self.logger.warn(&format!(
                                "[Orchestrator] Model requested unknown tool '{}'",
                                call.name
                            ));
                            fragments.push(format!(
                                "[Error: tool '{}' not found on any connected server]",
                                call.name
                            ));
                            continue;
                        };

                        let result = registry
                            .dispatch(server, tool, call.arguments.clone())
                            .await?;

                        working.push(ConversationMessage::tool_calls(vec![call.clone()]));
                        working.push(ConversationMessage::tool_result(&call.id, result));
                    }

                    QueryState::ModelPending
                }

                QueryState::Responding(text) => {
                    if !text.is_empty() {
                        fragments.push(text);
                    }
                    break fragments.join("\n");
                }
            };
        };

        self.history.push_turn(query, answer.clone());
        Ok(answer)
    }

    /// Drop all persistent history. Live sessions are unaffected.
    pub fn clear_history(&mut self) {
        self.logger.info("[Orchestrator] History cleared");
        self.history.clear();
    }

    /// The persistent history
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }
}
