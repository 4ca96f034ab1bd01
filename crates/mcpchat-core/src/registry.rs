//! Session registry
//!
//! Owns the live connections to tool-provider servers. Connections are added
//! one at a time; a failure to reach one server never aborts startup, it is
//! logged and the client keeps the sessions that did connect. Teardown closes
//! sessions in reverse connection order.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::ServerSpec;
use crate::logging::Logger;
use crate::mcp::{McpClient, ToolTransport};
use crate::types::ToolDescriptor;

/// Registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A dispatch named a server that holds no session. The catalog only
    /// resolves to connected servers, so this indicates a stale resolution.
    #[error("No connected server named '{0}'")]
    SessionNotFound(String),

    /// The remote tool invocation itself failed, either at the transport
    /// level or because the server flagged the result as an error.
    #[error("Tool '{tool}' on server '{server}' failed: {message}")]
    RemoteTool {
        server: String,
        tool: String,
        message: String,
    },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// One live server connection plus its connect-time tool snapshot
pub struct ServerSession {
    /// Unique session name, used as the composite-name prefix
    pub name: String,
    /// Live transport to the server
    pub transport: Box<dyn ToolTransport>,
    /// Tools the server advertised at connect time
    pub tools: Vec<ToolDescriptor>,
}

/// Registry of live tool-provider sessions
pub struct SessionRegistry {
    /// Sessions in connection order
    sessions: Vec<ServerSession>,
    /// Logger
    logger: Arc<dyn Logger>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            sessions: Vec::new(),
            logger,
        }
    }

    /// Connect one server and register its session.
    ///
    /// A duplicate name is a logged no-op, leaving the existing session
    /// untouched. Spawn, handshake, or listing failures are logged and
    /// swallowed so one bad server never takes down the rest.
    pub async fn connect(&mut self, spec: &ServerSpec) {
        let name = spec.resolved_name();

        if self.contains(&name) {
            self.logger.warn(&format!(
                "[SessionRegistry] Server '{}' already connected, skipping",
                name
            ));
            return;
        }

        let (command, args) = spec.command_line();

        let client = match McpClient::connect_command(&command, &args, self.logger.clone()).await {
            Ok(client) => client,
            Err(e) => {
                self.logger.error(&format!(
                    "[SessionRegistry] Failed to connect server '{}': {}",
                    name, e
                ));
                return;
            }
        };

        let tools = match client.list_tools().await {
            Ok(tools) => tools,
            Err(e) => {
                self.logger.error(&format!(
                    "[SessionRegistry] Failed to list tools for server '{}': {}",
                    name, e
                ));
                if let Err(e) = Box::new(client).close().await {
                    self.logger.warn(&format!(
                        "[SessionRegistry] Error closing server '{}': {}",
                        name, e
                    ));
                }
                return;
            }
        };

        self.logger.info(&format!(
            "[SessionRegistry] Connected server '{}' with {} tool(s): {}",
            name,
            tools.len(),
            tools
                .iter()
                .map(|t| t.original_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        self.sessions.push(ServerSession {
            name,
            transport: Box::new(client),
            tools,
        });
    }

    /// Register an already-built session. Duplicate names are a logged no-op.
    pub fn register_session(&mut self, session: ServerSession) {
        if self.contains(&session.name) {
            self.logger.warn(&format!(
                "[SessionRegistry] Server '{}' already connected, skipping",
                session.name
            ));
            return;
        }
        self.sessions.push(session);
    }

    /// Dispatch one tool call to the named server and return its text output.
    ///
    /// A result the server flagged as an error is surfaced as
    /// [`RegistryError::RemoteTool`], same as a transport failure.
    pub async fn dispatch(
        &self,
        server: &str,
        tool: &str,
        arguments: Value,
    ) -> RegistryResult<String> {
        let session = self
            .sessions
            .iter()
            .find(|s| s.name == server)
            .ok_or_else(|| RegistryError::SessionNotFound(server.to_string()))?;

        self.logger.debug(&format!(
            "[SessionRegistry] Dispatching {}:{} with args {}",
            server, tool, arguments
        ));

        let output = session
            .transport
            .call_tool(tool, arguments)
            .await
            .map_err(|e| RegistryError::RemoteTool {
                server: server.to_string(),
                tool: tool.to_string(),
                message: e.to_string(),
            })?;

        if output.is_error {
            return Err(RegistryError::RemoteTool {
                server: server.to_string(),
                tool: tool.to_string(),
                message: output.content,
            });
        }

        Ok(output.content)
    }

    /// Close all sessions, newest first. Close failures are logged, never
    /// propagated; the registry is empty afterwards regardless.
    pub async fn teardown(&mut self) {
        while let Some(session) = self.sessions.pop() {
            self.logger.info(&format!(
                "[SessionRegistry] Closing server '{}'",
                session.name
            ));
            if let Err(e) = session.transport.close().await {
                self.logger.warn(&format!(
                    "[SessionRegistry] Error closing server '{}': {}",
                    session.name, e
                ));
            }
        }
    }

    /// Whether a session with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.sessions.iter().any(|s| s.name == name)
    }

    /// Sessions in connection order
    pub fn sessions(&self) -> &[ServerSession] {
        &self.sessions
    }

    /// Session names in connection order
    pub fn session_names(&self) -> Vec<&str> {
        self.sessions.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::mcp::{McpError, McpResult, ToolOutput};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Transport fake that returns a fixed reply and records calls
    struct FakeTransport {
        reply: ToolOutput,
        fail: bool,
        calls: Arc<Mutex<Vec<(String, Value)>>>,
        closed: Arc<Mutex<Vec<String>>>,
        name: String,
    }

    impl FakeTransport {
        fn session(
            name: &str,
            tools: Vec<ToolDescriptor>,
            reply: &str,
            calls: Arc<Mutex<Vec<(String, Value)>>>,
            closed: Arc<Mutex<Vec<String>>>,
        ) -> ServerSession {
            ServerSession {
                name: name.to_string(),
                transport: Box::new(FakeTransport {
                    reply: ToolOutput {
                        content: reply.to_string(),
                        is_error: false,
                    },
                    fail: false,
                    calls,
                    closed,
                    name: name.to_string(),
                }),
                tools,
            }
        }
    }

    #[async_trait]
    impl ToolTransport for FakeTransport {
        async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<ToolOutput> {
            if self.fail {
                return Err(McpError::ToolCallFailed("connection reset".to_string()));
            }
            self.calls.lock().push((name.to_string(), arguments));
            Ok(self.reply.clone())
        }

        async fn close(self: Box<Self>) -> McpResult<()> {
            self.closed.lock().push(self.name.clone());
            Ok(())
        }
    }

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn shared<T>() -> Arc<Mutex<Vec<T>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_named_session() {
        let calls = shared();
        let closed = shared();
        let mut registry = SessionRegistry::new(logger());
        registry.register_session(FakeTransport::session(
            "calc",
            vec![ToolDescriptor::new("add", "Add two numbers")],
            "5",
            calls.clone(),
            closed.clone(),
        ));

        let result = registry
            .dispatch("calc", "add", json!({"a": 2, "b": 3}))
            .await
            .unwrap();
        assert_eq!(result, "5");
        assert_eq!(calls.lock().len(), 1);
        assert_eq!(calls.lock()[0].0, "add");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_server() {
        let registry = SessionRegistry::new(logger());
        let err = registry.dispatch("ghost", "add", json!({})).await;
        assert!(matches!(err, Err(RegistryError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_error_flagged_result_is_remote_tool_error() {
        let calls = shared();
        let closed = shared();
        let mut registry = SessionRegistry::new(logger());
        registry.register_session(ServerSession {
            name: "calc".to_string(),
            transport: Box::new(FakeTransport {
                reply: ToolOutput {
                    content: "division by zero".to_string(),
                    is_error: true,
                },
                fail: false,
                calls,
                closed,
                name: "calc".to_string(),
            }),
            tools: vec![],
        });

        let err = registry.dispatch("calc", "div", json!({})).await;
        match err {
            Err(RegistryError::RemoteTool { message, .. }) => {
                assert_eq!(message, "division by zero");
            }
            other => panic!("expected RemoteTool error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_remote_tool_error() {
        let calls = shared();
        let closed = shared();
        let mut registry = SessionRegistry::new(logger());
        registry.register_session(ServerSession {
            name: "calc".to_string(),
            transport: Box::new(FakeTransport {
                reply: ToolOutput {
                    content: String::new(),
                    is_error: false,
                },
                fail: true,
                calls,
                closed,
                name: "calc".to_string(),
            }),
            tools: vec![],
        });

        let err = registry.dispatch("calc", "add", json!({})).await;
        assert!(matches!(err, Err(RegistryError::RemoteTool { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_noop() {
        let calls = shared();
        let closed = shared();
        let mut registry = SessionRegistry::new(logger());
        registry.register_session(FakeTransport::session(
            "calc",
            vec![ToolDescriptor::new("add", "first")],
            "first",
            calls.clone(),
            closed.clone(),
        ));
        registry.register_session(FakeTransport::session(
            "calc",
            vec![ToolDescriptor::new("add", "second")],
            "second",
            calls.clone(),
            closed.clone(),
        ));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sessions()[0].tools[0].description, "first");
    }

    #[tokio::test]
    async fn test_teardown_closes_in_reverse_order() {
        let calls = shared();
        let closed = shared();
        let mut registry = SessionRegistry::new(logger());
        for name in ["alpha", "beta", "gamma"] {
            registry.register_session(FakeTransport::session(
                name,
                vec![],
                "",
                calls.clone(),
                closed.clone(),
            ));
        }

        registry.teardown().await;

        assert!(registry.is_empty());
        assert_eq!(*closed.lock(), vec!["gamma", "beta", "alpha"]);
    }

    #[tokio::test]
    async fn test_session_names_in_connection_order() {
        let calls = shared();
        let closed = shared();
        let mut registry = SessionRegistry::new(logger());
        for name in ["alpha", "beta"] {
            registry.register_session(FakeTransport::session(
                name,
                vec![],
                "",
                calls.clone(),
                closed.clone(),
            ));
        }
        assert_eq!(registry.session_names(), vec!["alpha", "beta"]);
    }
}
