//! Tool catalog
//!
//! Flattens the per-server tool snapshots in a [`SessionRegistry`] into one
//! model-facing namespace. Each entry carries a composite `server:tool` name
//! so a reply from the model can be routed back to the right session, and a
//! description prefixed with the server name so the model can tell same-named
//! tools apart.

use serde_json::Value;

use crate::gateway::ToolDefinition;
use crate::registry::SessionRegistry;

/// Separator between server name and tool name in composite names
pub const COMPOSITE_SEPARATOR: char = ':';

/// One tool in the flattened, model-facing namespace
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeToolEntry {
    /// Model-facing name, `server:tool`
    pub composite_name: String,
    /// Description prefixed with the owning server, `[server] desc`
    pub description: String,
    /// JSON schema for the tool's arguments
    pub input_schema: Value,
    /// Owning server session
    pub server_name: String,
    /// Tool name as the server advertised it
    pub original_name: String,
}

/// Flattened view over every connected server's tools
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: Vec<CompositeToolEntry>,
}

impl ToolCatalog {
    /// Build a catalog from the registry's current sessions.
    ///
    /// Pure read: iterates sessions in connection order, and each session's
    /// tools in advertised order. Composite names are unique as long as
    /// session names are, which the registry enforces.
    pub fn build(registry: &SessionRegistry) -> Self {
        let entries = registry
            .sessions()
            .iter()
            .flat_map(|session| {
                session.tools.iter().map(|tool| CompositeToolEntry {
                    composite_name: format!(
                        "{}{}{}",
                        session.name, COMPOSITE_SEPARATOR, tool.original_name
                    ),
                    description: format!("[{}] {}", session.name, tool.description),
                    input_schema: tool.input_schema.clone(),
                    server_name: session.name.clone(),
                    original_name: tool.original_name.clone(),
                })
            })
            .collect();

        Self { entries }
    }

    /// Resolve a composite name to `(server, original_tool)`.
    ///
    /// Returns `None` for names not present in the catalog, including names
    /// without a separator.
    pub fn resolve(&self, composite_name: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|e| e.composite_name == composite_name)
            .map(|e| (e.server_name.as_str(), e.original_name.as_str()))
    }

    /// The catalog as gateway tool definitions, in catalog order
    pub fn gateway_tools(&self) -> Vec<ToolDefinition> {
        self.entries
            .iter()
            .map(|e| ToolDefinition {
                name: e.composite_name.clone(),
                description: e.description.clone(),
                parameters: e.input_schema.clone(),
            })
            .collect()
    }

    /// Entries in catalog order
    pub fn entries(&self) -> &[CompositeToolEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{Logger, NoOpLogger};
    use crate::mcp::{McpResult, ToolOutput, ToolTransport};
    use crate::registry::ServerSession;
    use crate::types::ToolDescriptor;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct StubTransport;

    #[async_trait]
    impl ToolTransport for StubTransport {
        async fn call_tool(&self, _name: &str, _arguments: Value) -> McpResult<ToolOutput> {
            Ok(ToolOutput {
                content: String::new(),
                is_error: false,
            })
        }

        async fn close(self: Box<Self>) -> McpResult<()> {
            Ok(())
        }
    }

    fn registry_with(sessions: Vec<(&str, Vec<ToolDescriptor>)>) -> SessionRegistry {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
        let mut registry = SessionRegistry::new(logger);
        for (name, tools) in sessions {
            registry.register_session(ServerSession {
                name: name.to_string(),
                transport: Box::new(StubTransport),
                tools,
            });
        }
        registry
    }

    #[test]
    fn test_build_flattens_every_tool() {
        let registry = registry_with(vec![
            (
                "calc",
                vec![
                    ToolDescriptor::new("add", "Add two numbers"),
                    ToolDescriptor::new("sub", "Subtract"),
                ],
            ),
            ("fetch", vec![ToolDescriptor::new("get", "Fetch a URL")]),
        ]);

        let catalog = ToolCatalog::build(&registry);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].composite_name, "calc:add");
        assert_eq!(catalog.entries()[1].composite_name, "calc:sub");
        assert_eq!(catalog.entries()[2].composite_name, "fetch:get");
        assert_eq!(catalog.entries()[0].description, "[calc] Add two numbers");
    }

    #[test]
    fn test_same_tool_name_on_two_servers_stays_distinct() {
        let registry = registry_with(vec![
            ("alpha", vec![ToolDescriptor::new("search", "Search alpha")]),
            ("beta", vec![ToolDescriptor::new("search", "Search beta")]),
        ]);

        let catalog = ToolCatalog::build(&registry);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("alpha:search"), Some(("alpha", "search")));
        assert_eq!(catalog.resolve("beta:search"), Some(("beta", "search")));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = registry_with(vec![("calc", vec![ToolDescriptor::new("add", "Add")])]);
        let catalog = ToolCatalog::build(&registry);
        assert_eq!(catalog.resolve("calc:missing"), None);
        assert_eq!(catalog.resolve("no-separator"), None);
    }

    #[test]
    fn test_gateway_tools_carry_schema() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "number" }, "b": { "type": "number" } },
            "required": ["a", "b"]
        });
        let registry = registry_with(vec![(
            "calc",
            vec![ToolDescriptor::new("add", "Add two numbers").with_schema(schema.clone())],
        )]);

        let catalog = ToolCatalog::build(&registry);
        let tools = catalog.gateway_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "calc:add");
        assert_eq!(tools[0].parameters, schema);
    }

    #[test]
    fn test_empty_registry_builds_empty_catalog() {
        let registry = registry_with(vec![]);
        let catalog = ToolCatalog::build(&registry);
        assert!(catalog.is_empty());
        assert!(catalog.gateway_tools().is_empty());
    }
}
