//! Tool descriptor and tool-call types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool advertised by a connected server.
///
/// Snapshot taken once at connect time; the descriptor is never refreshed
/// while the session lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name as the server knows it (unqualified)
    #[serde(rename = "originalName")]
    pub original_name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Create a new tool descriptor
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            original_name: name.into(),
            description: description.into(),
            input_schema: Value::Object(Default::default()),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// A tool invocation requested by the model.
///
/// `name` carries the composite `server:tool` identifier as presented to the
/// model through the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    /// Unique identifier for this tool call (assigned by the model endpoint)
    pub id: String,
    /// Composite tool name (`server:tool`)
    pub name: String,
    /// Input arguments for the tool
    pub arguments: Value,
}

impl ToolCallRequest {
    /// Create a new tool-call request
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_builder() {
        let tool = ToolDescriptor::new("add", "Adds two integers").with_schema(json!({
            "type": "object",
            "properties": {
                "a": { "type": "number" },
                "b": { "type": "number" }
            },
            "required": ["a", "b"]
        }));

        assert_eq!(tool.original_name, "add");
        assert!(tool.input_schema.get("properties").is_some());
    }

    #[test]
    fn test_tool_call_request() {
        let call = ToolCallRequest::new("call_1", "calc:add", json!({"a": 2, "b": 3}));
        assert_eq!(call.name, "calc:add");
        assert_eq!(call.arguments["a"], 2);
    }
}
