//! Client configuration
//!
//! Loads the optional JSON config file describing which tool-provider servers
//! to launch at startup, plus client-level settings. A missing or invalid
//! file is never fatal: loading falls back to the defaults and logs what
//! happened.
//!
//! ```json
//! {
//!   "servers": [
//!     { "type": "script", "path": "servers/simple_add.py", "name": "simple_add" },
//!     { "type": "package", "command": "uvx", "args": ["mcp-server-fetch"], "name": "fetch" }
//!   ],
//!   "history": { "max_turns": 64 }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::logging::Logger;

/// Default bound on persistent history, in user/assistant turns.
pub const DEFAULT_MAX_TURNS: usize = 64;

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// One tool-provider server to launch at startup.
///
/// `script` servers are python files run via the interpreter; `package`
/// servers are arbitrary commands with arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerSpec {
    Script {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Package {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl ServerSpec {
    /// Convenience constructor for a script server
    pub fn script(path: impl Into<String>, name: impl Into<String>) -> Self {
        ServerSpec::Script {
            path: path.into(),
            name: Some(name.into()),
        }
    }

    /// Convenience constructor for a package server
    pub fn package(
        command: impl Into<String>,
        args: Vec<String>,
        name: impl Into<String>,
    ) -> Self {
        ServerSpec::Package {
            command: command.into(),
            args,
            name: Some(name.into()),
        }
    }

    /// The session name this server registers under.
    ///
    /// When no explicit name was given, scripts fall back to the file stem
    /// and packages to their first argument (or the command itself).
    pub fn resolved_name(&self) -> String {
        match self {
            ServerSpec::Script { path, name } => name.clone().unwrap_or_else(|| {
                Path::new(path)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.clone())
            }),
            ServerSpec::Package {
                command,
                args,
                name,
            } => name
                .clone()
                .or_else(|| args.first().cloned())
                .unwrap_or_else(|| command.clone()),
        }
    }

    /// The command and argument list to spawn for this server.
    pub fn command_line(&self) -> (String, Vec<String>) {
        match self {
            ServerSpec::Script { path, .. } => ("python".to_string(), vec![path.clone()]),
            ServerSpec::Package { command, args, .. } => (command.clone(), args.clone()),
        }
    }
}

/// Persistent-history settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySettings {
    /// Maximum number of user/assistant turns kept across queries.
    /// The oldest turn is evicted once the bound is exceeded.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
    /// Servers to connect at startup
    #[serde(default)]
    pub servers: Vec<ServerSpec>,

    /// Persistent-history settings
    #[serde(default)]
    pub history: Option<HistorySettings>,
}

impl ClientConfig {
    /// Bound on persistent history, falling back to the default when the
    /// config file carries no `history` section.
    pub fn max_turns(&self) -> usize {
        self.history
            .as_ref()
            .map(|h| h.max_turns)
            .unwrap_or(DEFAULT_MAX_TURNS)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any failure.
    ///
    /// `path` of `None` means no config file was requested. A missing or
    /// unparseable file is logged and replaced with the default config; it
    /// never aborts startup.
    pub fn load(path: Option<&Path>, logger: &Arc<dyn Logger>) -> Self {
        let Some(path) = path else {
            logger.info("No config file specified, using defaults");
            return Self::default();
        };

        if !path.exists() {
            logger.warn(&format!(
                "Config file {} does not exist, using defaults",
                path.display()
            ));
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                logger.info(&format!(
                    "Loaded {} server(s) from config file {}",
                    config.servers.len(),
                    path.display()
                ));
                config
            }
            Err(e) => {
                logger.warn(&format!(
                    "Failed to load config file {}: {}, using defaults",
                    path.display(),
                    e
                ));
                Self::default()
            }
        }
    }
}
