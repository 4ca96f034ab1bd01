//! Command-line argument parsing
//!
//! Usage: `mcpchat [config.json] [COMMAND "ARGS" NAME]...`
//!
//! An optional leading `.json` path names the config file. The remaining
//! arguments are consumed as triples, each describing one extra server to
//! launch: the command to run, a quoted whitespace-separated argument string,
//! and the session name. Trailing arguments that do not form a complete
//! triple are reported back so the caller can warn about them.

use std::path::PathBuf;

use mcpchat_core::ServerSpec;

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    /// Config file path, if the first argument ended in `.json`
    pub config_path: Option<PathBuf>,
    /// Extra servers given as triples, in order
    pub servers: Vec<ServerSpec>,
    /// Trailing arguments that did not form a complete triple
    pub leftover: Vec<String>,
}

/// Parse the arguments after the program name
pub fn parse(args: &[String]) -> CliArgs {
    let mut parsed = CliArgs::default();
    let mut rest = args;

    if let Some(first) = rest.first() {
        if first.ends_with(".json") {
            parsed.config_path = Some(PathBuf::from(first));
            rest = &rest[1..];
        }
    }

    let mut chunks = rest.chunks_exact(3);
    for chunk in &mut chunks {
        let command = chunk[0].clone();
        let server_args = split_quoted(&chunk[1]);
        let name = chunk[2].clone();
        parsed
            .servers
            .push(ServerSpec::package(command, server_args, name));
    }
    parsed.leftover = chunks.remainder().to_vec();

    parsed
}

/// Strip one layer of matching quotes and split on whitespace
fn split_quoted(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
        })
        .unwrap_or(trimmed);
    inner.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_path_only() {
        let parsed = parse(&strings(&["servers.json"]));
        assert_eq!(parsed.config_path, Some(PathBuf::from("servers.json")));
        assert!(parsed.servers.is_empty());
        assert!(parsed.leftover.is_empty());
    }

    #[test]
    fn test_single_triple() {
        let parsed = parse(&strings(&["uvx", "\"mcp-server-fetch\"", "fetch"]));
        assert!(parsed.config_path.is_none());
        assert_eq!(
            parsed.servers,
            vec![ServerSpec::package(
                "uvx",
                vec!["mcp-server-fetch".to_string()],
                "fetch"
            )]
        );
    }

    #[test]
    fn test_config_plus_triples() {
        let parsed = parse(&strings(&[
            "servers.json",
            "python",
            "\"servers/add.py --verbose\"",
            "add",
            "deno",
            "'run server.ts'",
            "ts",
        ]));
        assert_eq!(parsed.config_path, Some(PathBuf::from("servers.json")));
        assert_eq!(parsed.servers.len(), 2);
        assert_eq!(
            parsed.servers[0],
            ServerSpec::package(
                "python",
                vec!["servers/add.py".to_string(), "--verbose".to_string()],
                "add"
            )
        );
        assert_eq!(
            parsed.servers[1],
            ServerSpec::package("deno", vec!["run".to_string(), "server.ts".to_string()], "ts")
        );
    }

    #[test]
    fn test_final_complete_triple_is_kept() {
        // Exactly one triple and nothing else must not be dropped
        let parsed = parse(&strings(&["node", "\"server.js\"", "js"]));
        assert_eq!(parsed.servers.len(), 1);
        assert!(parsed.leftover.is_empty());
    }

    #[test]
    fn test_incomplete_triple_reported() {
        let parsed = parse(&strings(&["uvx", "\"mcp-server-fetch\""]));
        assert!(parsed.servers.is_empty());
        assert_eq!(parsed.leftover, strings(&["uvx", "\"mcp-server-fetch\""]));
    }

    #[test]
    fn test_unquoted_args_still_split() {
        let parsed = parse(&strings(&["python", "server.py --port 8080", "py"]));
        assert_eq!(
            parsed.servers[0],
            ServerSpec::package(
                "python",
                vec![
                    "server.py".to_string(),
                    "--port".to_string(),
                    "8080".to_string()
                ],
                "py"
            )
        );
    }

    #[test]
    fn test_empty_args() {
        let parsed = parse(&[]);
        assert_eq!(parsed, CliArgs::default());
    }
}
