//! mcpchat binary
//!
//! Connects the configured MCP tool-provider servers, builds the gateway from
//! the environment, and hands control to the REPL. Sessions are always torn
//! down before exit, including on Ctrl-C.

mod args;
mod repl;
mod stream;

use std::sync::Arc;

use mcpchat_core::{
    ClientConfig, ConsoleLogger, ConversationOrchestrator, Gateway, Logger, OpenAiGateway,
    SessionRegistry,
};

#[tokio::main]
async fn main() {
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let cli = args::parse(&raw);
    if !cli.leftover.is_empty() {
        logger.warn(&format!(
            "Ignoring trailing arguments that do not form a (command, args, name) triple: {}",
            cli.leftover.join(" ")
        ));
    }

    let config = ClientConfig::load(cli.config_path.as_deref(), &logger);

    let mut registry = SessionRegistry::new(logger.clone());
    for spec in config.servers.iter().chain(cli.servers.iter()) {
        registry.connect(spec).await;
    }

    if registry.is_empty() {
        logger.error("No servers connected; nothing to chat with. Exiting.");
        std::process::exit(1);
    }

    let gateway: Arc<dyn Gateway> = match OpenAiGateway::from_env(logger.clone()) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            logger.error(&format!("Cannot reach the model endpoint: {}", e));
            registry.teardown().await;
            std::process::exit(1);
        }
    };

    let mut orchestrator =
        ConversationOrchestrator::new(gateway, config.max_turns(), logger.clone());

    tokio::select! {
        result = repl::run(&mut orchestrator, &registry) => {
            if let Err(e) = result {
                logger.error(&format!("REPL terminated: {}", e));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            logger.info("Interrupted, shutting down");
        }
    }

    registry.teardown().await;
}
