//! Interactive read-eval-print loop
//!
//! Reads queries from stdin one line at a time. `clear` drops the
//! conversation history, `q` or `quit` exits. A failed query is printed and
//! the loop continues with the next prompt.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use mcpchat_core::{ConversationOrchestrator, SessionRegistry};

use crate::stream::simulate_typed_output;

/// Run the REPL until EOF or an exit command
pub async fn run(
    orchestrator: &mut ConversationOrchestrator,
    registry: &SessionRegistry,
) -> io::Result<()> {
    println!(
        "\nMCP chat client started with server(s): {}",
        registry.session_names().join(", ")
    );
    println!("Type your queries, 'clear' to reset history, or 'q' to quit.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nUser: ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // EOF
            break;
        };
        let query = line.trim();

        if query.is_empty() {
            continue;
        }

        match query {
            "q" | "quit" => break,
            "clear" => {
                orchestrator.clear_history();
                println!("Conversation history cleared.");
                continue;
            }
            _ => {}
        }

        match orchestrator.process_query(registry, query).await {
            Ok(answer) => {
                print!("\nAssistant: ");
                io::stdout().flush()?;
                simulate_typed_output(&answer).await;
            }
            Err(e) => {
                eprintln!("\nError: {}", e);
            }
        }
    }

    Ok(())
}
