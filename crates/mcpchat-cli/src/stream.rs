//! Simulated typing output
//!
//! The gateway replies arrive whole; this prints them chunk by chunk with
//! small pauses so the REPL reads like a streaming response. Punctuation
//! pauses slightly longer than ordinary word breaks.

use std::io::{self, Write};
use std::time::Duration;

use rand::Rng;

/// Print `text` with typing-style pacing, followed by a newline
pub async fn simulate_typed_output(text: &str) {
    let mut stdout = io::stdout();
    let mut chunk = String::new();

    for ch in text.chars() {
        chunk.push(ch);
        if is_boundary(ch) {
            let _ = stdout.write_all(chunk.as_bytes());
            let _ = stdout.flush();
            chunk.clear();
            tokio::time::sleep(delay_after(ch)).await;
        }
    }

    if !chunk.is_empty() {
        let _ = stdout.write_all(chunk.as_bytes());
    }
    let _ = stdout.write_all(b"\n");
    let _ = stdout.flush();
}

fn is_boundary(ch: char) -> bool {
    matches!(ch, ' ' | '.' | ',' | '!' | '?' | ':' | ';' | '\n')
}

fn delay_after(ch: char) -> Duration {
    let millis = match ch {
        '\n' => 80,
        '.' | '!' | '?' => 70,
        ',' | ':' | ';' => 60,
        _ => rand::thread_rng().gen_range(10..=40),
    };
    Duration::from_millis(millis)
}
