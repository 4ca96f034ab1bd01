//! Logging abstractions
//!
//! Every component takes an `Arc<dyn Logger>` so that the CLI, tests, and any
//! embedding application can decide where diagnostics go.

mod console;
mod noop;
mod traits;

pub use console::ConsoleLogger;
pub use noop::NoOpLogger;
pub use traits::{Logger, SharedLogger};
