//! Root of the `folio-core` library.
//!
//! Everything here is independent of the terminal: commands, the history
//! model, the staggered output queue and configuration. The `folio-tui`
//! crate drives it from a crossterm event loop.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output must go through the history.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod builtins;
pub mod command;
pub mod config;
mod error;
pub mod history;
pub mod input;
pub mod profile;
pub mod queue;
pub mod registry;
pub mod session;
pub mod state;
pub mod tokenizer;

pub use error::FolioErr;
pub use error::Result;
pub use session::Dispatch;
pub use session::Session;
