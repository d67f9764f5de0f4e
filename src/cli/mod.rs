//! Command-line interface for artwork-embedder.
//!
//! Flags are validated once into a [`WorkMode`], then dispatched to the
//! embed or clean commands.

mod commands;

pub use commands::{Cli, WorkMode, run_command};
