//! Subcommand implementations
//!
//! Each command takes the loaded `Context` and returns `anyhow::Result`;
//! `main` renders the error and picks the exit code.

pub mod classify;
pub mod invalidate;
pub mod plan;
pub mod publish;

use cachet::Config;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub json: bool,
    pub verbose: u8,
}
