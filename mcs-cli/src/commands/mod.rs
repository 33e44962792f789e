//! CLI command implementations.
//!
//! - `config`: print the resolved configuration
//! - `completions`: generate shell completion scripts

pub mod completions;
pub mod config;

pub use completions::CompletionsCommand;
pub use config::ConfigCommand;
