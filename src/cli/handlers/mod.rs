//! Command handlers for the CLI.

mod completions;
mod config;
mod export;

pub use completions::handle_completions;
pub use config::handle_config;
pub use export::handle_export;
