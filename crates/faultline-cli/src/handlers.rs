//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod format;
mod render;
mod scenario;
pub mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use format::handle_format;
pub use render::handle_render;
pub use scenario::handle_scenario;
