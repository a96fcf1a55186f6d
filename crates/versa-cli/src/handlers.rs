//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod values;
mod versions;

pub use completions::handle_completions;
pub use config::handle_config;
pub use values::handle_values;
pub use versions::{handle_compare, handle_parse, handle_sort};
