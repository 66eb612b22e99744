//! CLI-specific output formatting
//!
//! Renders settings for the terminal in place of the settings form.

pub mod formatter;

pub use formatter::{format_number, SettingsFormatter};
