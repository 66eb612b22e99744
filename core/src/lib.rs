//! # autocomplete Core
//!
//! Core library for autocomplete - the settings layer of an inline text
//! completion client.
//!
//! It turns an untyped, possibly missing or corrupt settings blob into
//! strongly-typed [`CompletionSettings`], falling back to built-in defaults
//! whenever the stored data cannot be used, and applies field-level edits
//! from a settings form.

// Core modules
pub mod error;
pub mod settings;

// Re-export commonly used types
pub use error::{Error, Result, SettingsError};
pub use settings::{
    decode, encode, try_decode, CompletionSettings, SettingsEdit, SettingsEditor, SettingsField,
    SettingsSink,
};

/// Current version of the autocomplete-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
