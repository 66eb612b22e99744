//! # autocomplete CLI
//!
//! Command-line editor for the settings of an inline text-completion client.
//!
//! ## Usage
//!
//! - `autocomplete` / `autocomplete show` - Show the effective settings
//! - `autocomplete set temperature 0.7` - Edit a field
//! - `autocomplete unset temperature` - Clear an optional field
//! - `autocomplete reset` - Go back to the built-in defaults
//! - `autocomplete check` - Validate the stored settings
//!
//! Stored settings that cannot be decoded are never fatal: the built-in
//! defaults are used instead, exactly as the completion client does.

use anyhow::Result;
use autocomplete_core::SettingsField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{
    check_command, defaults_command, raw_command, reset_command, set_command, show_command,
    unset_command, EditValue,
};
use config::StoreLocator;

/// Settings identifier used by the chat completion backend
const DEFAULT_KEY: &str = "chatgpt";

/// autocomplete - View and edit completion settings
#[derive(Parser)]
#[command(name = "autocomplete")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "View and edit the settings of an inline text-completion client")]
#[command(long_about = None)]
struct Cli {
    /// Settings store file
    #[arg(short, long, env = "AUTOCOMPLETE_STORE", global = true)]
    store: Option<PathBuf>,

    /// Settings identifier within the store
    #[arg(short, long, env = "AUTOCOMPLETE_KEY", default_value = DEFAULT_KEY, global = true)]
    key: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective settings
    Show,

    /// Set a field from text, as typed into the settings form
    Set {
        /// Field to edit (e.g. system_prompt, temperature, top_p)
        field: SettingsField,

        /// New value
        #[arg(
            allow_hyphen_values = true,
            required_unless_present = "from_file",
            conflicts_with = "from_file"
        )]
        value: Option<String>,

        /// Read the new value from a file
        #[arg(long, value_name = "PATH")]
        from_file: Option<PathBuf>,
    },

    /// Clear an optional numeric field
    Unset {
        /// Field to clear
        field: SettingsField,
    },

    /// Remove the stored settings so the built-in defaults apply
    Reset,

    /// Validate the stored settings
    Check,

    /// Print the stored settings blob verbatim
    Raw,

    /// Print the built-in default settings
    Defaults {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Build a store locator from CLI arguments
fn build_store_locator(cli: &Cli) -> StoreLocator {
    let mut locator = StoreLocator::new();

    if let Some(store) = &cli.store {
        locator = locator.with_store_override(store.clone());
    }

    locator
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let locate_store = || build_store_locator(&cli).locate();
    let key = cli.key.as_str();

    match cli.command.as_ref().unwrap_or(&Commands::Show) {
        Commands::Show => show_command(&locate_store()?, key).await,
        Commands::Set {
            field,
            value,
            from_file,
        } => {
            let value = match from_file {
                Some(path) => EditValue::File(path.clone()),
                None => EditValue::Inline(value.clone().unwrap_or_default()),
            };
            set_command(&locate_store()?, key, *field, value).await
        }
        Commands::Unset { field } => unset_command(&locate_store()?, key, *field).await,
        Commands::Reset => reset_command(&locate_store()?, key).await,
        Commands::Check => check_command(&locate_store()?, key).await,
        Commands::Raw => raw_command(&locate_store()?, key).await,
        Commands::Defaults { pretty } => defaults_command(*pretty).await,
    }
}
