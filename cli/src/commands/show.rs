//! Settings display command

use anyhow::Result;
use autocomplete_core::settings::{decode, try_decode};
use colored::Colorize;
use std::path::Path;
use tracing::info;

use crate::config::SettingsStore;
use crate::output::SettingsFormatter;

const RATE_LIMITS_NOTE: &str = "If you're getting rate limit errors, there is not much to do here.
OpenAI limits how much you can use their API. You can either upgrade your plan
(https://platform.openai.com/account/billing/overview) or set up a fallback
preset under another --key. A fallback is used while the completion client
waits for the rate limit to reset.";

/// Show the effective settings for a key
pub async fn show_command(store_path: &Path, key: &str) -> Result<()> {
    info!("Showing settings '{}' from {}", key, store_path.display());

    let store = SettingsStore::load(store_path).await?;
    let raw = store.get(key);
    let settings = decode(raw);

    println!("⚙️  Completion settings '{}'\n", key);

    match raw.map(try_decode) {
        None => println!("{}\n", "No stored settings, using built-in defaults".yellow()),
        Some(Err(e)) => println!(
            "{}\n",
            format!("Stored settings are invalid ({}), using built-in defaults", e).yellow()
        ),
        Some(Ok(_)) => {}
    }

    let formatter = SettingsFormatter::new();
    println!("{}\n", formatter.format_note("Rate limits", RATE_LIMITS_NOTE));
    println!("{}", formatter.format_settings(&settings));

    if !settings.has_prefix_placeholder() {
        println!(
            "\n{}",
            "⚠️  User prompt has no {{prefix}} placeholder; no document context will be sent"
                .yellow()
        );
    }

    Ok(())
}
