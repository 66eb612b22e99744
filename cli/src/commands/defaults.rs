//! Built-in defaults command

use anyhow::Result;
use autocomplete_core::settings::{encode, CompletionSettings};

/// Print the encoded built-in defaults
pub async fn defaults_command(pretty: bool) -> Result<()> {
    let defaults = CompletionSettings::defaults();

    let raw = if pretty {
        serde_json::to_string_pretty(defaults)?
    } else {
        encode(defaults)?
    };
    println!("{}", raw);

    Ok(())
}
