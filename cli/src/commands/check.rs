//! Stored settings validation command

use anyhow::{anyhow, Result};
use autocomplete_core::settings::try_decode;
use std::path::Path;
use tracing::debug;

use crate::config::SettingsStore;

/// Report whether the stored blob decodes, and why not if it doesn't
pub async fn check_command(store_path: &Path, key: &str) -> Result<()> {
    let store = SettingsStore::load(store_path).await?;

    let Some(raw) = store.get(key) else {
        println!(
            "ℹ️  No stored settings for '{}'; built-in defaults are in effect",
            key
        );
        return Ok(());
    };

    debug!("Checking {} bytes of stored settings", raw.len());

    match try_decode(raw) {
        Ok(settings) => {
            println!("✅ Stored settings '{}' are valid", key);
            if settings.is_default() {
                println!("   They match the built-in defaults");
            }
            if !settings.has_prefix_placeholder() {
                println!("⚠️  User prompt has no {{{{prefix}}}} placeholder");
            }
            Ok(())
        }
        Err(e) => Err(anyhow!(
            "Stored settings '{}' are invalid and will be replaced by defaults: {}",
            key,
            e
        )),
    }
}
