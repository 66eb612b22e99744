//! Raw blob command

use anyhow::{anyhow, Result};
use std::path::Path;

use crate::config::SettingsStore;

/// Print the stored blob verbatim
pub async fn raw_command(store_path: &Path, key: &str) -> Result<()> {
    let store = SettingsStore::load(store_path).await?;

    match store.get(key) {
        Some(raw) => {
            println!("{}", raw);
            Ok(())
        }
        None => Err(anyhow!("No stored settings for '{}'", key)),
    }
}
