//! Reset command

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config::SettingsStore;

/// Drop the stored blob so the defaults apply again
pub async fn reset_command(store_path: &Path, key: &str) -> Result<()> {
    let mut store = SettingsStore::load(store_path).await?;

    if store.remove(key) {
        store.save().await?;
        info!("Removed settings '{}' from {}", key, store_path.display());
        println!("🔄 Settings '{}' reset to built-in defaults", key);
    } else {
        println!("Settings '{}' already use the built-in defaults", key);
    }

    Ok(())
}
