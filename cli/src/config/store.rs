//! JSON key-value store for settings blobs
//!
//! The store file maps a settings identifier to the raw blob saved for it.
//! Blobs are kept verbatim; validating them is the codec's job.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Settings blobs persisted in a single JSON file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    /// Path of the store file
    path: PathBuf,
    /// Raw blobs keyed by settings identifier
    entries: BTreeMap<String, String>,
}

impl SettingsStore {
    /// Load the store, treating a missing file as empty
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("Store file does not exist yet: {}", path.display());
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read store file: {}", path.display()))?;
        let entries: BTreeMap<String, String> = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse store file: {}", path.display()))?
        };

        debug!("Loaded {} settings entries from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    /// Save the store, creating parent directories as needed
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create store directory: {}", parent.display())
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write store file: {}", self.path.display()))?;

        info!("Saved settings store to {}", self.path.display());
        Ok(())
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw blob stored under a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Replace the raw blob stored under a key
    pub fn set(&mut self, key: &str, raw: String) {
        self.entries.insert(key.to_string(), raw);
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}
