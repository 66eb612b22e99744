//! Settings store discovery for autocomplete
//!
//! Resolves which store file to use, first match wins:
//! 1. --store flag or AUTOCOMPLETE_STORE (highest priority)
//! 2. Current working directory: ./autocomplete.json
//! 3. XDG config: $XDG_CONFIG_HOME/autocomplete/settings.json or the platform config dir
//!
//! When nothing exists yet, the XDG location is where a new store is created.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store file name looked up in the working directory
pub const LOCAL_STORE_FILE: &str = "autocomplete.json";

/// Store file name inside the config directory
const STORE_FILE_NAME: &str = "settings.json";

/// Locates the settings store file
pub struct StoreLocator {
    /// Explicit store path
    store_override: Option<PathBuf>,
    /// Directory searched for a local store
    working_dir: Option<PathBuf>,
}

impl StoreLocator {
    /// Create a new locator
    pub fn new() -> Self {
        Self {
            store_override: None,
            working_dir: None,
        }
    }

    /// Set store path override
    pub fn with_store_override(mut self, path: PathBuf) -> Self {
        self.store_override = Some(path);
        self
    }

    /// Search this directory instead of the process working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Resolve the store path
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store_override {
            let path = expand_path(path)?;
            debug!("Using store override: {}", path.display());
            return Ok(path);
        }

        if let Some(path) = self.try_local()? {
            debug!("Using local store: {}", path.display());
            return Ok(path);
        }

        let path = Self::default_store_path();
        debug!("Using default store: {}", path.display());
        Ok(path)
    }

    /// Default store path in the user config directory
    pub fn default_store_path() -> PathBuf {
        let mut path = Self::get_xdg_config_dir()
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("autocomplete");
        path.push(STORE_FILE_NAME);
        path
    }

    /// Try the working directory
    fn try_local(&self) -> Result<Option<PathBuf>> {
        let dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let local = dir.join(LOCAL_STORE_FILE);
        Ok(local.is_file().then_some(local))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }
}

impl Default for StoreLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `~` and environment variables in a path
fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow!("Store path is not valid UTF-8: {}", path.display()))?;
    let expanded = shellexpand::full(raw)
        .map_err(|e| anyhow!("Failed to expand store path '{}': {}", raw, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
