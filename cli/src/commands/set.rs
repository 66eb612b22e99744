//! Field edit commands

use anyhow::{Context, Result};
use autocomplete_core::settings::{
    CompletionSettings, FieldValue, SettingsEdit, SettingsEditor, SettingsField,
};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::SettingsStore;
use crate::output::SettingsFormatter;

/// Where the new value of a field comes from
#[derive(Debug, Clone)]
pub enum EditValue {
    /// Text typed on the command line
    Inline(String),
    /// Contents of a file, for long prompts
    File(PathBuf),
}

impl EditValue {
    async fn read(self) -> Result<String> {
        match self {
            EditValue::Inline(text) => Ok(text),
            EditValue::File(path) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read value file: {}", path.display())),
        }
    }
}

/// Set a field from raw input, as the settings form would
pub async fn set_command(
    store_path: &Path,
    key: &str,
    field: SettingsField,
    value: EditValue,
) -> Result<()> {
    let input = value.read().await?;
    debug!("Setting '{}' from {} bytes of input", field, input.len());

    let edit = SettingsEdit::from_input(field, &input);
    let settings = edit_and_save(store_path, key, edit).await?;

    println!("✅ Updated {}\n", field.label());
    println!("{}", SettingsFormatter::new().format_field(&settings, field));

    if let FieldValue::Number(Some(n)) = settings.get(field) {
        if !n.is_finite() {
            println!(
                "\n{}",
                format!(
                    "⚠️  '{}' is not a finite number; these settings will fall back to the built-in defaults when loaded",
                    input.trim()
                )
                .yellow()
            );
        }
    }

    if field == SettingsField::UserPrompt && !settings.has_prefix_placeholder() {
        println!(
            "\n{}",
            "⚠️  User prompt has no {{prefix}} placeholder; no document context will be sent"
                .yellow()
        );
    }

    Ok(())
}

/// Clear an optional field
pub async fn unset_command(store_path: &Path, key: &str, field: SettingsField) -> Result<()> {
    let edit = SettingsEdit::cleared(field)?;
    edit_and_save(store_path, key, edit).await?;

    println!("✅ Cleared {}", field.label());
    Ok(())
}

/// Merge an edit into the stored settings and persist the new blob
async fn edit_and_save(
    store_path: &Path,
    key: &str,
    edit: SettingsEdit,
) -> Result<CompletionSettings> {
    let mut store = SettingsStore::load(store_path).await?;

    let mut pending = None;
    let settings = {
        let mut editor = SettingsEditor::new(
            store.get(key).map(str::to_string),
            |raw: String| pending = Some(raw),
        );
        editor.apply(edit)?
    };

    if let Some(raw) = pending {
        store.set(key, raw);
        store.save().await?;
        info!("Saved settings '{}' to {}", key, store.path().display());
    }

    Ok(settings)
}
