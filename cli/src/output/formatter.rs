//! Terminal rendering of completion settings
//!
//! Mirrors the settings form: one block per field with its label, optional
//! help text and current value.

use autocomplete_core::settings::{CompletionSettings, FieldValue, SettingsField};
use colored::Colorize;

/// Shown in place of an optional field that is not set
pub const UNSET: &str = "(unset)";

/// Formatter for settings fields
pub struct SettingsFormatter;

impl SettingsFormatter {
    /// Create a new formatter instance
    pub fn new() -> Self {
        Self
    }

    /// Format every field in form order
    pub fn format_settings(&self, settings: &CompletionSettings) -> String {
        SettingsField::ALL
            .iter()
            .map(|field| self.format_field(settings, *field))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format a single field block
    pub fn format_field(&self, settings: &CompletionSettings, field: SettingsField) -> String {
        let mut out = format!("{} {}", field.label().bold(), format!("({})", field.key()).dimmed());

        if let Some(description) = field.description() {
            out.push('\n');
            out.push_str(&format!("  {}", description.italic()));
        }

        out.push('\n');
        out.push_str(&self.format_value(settings.get(field)));
        out
    }

    /// Format a static help item shown above the fields
    pub fn format_note(&self, title: &str, body: &str) -> String {
        format!("{}\n{}", title.bold(), self.format_value(FieldValue::Text(body)))
    }

    /// Format a field value, indenting multi-line text
    pub fn format_value(&self, value: FieldValue<'_>) -> String {
        match value {
            FieldValue::Text(text) => text
                .split('\n')
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        format!("  ⎿  {}", line)
                    } else {
                        format!("     {}", line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            FieldValue::Number(Some(n)) => format!("  ⎿  {}", format_number(n)),
            FieldValue::Number(None) => format!("  ⎿  {}", UNSET.dimmed()),
        }
    }
}

impl Default for SettingsFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number the way the settings form displays it
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}
