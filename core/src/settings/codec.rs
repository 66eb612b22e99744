//! Validate-or-default decoding of stored settings blobs
//!
//! The stored blob is untrusted: it may be missing, hand-edited, truncated or
//! written by an older build. [`decode`] always yields usable settings by
//! falling back to [`CompletionSettings::defaults`] on any failure, while
//! [`try_decode`] reports why a blob was rejected.

use serde_json::Value;
use tracing::debug;

use super::types::CompletionSettings;
use crate::error::{Result, SettingsError};

/// Decode a stored blob, falling back to the defaults on any failure
pub fn decode(raw: Option<&str>) -> CompletionSettings {
    let Some(raw) = raw else {
        debug!("No stored settings, using defaults");
        return CompletionSettings::default();
    };

    match try_decode(raw) {
        Ok(settings) => settings,
        Err(e) => {
            debug!("Discarding stored settings: {}", e);
            CompletionSettings::default()
        }
    }
}

/// Parse and validate a stored blob
///
/// The whole object is validated at once: a single bad field rejects it.
/// Keys outside the schema are ignored.
pub fn try_decode(raw: &str) -> std::result::Result<CompletionSettings, SettingsError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| SettingsError::from_json(&e))?;

    if !value.is_object() {
        return Err(SettingsError::Shape {
            message: format!("expected an object, found {}", json_type_name(&value)),
        });
    }

    serde_json::from_value(value).map_err(|e| SettingsError::from_json(&e))
}

/// Serialize settings into a blob for storage
///
/// Non-finite numbers are written as `null`, which [`decode`] rejects.
pub fn encode(settings: &CompletionSettings) -> Result<String> {
    serde_json::to_string(settings).map_err(|e| {
        SettingsError::Encode {
            message: e.to_string(),
        }
        .into()
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
