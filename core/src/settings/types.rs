//! Completion settings types
//!
//! [`CompletionSettings`] is the validated shape of a stored settings blob.
//! Required prompt fields are plain strings; sampling parameters are optional
//! and omitted from the serialized form when unset.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

use super::field::SettingsField;

/// Placeholder in the user prompt replaced with the text before the cursor
pub const PREFIX_PLACEHOLDER: &str = "{{prefix}}";

// The two spaces after the block expression are a markdown hard break
const DEFAULT_SYSTEM_PROMPT: &str = concat!(r"### IMPORTANT

Give a short completion based on the context. Complete in the language of what the user uses. Write only the completion and nothing else. Do not include the user's text in your message. Only include the completion.

多使用 \n 进行段落换行。

### Optional

LaTeX格式标准（当需要写出符号或公式时）

行内公式：$<expression>$

块级公式 (一定要在第一列，不能有任何缩进) ：

$$
<expression>", "  \n", r"$$

Output result only.");

const DEFAULT_USER_PROMPT: &str = "Continue the following:\n\n{{prefix}}";

static DEFAULT_SETTINGS: LazyLock<CompletionSettings> = LazyLock::new(|| CompletionSettings {
    system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
    user_prompt: DEFAULT_USER_PROMPT.to_string(),
    temperature: None,
    top_p: None,
    presence_penalty: None,
    frequency_penalty: None,
    prompt_length: None,
});

/// Settings for a single text-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Instructions for the completion backend
    pub system_prompt: String,

    /// Prompt template containing [`PREFIX_PLACEHOLDER`]
    pub user_prompt: String,

    /// Sampling temperature
    #[serde(
        default,
        deserialize_with = "present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<f64>,

    /// Nucleus sampling parameter
    #[serde(
        default,
        deserialize_with = "present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_p: Option<f64>,

    #[serde(
        default,
        deserialize_with = "present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub presence_penalty: Option<f64>,

    #[serde(
        default,
        deserialize_with = "present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub frequency_penalty: Option<f64>,

    /// Characters of context taken on each side of the cursor
    #[serde(
        default,
        deserialize_with = "present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_length: Option<f64>,
}

/// Borrowed value of a single field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

impl CompletionSettings {
    /// The built-in defaults shared by the whole process
    pub fn defaults() -> &'static CompletionSettings {
        &DEFAULT_SETTINGS
    }

    /// Whether this value equals the built-in defaults
    pub fn is_default(&self) -> bool {
        self == Self::defaults()
    }

    /// Whether the user prompt still carries the prefix placeholder
    pub fn has_prefix_placeholder(&self) -> bool {
        self.user_prompt.contains(PREFIX_PLACEHOLDER)
    }

    /// Get the value of a field
    pub fn get(&self, field: SettingsField) -> FieldValue<'_> {
        match field {
            SettingsField::SystemPrompt => FieldValue::Text(&self.system_prompt),
            SettingsField::UserPrompt => FieldValue::Text(&self.user_prompt),
            SettingsField::Temperature => FieldValue::Number(self.temperature),
            SettingsField::TopP => FieldValue::Number(self.top_p),
            SettingsField::PresencePenalty => FieldValue::Number(self.presence_penalty),
            SettingsField::FrequencyPenalty => FieldValue::Number(self.frequency_penalty),
            SettingsField::PromptLength => FieldValue::Number(self.prompt_length),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}

/// A key that is present must hold a number; `null` is not "unset".
fn present_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CompletionSettings::default();
        assert_eq!(settings.user_prompt, "Continue the following:\n\n{{prefix}}");
        assert!(settings.system_prompt.starts_with("### IMPORTANT"));
        assert!(settings.system_prompt.ends_with("Output result only."));
        assert_eq!(settings.temperature, None);
        assert_eq!(settings.top_p, None);
        assert_eq!(settings.presence_penalty, None);
        assert_eq!(settings.frequency_penalty, None);
        assert_eq!(settings.prompt_length, None);
        assert!(settings.is_default());
        assert!(settings.has_prefix_placeholder());
    }

    #[test]
    fn test_default_system_prompt_keeps_literal_line_break_marker() {
        // The backend is told to emit a literal backslash-n, not a newline
        assert!(DEFAULT_SYSTEM_PROMPT.contains(r"\n"));
    }

    #[test]
    fn test_default_system_prompt_keeps_hard_line_break() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("$$\n<expression>  \n$$\n\nOutput result only."));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("行内公式：$<expression>$\n"));
    }

    #[test]
    fn test_unset_fields_are_omitted_when_serialized() {
        let settings = CompletionSettings {
            system_prompt: "A".to_string(),
            user_prompt: "B".to_string(),
            temperature: Some(0.0),
            ..CompletionSettings::default()
        };

        let value = serde_json::to_value(&settings).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["temperature"], serde_json::json!(0.0));
        assert!(!object.contains_key("top_p"));
    }

    #[test]
    fn test_get_reads_each_field() {
        let settings = CompletionSettings {
            top_p: Some(0.9),
            ..CompletionSettings::default()
        };
        assert_eq!(
            settings.get(SettingsField::UserPrompt),
            FieldValue::Text(DEFAULT_USER_PROMPT)
        );
        assert_eq!(
            settings.get(SettingsField::TopP),
            FieldValue::Number(Some(0.9))
        );
        assert_eq!(
            settings.get(SettingsField::PromptLength),
            FieldValue::Number(None)
        );
    }
}
