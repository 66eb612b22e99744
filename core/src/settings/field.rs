//! Descriptors for the editable settings fields

use crate::error::SettingsError;
use std::fmt;
use std::str::FromStr;

/// Input widget used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form multi-line text
    Text,
    /// Floating point number
    Float,
    /// Whole number
    Integer,
}

/// A single editable field of [`CompletionSettings`](super::CompletionSettings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    SystemPrompt,
    UserPrompt,
    Temperature,
    TopP,
    PresencePenalty,
    FrequencyPenalty,
    PromptLength,
}

impl SettingsField {
    /// All fields, in the order the settings form shows them
    pub const ALL: [SettingsField; 7] = [
        SettingsField::SystemPrompt,
        SettingsField::UserPrompt,
        SettingsField::Temperature,
        SettingsField::TopP,
        SettingsField::PresencePenalty,
        SettingsField::FrequencyPenalty,
        SettingsField::PromptLength,
    ];

    /// Serialized name of the field
    pub fn key(&self) -> &'static str {
        match self {
            SettingsField::SystemPrompt => "system_prompt",
            SettingsField::UserPrompt => "user_prompt",
            SettingsField::Temperature => "temperature",
            SettingsField::TopP => "top_p",
            SettingsField::PresencePenalty => "presence_penalty",
            SettingsField::FrequencyPenalty => "frequency_penalty",
            SettingsField::PromptLength => "prompt_length",
        }
    }

    /// Human readable label for the form
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::SystemPrompt => "System prompt",
            SettingsField::UserPrompt => "User prompt",
            SettingsField::Temperature => "Temperature",
            SettingsField::TopP => "Top P",
            SettingsField::PresencePenalty => "Presence penalty",
            SettingsField::FrequencyPenalty => "Frequency penalty",
            SettingsField::PromptLength => "Prompt length",
        }
    }

    /// Optional help text shown under the label
    pub fn description(&self) -> Option<&'static str> {
        match self {
            SettingsField::PromptLength => {
                Some("The length of both the prefix and the suffix of the prompt, in characters.")
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SettingsField::SystemPrompt | SettingsField::UserPrompt => FieldKind::Text,
            SettingsField::Temperature
            | SettingsField::TopP
            | SettingsField::PresencePenalty
            | SettingsField::FrequencyPenalty => FieldKind::Float,
            SettingsField::PromptLength => FieldKind::Integer,
        }
    }

    /// Whether the field may be absent from a valid settings value
    pub fn is_optional(&self) -> bool {
        self.kind() != FieldKind::Text
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for SettingsField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SettingsField::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| SettingsError::UnknownField {
                name: s.to_string(),
            })
    }
}
