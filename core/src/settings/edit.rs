//! Field-level edits and the merge-on-edit flow
//!
//! Every edit produces a new [`CompletionSettings`] equal to the previous one
//! except for the edited field. Numeric input is parsed the way a browser
//! number field hands it over: leniently, with `NaN` for anything unparseable.

use tracing::debug;

use super::codec::{decode, encode};
use super::field::SettingsField;
use super::types::CompletionSettings;
use crate::error::{Result, SettingsError};

/// A single field/value pair produced by the editing surface
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEdit {
    SystemPrompt(String),
    UserPrompt(String),
    Temperature(Option<f64>),
    TopP(Option<f64>),
    PresencePenalty(Option<f64>),
    FrequencyPenalty(Option<f64>),
    PromptLength(Option<f64>),
}

impl SettingsEdit {
    /// Build an edit from raw form input
    ///
    /// Prompt text is taken verbatim. Unparseable numbers become `NaN`.
    pub fn from_input(field: SettingsField, input: &str) -> Self {
        match field {
            SettingsField::SystemPrompt => SettingsEdit::SystemPrompt(input.to_string()),
            SettingsField::UserPrompt => SettingsEdit::UserPrompt(input.to_string()),
            SettingsField::Temperature => {
                SettingsEdit::Temperature(Some(parse_float_prefix(input)))
            }
            SettingsField::TopP => SettingsEdit::TopP(Some(parse_float_prefix(input))),
            SettingsField::PresencePenalty => {
                SettingsEdit::PresencePenalty(Some(parse_float_prefix(input)))
            }
            SettingsField::FrequencyPenalty => {
                SettingsEdit::FrequencyPenalty(Some(parse_float_prefix(input)))
            }
            SettingsField::PromptLength => {
                SettingsEdit::PromptLength(Some(parse_int_prefix(input)))
            }
        }
    }

    /// Build an edit that clears an optional field
    pub fn cleared(field: SettingsField) -> std::result::Result<Self, SettingsError> {
        match field {
            SettingsField::SystemPrompt | SettingsField::UserPrompt => {
                Err(SettingsError::NotClearable {
                    field: field.key().to_string(),
                })
            }
            SettingsField::Temperature => Ok(SettingsEdit::Temperature(None)),
            SettingsField::TopP => Ok(SettingsEdit::TopP(None)),
            SettingsField::PresencePenalty => Ok(SettingsEdit::PresencePenalty(None)),
            SettingsField::FrequencyPenalty => Ok(SettingsEdit::FrequencyPenalty(None)),
            SettingsField::PromptLength => Ok(SettingsEdit::PromptLength(None)),
        }
    }

    /// The field this edit targets
    pub fn field(&self) -> SettingsField {
        match self {
            SettingsEdit::SystemPrompt(_) => SettingsField::SystemPrompt,
            SettingsEdit::UserPrompt(_) => SettingsField::UserPrompt,
            SettingsEdit::Temperature(_) => SettingsField::Temperature,
            SettingsEdit::TopP(_) => SettingsField::TopP,
            SettingsEdit::PresencePenalty(_) => SettingsField::PresencePenalty,
            SettingsEdit::FrequencyPenalty(_) => SettingsField::FrequencyPenalty,
            SettingsEdit::PromptLength(_) => SettingsField::PromptLength,
        }
    }
}

impl CompletionSettings {
    /// Copy of these settings with one field replaced
    pub fn with_edit(&self, edit: SettingsEdit) -> CompletionSettings {
        let mut next = self.clone();
        match edit {
            SettingsEdit::SystemPrompt(value) => next.system_prompt = value,
            SettingsEdit::UserPrompt(value) => next.user_prompt = value,
            SettingsEdit::Temperature(value) => next.temperature = value,
            SettingsEdit::TopP(value) => next.top_p = value,
            SettingsEdit::PresencePenalty(value) => next.presence_penalty = value,
            SettingsEdit::FrequencyPenalty(value) => next.frequency_penalty = value,
            SettingsEdit::PromptLength(value) => next.prompt_length = value,
        }
        next
    }
}

/// Receives re-serialized settings after each edit
pub trait SettingsSink {
    fn save_settings(&mut self, raw: String);
}

impl<F> SettingsSink for F
where
    F: FnMut(String),
{
    fn save_settings(&mut self, raw: String) {
        self(raw)
    }
}

/// Editing surface state: the current blob plus where edits are handed off
///
/// Settings are decoded from the blob on every read, never cached.
pub struct SettingsEditor<S> {
    raw: Option<String>,
    sink: S,
}

impl<S: SettingsSink> SettingsEditor<S> {
    /// Create an editor over a stored blob
    pub fn new(raw: Option<String>, sink: S) -> Self {
        Self { raw, sink }
    }

    /// The current blob, if any
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Decode the current blob
    pub fn settings(&self) -> CompletionSettings {
        decode(self.raw.as_deref())
    }

    /// Merge an edit into the current settings and hand off the new blob
    pub fn apply(&mut self, edit: SettingsEdit) -> Result<CompletionSettings> {
        let field = edit.field();
        let next = self.settings().with_edit(edit);
        let raw = encode(&next)?;

        debug!("Settings field '{}' edited", field);
        self.raw = Some(raw.clone());
        self.sink.save_settings(raw);

        Ok(next)
    }

    /// Handle raw input for a field from the form
    pub fn on_edit(&mut self, field: SettingsField, input: &str) -> Result<CompletionSettings> {
        self.apply(SettingsEdit::from_input(field, input))
    }

    /// Consume the editor, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Parse the longest numeric prefix of `input` as a float
///
/// Leading whitespace is skipped and trailing garbage ignored; `Infinity`
/// is accepted with an optional sign. Returns `NaN` when no digits lead.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the longest integer prefix of `input`
///
/// A `0x` prefix selects hexadecimal. Fractions and trailing garbage are
/// dropped. Returns `NaN` when no digits lead.
pub fn parse_int_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: Option<f64> = None;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = Some(value.unwrap_or(0.0) * f64::from(radix) + f64::from(digit));
    }

    match value {
        Some(v) if negative => -v,
        Some(v) => v,
        None => f64::NAN,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CompletionSettings {
        CompletionSettings {
            system_prompt: "sys".to_string(),
            user_prompt: "user {{prefix}}".to_string(),
            temperature: Some(0.7),
            top_p: None,
            presence_penalty: Some(0.0),
            frequency_penalty: None,
            prompt_length: Some(300.0),
        }
    }

    #[test]
    fn test_edit_changes_exactly_one_field() {
        let before = base();

        let after = before.with_edit(SettingsEdit::TopP(Some(0.5)));
        assert_eq!(after.top_p, Some(0.5));
        assert_eq!(
            CompletionSettings {
                top_p: None,
                ..after.clone()
            },
            before
        );

        let after = before.with_edit(SettingsEdit::SystemPrompt("new".to_string()));
        assert_eq!(after.system_prompt, "new");
        assert_eq!(
            CompletionSettings {
                system_prompt: "sys".to_string(),
                ..after
            },
            before
        );
    }

    #[test]
    fn test_edit_does_not_touch_original() {
        let before = base();
        let _ = before.with_edit(SettingsEdit::Temperature(None));
        assert_eq!(before.temperature, Some(0.7));
    }

    #[test]
    fn test_from_input_targets_the_field() {
        for field in SettingsField::ALL {
            assert_eq!(SettingsEdit::from_input(field, "1").field(), field);
        }
    }

    #[test]
    fn test_every_field_routes_to_its_own_edit() {
        for field in SettingsField::ALL {
            assert_eq!(SettingsEdit::from_input(field, "1").field(), field);

            match SettingsEdit::cleared(field) {
                Ok(edit) => {
                    assert!(field.is_optional(), "{field}");
                    assert_eq!(edit.field(), field);
                }
                Err(_) => assert!(!field.is_optional(), "{field}"),
            }
        }
    }

    #[test]
    fn test_from_input_keeps_prompt_text_verbatim() {
        let edit = SettingsEdit::from_input(SettingsField::UserPrompt, "  Go on:\n{{prefix}}  ");
        assert_eq!(
            edit,
            SettingsEdit::UserPrompt("  Go on:\n{{prefix}}  ".to_string())
        );
    }

    #[test]
    fn test_from_input_parses_numbers() {
        assert_eq!(
            SettingsEdit::from_input(SettingsField::Temperature, "0.7"),
            SettingsEdit::Temperature(Some(0.7))
        );
        assert_eq!(
            SettingsEdit::from_input(SettingsField::PromptLength, "12.9"),
            SettingsEdit::PromptLength(Some(12.0))
        );
    }

    #[test]
    fn test_unparseable_number_becomes_nan() {
        for input in ["", "abc", "-", ".", "e5"] {
            match SettingsEdit::from_input(SettingsField::FrequencyPenalty, input) {
                SettingsEdit::FrequencyPenalty(Some(v)) => assert!(v.is_nan(), "{input:?}"),
                other => panic!("unexpected edit {other:?}"),
            }
        }
    }

    #[test]
    fn test_cleared_only_for_optional_fields() {
        assert_eq!(
            SettingsEdit::cleared(SettingsField::PromptLength).unwrap(),
            SettingsEdit::PromptLength(None)
        );
        assert_eq!(
            SettingsEdit::cleared(SettingsField::SystemPrompt).unwrap_err(),
            SettingsError::NotClearable {
                field: "system_prompt".to_string()
            }
        );
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("0.5"), 0.5);
        assert_eq!(parse_float_prefix("  -1.25"), -1.25);
        assert_eq!(parse_float_prefix("+3"), 3.0);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert_eq!(parse_float_prefix("1e3"), 1000.0);
        assert_eq!(parse_float_prefix("2.5E-1x"), 0.25);
        assert_eq!(parse_float_prefix("1e"), 1.0);
        assert_eq!(parse_float_prefix("1e+"), 1.0);
        assert_eq!(parse_float_prefix("0.7abc"), 0.7);
        assert_eq!(parse_float_prefix("1.2.3"), 1.2);
        assert_eq!(parse_float_prefix("Infinity"), f64::INFINITY);
        assert_eq!(parse_float_prefix("-Infinityx"), f64::NEG_INFINITY);
        assert!(parse_float_prefix("").is_nan());
        assert!(parse_float_prefix("x1").is_nan());
        assert!(parse_float_prefix("-.").is_nan());
        assert!(parse_float_prefix("inf").is_nan());
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("400"), 400.0);
        assert_eq!(parse_int_prefix(" 12.9"), 12.0);
        assert_eq!(parse_int_prefix("-7px"), -7.0);
        assert_eq!(parse_int_prefix("0x1A"), 26.0);
        assert_eq!(parse_int_prefix("1e3"), 1.0);
        assert!(parse_int_prefix("").is_nan());
        assert!(parse_int_prefix("0x").is_nan());
        assert!(parse_int_prefix(".5").is_nan());
        assert!(parse_int_prefix("abc").is_nan());
    }

    #[test]
    fn test_editor_decodes_merges_and_hands_off() {
        let mut saved = Vec::new();
        let mut editor = SettingsEditor::new(None, |raw: String| saved.push(raw));

        assert!(editor.settings().is_default());

        let next = editor.on_edit(SettingsField::Temperature, "0.3").unwrap();
        assert_eq!(next.temperature, Some(0.3));
        assert_eq!(next.system_prompt, CompletionSettings::defaults().system_prompt);

        let next = editor
            .apply(SettingsEdit::UserPrompt("More: {{prefix}}".to_string()))
            .unwrap();
        assert_eq!(next.temperature, Some(0.3));
        assert_eq!(editor.settings(), next);

        let raw = editor.raw().map(str::to_string);
        drop(editor);
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.last().cloned(), raw);
        assert_eq!(decode(saved.last().map(String::as_str)), next);
    }

    #[test]
    fn test_editor_starts_from_defaults_on_corrupt_blob() {
        let mut editor = SettingsEditor::new(Some("{oops".to_string()), |_: String| {});

        let next = editor.on_edit(SettingsField::TopP, "0.9").unwrap();
        assert_eq!(
            next,
            CompletionSettings {
                top_p: Some(0.9),
                ..CompletionSettings::default()
            }
        );
    }

    struct Recorder(Vec<String>);

    impl SettingsSink for Recorder {
        fn save_settings(&mut self, raw: String) {
            self.0.push(raw);
        }
    }

    #[test]
    fn test_editor_with_custom_sink() {
        let mut editor = SettingsEditor::new(None, Recorder(Vec::new()));
        editor
            .apply(SettingsEdit::PromptLength(Some(100.0)))
            .unwrap();
        editor.apply(SettingsEdit::PromptLength(None)).unwrap();

        let recorder = editor.into_sink();
        assert_eq!(recorder.0.len(), 2);
        assert_eq!(decode(Some(&recorder.0[1])), CompletionSettings::default());
    }
}
