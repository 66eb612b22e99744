//! Completion settings: schema, defaults, decoding and edits
//!
//! Only pure data handling lives here. Persistence and rendering belong to
//! the caller.

pub mod codec;
pub mod edit;
pub mod field;
pub mod types;

pub use codec::{decode, encode, try_decode};
pub use edit::{parse_float_prefix, parse_int_prefix, SettingsEdit, SettingsEditor, SettingsSink};
pub use field::{FieldKind, SettingsField};
pub use types::{CompletionSettings, FieldValue, PREFIX_PLACEHOLDER};
