//! Leaf validators: JSON value syntax and editor options mapping.

use jsonedit_model::JsonEditorOptions;
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::OptionsError;

/// Returns whether `text` is acceptable as the value of a JSON field.
///
/// A missing or empty value is valid (the field is optional). Anything else
/// must parse as well-formed JSON; nothing is corrected or parsed leniently.
pub fn validate_json(text: Option<&str>) -> bool {
    match text {
        None => true,
        Some(t) if t.is_empty() => true,
        Some(t) => serde_json::from_str::<IgnoredAny>(t).is_ok(),
    }
}

/// Parses an editor options document and maps it onto [`JsonEditorOptions`].
///
/// Unrecognized keys are ignored. Malformed JSON, a non-object document and
/// values of the wrong type for recognized keys are errors.
pub fn validate_options(text: &str) -> Result<JsonEditorOptions, OptionsError> {
    let value: Value = serde_json::from_str(text).map_err(OptionsError::Parse)?;
    if !value.is_object() {
        return Err(OptionsError::NotAnObject);
    }
    serde_json::from_value(value).map_err(OptionsError::Shape)
}
