//! Design-time settings of JSON fields.

use jsonedit_model::{FieldDefinition, FormErrors, JsonFieldSettings};
use tracing::debug;

use crate::validate::validate_options;

/// Message reported when the editor options cannot be mapped.
pub const INVALID_OPTIONS_MESSAGE: &str = "The input isn't a valid JsonEditorOptions object.";

/// Applies submitted settings to a JSON field definition.
///
/// The options text must map onto the recognized editor options; otherwise
/// an error is added under `prefix` and `field` is left unchanged. Returns
/// whether the settings were applied.
pub fn apply_field_settings(
    field: &mut FieldDefinition,
    submitted: JsonFieldSettings,
    prefix: &str,
    errors: &mut FormErrors,
) -> bool {
    match validate_options(&submitted.json_editor_options) {
        Ok(options) => {
            field.settings = submitted;
            field.editor_options = Some(options);
            true
        }
        Err(e) => {
            debug!("Rejected editor options for {prefix}: {e}");
            errors.add(prefix, INVALID_OPTIONS_MESSAGE);
            false
        }
    }
}
