//! Error types for the editor.

use jsonedit_model::{FormErrors, ModelError};
use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A record with the same identifier already exists.
    #[error("record already exists: {0}")]
    Conflict(String),

    /// The record cannot be stored as given.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from mapping an editor options document.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The text is not well-formed JSON.
    #[error("options are not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document is JSON but not an object.
    #[error("options must be a JSON object")]
    NotAnObject,

    /// The object does not fit the recognized options shape.
    #[error("options do not match the editor options shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Errors from updating a field's design-time settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown field {type_name}/{part}/{field}")]
    UnknownField {
        type_name: String,
        part: String,
        field: String,
    },

    /// The submitted settings were rejected; the errors are field-level messages.
    #[error("field settings rejected")]
    Rejected(FormErrors),
}

/// Terminal outcomes of an edit request other than a rendered page or a redirect.
#[derive(Debug, Error)]
pub enum EditError {
    /// Missing identifier, missing record, or editing not permitted.
    #[error("not found")]
    NotFound,

    /// The submitted payload cannot be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored record could not be serialized for the editor.
    #[error("record serialization failed: {0}")]
    Render(#[from] ModelError),
}
