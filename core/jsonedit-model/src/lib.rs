//! Content record model for the JSON editor.
//!
//! Defines the types that the editor workflow and its collaborators share:
//! - [`Record`]: a content record (identity, lifecycle flags, open bag of parts)
//! - [`ArrayMergePolicy`]: how arrays combine when one record is merged into another
//! - [`TypeDefinition`]: a content type's parts and fields, including JSON fields
//! - [`JsonFieldSettings`] / [`JsonEditorOptions`]: design-time configuration of a JSON field
//! - [`ValidationResult`] / [`FormErrors`]: outcome of business-rule checks
//! - [`RecordValidator`]: hook for record-level validation run by the record engine

mod definition;
mod handler;
mod merge;
mod record;
mod settings;
mod validation;

pub use definition::{FieldDefinition, FieldKind, PartDefinition, TypeDefinition};
pub use handler::RecordValidator;
pub use merge::{merge_values, ArrayMergePolicy};
pub use record::{Record, VersionOptions, VersionState};
pub use settings::{EditorMode, JsonEditorOptions, JsonField, JsonFieldSettings};
pub use validation::{FormErrors, ValidationError, ValidationResult};

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while decoding model documents.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The payload is not well-formed JSON or does not fit the record shape.
    #[error("invalid record payload: {0}")]
    Payload(#[from] serde_json::Error),
}
