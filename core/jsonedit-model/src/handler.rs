use crate::{Record, TypeDefinition, ValidationResult};

/// Record-level validation hook run by the record engine during `validate`.
///
/// Implementations report failures into `result`; they never mutate the record.
pub trait RecordValidator: Send + Sync {
    /// Validates `record`, whose type definition is `definition` when the
    /// engine knows it.
    fn validate(
        &self,
        record: &Record,
        definition: Option<&TypeDefinition>,
        result: &mut ValidationResult,
    );
}
