//! Core identifier types for the JSON content editor.
//!
//! Content records are addressed by opaque string identifiers assigned by the
//! record engine. Identifiers minted here use the simple (hyphenless) form of
//! a UUID v7 so that newly created records sort by creation time.

mod ids;

pub use ids::{RecordId, UserId, VersionId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("identifier must not be blank")]
    BlankId,
}
