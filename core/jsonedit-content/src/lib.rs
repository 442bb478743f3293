//! Raw JSON editing of content records.
//!
//! An administrator edits a record's underlying data as JSON instead of
//! through generated form fields, and a single field can hold an arbitrary
//! JSON value.
//!
//! # Architecture
//!
//! - **Validators** ([`validate`]): JSON value syntax check and editor options mapping
//! - **Field binding** ([`field`], [`settings`]): read/write one JSON field and its design-time settings
//! - **Collaborators** ([`store`], [`auth`], [`definitions`], [`notify`]): traits for the
//!   record engine, authorization, type definitions and user notifications, each
//!   with an in-memory implementation
//! - **Workflow** ([`workflow`]): merges a payload into an existing draft or a new
//!   record, validates, then saves a draft or publishes
//! - **Handler** ([`handler`]): the show/submit round-trip of the editor page
//!
//! # Example
//!
//! ```
//! use jsonedit_content::validate::validate_json;
//!
//! assert!(validate_json(Some(r#"{"a": [1, 2]}"#)));
//! assert!(!validate_json(Some("{not json")));
//! assert!(validate_json(None));
//! ```

pub mod auth;
pub mod config;
pub mod definitions;
mod error;
pub mod field;
pub mod handler;
pub mod notify;
pub mod settings;
pub mod store;
pub mod validate;
pub mod workflow;

pub use auth::{AllowAll, Authorizer, Caller, Permission, RoleAuthorizer};
pub use config::EditorConfig;
pub use definitions::{DefinitionRegistry, InMemoryDefinitions};
pub use error::{EditError, OptionsError, SettingsError, StoreError, StoreResult};
pub use field::{DisplayJsonFieldView, EditJsonFieldView, JsonFieldEditor, JsonFieldValidator};
pub use handler::{is_local_url, EditRequestHandler, EditorView, SubmitRequest, SubmitResponse};
pub use notify::{Notification, NotifyKind, Notifier, QueuedNotifier};
pub use store::{InMemoryStore, RecordStore};
pub use workflow::{RecordUpdateWorkflow, WorkflowOutcome};
