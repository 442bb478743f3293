//! Record update workflow: merge a payload, validate, then save a draft or publish.
//!
//! The call order against the record engine is fixed: update-or-create,
//! then validate, then exactly one of save-draft or publish. Engine hooks
//! that run during the update (derived fields, for example) are visible to
//! validation only because of this order.

use jsonedit_model::{ArrayMergePolicy, FormErrors, Record, ValidationResult, VersionOptions};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{Authorizer, Caller, Permission};
use crate::definitions::DefinitionRegistry;
use crate::error::StoreResult;
use crate::store::RecordStore;

/// Outcome of one update attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The record was saved as a draft or published.
    Success(Record),
    /// Validation rejected the merged record. `detail` joins all messages.
    ValidationFailed { errors: FormErrors, detail: String },
    /// The caller may not edit the draft or publish the new record.
    Forbidden,
    /// No draft exists and the payload names no known content type.
    BadRequest,
}

/// Applies a JSON payload to a record.
pub struct RecordUpdateWorkflow {
    store: Arc<dyn RecordStore>,
    authorizer: Arc<dyn Authorizer>,
    definitions: Arc<dyn DefinitionRegistry>,
}

impl RecordUpdateWorkflow {
    pub fn new(
        store: Arc<dyn RecordStore>,
        authorizer: Arc<dyn Authorizer>,
        definitions: Arc<dyn DefinitionRegistry>,
    ) -> Self {
        Self {
            store,
            authorizer,
            definitions,
        }
    }

    /// Merges `candidate` into the draft of the record it names, or into a
    /// new record of its type when there is no such record, then saves a
    /// draft (`is_draft`) or publishes.
    ///
    /// Store failures are returned as errors and end the attempt.
    pub async fn update(
        &self,
        caller: &Caller,
        candidate: Record,
        is_draft: bool,
    ) -> StoreResult<WorkflowOutcome> {
        let existing = self
            .store
            .get(&candidate.content_item_id, VersionOptions::DraftRequired)
            .await?;

        let mut record = match existing {
            Some(mut record) => {
                if !self
                    .authorizer
                    .authorize(caller, Permission::EditContent, &record)
                    .await
                {
                    warn!(
                        "{} may not edit record {}",
                        caller.user_id, record.content_item_id
                    );
                    return Ok(WorkflowOutcome::Forbidden);
                }

                record.merge(&candidate, ArrayMergePolicy::Replace);
                self.store.update(&mut record).await?;
                let result = self.store.validate(&record).await?;
                if let Some(problem) = validation_problem(&result) {
                    return Ok(problem);
                }
                record
            }
            None => {
                if candidate.content_type.is_empty()
                    || self
                        .definitions
                        .get_type_definition(&candidate.content_type)
                        .await
                        .is_none()
                {
                    debug!(
                        "Rejected payload with unknown content type {:?}",
                        candidate.content_type
                    );
                    return Ok(WorkflowOutcome::BadRequest);
                }

                let mut record = self.store.new_record(&candidate.content_type).await?;
                record.owner = caller.user_id.to_string();

                if !self
                    .authorizer
                    .authorize(caller, Permission::PublishContent, &record)
                    .await
                {
                    warn!(
                        "{} may not create records of type {}",
                        caller.user_id, record.content_type
                    );
                    return Ok(WorkflowOutcome::Forbidden);
                }

                record.merge(&candidate, ArrayMergePolicy::default());
                let result = self
                    .store
                    .create_validated(&mut record, VersionOptions::Draft)
                    .await?;
                if let Some(problem) = validation_problem(&result) {
                    return Ok(problem);
                }
                record
            }
        };

        if is_draft {
            self.store.save_draft(&mut record).await?;
        } else {
            self.store.publish(&mut record).await?;
        }
        info!(
            "Record {} {}",
            record.content_item_id,
            if is_draft { "saved as draft" } else { "published" }
        );
        Ok(WorkflowOutcome::Success(record))
    }
}

fn validation_problem(result: &ValidationResult) -> Option<WorkflowOutcome> {
    if result.succeeded() {
        return None;
    }
    let mut errors = FormErrors::new();
    result.add_to(&mut errors);
    let detail = result.detail();
    debug!("Validation failed: {detail}");
    Some(WorkflowOutcome::ValidationFailed { errors, detail })
}
