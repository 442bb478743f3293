//! The JSON editor page: show a record as JSON, accept an edited payload.

use jsonedit_model::{Record, TypeDefinition, VersionOptions};
use jsonedit_types::RecordId;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{Authorizer, Caller, Permission};
use crate::config::EditorConfig;
use crate::definitions::DefinitionRegistry;
use crate::error::EditError;
use crate::notify::{Notification, Notifier, NotifyKind};
use crate::store::RecordStore;
use crate::workflow::{RecordUpdateWorkflow, WorkflowOutcome};

const SUBMISSION_FAILED_MESSAGE: &str = "The submission has failed, please try again.";

/// Everything the editor page needs to render.
#[derive(Debug, Clone, Serialize)]
pub struct EditorView {
    pub title: String,
    pub record_id: RecordId,
    pub content_type: String,
    pub definition: Option<TypeDefinition>,
    /// JSON shown in the editor: the stored record, or the rejected submission.
    pub json: String,
    pub form_action: String,
    pub return_url: Option<String>,
    pub notifications: Vec<Notification>,
}

/// A submitted editor form.
#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    /// Record identifier from the route.
    pub id: String,
    pub json: String,
    pub return_url: Option<String>,
    /// Present when the "save draft" button was used (`Save`, `SaveAndContinue`).
    pub submit_save: Option<String>,
    /// Present when the "publish" button was used (`Publish`, `PublishAndContinue`).
    pub submit_publish: Option<String>,
}

/// How a submission is answered when it does not end in an error status.
#[derive(Debug, Clone)]
pub enum SubmitResponse {
    Redirect(String),
    /// The editor shown again with the failure notification inline.
    Render(Box<EditorView>),
}

/// Serves the show and submit phases of the editor.
pub struct EditRequestHandler {
    config: EditorConfig,
    store: Arc<dyn RecordStore>,
    authorizer: Arc<dyn Authorizer>,
    definitions: Arc<dyn DefinitionRegistry>,
    notifier: Arc<dyn Notifier>,
    workflow: RecordUpdateWorkflow,
}

impl EditRequestHandler {
    pub fn new(
        config: EditorConfig,
        store: Arc<dyn RecordStore>,
        authorizer: Arc<dyn Authorizer>,
        definitions: Arc<dyn DefinitionRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let workflow =
            RecordUpdateWorkflow::new(store.clone(), authorizer.clone(), definitions.clone());
        Self {
            config,
            store,
            authorizer,
            definitions,
            notifier,
            workflow,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Show phase. A record the caller may not edit is reported as not found.
    pub async fn show(
        &self,
        caller: &Caller,
        id: &str,
        return_url: Option<String>,
    ) -> Result<EditorView, EditError> {
        self.render(caller, id, None, return_url).await
    }

    async fn render(
        &self,
        caller: &Caller,
        id: &str,
        submitted_json: Option<String>,
        return_url: Option<String>,
    ) -> Result<EditorView, EditError> {
        if id.trim().is_empty() {
            return Err(EditError::NotFound);
        }
        let record = self
            .store
            .get(&RecordId::new(id), VersionOptions::Latest)
            .await?
            .ok_or(EditError::NotFound)?;
        if !self.can_edit(caller, &record).await {
            return Err(EditError::NotFound);
        }

        let json = match submitted_json {
            Some(json) => json,
            None => record.to_json_pretty()?,
        };
        let definition = self
            .definitions
            .get_type_definition(&record.content_type)
            .await;

        Ok(EditorView {
            title: format!("Edit {} as JSON", display_name(&record)),
            form_action: self.config.editor_path(id),
            record_id: record.content_item_id,
            content_type: record.content_type,
            definition,
            json,
            return_url,
            notifications: self.notifier.take(caller),
        })
    }

    /// Submit phase.
    pub async fn submit(
        &self,
        caller: &Caller,
        request: SubmitRequest,
    ) -> Result<SubmitResponse, EditError> {
        if request.id.trim().is_empty() || request.json.trim().is_empty() {
            return Err(EditError::NotFound);
        }
        let mut candidate = Record::from_json(&request.json)
            .map_err(|e| EditError::BadRequest(e.to_string()))?
            .ok_or(EditError::NotFound)?;

        if candidate.content_item_id.is_empty() {
            candidate.content_item_id = RecordId::new(request.id.as_str());
        }
        let candidate = self.store.load(candidate).await?;
        if !self.can_edit(caller, &candidate).await {
            return Err(EditError::NotFound);
        }

        let record_id = candidate.content_item_id.clone();
        let is_draft = request.submit_save.is_some();
        match self.workflow.update(caller, candidate, is_draft).await? {
            WorkflowOutcome::ValidationFailed { detail, .. } if !detail.trim().is_empty() => {
                self.notifier.notify(caller, NotifyKind::Error, detail);
                return self.redisplay(caller, &record_id, request).await;
            }
            WorkflowOutcome::Success(record) => {
                self.notifier.notify(
                    caller,
                    NotifyKind::Success,
                    format!(
                        "Content item {} has been successfully saved.",
                        display_name(&record)
                    ),
                );
            }
            outcome => {
                debug!("Submission for record {record_id} failed: {outcome:?}");
                self.notifier.notify(
                    caller,
                    NotifyKind::Error,
                    SUBMISSION_FAILED_MESSAGE.to_string(),
                );
                return self.redisplay(caller, &record_id, request).await;
            }
        }

        let continue_editing =
            is_continue(request.submit_save.as_deref()) || is_continue(request.submit_publish.as_deref());
        if let Some(url) = request.return_url.as_deref() {
            if !url.is_empty() && !continue_editing && is_local_url(url) {
                return Ok(SubmitResponse::Redirect(resolve_local(url)));
            }
        }

        Ok(SubmitResponse::Redirect(
            self.config
                .editor_url(&request.id, request.return_url.as_deref()),
        ))
    }

    async fn redisplay(
        &self,
        caller: &Caller,
        record_id: &RecordId,
        request: SubmitRequest,
    ) -> Result<SubmitResponse, EditError> {
        let view = self
            .render(caller, record_id.as_str(), Some(request.json), request.return_url)
            .await?;
        Ok(SubmitResponse::Render(Box::new(view)))
    }

    async fn can_edit(&self, caller: &Caller, record: &Record) -> bool {
        self.authorizer
            .authorize(caller, Permission::EditContent, record)
            .await
    }
}

/// `"DisplayText"` in quotes, or the content type when there is no display text.
fn display_name(record: &Record) -> String {
    if record.display_text.trim().is_empty() {
        record.content_type.clone()
    } else {
        format!("\"{}\"", record.display_text)
    }
}

fn is_continue(submit: Option<&str>) -> bool {
    const SUFFIX: &str = "AndContinue";
    submit.is_some_and(|s| {
        s.len() >= SUFFIX.len()
            && s.get(s.len() - SUFFIX.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(SUFFIX))
    })
}

/// Whether `url` stays on this site: `/path` or `~/path`, but not `//host`
/// or `/\host`, and without control characters.
pub fn is_local_url(url: &str) -> bool {
    if url.chars().any(char::is_control) {
        return false;
    }
    let rest = if let Some(rest) = url.strip_prefix("~/") {
        rest
    } else if let Some(rest) = url.strip_prefix('/') {
        rest
    } else {
        return false;
    };
    !rest.starts_with('/') && !rest.starts_with('\\')
}

fn resolve_local(url: &str) -> String {
    url.strip_prefix('~').unwrap_or(url).to_string()
}
