//! HTTP host for the JSON content editor.
//!
//! Serves the editor page of a record and its form post, plus the endpoint
//! that updates the design-time settings of a JSON field.

pub mod config;
pub mod html;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use jsonedit_content::{
    Caller, EditError, EditRequestHandler, InMemoryDefinitions, InMemoryStore, QueuedNotifier,
    SettingsError, SubmitRequest, SubmitResponse,
};
use jsonedit_model::JsonFieldSettings;
use jsonedit_types::UserId;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::{ConfigResult, ServerConfig};

/// Header naming the user a request runs as.
pub const USER_HEADER: &str = "X-User-Id";

/// Shared state of the HTTP handlers.
pub struct AppState {
    pub handler: EditRequestHandler,
    pub definitions: Arc<InMemoryDefinitions>,
    pub store: Arc<InMemoryStore>,
    pub default_caller: Caller,
}

impl AppState {
    /// Builds the in-memory editor described by `config`, seeding the store.
    pub async fn from_config(config: &ServerConfig) -> ConfigResult<Self> {
        let definitions = Arc::new(InMemoryDefinitions::with_types(config.type_definitions()?));
        let store = Arc::new(InMemoryStore::new(definitions.clone()));
        for record in config.seed_records()? {
            if let Err(e) = store.insert(record).await {
                error!("Skipping seed record: {e}");
            }
        }
        info!("Seeded {} records", store.len().await);

        let handler = EditRequestHandler::new(
            config.editor_config(),
            store.clone(),
            Arc::new(config.authorizer()?),
            definitions.clone(),
            Arc::new(QueuedNotifier::new()),
        );
        Ok(Self {
            handler,
            definitions,
            store,
            default_caller: config.default_caller()?,
        })
    }

    fn caller(&self, headers: &HeaderMap) -> Caller {
        headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| UserId::parse(v).ok())
            .map(Caller::new)
            .unwrap_or_else(|| self.default_caller.clone())
    }
}

#[derive(Debug, Deserialize)]
struct EditorQuery {
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EditorForm {
    #[serde(default)]
    json: String,
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
    #[serde(rename = "submit.Save")]
    submit_save: Option<String>,
    #[serde(rename = "submit.Publish")]
    submit_publish: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FieldSettingsForm {
    hint: Option<String>,
    #[serde(rename = "jsonEditorOptions")]
    json_editor_options: Option<String>,
}

struct ApiError(EditError);

impl From<EditError> for ApiError {
    fn from(e: EditError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            EditError::NotFound => StatusCode::NOT_FOUND.into_response(),
            EditError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            EditError::Store(e) => {
                error!("Record store failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            EditError::Render(e) => {
                error!("Rendering the editor failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

async fn show_editor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<EditorQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let caller = state.caller(&headers);
    let view = state.handler.show(&caller, &id, query.return_url).await?;
    Ok(Html(html::render_editor(&view)))
}

async fn submit_editor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<EditorForm>,
) -> Result<Response, ApiError> {
    let caller = state.caller(&headers);
    let request = SubmitRequest {
        id,
        json: form.json,
        return_url: form.return_url.filter(|u| !u.is_empty()),
        submit_save: form.submit_save,
        submit_publish: form.submit_publish,
    };
    let response = match state.handler.submit(&caller, request).await? {
        SubmitResponse::Redirect(url) => {
            debug!("Redirecting to {url}");
            Redirect::to(&url).into_response()
        }
        SubmitResponse::Render(view) => Html(html::render_editor(&view)).into_response(),
    };
    Ok(response)
}

async fn update_field_settings(
    State(state): State<Arc<AppState>>,
    Path((type_name, part, field)): Path<(String, String, String)>,
    Form(form): Form<FieldSettingsForm>,
) -> Response {
    let settings = JsonFieldSettings {
        hint: form.hint.filter(|h| !h.trim().is_empty()),
        json_editor_options: form
            .json_editor_options
            .unwrap_or_else(|| JsonFieldSettings::default().json_editor_options),
    };
    match state
        .definitions
        .update_field_settings(&type_name, &part, &field, settings)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(SettingsError::UnknownField { .. }) => StatusCode::NOT_FOUND.into_response(),
        Err(SettingsError::Rejected(errors)) => {
            let mut body: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
            for (key, message) in errors.iter() {
                body.entry(key).or_default().push(message);
            }
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

/// Build the HTTP router over the given editor state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let prefix = state
        .handler
        .config()
        .admin_prefix
        .trim_end_matches('/')
        .to_string();
    Router::new()
        .route(
            &format!("{prefix}/Contents/ContentItems/{{id}}/Edit/Json"),
            get(show_editor).post(submit_editor),
        )
        .route(
            &format!("{prefix}/ContentTypes/{{type_name}}/Parts/{{part}}/Fields/{{field}}/Settings"),
            post(update_field_settings),
        )
        .with_state(state)
}
