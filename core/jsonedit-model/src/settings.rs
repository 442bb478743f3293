use serde::{Deserialize, Serialize};

/// Stored value of a JSON field: the raw JSON text, as typed by the editor.
///
/// Lives inside a part as `{"Value": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonField {
    #[serde(default)]
    pub value: Option<String>,
}

/// Design-time settings of a JSON field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFieldSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Options document for the editor widget, as JSON text.
    #[serde(default = "default_options_text")]
    pub json_editor_options: String,
}

fn default_options_text() -> String {
    "{}".to_string()
}

impl Default for JsonFieldSettings {
    fn default() -> Self {
        Self {
            hint: None,
            json_editor_options: default_options_text(),
        }
    }
}

/// The recognized editor options. Unknown keys are ignored when parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonEditorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<EditorMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<EditorMode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indentation: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_menu_bar: Option<bool>,
}

/// Presentation mode of the editor widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    Tree,
    View,
    Form,
    Code,
    Text,
    Preview,
}
