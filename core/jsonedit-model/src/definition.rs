use serde::{Deserialize, Serialize};

use crate::settings::{JsonEditorOptions, JsonFieldSettings};

/// Describes a content type: its display name and the parts it is made of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub parts: Vec<PartDefinition>,
}

/// A named part of a content type, holding fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A field attached to a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldKind,
    /// Settings of a JSON field. Ignored for other field kinds.
    #[serde(default)]
    pub settings: JsonFieldSettings,
    /// Editor options parsed from `settings` once they were accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_options: Option<JsonEditorOptions>,
}

/// The kind of a field, as named by the content definition
/// (`"JsonField"`, `"TextField"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Json,
    Text,
    Other(String),
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "JsonField" => Self::Json,
            "TextField" => Self::Text,
            _ => Self::Other(name),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Json => "JsonField".to_string(),
            FieldKind::Text => "TextField".to_string(),
            FieldKind::Other(name) => name,
        }
    }
}

impl TypeDefinition {
    /// Shorthand for a type without parts.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            display_name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Builder-style helper to append a part.
    pub fn with_part(mut self, part: PartDefinition) -> Self {
        self.parts.push(part);
        self
    }

    pub fn part(&self, name: &str) -> Option<&PartDefinition> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn field(&self, part: &str, field: &str) -> Option<&FieldDefinition> {
        self.part(part)?.fields.iter().find(|f| f.name == field)
    }

    pub fn field_mut(&mut self, part: &str, field: &str) -> Option<&mut FieldDefinition> {
        self.parts
            .iter_mut()
            .find(|p| p.name == part)?
            .fields
            .iter_mut()
            .find(|f| f.name == field)
    }

    /// All JSON fields of the type as `(part name, field)` pairs.
    pub fn json_fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.parts.iter().flat_map(|part| {
            part.fields
                .iter()
                .filter(|f| f.field_type == FieldKind::Json)
                .map(move |f| (part.name.as_str(), f))
        })
    }
}

impl PartDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

impl FieldDefinition {
    fn simple(name: &str, field_type: FieldKind) -> Self {
        Self {
            name: name.into(),
            field_type,
            settings: JsonFieldSettings::default(),
            editor_options: None,
        }
    }

    /// Shorthand for a JSON field with default settings.
    pub fn json(name: &str) -> Self {
        Self::simple(name, FieldKind::Json)
    }

    /// Shorthand for a text field.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldKind::Text)
    }
}
