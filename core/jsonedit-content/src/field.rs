//! Binding between a record and one of its JSON fields.

use jsonedit_model::{
    FieldDefinition, FormErrors, JsonEditorOptions, JsonField, Record, RecordValidator,
    TypeDefinition, ValidationResult,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::validate::validate_json;

/// Message reported when a JSON field holds malformed JSON.
pub const INVALID_JSON_MESSAGE: &str = "The input isn't a valid JSON entity.";

/// View model for displaying a JSON field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayJsonFieldView {
    pub part_name: String,
    pub field_name: String,
    pub value: Option<String>,
    /// The value parsed as JSON, when it is valid and non-empty.
    pub parsed: Option<Value>,
}

/// View model for editing a JSON field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditJsonFieldView {
    pub part_name: String,
    pub field_name: String,
    pub value: Option<String>,
    pub hint: Option<String>,
    pub options: JsonEditorOptions,
}

/// Reads and writes one JSON field (`part.field`) of a record.
#[derive(Debug, Clone, Copy)]
pub struct JsonFieldEditor<'a> {
    part: &'a str,
    field: &'a FieldDefinition,
}

impl<'a> JsonFieldEditor<'a> {
    pub fn new(part: &'a str, field: &'a FieldDefinition) -> Self {
        Self { part, field }
    }

    /// Form prefix errors for this field are reported under.
    pub fn prefix(&self) -> String {
        format!("{}.{}", self.part, self.field.name)
    }

    /// Current field value. A missing or malformed slot reads as empty.
    pub fn read(&self, record: &Record) -> JsonField {
        record
            .field(self.part, &self.field.name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    pub fn display(&self, record: &Record) -> DisplayJsonFieldView {
        let value = self.read(record).value;
        let parsed = value
            .as_deref()
            .filter(|v| !v.is_empty())
            .and_then(|v| serde_json::from_str(v).ok());
        DisplayJsonFieldView {
            part_name: self.part.to_string(),
            field_name: self.field.name.clone(),
            value,
            parsed,
        }
    }

    pub fn edit(&self, record: &Record) -> EditJsonFieldView {
        EditJsonFieldView {
            part_name: self.part.to_string(),
            field_name: self.field.name.clone(),
            value: self.read(record).value,
            hint: self.field.settings.hint.clone(),
            options: self.field.editor_options.clone().unwrap_or_default(),
        }
    }

    /// Stores a submitted value. Malformed JSON is reported in `errors` and
    /// leaves the record untouched. Returns whether the value was stored.
    pub fn update(&self, record: &mut Record, submitted: Option<String>, errors: &mut FormErrors) -> bool {
        if !validate_json(submitted.as_deref()) {
            debug!("Rejected malformed JSON for field {}", self.prefix());
            errors.add(&self.prefix(), INVALID_JSON_MESSAGE);
            return false;
        }

        let field = JsonField { value: submitted };
        match serde_json::to_value(&field) {
            Ok(value) => {
                record.set_field(self.part, &self.field.name, value);
                true
            }
            Err(e) => {
                errors.add(&self.prefix(), &e.to_string());
                false
            }
        }
    }
}

/// Checks every JSON field declared by a record's type definition.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFieldValidator;

impl RecordValidator for JsonFieldValidator {
    fn validate(
        &self,
        record: &Record,
        definition: Option<&TypeDefinition>,
        result: &mut ValidationResult,
    ) {
        let Some(definition) = definition else {
            return;
        };

        for (part, field) in definition.json_fields() {
            let Some(slot) = record.field(part, &field.name) else {
                continue;
            };
            let editor = JsonFieldEditor::new(part, field);
            match serde_json::from_value::<JsonField>(slot.clone()) {
                Ok(json_field) if validate_json(json_field.value.as_deref()) => {}
                _ => result.fail(editor.prefix(), INVALID_JSON_MESSAGE),
            }
        }
    }
}
