use chrono::{DateTime, Utc};
use jsonedit_types::{RecordId, VersionId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::merge::{merge_values, ArrayMergePolicy};
use crate::{ModelError, ModelResult};

/// A content record as exchanged with the record engine.
///
/// The well-known properties are typed; every other top-level key is a part
/// (an object holding fields) and is kept verbatim in [`Record::parts`].
/// Serialized with PascalCase keys, e.g. `{"ContentItemId": "42", "TitlePart": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_item_id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_item_version_id: VersionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(default)]
    pub modified_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(flatten)]
    pub parts: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle state of a record's latest version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionState {
    /// Not created yet (empty identifier).
    New,
    Draft,
    Published,
}

/// Which version of a record a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOptions {
    /// The most recent version, draft or published.
    Latest,
    /// The published version only.
    Published,
    /// The draft version only.
    Draft,
    /// A draft version; when only a published version exists the engine
    /// prepares a new draft from it.
    DraftRequired,
}

impl Record {
    /// Creates an empty, not-yet-created record of the given type.
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            ..Self::default()
        }
    }

    /// Decodes a JSON payload. The literal `null` decodes to `None`.
    pub fn from_json(text: &str) -> ModelResult<Option<Self>> {
        serde_json::from_str(text).map_err(ModelError::Payload)
    }

    /// Full JSON serialization of the record, indented for the editor.
    pub fn to_json_pretty(&self) -> ModelResult<String> {
        serde_json::to_string_pretty(self).map_err(ModelError::Payload)
    }

    pub fn version_state(&self) -> VersionState {
        if self.content_item_id.is_empty() {
            VersionState::New
        } else if self.published {
            VersionState::Published
        } else {
            VersionState::Draft
        }
    }

    /// Returns a part by name.
    pub fn part(&self, name: &str) -> Option<&Map<String, Value>> {
        self.parts.get(name).and_then(Value::as_object)
    }

    /// Returns a part by name, creating it (or replacing a non-object value) when needed.
    pub fn part_mut(&mut self, name: &str) -> &mut Map<String, Value> {
        let slot = self
            .parts
            .entry(name.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just set to an object"),
        }
    }

    /// Returns a field of a part.
    pub fn field(&self, part: &str, field: &str) -> Option<&Value> {
        self.part(part).and_then(|p| p.get(field))
    }

    /// Sets a field of a part, creating the part when it is missing.
    pub fn set_field(&mut self, part: &str, field: &str, value: Value) {
        self.part_mut(part).insert(field.to_string(), value);
    }

    /// Merges `source` into this record.
    ///
    /// Parts are deep-merged according to `policy`. `DisplayText`, `Owner`
    /// and `Author` are taken from the source when it carries them. Identity,
    /// type and lifecycle properties always stay those of `self`.
    pub fn merge(&mut self, source: &Record, policy: ArrayMergePolicy) {
        for (key, value) in &source.parts {
            match self.parts.get_mut(key) {
                Some(existing) => merge_values(existing, value, policy),
                None if !value.is_null() => {
                    self.parts.insert(key.clone(), value.clone());
                }
                None => {}
            }
        }

        if !source.display_text.is_empty() {
            self.display_text = source.display_text.clone();
        }
        if !source.owner.is_empty() {
            self.owner = source.owner.clone();
        }
        if !source.author.is_empty() {
            self.author = source.author.clone();
        }
    }
}
