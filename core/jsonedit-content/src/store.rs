//! The record engine seen by the editor.
//!
//! Every call is awaited to completion before the workflow moves on; the
//! store owns its own concurrency discipline.

use async_trait::async_trait;
use chrono::Utc;
use jsonedit_model::{Record, RecordValidator, ValidationResult, VersionOptions};
use jsonedit_types::{RecordId, VersionId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::definitions::DefinitionRegistry;
use crate::error::{StoreError, StoreResult};
use crate::field::JsonFieldValidator;

/// Persistence and lifecycle operations of the record engine.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks up a record version. With [`VersionOptions::DraftRequired`] a
    /// published-only record yields a new, not yet stored, draft version.
    async fn get(&self, id: &RecordId, options: VersionOptions) -> StoreResult<Option<Record>>;

    /// Runs the load pipeline over a record decoded from a payload: parts the
    /// payload omitted are filled in, and type, ownership and creation time
    /// are those of the stored record when there is one.
    async fn load(&self, record: Record) -> StoreResult<Record>;

    /// Builds a new, not yet stored, record of the given type.
    async fn new_record(&self, content_type: &str) -> StoreResult<Record>;

    /// Stores changes to an existing record version.
    async fn update(&self, record: &mut Record) -> StoreResult<()>;

    /// Runs business-rule validation.
    async fn validate(&self, record: &Record) -> StoreResult<ValidationResult>;

    /// Updates, validates and, when validation succeeds, creates a new record
    /// as a single step. Nothing is stored when validation fails.
    async fn create_validated(
        &self,
        record: &mut Record,
        options: VersionOptions,
    ) -> StoreResult<ValidationResult>;

    /// Stores the record as the draft version.
    async fn save_draft(&self, record: &mut Record) -> StoreResult<()>;

    /// Makes the record the published version.
    async fn publish(&self, record: &mut Record) -> StoreResult<()>;
}

#[derive(Debug, Default, Clone)]
struct StoredVersions {
    published: Option<Record>,
    draft: Option<Record>,
}

impl StoredVersions {
    fn latest(&self) -> Option<&Record> {
        self.draft.as_ref().or(self.published.as_ref())
    }
}

/// Record engine held in memory. Keeps at most one published and one draft
/// version per record.
pub struct InMemoryStore {
    records: RwLock<HashMap<RecordId, StoredVersions>>,
    definitions: Arc<dyn DefinitionRegistry>,
    validators: Vec<Arc<dyn RecordValidator>>,
}

impl InMemoryStore {
    /// Creates an empty store validating JSON fields against `definitions`.
    pub fn new(definitions: Arc<dyn DefinitionRegistry>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            definitions,
            validators: vec![Arc::new(JsonFieldValidator)],
        }
    }

    /// Registers an additional record validator.
    pub fn with_validator(mut self, validator: Arc<dyn RecordValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Stores a record as-is, as its published or draft version depending on
    /// its `Published` flag.
    pub async fn insert(&self, mut record: Record) -> StoreResult<()> {
        if record.content_item_id.is_empty() {
            return Err(StoreError::InvalidData("record has no identifier".into()));
        }
        if record.content_item_version_id.is_empty() {
            record.content_item_version_id = VersionId::generate();
        }
        record.latest = true;

        let mut records = self.records.write().await;
        let versions = records.entry(record.content_item_id.clone()).or_default();
        if record.published {
            versions.published = Some(record);
        } else {
            versions.draft = Some(record);
        }
        Ok(())
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn require_id(record: &Record) -> StoreResult<()> {
        if record.content_item_id.is_empty() {
            return Err(StoreError::InvalidData("record has no identifier".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, id: &RecordId, options: VersionOptions) -> StoreResult<Option<Record>> {
        if id.is_empty() {
            return Ok(None);
        }
        let records = self.records.read().await;
        let Some(versions) = records.get(id) else {
            return Ok(None);
        };

        let found = match options {
            VersionOptions::Latest => versions.latest().cloned(),
            VersionOptions::Published => versions.published.clone(),
            VersionOptions::Draft => versions.draft.clone(),
            VersionOptions::DraftRequired => match (&versions.draft, &versions.published) {
                (Some(draft), _) => Some(draft.clone()),
                (None, Some(published)) => {
                    debug!("Preparing draft of published record {id}");
                    let mut draft = published.clone();
                    draft.content_item_version_id = VersionId::generate();
                    draft.published = false;
                    draft.latest = true;
                    Some(draft)
                }
                (None, None) => None,
            },
        };
        Ok(found)
    }

    async fn load(&self, mut record: Record) -> StoreResult<Record> {
        let records = self.records.read().await;
        let Some(stored) = records.get(&record.content_item_id).and_then(StoredVersions::latest)
        else {
            return Ok(record);
        };

        for (key, value) in &stored.parts {
            if !record.parts.contains_key(key) {
                record.parts.insert(key.clone(), value.clone());
            }
        }
        // Identity and ownership always come from the stored version.
        record.content_type = stored.content_type.clone();
        record.owner = stored.owner.clone();
        record.author = stored.author.clone();
        record.created_utc = stored.created_utc;
        Ok(record)
    }

    async fn new_record(&self, content_type: &str) -> StoreResult<Record> {
        let mut record = Record::new(content_type);
        record.content_item_id = RecordId::generate();
        record.content_item_version_id = VersionId::generate();
        record.latest = true;
        Ok(record)
    }

    async fn update(&self, record: &mut Record) -> StoreResult<()> {
        Self::require_id(record)?;
        let mut records = self.records.write().await;
        let versions = records
            .get_mut(&record.content_item_id)
            .ok_or_else(|| StoreError::NotFound(record.content_item_id.to_string()))?;

        record.modified_utc = Some(Utc::now());
        record.latest = true;
        if record.published {
            versions.published = Some(record.clone());
        } else {
            versions.draft = Some(record.clone());
        }
        debug!("Updated record {}", record.content_item_id);
        Ok(())
    }

    async fn validate(&self, record: &Record) -> StoreResult<ValidationResult> {
        let definition = self
            .definitions
            .get_type_definition(&record.content_type)
            .await;
        let mut result = ValidationResult::success();
        for validator in &self.validators {
            validator.validate(record, definition.as_ref(), &mut result);
        }
        Ok(result)
    }

    async fn create_validated(
        &self,
        record: &mut Record,
        options: VersionOptions,
    ) -> StoreResult<ValidationResult> {
        Self::require_id(record)?;
        if self.records.read().await.contains_key(&record.content_item_id) {
            return Err(StoreError::Conflict(record.content_item_id.to_string()));
        }

        let now = Utc::now();
        record.created_utc = Some(now);
        record.modified_utc = Some(now);
        record.latest = true;

        let result = self.validate(record).await?;
        if !result.succeeded() {
            return Ok(result);
        }

        // The id may have been claimed while validation awaited.
        let mut records = self.records.write().await;
        let Entry::Vacant(slot) = records.entry(record.content_item_id.clone()) else {
            return Err(StoreError::Conflict(record.content_item_id.to_string()));
        };
        let versions = slot.insert(StoredVersions::default());
        if options == VersionOptions::Published {
            record.published = true;
            record.published_utc = Some(now);
            versions.published = Some(record.clone());
        } else {
            record.published = false;
            versions.draft = Some(record.clone());
        }
        drop(records);
        info!(
            "Created record {} (type={})",
            record.content_item_id, record.content_type
        );
        Ok(result)
    }

    async fn save_draft(&self, record: &mut Record) -> StoreResult<()> {
        Self::require_id(record)?;
        record.published = false;
        record.latest = true;
        record.modified_utc = Some(Utc::now());

        let mut records = self.records.write().await;
        let versions = records.entry(record.content_item_id.clone()).or_default();
        versions.draft = Some(record.clone());
        if let Some(published) = versions.published.as_mut() {
            published.latest = false;
        }
        debug!("Saved draft of record {}", record.content_item_id);
        Ok(())
    }

    async fn publish(&self, record: &mut Record) -> StoreResult<()> {
        Self::require_id(record)?;
        let now = Utc::now();
        record.published = true;
        record.latest = true;
        record.published_utc = Some(now);
        record.modified_utc = Some(now);

        let mut records = self.records.write().await;
        let versions = records.entry(record.content_item_id.clone()).or_default();
        versions.published = Some(record.clone());
        versions.draft = None;
        info!(
            "Published record {} (type={})",
            record.content_item_id, record.content_type
        );
        Ok(())
    }
}
