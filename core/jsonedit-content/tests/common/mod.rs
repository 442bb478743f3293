#![allow(dead_code)]

use async_trait::async_trait;
use jsonedit_content::{
    Authorizer, Caller, EditRequestHandler, EditorConfig, InMemoryDefinitions, InMemoryStore,
    Permission, QueuedNotifier, RecordStore, RecordUpdateWorkflow, StoreResult,
};
use jsonedit_model::{
    FieldDefinition, PartDefinition, Record, RecordValidator, TypeDefinition, ValidationResult,
    VersionOptions,
};
use jsonedit_types::{RecordId, UserId};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Ordered log of collaborator calls shared by the doubles below.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub const MUTATIONS: [&str; 4] = ["update", "create_validated", "save_draft", "publish"];

pub fn caller(name: &str) -> Caller {
    Caller::new(UserId::parse(name).unwrap())
}

pub fn blog_post_definition() -> TypeDefinition {
    TypeDefinition::new("BlogPost")
        .with_part(PartDefinition::new("TitlePart"))
        .with_part(PartDefinition::new("BlogPost").with_field(FieldDefinition::json("Config")))
}

pub fn make_record(id: &str, display_text: &str) -> Record {
    let mut record = Record::new("BlogPost");
    record.content_item_id = RecordId::new(id);
    record.display_text = display_text.to_string();
    record.owner = "admin".to_string();
    record.author = "admin".to_string();
    record.set_field("TitlePart", "Title", json!(display_text));
    record.set_field("BlogPost", "Config", json!({"Value": "{\"tags\":[\"a\",\"b\"]}"}));
    record.set_field("BlogPost", "Tags", json!({"Values": ["a", "b"]}));
    record
}

/// Rejects records without display text.
pub struct RequireDisplayText;

impl RecordValidator for RequireDisplayText {
    fn validate(&self, record: &Record, _: Option<&TypeDefinition>, result: &mut ValidationResult) {
        if record.display_text.trim().is_empty() {
            result.fail("TitlePart.Title", "Title is required");
        }
    }
}

// ── Recording store ──────────────────────────────────────────────

pub struct RecordingStore {
    pub inner: InMemoryStore,
    log: CallLog,
}

impl RecordingStore {
    pub fn new(inner: InMemoryStore, log: CallLog) -> Self {
        Self { inner, log }
    }

    fn record(&self, call: &str) {
        self.log.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn get(&self, id: &RecordId, options: VersionOptions) -> StoreResult<Option<Record>> {
        self.record("get");
        self.inner.get(id, options).await
    }

    async fn load(&self, record: Record) -> StoreResult<Record> {
        self.record("load");
        self.inner.load(record).await
    }

    async fn new_record(&self, content_type: &str) -> StoreResult<Record> {
        self.record("new_record");
        self.inner.new_record(content_type).await
    }

    async fn update(&self, record: &mut Record) -> StoreResult<()> {
        self.record("update");
        self.inner.update(record).await
    }

    async fn validate(&self, record: &Record) -> StoreResult<ValidationResult> {
        self.record("validate");
        self.inner.validate(record).await
    }

    async fn create_validated(
        &self,
        record: &mut Record,
        options: VersionOptions,
    ) -> StoreResult<ValidationResult> {
        self.record("create_validated");
        self.inner.create_validated(record, options).await
    }

    async fn save_draft(&self, record: &mut Record) -> StoreResult<()> {
        self.record("save_draft");
        self.inner.save_draft(record).await
    }

    async fn publish(&self, record: &mut Record) -> StoreResult<()> {
        self.record("publish");
        self.inner.publish(record).await
    }
}

// ── Recording authorizer ─────────────────────────────────────────

/// Grants a fixed permission set and remembers the display text of every
/// record it was asked about.
pub struct RecordingAuthorizer {
    granted: HashSet<Permission>,
    log: CallLog,
    pub seen_display_texts: Mutex<Vec<String>>,
    /// `"{permission}:{owner}"` of every checked record.
    pub seen_owners: Mutex<Vec<String>>,
}

#[async_trait]
impl Authorizer for RecordingAuthorizer {
    async fn authorize(&self, _caller: &Caller, permission: Permission, record: &Record) -> bool {
        self.log.lock().unwrap().push(format!("authorize:{permission:?}"));
        self.seen_display_texts
            .lock()
            .unwrap()
            .push(record.display_text.clone());
        self.seen_owners
            .lock()
            .unwrap()
            .push(format!("{permission:?}:{}", record.owner));
        self.granted.contains(&permission)
    }
}

// ── Harness ──────────────────────────────────────────────────────

pub struct Harness {
    pub log: CallLog,
    pub store: Arc<RecordingStore>,
    pub authorizer: Arc<RecordingAuthorizer>,
    pub definitions: Arc<InMemoryDefinitions>,
    pub notifier: Arc<QueuedNotifier>,
}

impl Harness {
    pub fn new(granted: &[Permission]) -> Self {
        let log: CallLog = Arc::default();
        let definitions = Arc::new(InMemoryDefinitions::with_types([blog_post_definition()]));
        let inner = InMemoryStore::new(definitions.clone()).with_validator(Arc::new(RequireDisplayText));
        Self {
            store: Arc::new(RecordingStore::new(inner, log.clone())),
            authorizer: Arc::new(RecordingAuthorizer {
                granted: granted.iter().copied().collect(),
                log: log.clone(),
                seen_display_texts: Mutex::new(Vec::new()),
                seen_owners: Mutex::new(Vec::new()),
            }),
            definitions,
            notifier: Arc::new(QueuedNotifier::new()),
            log,
        }
    }

    pub fn allow_all() -> Self {
        Self::new(&[Permission::EditContent, Permission::PublishContent])
    }

    /// Stores `record` directly, bypassing the call log.
    pub async fn seed(&self, record: Record) {
        self.store.inner.insert(record).await.unwrap();
    }

    pub fn workflow(&self) -> RecordUpdateWorkflow {
        RecordUpdateWorkflow::new(
            self.store.clone(),
            self.authorizer.clone(),
            self.definitions.clone(),
        )
    }

    pub fn handler(&self) -> EditRequestHandler {
        EditRequestHandler::new(
            EditorConfig::default(),
            self.store.clone(),
            self.authorizer.clone(),
            self.definitions.clone(),
            self.notifier.clone(),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn mutations(&self) -> usize {
        MUTATIONS.iter().map(|m| self.count(m)).sum()
    }

    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }
}
