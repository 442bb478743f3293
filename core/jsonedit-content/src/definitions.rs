//! Content type definitions.

use async_trait::async_trait;
use jsonedit_model::{FormErrors, JsonFieldSettings, TypeDefinition};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::SettingsError;
use crate::settings::apply_field_settings;

/// Looks up content type definitions by name.
#[async_trait]
pub trait DefinitionRegistry: Send + Sync {
    async fn get_type_definition(&self, name: &str) -> Option<TypeDefinition>;
}

/// Definitions held in memory.
#[derive(Debug, Default)]
pub struct InMemoryDefinitions {
    types: RwLock<HashMap<String, TypeDefinition>>,
}

impl InMemoryDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let types = types.into_iter().map(|t| (t.name.clone(), t)).collect();
        Self {
            types: RwLock::new(types),
        }
    }

    /// Adds or replaces a definition.
    pub async fn insert(&self, definition: TypeDefinition) {
        self.types
            .write()
            .await
            .insert(definition.name.clone(), definition);
    }

    /// Updates the settings of a JSON field. Rejected settings leave the
    /// definition unchanged.
    pub async fn update_field_settings(
        &self,
        type_name: &str,
        part: &str,
        field: &str,
        submitted: JsonFieldSettings,
    ) -> Result<(), SettingsError> {
        let unknown = || SettingsError::UnknownField {
            type_name: type_name.to_string(),
            part: part.to_string(),
            field: field.to_string(),
        };

        let mut types = self.types.write().await;
        let definition = types
            .get_mut(type_name)
            .and_then(|t| t.field_mut(part, field))
            .ok_or_else(unknown)?;

        let mut errors = FormErrors::new();
        let prefix = format!("{part}.{field}.Settings");
        if apply_field_settings(definition, submitted, &prefix, &mut errors) {
            info!("Updated settings of {type_name}/{part}/{field}");
            Ok(())
        } else {
            Err(SettingsError::Rejected(errors))
        }
    }
}

#[async_trait]
impl DefinitionRegistry for InMemoryDefinitions {
    async fn get_type_definition(&self, name: &str) -> Option<TypeDefinition> {
        self.types.read().await.get(name).cloned()
    }
}
