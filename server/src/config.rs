//! Server configuration loaded from TOML.
//!
//! ```toml
//! listen = "127.0.0.1:5080"
//! admin_prefix = "/Admin"
//! default_user = "admin"
//! seed = "records.json"
//!
//! [users.admin]
//! permissions = ["PublishContent"]
//!
//! [[types]]
//! name = "BlogPost"
//! display_name = "Blog Post"
//!
//! [[types.parts]]
//! name = "BlogPost"
//!
//! [[types.parts.fields]]
//! name = "Config"
//! field_type = "JsonField"
//! settings = { hint = "Paste JSON", jsonEditorOptions = '{"mode": "code"}' }
//! ```

use jsonedit_content::settings::apply_field_settings;
use jsonedit_content::{Caller, EditorConfig, Permission, RoleAuthorizer};
use jsonedit_model::{FieldKind, FormErrors, Record, TypeDefinition};
use jsonedit_types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid seed records: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("invalid user id: {0:?}")]
    InvalidUser(String),

    #[error("invalid editor options for {type_name}/{part}/{field}")]
    InvalidFieldSettings {
        type_name: String,
        part: String,
        field: String,
    },
}

/// Permissions granted to one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub admin_prefix: String,
    /// User requests run as when they carry no `X-User-Id` header.
    pub default_user: String,
    /// Permission table. Without a `[users]` section the default user holds
    /// `PublishContent`; a configured table replaces that grant.
    pub users: BTreeMap<String, UserConfig>,
    pub types: Vec<TypeDefinition>,
    /// JSON file holding an array of records to start with.
    pub seed: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 5080)),
            admin_prefix: EditorConfig::default().admin_prefix,
            default_user: "admin".to_string(),
            users: BTreeMap::from([(
                "admin".to_string(),
                UserConfig {
                    permissions: vec![Permission::PublishContent],
                },
            )]),
            types: Vec::new(),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Reads a TOML file. A relative `seed` path is resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(seed), Some(dir)) = (config.seed.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = dir.join(&*seed);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            admin_prefix: self.admin_prefix.clone(),
        }
    }

    pub fn default_caller(&self) -> ConfigResult<Caller> {
        let user = UserId::parse(&self.default_user)
            .map_err(|_| ConfigError::InvalidUser(self.default_user.clone()))?;
        Ok(Caller::new(user))
    }

    pub fn authorizer(&self) -> ConfigResult<RoleAuthorizer> {
        self.users
            .iter()
            .try_fold(RoleAuthorizer::new(), |auth, (name, user)| {
                let id = UserId::parse(name).map_err(|_| ConfigError::InvalidUser(name.clone()))?;
                Ok(auth.grant(id, user.permissions.iter().copied()))
            })
    }

    /// Type definitions with the editor options of every JSON field parsed
    /// from its settings.
    pub fn type_definitions(&self) -> ConfigResult<Vec<TypeDefinition>> {
        let mut types = self.types.clone();
        for definition in &mut types {
            for part in &mut definition.parts {
                for field in &mut part.fields {
                    if field.field_type != FieldKind::Json {
                        continue;
                    }
                    let mut errors = FormErrors::new();
                    let prefix = format!("{}.{}", part.name, field.name);
                    let settings = field.settings.clone();
                    if !apply_field_settings(field, settings, &prefix, &mut errors) {
                        return Err(ConfigError::InvalidFieldSettings {
                            type_name: definition.name.clone(),
                            part: part.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(types)
    }

    /// Records from the seed file, or none when no seed is configured.
    pub fn seed_records(&self) -> ConfigResult<Vec<Record>> {
        let Some(path) = &self.seed else {
            return Ok(Vec::new());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.editor_config(), EditorConfig::default());
    }

    #[test]
    fn parses_users_and_types() {
        let config = ServerConfig::from_toml_str(
            r#"
            default_user = "editor"

            [users.editor]
            permissions = ["EditOwnContent", "PublishOwnContent"]

            [[types]]
            name = "Page"

            [[types.parts]]
            name = "Page"

            [[types.parts.fields]]
            name = "Data"
            field_type = "JsonField"
            settings = { jsonEditorOptions = '{"mode": "tree"}' }
            "#,
        )
        .unwrap();

        assert_eq!(config.users["editor"].permissions.len(), 2);
        let types = config.type_definitions().unwrap();
        let field = types[0].field("Page", "Data").unwrap();
        assert!(field.editor_options.is_some());
        assert_eq!(config.default_caller().unwrap().user_id.as_str(), "editor");
    }

    #[test]
    fn rejects_invalid_editor_options() {
        let config = ServerConfig::from_toml_str(
            r#"
            [[types]]
            name = "Page"

            [[types.parts]]
            name = "Page"

            [[types.parts.fields]]
            name = "Data"
            field_type = "JsonField"
            settings = { jsonEditorOptions = "{not json" }
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.type_definitions(),
            Err(ConfigError::InvalidFieldSettings { .. })
        ));
    }

    #[tokio::test]
    async fn default_user_may_edit_without_config_file() {
        use jsonedit_content::Authorizer;
        use jsonedit_model::Record;

        let config = ServerConfig::default();
        let caller = config.default_caller().unwrap();
        let auth = config.authorizer().unwrap();
        let record = Record::new("Page");
        assert!(auth.authorize(&caller, Permission::EditContent, &record).await);
        assert!(auth.authorize(&caller, Permission::PublishContent, &record).await);
    }

    #[test]
    fn configured_users_replace_default_grant() {
        let config = ServerConfig::from_toml_str("[users.editor]\npermissions = []").unwrap();
        assert!(!config.users.contains_key("admin"));
    }

    #[test]
    fn rejects_blank_user() {
        let config = ServerConfig::from_toml_str("default_user = \" \"").unwrap();
        assert!(matches!(config.default_caller(), Err(ConfigError::InvalidUser(_))));
    }
}
