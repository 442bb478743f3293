use serde::{Deserialize, Serialize};

/// Configuration for the editor pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Path prefix of the admin area, without trailing slash.
    pub admin_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            admin_prefix: "/Admin".to_string(),
        }
    }
}

impl EditorConfig {
    /// Path of the JSON editor page of a record.
    pub fn editor_path(&self, record_id: &str) -> String {
        format!(
            "{}/Contents/ContentItems/{}/Edit/Json",
            self.admin_prefix.trim_end_matches('/'),
            urlencoding::encode(record_id)
        )
    }

    /// Editor page URL, carrying `returnUrl` as a query parameter when present.
    pub fn editor_url(&self, record_id: &str, return_url: Option<&str>) -> String {
        let path = self.editor_path(record_id);
        match return_url {
            Some(url) if !url.is_empty() => {
                format!("{path}?returnUrl={}", urlencoding::encode(url))
            }
            _ => path,
        }
    }
}
