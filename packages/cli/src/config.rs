use pagecraft_editor::{csrf_token_from_meta, PageEditor, StoredPage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no csrf-token meta tag in {0}")]
    MissingMetaToken(PathBuf),
}

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Endpoint receiving multipart image uploads
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Base URL pages are PUT to, by id or slug
    #[serde(default = "default_submit_url")]
    pub submit_url: String,

    /// Token sent as X-CSRF-TOKEN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,

    /// HTML page whose csrf-token meta tag supplies the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_meta_page: Option<String>,

    /// Undo levels kept per editing session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_upload_url() -> String {
    "http://localhost:8000/admin/upload-image".to_string()
}

fn default_submit_url() -> String {
    "http://localhost:8000/admin/pages".to_string()
}

fn default_history_limit() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if !config_path.exists() {
            // Return default config if none exists
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: config_path,
            source,
        })
    }

    /// Editing session for a stored page, keeping `historyLimit` undo levels
    pub fn open_editor(&self, stored: StoredPage) -> PageEditor {
        PageEditor::open(stored).with_history_limit(self.history_limit)
    }

    /// Explicit token first, then the meta tag of `csrfMetaPage`
    pub fn csrf_token(&self, cwd: &Path) -> Result<Option<String>, ConfigError> {
        if let Some(token) = &self.csrf_token {
            return Ok(Some(token.clone()));
        }

        let Some(page) = &self.csrf_meta_page else {
            return Ok(None);
        };

        let path = cwd.join(page);
        let html = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        csrf_token_from_meta(&html)
            .map(Some)
            .ok_or(ConfigError::MissingMetaToken(path))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_url: default_upload_url(),
            submit_url: default_submit_url(),
            csrf_token: None,
            csrf_meta_page: None,
            history_limit: default_history_limit(),
        }
    }
}
