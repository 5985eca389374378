//! Client configuration.
//!
//! Reads/writes `~/.fontafirma/config.toml`. Store credentials may also come
//! from the environment so they need not live in the file.

use std::path::{Path, PathBuf};

use fontafirma_core::{ServiceConfig, StoreBackend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Kv,
    Http,
}

/// Embedded store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KvSection {
    /// Path to the redb file (default: ~/.fontafirma/data.redb).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Remote sheet service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    /// Service URL (e.g. "https://sheets.example.com").
    #[serde(rename = "base-url", default, skip_serializing_if = "String::is_empty")]
    pub base_url: String,

    /// Bearer token.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

/// Client configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identifier of the external store.
    #[serde(rename = "store-id", default = "default_store_id")]
    pub store_id: String,

    /// Worksheet inside the store.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub kv: KvSection,

    #[serde(default)]
    pub http: HttpSection,
}

fn default_store_id() -> String {
    "edificio".to_string()
}

fn default_worksheet() -> String {
    "departamentos".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store_id: default_store_id(),
            worksheet: default_worksheet(),
            backend: BackendKind::default(),
            kv: KvSection::default(),
            http: HttpSection::default(),
        }
    }
}

impl ClientConfig {
    /// Default config file path: ~/.fontafirma/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `FONTAFIRMA_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| get(key).filter(|v| !v.is_empty());
        if let Some(v) = get("FONTAFIRMA_STORE_ID") {
            self.store_id = v;
        }
        if let Some(v) = get("FONTAFIRMA_WORKSHEET") {
            self.worksheet = v;
        }
        if let Some(v) = get("FONTAFIRMA_SHEET_URL") {
            self.http.base_url = v;
            self.backend = BackendKind::Http;
        }
        if let Some(v) = get("FONTAFIRMA_SHEET_TOKEN") {
            self.http.token = v;
        }
    }

    /// Resolve into the storage-layer configuration.
    pub fn resolve(&self) -> anyhow::Result<ServiceConfig> {
        let backend = match self.backend {
            BackendKind::Kv => StoreBackend::Kv {
                path: if self.kv.path.is_empty() {
                    dirs_path().join("data.redb")
                } else {
                    PathBuf::from(&self.kv.path)
                },
            },
            BackendKind::Http => {
                if self.http.base_url.is_empty() {
                    anyhow::bail!(
                        "backend is \"http\" but no base-url is set. Add [http] base-url to the config or set FONTAFIRMA_SHEET_URL."
                    );
                }
                StoreBackend::Http {
                    base_url: self.http.base_url.clone(),
                    token: Some(self.http.token.clone()).filter(|t| !t.is_empty()),
                }
            }
        };
        Ok(ServiceConfig {
            store_id: self.store_id.clone(),
            worksheet: self.worksheet.clone(),
            backend,
        })
    }
}

/// Return the fontafirma config directory (~/.fontafirma).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".fontafirma")
}
