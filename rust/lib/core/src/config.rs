use std::path::PathBuf;

/// Which external store backend holds the durable copy of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Embedded redb file at the given path.
    Kv { path: PathBuf },
    /// Remote sheet service.
    Http { base_url: String, token: Option<String> },
}

/// Resolved configuration handed from the binary to the storage layer.
///
/// The binary builds this from its config file and environment; library
/// crates never read either directly.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Identifier of the spreadsheet-like store.
    pub store_id: String,

    /// Named sub-table (worksheet) inside the store.
    pub worksheet: String,

    pub backend: StoreBackend,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_id: "edificio".to_string(),
            worksheet: "departamentos".to_string(),
            backend: StoreBackend::Kv {
                path: PathBuf::from("data.redb"),
            },
        }
    }
}

impl ServiceConfig {
    /// Key under which a KV-backed sheet is stored: `sheet:{store_id}:{worksheet}`.
    pub fn sheet_key(&self) -> String {
        format!("sheet:{}:{}", self.store_id, self.worksheet)
    }
}
