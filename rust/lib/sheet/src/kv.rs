use std::sync::Arc;

use fontafirma_kv::KVStore;
use tracing::debug;

use crate::error::SheetError;
use crate::traits::{Sheet, SheetBody, SheetStore};

/// KvSheet keeps a worksheet as one JSON document in a KVStore.
///
/// The value under `key` has the same `{"values": [...]}` shape the HTTP
/// sheet service uses, so a file can be moved between backends unchanged.
pub struct KvSheet {
    kv: Arc<dyn KVStore>,
    key: String,
}

impl KvSheet {
    pub fn new(kv: Arc<dyn KVStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }
}

impl SheetStore for KvSheet {
    fn read_all(&self) -> Result<Sheet, SheetError> {
        let Some(bytes) = self.kv.get(&self.key)? else {
            debug!("KvSheet: no value at {}, reading as empty", self.key);
            return Ok(Sheet::default());
        };
        let body: SheetBody = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Format(format!("{}: {}", self.key, e)))?;
        Ok(Sheet::from_body(body))
    }

    fn replace_all(&self, sheet: &Sheet) -> Result<(), SheetError> {
        let bytes = serde_json::to_vec(&sheet.to_body())
            .map_err(|e| SheetError::Format(e.to_string()))?;
        self.kv.set(&self.key, &bytes)?;
        debug!("KvSheet: wrote {} rows to {}", sheet.rows.len(), self.key);
        Ok(())
    }
}
