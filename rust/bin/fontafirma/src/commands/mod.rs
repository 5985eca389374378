pub mod config;
pub mod edit;
pub mod export;
pub mod grid;
pub mod select;

use std::sync::Arc;

use fontafirma_core::{ServiceConfig, ServiceError, StoreBackend};
use fontafirma_kv::{KVStore, RedbStore};
use fontafirma_sheet::{HttpSheet, KvSheet, SheetStore};
use tracing::info;
use units::{BuildingScheme, EditSession, RecordStore};

/// Connect to the configured store and load the table.
pub fn open_session(config: &ServiceConfig) -> Result<EditSession, ServiceError> {
    let sheet: Arc<dyn SheetStore> = match &config.backend {
        StoreBackend::Kv { path } => {
            let kv: Arc<dyn KVStore> = Arc::new(
                RedbStore::open(path)
                    .map_err(|e| ServiceError::StoreUnavailable(format!("failed to open KV store: {}", e)))?,
            );
            info!("using KV store {} key {}", path.display(), config.sheet_key());
            Arc::new(KvSheet::new(kv, config.sheet_key()))
        }
        StoreBackend::Http { base_url, token } => {
            let sheet = HttpSheet::new(base_url, &config.store_id, &config.worksheet, token.as_deref())
                .map_err(|e| ServiceError::StoreUnavailable(e.to_string()))?;
            info!("using sheet service {}", sheet.url());
            Arc::new(sheet)
        }
    };

    EditSession::open(RecordStore::new(sheet, BuildingScheme::standard()))
}
