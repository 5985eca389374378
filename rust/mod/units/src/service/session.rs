use fontafirma_core::ServiceError;
use tracing::{info, warn};

use crate::model::{UnitEdit, UnitRecord, UnitTable};
use crate::service::selection;
use crate::service::store::RecordStore;

/// One user's working copy of the table.
///
/// Opening a session loads the table once; dropping it discards the
/// in-memory copy. Every edit is followed by a whole-table save. If that
/// save fails the edit stays applied locally and `save` can be called
/// again.
pub struct EditSession {
    store: RecordStore,
    table: UnitTable,
}

impl EditSession {
    /// Load the table. A store failure here is fatal to the session.
    pub fn open(store: RecordStore) -> Result<Self, ServiceError> {
        let table = store.load()?;
        Ok(Self { store, table })
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    pub fn record(&self, unit_id: &str) -> Result<&UnitRecord, ServiceError> {
        selection::resolve(&self.table, unit_id).map(|(_, r)| r)
    }

    /// Overwrite the four mutable fields of `unit_id`, then save.
    ///
    /// `NotFound` leaves the table untouched and skips the save. A save
    /// failure is returned as `StoreUnavailable` with the edit kept.
    pub fn apply_edit(&mut self, unit_id: &str, edit: &UnitEdit) -> Result<(), ServiceError> {
        let (index, _) = selection::resolve(&self.table, unit_id)?;
        let record = self
            .table
            .record_mut(index)
            .ok_or_else(|| ServiceError::Internal(format!("unit {} vanished", unit_id)))?;
        edit.apply_to(record);
        info!("applied edit to {} (state: {})", unit_id, edit.state.name());

        if let Err(e) = self.save() {
            warn!("edit to {} kept locally; store is stale", unit_id);
            return Err(e);
        }
        Ok(())
    }

    /// Send the current table to the store. Also the manual retry after a
    /// failed save.
    pub fn save(&self) -> Result<(), ServiceError> {
        self.store.save(&self.table)
    }

    /// End the session, handing back the final table.
    pub fn close(self) -> UnitTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fontafirma_sheet::MemorySheet;

    use super::*;
    use crate::model::{BuildingScheme, OccupantType, UnitState};
    use crate::service::store::to_sheet;

    fn open_session() -> (Arc<MemorySheet>, EditSession) {
        let mem = Arc::new(MemorySheet::new());
        let store = RecordStore::new(mem.clone(), BuildingScheme::standard());
        (mem, EditSession::open(store).unwrap())
    }

    fn jane() -> UnitEdit {
        UnitEdit {
            state: UnitState::Signed,
            occupant_name: "Jane Doe".into(),
            occupant_type: OccupantType::Owner,
            notes: "ok".into(),
        }
    }

    #[test]
    fn edit_changes_exactly_one_record() {
        let (mem, mut session) = open_session();
        let before = session.table().clone();

        session.apply_edit("A-101", &jane()).unwrap();

        let a101 = session.record("A-101").unwrap();
        assert_eq!(a101.state, UnitState::Signed);
        assert_eq!(a101.occupant_name, "Jane Doe");
        assert_eq!(a101.occupant_type, OccupantType::Owner);
        assert_eq!(a101.notes, "ok");
        assert_eq!((a101.tower.as_str(), a101.floor, a101.number), ("A", 1, 101));

        assert_eq!(session.record("A-102").unwrap(), before.get("A-102").unwrap());
        let changed = session
            .table()
            .iter()
            .zip(before.iter())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);

        // initial catalog write + the edit's save
        assert_eq!(mem.write_count(), 2);
        assert_eq!(mem.snapshot(), to_sheet(session.table()));
    }

    #[test]
    fn unknown_unit_is_not_found_and_not_saved() {
        let (mem, mut session) = open_session();
        let before = session.table().clone();

        let err = session.apply_edit("Z-101", &jane()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(session.table(), &before);
        assert_eq!(mem.write_count(), 1);
    }

    #[test]
    fn failed_save_keeps_local_edit() {
        let (mem, mut session) = open_session();
        mem.set_failing(true);

        let err = session.apply_edit("B-214", &jane()).unwrap_err();
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
        assert_eq!(session.record("B-214").unwrap().state, UnitState::Signed);
        assert_ne!(mem.snapshot(), to_sheet(session.table()));

        mem.set_failing(false);
        session.save().unwrap();
        assert_eq!(mem.snapshot(), to_sheet(session.table()));
    }

    #[test]
    fn open_fails_when_store_is_down() {
        let mem = Arc::new(MemorySheet::new());
        mem.set_failing(true);
        let store = RecordStore::new(mem, BuildingScheme::standard());
        assert!(matches!(
            EditSession::open(store),
            Err(ServiceError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn reopened_session_sees_saved_edit() {
        let (mem, mut session) = open_session();
        session.apply_edit("C-305", &jane()).unwrap();
        let closed = session.close();

        let store = RecordStore::new(mem, BuildingScheme::standard());
        let reopened = EditSession::open(store).unwrap();
        assert_eq!(reopened.table(), &closed);
    }
}
