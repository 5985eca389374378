use serde::Serialize;

use crate::model::UnitRecord;

/// The full set of unit records, in catalog order.
///
/// The row set is fixed once built: there is no insert or delete, only
/// in-place mutation of an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnitTable {
    records: Vec<UnitRecord>,
}

impl UnitTable {
    pub fn new(records: Vec<UnitRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[UnitRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnitRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the record with the given id.
    pub fn position(&self, unit_id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.unit_id == unit_id)
    }

    pub fn get(&self, unit_id: &str) -> Option<&UnitRecord> {
        self.records.iter().find(|r| r.unit_id == unit_id)
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut UnitRecord> {
        self.records.get_mut(index)
    }
}

impl<'a> IntoIterator for &'a UnitTable {
    type Item = &'a UnitRecord;
    type IntoIter = std::slice::Iter<'a, UnitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
