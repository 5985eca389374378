use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::SheetError;
use crate::traits::{Sheet, SheetStore};

/// In-memory worksheet. Counts writes and can be told to fail, which makes
/// it the stand-in for the remote store in tests.
#[derive(Default)]
pub struct MemorySheet {
    sheet: Mutex<Sheet>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheet: Mutex::new(sheet),
            ..Self::default()
        }
    }

    /// Number of successful `replace_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// While failing, every call returns `SheetError::Connection`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current content, bypassing the failure switch.
    pub fn snapshot(&self) -> Sheet {
        self.sheet
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn check(&self) -> Result<(), SheetError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SheetError::Connection("memory sheet is offline".into()));
        }
        Ok(())
    }
}

impl SheetStore for MemorySheet {
    fn read_all(&self) -> Result<Sheet, SheetError> {
        self.check()?;
        let sheet = self
            .sheet
            .lock()
            .map_err(|e| SheetError::Storage(e.to_string()))?;
        Ok(sheet.clone())
    }

    fn replace_all(&self, sheet: &Sheet) -> Result<(), SheetError> {
        self.check()?;
        let mut current = self
            .sheet
            .lock()
            .map_err(|e| SheetError::Storage(e.to_string()))?;
        *current = sheet.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_writes_and_fails_on_demand() {
        let store = MemorySheet::new();
        assert!(store.read_all().unwrap().is_empty());

        let sheet = Sheet::new(vec!["torre".into()], vec![vec!["C".into()]]);
        store.replace_all(&sheet).unwrap();
        assert_eq!(store.write_count(), 1);

        store.set_failing(true);
        assert!(matches!(store.read_all(), Err(SheetError::Connection(_))));
        assert!(store.replace_all(&Sheet::default()).is_err());
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.snapshot(), sheet);
    }
}
