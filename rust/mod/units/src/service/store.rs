use std::collections::HashSet;
use std::sync::Arc;

use fontafirma_core::ServiceError;
use fontafirma_sheet::{Sheet, SheetError, SheetStore};
use tracing::{debug, info, warn};

use crate::model::{unit_id, BuildingScheme, OccupantType, UnitRecord, UnitState, UnitTable};
use crate::service::catalog;

/// Column names of the worksheet header, in write order.
///
/// This is also the export order: tower, floor, number, unit id, state,
/// occupant name, occupant type, notes.
pub const COLUMNS: [&str; 8] = [
    "torre",
    "piso",
    "numero",
    "departamento",
    "estado",
    "nombre",
    "tipo_persona",
    "observaciones",
];

const TOWER: usize = 0;
const FLOOR: usize = 1;
const NUMBER: usize = 2;
const UNIT_ID: usize = 3;
const STATE: usize = 4;
const NAME: usize = 5;
const OCCUPANT_TYPE: usize = 6;
const NOTES: usize = 7;

/// RecordStore adapts a whole-worksheet SheetStore to the typed unit table.
///
/// Normalization happens here and only here: everything downstream works
/// with `UnitTable`.
pub struct RecordStore {
    sheet: Arc<dyn SheetStore>,
    scheme: BuildingScheme,
}

impl RecordStore {
    pub fn new(sheet: Arc<dyn SheetStore>, scheme: BuildingScheme) -> Self {
        Self { sheet, scheme }
    }

    /// Fetch and normalize the table.
    ///
    /// A worksheet that yields no records (nothing at all, a header with
    /// none of the known columns, or a header over blank rows) is
    /// initialized with a freshly generated catalog.
    pub fn load(&self) -> Result<UnitTable, ServiceError> {
        let sheet = self.sheet.read_all().map_err(|e| unavailable("load", e))?;

        if has_header(&sheet) {
            let table = normalize(&sheet);
            if !table.is_empty() {
                info!("loaded {} units from store", table.len());
                return Ok(table);
            }
        }

        let table = catalog::generate(&self.scheme);
        info!(
            "store holds no units ({} raw rows); initializing with {} generated units",
            sheet.rows.len(),
            table.len()
        );
        self.save(&table)?;
        Ok(table)
    }

    /// Replace the remote content with `table`.
    pub fn save(&self, table: &UnitTable) -> Result<(), ServiceError> {
        self.sheet
            .replace_all(&to_sheet(table))
            .map_err(|e| unavailable("save", e))?;
        debug!("saved {} units to store", table.len());
        Ok(())
    }
}

fn unavailable(action: &str, e: SheetError) -> ServiceError {
    warn!("store {} failed: {}", action, e);
    ServiceError::StoreUnavailable(format!("store {} failed: {}", action, e))
}

/// A header is usable when it names at least one known column.
pub fn has_header(sheet: &Sheet) -> bool {
    sheet
        .header
        .iter()
        .any(|h| COLUMNS.iter().any(|c| *c == h.trim()))
}

/// Turn loose worksheet rows into typed records.
///
/// Missing columns read as empty text, `floor`/`number` that do not parse as
/// integers become 0, blank ids are derived from tower and number, and
/// unknown state or occupant-type labels fall back to their defaults.
/// Rows with every cell blank are dropped, and so is any row repeating an
/// id already seen; the first occurrence wins.
pub fn normalize(sheet: &Sheet) -> UnitTable {
    let index: Vec<Option<usize>> = COLUMNS
        .iter()
        .map(|col| sheet.header.iter().position(|h| h.trim() == *col))
        .collect();

    let missing: Vec<&str> = COLUMNS
        .iter()
        .zip(&index)
        .filter(|(_, i)| i.is_none())
        .map(|(c, _)| *c)
        .collect();
    if !missing.is_empty() {
        debug!("normalize: filling missing columns {:?}", missing);
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(sheet.rows.len());
    for row in &sheet.rows {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cell = |col: usize| cell_at(row, &index, col);

        let tower = cell(TOWER).trim().to_string();
        let number = coerce_int(cell(NUMBER));
        let id = match cell(UNIT_ID).trim() {
            "" => unit_id(&tower, number),
            id => id.to_string(),
        };
        if !seen.insert(id.clone()) {
            warn!("normalize: dropping duplicate row for unit {}", id);
            continue;
        }

        records.push(UnitRecord {
            floor: coerce_int(cell(FLOOR)),
            number,
            unit_id: id,
            state: UnitState::from_str_lenient(cell(STATE)),
            occupant_name: cell(NAME).to_string(),
            occupant_type: OccupantType::from_str_lenient(cell(OCCUPANT_TYPE)),
            notes: cell(NOTES).to_string(),
            tower,
        });
    }

    UnitTable::new(records)
}

fn cell_at<'a>(row: &'a [String], index: &[Option<usize>], col: usize) -> &'a str {
    index[col]
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Serialize the table back to worksheet rows, header first.
pub fn to_sheet(table: &UnitTable) -> Sheet {
    let header = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows = table.iter().map(|r| record_cells(r).to_vec()).collect();
    Sheet::new(header, rows)
}

/// Cells of one record in `COLUMNS` order, as persisted.
pub fn record_cells(r: &UnitRecord) -> [String; 8] {
    [
        r.tower.clone(),
        r.floor.to_string(),
        r.number.to_string(),
        r.unit_id.clone(),
        r.state.as_str().to_string(),
        r.occupant_name.clone(),
        r.occupant_type.as_str().to_string(),
        r.notes.clone(),
    ]
}

/// Integer coercion for spreadsheet cells: `"3"`, `" 3 "` and `"3.0"` are 3;
/// anything else is 0.
fn coerce_int(s: &str) -> i64 {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return i;
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontafirma_kv::{KVStore, RedbStore};
    use fontafirma_sheet::{KvSheet, MemorySheet};

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|c| c.to_string()).collect()
    }

    fn memory_store(sheet: Sheet) -> (Arc<MemorySheet>, RecordStore) {
        let mem = Arc::new(MemorySheet::with_sheet(sheet));
        let store = RecordStore::new(mem.clone(), BuildingScheme::standard());
        (mem, store)
    }

    #[test]
    fn empty_store_is_initialized_with_catalog() {
        let (mem, store) = memory_store(Sheet::default());
        let table = store.load().unwrap();

        assert_eq!(table, catalog::generate(&BuildingScheme::standard()));
        assert_eq!(mem.write_count(), 1);
        assert_eq!(mem.snapshot(), to_sheet(&table));
    }

    #[test]
    fn headerless_store_is_initialized_with_catalog() {
        let (mem, store) = memory_store(Sheet::new(
            s(&["foo", "bar"]),
            vec![s(&["1", "2"])],
        ));
        let table = store.load().unwrap();
        assert_eq!(table.len(), 128);
        assert_eq!(mem.write_count(), 1);
    }

    #[test]
    fn header_only_store_is_initialized_with_catalog() {
        let (mem, store) = memory_store(Sheet::new(s(&COLUMNS), vec![]));
        let table = store.load().unwrap();

        assert_eq!(table.len(), 128);
        assert_eq!(mem.write_count(), 1);
        assert_eq!(mem.snapshot(), to_sheet(&table));
        assert_eq!(
            crate::service::selection::unit_numbers(&table, "A", 1).unwrap().len(),
            15
        );
    }

    #[test]
    fn header_over_blank_rows_is_initialized_with_catalog() {
        let (mem, store) = memory_store(Sheet::new(
            s(&COLUMNS),
            vec![s(&["", "", "", "", "", "", "", ""]), s(&[" "])],
        ));
        assert_eq!(store.load().unwrap().len(), 128);
        assert_eq!(mem.write_count(), 1);
    }

    #[test]
    fn populated_store_is_not_rewritten_on_load() {
        let catalog = catalog::generate(&BuildingScheme::standard());
        let (mem, store) = memory_store(to_sheet(&catalog));
        assert_eq!(store.load().unwrap(), catalog);
        assert_eq!(mem.write_count(), 0);
    }

    #[test]
    fn save_of_loaded_table_is_noop() {
        let mut catalog = catalog::generate(&BuildingScheme::standard());
        let edit = crate::model::UnitEdit {
            state: UnitState::Signed,
            occupant_name: "Jane Doe".into(),
            occupant_type: OccupantType::Owner,
            notes: "línea 1\nlínea 2, \"ok\"".into(),
        };
        edit.apply_to(catalog.record_mut(0).unwrap());

        let original = to_sheet(&catalog);
        let (mem, store) = memory_store(original.clone());
        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        assert_eq!(mem.snapshot(), original);
        assert_eq!(store.load().unwrap(), loaded);
    }

    #[test]
    fn normalize_fills_missing_columns_and_coerces() {
        let sheet = Sheet::new(
            s(&["torre", "piso", "numero", "estado"]),
            vec![
                s(&["A", "1", "101", "firmó"]),
                s(&["B", "dos", "2.0", "pendiente"]),
                s(&["C"]),
                s(&["", " ", ""]),
            ],
        );
        let table = normalize(&sheet);
        assert_eq!(table.len(), 3);

        let a = &table.records()[0];
        assert_eq!((a.floor, a.number, a.unit_id.as_str()), (1, 101, "A-101"));
        assert_eq!(a.state, UnitState::Signed);
        assert_eq!(a.occupant_type, OccupantType::Unspecified);
        assert!(a.occupant_name.is_empty() && a.notes.is_empty());

        let b = &table.records()[1];
        assert_eq!((b.floor, b.number, b.unit_id.as_str()), (0, 2, "B-2"));
        assert_eq!(b.state, UnitState::NoContact);

        let c = &table.records()[2];
        assert_eq!((c.floor, c.number, c.unit_id.as_str()), (0, 0, "C-0"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let malformed = Sheet::new(
            s(&["departamento", "torre", "numero", "tipo_persona", "extra"]),
            vec![
                s(&["", "A", "x", "Dueño", "?"]),
                s(&["B-999", "B", "301.5", "nadie"]),
                s(&["C-101", "C", "101", "inquilino", "", "sobra"]),
            ],
        );
        let once = normalize(&malformed);
        let twice = normalize(&to_sheet(&once));
        assert_eq!(once, twice);
        assert_eq!(once.records()[0].occupant_type, OccupantType::Owner);
        assert_eq!(once.records()[1].number, 0);
    }

    #[test]
    fn normalize_keeps_first_of_duplicate_ids() {
        let sheet = Sheet::new(
            s(&["torre", "piso", "numero", "departamento", "nombre"]),
            vec![
                s(&["A", "1", "101", "A-101", "primero"]),
                s(&["A", "2", "202", "", ""]),
                s(&["A", "1", "101", "A-101", "segundo"]),
                s(&["A", "1", "101", "", "derivado"]),
            ],
        );
        let table = normalize(&sheet);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("A-101").unwrap().occupant_name, "primero");
        assert!(table.get("A-202").is_some());
    }

    #[test]
    fn read_failure_is_store_unavailable() {
        let (mem, store) = memory_store(Sheet::default());
        mem.set_failing(true);
        let err = store.load().unwrap_err();
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
    }

    #[test]
    fn coerce_int_cases() {
        assert_eq!(coerce_int("12"), 12);
        assert_eq!(coerce_int(" 7 "), 7);
        assert_eq!(coerce_int("3.0"), 3);
        assert_eq!(coerce_int("3.5"), 0);
        assert_eq!(coerce_int("NaN"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("tres"), 0);
    }

    #[test]
    fn kv_backed_store_persists_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.redb");
        let key = "sheet:edificio:departamentos";
        {
            let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&path).unwrap());
            let store = RecordStore::new(Arc::new(KvSheet::new(kv, key)), BuildingScheme::standard());
            assert_eq!(store.load().unwrap().len(), 128);
        }
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&path).unwrap());
        let sheet = KvSheet::new(kv, key).read_all().unwrap();
        assert_eq!(sheet.header, s(&COLUMNS));
        assert_eq!(sheet.rows.len(), 128);
    }
}
