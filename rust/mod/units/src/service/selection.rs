//! Tower → floor → unit selection over the loaded table.
//!
//! Options are always derived from the table itself, never from the
//! building scheme, so a selector cannot offer a unit the table lacks.

use fontafirma_core::ServiceError;

use crate::model::{unit_id, UnitRecord, UnitTable};

/// A complete tower/floor/unit choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub tower: String,
    pub floor: i64,
    pub number: i64,
}

impl Selection {
    pub fn unit_id(&self) -> String {
        unit_id(&self.tower, self.number)
    }
}

/// Distinct towers in table order.
pub fn towers(table: &UnitTable) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in table {
        if !out.iter().any(|t| *t == r.tower) {
            out.push(r.tower.clone());
        }
    }
    out
}

/// Floors of a tower, ascending.
pub fn floors(table: &UnitTable, tower: &str) -> Result<Vec<i64>, ServiceError> {
    let mut out: Vec<i64> = table
        .iter()
        .filter(|r| r.tower == tower)
        .map(|r| r.floor)
        .collect();
    out.sort_unstable();
    out.dedup();

    if out.is_empty() {
        return Err(ServiceError::NoOptionsAvailable(format!(
            "tower {} has no floors",
            tower
        )));
    }
    Ok(out)
}

/// Records on a tower/floor, by ascending unit number.
pub fn units_on_floor<'a>(
    table: &'a UnitTable,
    tower: &str,
    floor: i64,
) -> Result<Vec<&'a UnitRecord>, ServiceError> {
    let mut out: Vec<&UnitRecord> = table
        .iter()
        .filter(|r| r.tower == tower && r.floor == floor)
        .collect();
    out.sort_by_key(|r| r.number);

    if out.is_empty() {
        return Err(ServiceError::NoOptionsAvailable(format!(
            "no units on tower {} floor {}",
            tower, floor
        )));
    }
    Ok(out)
}

/// Unit numbers on a tower/floor, ascending.
pub fn unit_numbers(table: &UnitTable, tower: &str, floor: i64) -> Result<Vec<i64>, ServiceError> {
    Ok(units_on_floor(table, tower, floor)?
        .into_iter()
        .map(|r| r.number)
        .collect())
}

/// Find a record and its position by id.
pub fn resolve<'a>(table: &'a UnitTable, unit_id: &str) -> Result<(usize, &'a UnitRecord), ServiceError> {
    table
        .position(unit_id)
        .map(|i| (i, &table.records()[i]))
        .ok_or_else(|| ServiceError::NotFound(format!("unit {} not found", unit_id)))
}

/// Validate a full selection against the current options, then resolve it.
pub fn resolve_selection<'a>(
    table: &'a UnitTable,
    selection: &Selection,
) -> Result<(usize, &'a UnitRecord), ServiceError> {
    let numbers = unit_numbers(table, &selection.tower, selection.floor)?;
    if !numbers.contains(&selection.number) {
        return Err(ServiceError::NotFound(format!(
            "unit {} is not on tower {} floor {}",
            selection.number, selection.tower, selection.floor
        )));
    }
    resolve(table, &selection.unit_id())
}
