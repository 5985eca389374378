use crate::model::{BuildingScheme, UnitRecord, UnitTable};

/// Build every unit of the scheme with default fields.
///
/// Towers in scheme order, floors in listing order, units by ascending
/// sequence; unit number is `floor * 100 + sequence` with sequence from 1.
pub fn generate(scheme: &BuildingScheme) -> UnitTable {
    let mut records = Vec::with_capacity(scheme.total_units());
    for tower in &scheme.towers {
        for &(floor, count) in &tower.floors {
            for seq in 1..=i64::from(count) {
                records.push(UnitRecord::new(&tower.tower, floor, floor * 100 + seq));
            }
        }
    }
    UnitTable::new(records)
}
