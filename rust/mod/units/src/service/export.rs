use crate::model::UnitTable;
use crate::service::store::{record_cells, COLUMNS};

/// Default file name of the downloadable export.
pub const CSV_FILE_NAME: &str = "estado_departamentos.csv";

/// Serialize the whole table as CSV: header row, one line per record in
/// table order, RFC 4180 quoting, `\n` line endings.
pub fn to_csv(table: &UnitTable) -> String {
    let mut out = String::new();
    push_line(&mut out, COLUMNS.iter().copied());
    for record in table {
        let cells = record_cells(record);
        push_line(&mut out, cells.iter().map(String::as_str));
    }
    out
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingScheme, OccupantType, UnitEdit, UnitState};
    use crate::service::catalog;

    #[test]
    fn header_and_row_count() {
        let csv = to_csv(&catalog::generate(&BuildingScheme::standard()));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("torre,piso,numero,departamento,estado,nombre,tipo_persona,observaciones")
        );
        assert_eq!(lines.next(), Some("A,1,101,A-101,sin contacto,,,"));
        assert_eq!(csv.lines().count(), 129);
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn quotes_awkward_fields() {
        let mut records = catalog::generate(&BuildingScheme::standard()).records().to_vec();
        let edit = UnitEdit {
            state: UnitState::Dampness,
            occupant_name: "Pérez, Ana".into(),
            occupant_type: OccupantType::Tenant,
            notes: "dijo \"mañana\"\nllamar".into(),
        };
        edit.apply_to(&mut records[0]);
        let csv = to_csv(&UnitTable::new(records));

        assert!(csv.contains(
            "A,1,101,A-101,humedad,\"Pérez, Ana\",inquilino,\"dijo \"\"mañana\"\"\nllamar\"\n"
        ));
    }
}
