//! `fontafirma edit`: the save action.

use std::io::{IsTerminal, Write};

use anyhow::Result;
use fontafirma_core::ServiceError;
use tracing::warn;
use units::{EditSession, OccupantType, UnitEdit, UnitState};

/// Field values given on the command line. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub state: Option<String>,
    pub name: Option<String>,
    pub occupant_type: Option<String>,
    pub notes: Option<String>,
}

fn parse_state(s: &str) -> Result<UnitState, ServiceError> {
    UnitState::from_str(s).ok_or_else(|| {
        let options: Vec<&str> = UnitState::ALL.iter().map(|s| s.name()).collect();
        ServiceError::Validation(format!("unknown state \"{}\"; expected one of: {}", s, options.join(", ")))
    })
}

fn parse_occupant_type(s: &str) -> Result<OccupantType, ServiceError> {
    OccupantType::from_str(s).ok_or_else(|| {
        let options: Vec<&str> = OccupantType::ALL.iter().map(|t| t.name()).collect();
        ServiceError::Validation(format!(
            "unknown occupant type \"{}\"; expected one of: {}",
            s,
            options.join(", ")
        ))
    })
}

/// Merge command-line values over the record's current ones.
pub fn build_edit(current: UnitEdit, args: &EditArgs) -> Result<UnitEdit, ServiceError> {
    let mut edit = current;
    if let Some(s) = &args.state {
        edit.state = parse_state(s)?;
    }
    if let Some(n) = &args.name {
        edit.occupant_name = n.clone();
    }
    if let Some(t) = &args.occupant_type {
        edit.occupant_type = parse_occupant_type(t)?;
    }
    if let Some(n) = &args.notes {
        edit.notes = n.clone();
    }
    Ok(edit)
}

pub fn edit(session: &mut EditSession, unit_id: &str, args: &EditArgs) -> Result<()> {
    let current = UnitEdit::from_record(session.record(unit_id)?);
    let edit = build_edit(current, args)?;

    match session.apply_edit(unit_id, &edit) {
        Ok(()) => {}
        Err(ServiceError::StoreUnavailable(msg)) => {
            eprintln!("Save failed: {}", msg);
            eprintln!("The edit to {} is applied locally but the store was not updated.", unit_id);
            retry_save(session)?;
        }
        Err(e) => return Err(e.into()),
    }

    println!("Saved {} ({}).", unit_id, edit.state.label());
    Ok(())
}

/// Offer a manual retry while the user keeps asking for one. Without a
/// terminal there is nobody to ask and the failure is returned.
fn retry_save(session: &EditSession) -> Result<()> {
    loop {
        if !std::io::stdin().is_terminal() {
            return Err(ServiceError::StoreUnavailable("edit not saved to store".into()).into());
        }
        eprint!("Retry save? [y/N]: ");
        std::io::stderr().flush()?;
        let mut s = String::new();
        std::io::stdin().read_line(&mut s)?;
        if !s.trim().eq_ignore_ascii_case("y") {
            return Err(ServiceError::StoreUnavailable("edit not saved to store".into()).into());
        }
        match session.save() {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!("retry failed: {}", e);
                eprintln!("Save failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_keep_current_values() {
        let current = UnitEdit {
            state: UnitState::Dampness,
            occupant_name: "Ana".into(),
            occupant_type: OccupantType::Tenant,
            notes: "baño".into(),
        };
        let args = EditArgs {
            state: Some("firmó".into()),
            ..Default::default()
        };
        let edit = build_edit(current.clone(), &args).unwrap();
        assert_eq!(edit.state, UnitState::Signed);
        assert_eq!(edit.occupant_name, "Ana");
        assert_eq!(edit.occupant_type, OccupantType::Tenant);
        assert_eq!(edit.notes, "baño");
    }

    #[test]
    fn unknown_labels_are_validation_errors() {
        let args = EditArgs {
            state: Some("pendiente".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_edit(UnitEdit::default(), &args),
            Err(ServiceError::Validation(_))
        ));

        let args = EditArgs {
            occupant_type: Some("vecino".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_edit(UnitEdit::default(), &args),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn empty_type_clears_occupant_type() {
        let current = UnitEdit {
            occupant_type: OccupantType::Owner,
            ..Default::default()
        };
        let args = EditArgs {
            occupant_type: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            build_edit(current, &args).unwrap().occupant_type,
            OccupantType::Unspecified
        );
    }
}
