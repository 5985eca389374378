//! Selector commands: `towers`, `floors`, `units`, `show`, `summary`.

use anyhow::Result;
use units::service::{grid, selection};
use units::EditSession;

/// How `show` picks its record.
pub enum Target {
    Id(String),
    Selection(selection::Selection),
}

pub fn towers(session: &EditSession, json: bool) -> Result<()> {
    let towers = selection::towers(session.table());
    if json {
        println!("{}", serde_json::to_string_pretty(&towers)?);
    } else {
        for t in towers {
            println!("{}", t);
        }
    }
    Ok(())
}

pub fn floors(session: &EditSession, tower: &str, json: bool) -> Result<()> {
    let floors = selection::floors(session.table(), tower)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&floors)?);
    } else {
        for f in floors {
            println!("{}", f);
        }
    }
    Ok(())
}

pub fn units(session: &EditSession, tower: &str, floor: i64, json: bool) -> Result<()> {
    let records = selection::units_on_floor(session.table(), tower, floor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    println!("{:<8} {:<18} {}", "UNIT", "STATE", "NAME");
    for r in records {
        println!("{:<8} {:<18} {}", r.unit_id, r.state.name(), r.occupant_name);
    }
    Ok(())
}

pub fn show(session: &EditSession, target: &Target, json: bool) -> Result<()> {
    let record = match target {
        Target::Id(id) => session.record(id)?,
        Target::Selection(sel) => selection::resolve_selection(session.table(), sel)?.1,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }
    println!("unit:          {}", record.unit_id);
    println!("tower:         {}", record.tower);
    println!("floor:         {}", record.floor);
    println!("state:         {} ({})", record.state.name(), record.state.label());
    println!("occupant:      {}", record.occupant_name);
    println!("occupant type: {}", record.occupant_type.name());
    println!("notes:         {}", record.notes);
    Ok(())
}

pub fn summary(session: &EditSession, json: bool) -> Result<()> {
    let counts = grid::summary(session.table());
    if json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(state, n)| (state.name().to_string(), serde_json::Value::from(*n)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }
    for (state, n) in &counts {
        println!("{:<18} {:>4}", state.label(), n);
    }
    println!("{:<18} {:>4}", "Total", session.table().len());
    Ok(())
}
