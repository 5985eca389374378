//! `fontafirma grid`: the building map.

use std::path::Path;

use anyhow::Result;
use units::service::grid;
use units::EditSession;

pub fn grid(session: &EditSession, html: Option<&Path>, json: bool) -> Result<()> {
    let view = grid::project(session.table());

    if let Some(path) = html {
        std::fs::write(path, grid::render_html(&view))
            .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))?;
        println!("Building map written to {}.", path.display());
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", grid::render_text(&view));
    }
    Ok(())
}
