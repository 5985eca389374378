//! `fontafirma export`: the download action.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use units::service::export;
use units::EditSession;

/// Write the CSV to `out`, or to stdout when `out` is `-`.
pub fn export(session: &EditSession, out: &Path) -> Result<()> {
    let csv = export::to_csv(session.table());

    if out == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(csv.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    std::fs::write(out, csv.as_bytes())
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", out.display(), e))?;
    println!("Exported {} units to {}.", session.table().len(), out.display());
    Ok(())
}
