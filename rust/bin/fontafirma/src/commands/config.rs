//! `fontafirma config`: inspect or create the client config file.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

/// Write a default config file. Refuses to overwrite unless `force`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    ClientConfig::default().save(path)?;
    println!("Wrote {}.", path.display());
    Ok(())
}

/// Print the effective configuration (file plus environment overrides).
pub fn show(config: &ClientConfig, json: bool) -> Result<()> {
    let mut shown = config.clone();
    if !shown.http.token.is_empty() {
        shown.http.token = "********".to_string();
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", toml::to_string_pretty(&shown)?);
    }
    Ok(())
}
