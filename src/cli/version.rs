use anyhow::{Context, Result};
use std::path::PathBuf;

use omebridge::schema::detect_version_str;

/// Print the schema release of a document
pub fn run(file: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let version = detect_version_str(&text)
        .with_context(|| format!("Failed to detect the schema of {}", file.display()))?;

    let status = if version.is_latest() { "latest" } else { "outdated" };
    println!("{}: {} ({})", file.display(), version, status);
    Ok(())
}
