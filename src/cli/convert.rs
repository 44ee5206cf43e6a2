use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use omebridge::document::MetadataDocument;
use omebridge::formats::SyntheticDescriptor;
use omebridge::translate::TranslationEngine;
use omebridge::xml::to_xml_string;

use super::Config;

/// Write the latest-release document for a synthetic descriptor
pub fn run(descriptor: &str, output: Option<PathBuf>, strict: bool, config: &Config) -> Result<()> {
    let parsed = SyntheticDescriptor::parse(descriptor)
        .with_context(|| format!("Invalid descriptor '{}'", descriptor))?;

    let engine = TranslationEngine::standard().with_strict(strict);
    let (document, report) = engine
        .translate_into::<MetadataDocument>(&parsed)
        .context("Translation failed")?;
    info!("Route: {}", report.route);
    if !report.is_complete() {
        info!("{} field(s) were skipped", report.warnings.len());
    }

    let xml = to_xml_string(&document.root, config.indent()).context("Failed to serialize")?;
    match output {
        Some(path) => {
            std::fs::write(&path, xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", xml),
    }
    Ok(())
}
