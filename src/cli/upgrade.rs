use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use omebridge::document::MetadataDocument;
use omebridge::migration::MigrationChain;
use omebridge::xml::to_xml_string;

use super::Config;

/// Upgrade one document, serialized with the configured indentation
fn upgrade_one(chain: &MigrationChain, text: &str, indent: usize) -> Option<String> {
    let mut document = match MetadataDocument::parse(text) {
        Ok(document) => document,
        Err(e) => {
            warn!("Failed to parse document: {}", e);
            return None;
        }
    };
    if let Err(e) = chain.migrate(&mut document) {
        warn!("Migration failed: {}", e);
        return None;
    }
    match to_xml_string(&document.root, indent) {
        Ok(xml) => Some(xml),
        Err(e) => {
            warn!("Failed to serialize upgraded document: {}", e);
            None
        }
    }
}

#[cfg(feature = "parallel")]
fn upgrade_texts(chain: &MigrationChain, texts: &[String], indent: usize) -> Vec<Option<String>> {
    use rayon::prelude::*;

    texts
        .par_iter()
        .map(|text| upgrade_one(chain, text, indent))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn upgrade_texts(chain: &MigrationChain, texts: &[String], indent: usize) -> Vec<Option<String>> {
    texts
        .iter()
        .map(|text| upgrade_one(chain, text, indent))
        .collect()
}

fn destination(input: &Path, output: Option<&Path>, several: bool) -> Option<PathBuf> {
    let output = output?;
    if several {
        Some(output.join(input.file_name().unwrap_or(input.as_os_str())))
    } else {
        Some(output.to_path_buf())
    }
}

/// Upgrade documents to the latest release
pub fn run(files: Vec<PathBuf>, output: Option<PathBuf>, config: &Config) -> Result<()> {
    let several = files.len() > 1;
    if let (true, Some(dir)) = (several, &output) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let texts = files
        .iter()
        .map(|file| {
            std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let chain = MigrationChain::new();
    let results = upgrade_texts(&chain, &texts, config.indent());

    let mut failed = 0;
    for (file, result) in files.iter().zip(results) {
        let Some(xml) = result else {
            eprintln!("{}: migration failed", file.display());
            failed += 1;
            continue;
        };
        match destination(file, output.as_deref(), several) {
            Some(path) => {
                std::fs::write(&path, xml)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("{} -> {}", file.display(), path.display());
            }
            None => println!("{}", xml),
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} documents failed to upgrade", failed, files.len());
    }
    Ok(())
}
