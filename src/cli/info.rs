use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use omebridge::dimension::{AxisType, CanonicalMetadata};
use omebridge::formats::{FormatRegistry, SyntheticDescriptor};
use omebridge::migration::MigrationChain;
use omebridge::translate::TranslationEngine;

use super::load_latest;

fn load_canonical(file: &Path) -> Result<CanonicalMetadata> {
    let engine = TranslationEngine::standard();
    let name = file.to_string_lossy();
    let synthetic = FormatRegistry::standard()
        .identify(&name)
        .is_some_and(|format| format.name == "Simulated data");

    let (mut canonical, _) = if synthetic {
        let descriptor = SyntheticDescriptor::parse(&name)
            .with_context(|| format!("Invalid descriptor '{}'", name))?;
        engine.translate_into::<CanonicalMetadata>(&descriptor)?
    } else {
        let document = load_latest(file, &MigrationChain::new())?;
        engine.translate_into::<CanonicalMetadata>(&document)?
    };
    if canonical.source_name.is_none() {
        canonical.source_name = Some(name.into_owned());
    }
    Ok(canonical)
}

/// Summarize the series of a document or descriptor
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    let canonical = load_canonical(&file)?;

    if json {
        println!("{}", canonical.to_json().context("Failed to serialize")?);
        return Ok(());
    }

    println!("omebridge Series Information");
    println!("============================");
    println!("Source: {}", canonical.source_name.as_deref().unwrap_or("-"));
    println!("Format: {}", canonical.format.as_deref().unwrap_or("unknown"));
    println!("Series: {}", canonical.series.len());

    for (index, series) in canonical.series.iter().enumerate() {
        println!();
        println!(
            "[{}] {}",
            index,
            series.name.as_deref().unwrap_or("<unnamed>")
        );
        println!("  Dimension order: {}", series.dimension_order());
        println!(
            "  Size (XYZCT): {} x {} x {} x {} x {}",
            series.size(AxisType::X),
            series.size(AxisType::Y),
            series.size(AxisType::Z),
            series.size(AxisType::Channel),
            series.size(AxisType::Time)
        );
        println!(
            "  Pixel type: {} ({} samples/pixel)",
            series.pixel_type, series.samples_per_pixel
        );
        println!("  Planes: {}", series.plane_count());
        for axis in series.axes.iter().filter(|a| a.calibration.is_some()) {
            println!(
                "  Calibration {}: {} {}",
                axis.axis_type.letter(),
                axis.calibration_or_default(),
                axis.unit.as_deref().unwrap_or("")
            );
        }
    }

    Ok(())
}
