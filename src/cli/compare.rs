use anyhow::Result;
use std::path::PathBuf;

use omebridge::compare::EqualityComparator;
use omebridge::migration::MigrationChain;

use super::{load_latest, Config};

/// Compare two documents at the latest release
pub fn run(left: PathBuf, right: PathBuf, config: &Config) -> Result<()> {
    let chain = MigrationChain::new();
    let left_doc = load_latest(&left, &chain)?;
    let right_doc = load_latest(&right, &chain)?;

    let comparator = EqualityComparator::with_options(config.comparator_options());
    let report = comparator.compare(&left_doc.root, &right_doc.root);

    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Exit with error code if the trees differ
    if !report.is_equal() {
        std::process::exit(1);
    }

    Ok(())
}
