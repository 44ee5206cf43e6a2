//! # omebridge
//!
//! A command-line tool for OME imaging metadata.
//!
//! ## Usage
//!
//! ```bash
//! # Which schema release does a document follow?
//! omebridge version image.ome.xml
//!
//! # Upgrade to the latest release
//! omebridge upgrade old.ome.xml -o new.ome.xml
//!
//! # Compare two documents semantically
//! omebridge compare a.ome.xml b.ome.xml
//!
//! # Generate a document from a synthetic descriptor
//! omebridge convert "cells&sizeZ=5&sizeC=3.fake"
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
