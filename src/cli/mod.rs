use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod compare;
mod config;
mod convert;
mod info;
mod upgrade;
mod version;

pub use config::Config;

/// omebridge - OME metadata migration, translation and comparison
#[derive(Parser)]
#[command(name = "omebridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the schema release a document follows
    Version {
        /// Input OME-XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Upgrade documents to the latest schema release
    Upgrade {
        /// Input OME-XML files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output file, or directory when several inputs are given
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Compare two documents after upgrading both
    Compare {
        /// First document
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Second document
        #[arg(value_name = "RIGHT")]
        right: PathBuf,
    },

    /// Write the latest-schema document for a synthetic descriptor
    Convert {
        /// Descriptor such as `name&sizeX=64&sizeC=3.fake`
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: String,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Fail when a field cannot be carried over
        #[arg(long)]
        strict: bool,
    },

    /// Summarize the series of a document or descriptor
    Info {
        /// OME-XML file or synthetic descriptor
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the canonical model as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Version { file } => version::run(file),
        Commands::Upgrade { files, output } => upgrade::run(files, output, &config),
        Commands::Compare { left, right } => compare::run(left, right, &config),
        Commands::Convert {
            descriptor,
            output,
            strict,
        } => convert::run(&descriptor, output, strict || config.strict(), &config),
        Commands::Info { file, json } => info::run(file, json),
    }
}

/// Read and upgrade a document to the latest release
fn load_latest(
    path: &std::path::Path,
    chain: &omebridge::migration::MigrationChain,
) -> Result<omebridge::document::MetadataDocument> {
    use anyhow::Context;

    let mut document = omebridge::document::MetadataDocument::from_file(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let report = chain
        .migrate(&mut document)
        .with_context(|| format!("Failed to upgrade {}", path.display()))?;
    if !report.is_noop() {
        log::info!(
            "{}: upgraded {} -> {} ({} steps)",
            path.display(),
            report.from,
            report.to,
            report.steps.len()
        );
    }
    Ok(document)
}
