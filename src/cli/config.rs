//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file passed with `--config`:
//!
//! ```toml
//! # omebridge.toml
//! [compare]
//! ignored_elements = ["StructuredAnnotations", "ROI"]
//! ignored_attributes = ["ID"]
//!
//! [output]
//! indent = 4
//!
//! [translate]
//! strict = true
//! ```

use anyhow::{Context, Result};
use omebridge::compare::ComparatorOptions;
use serde::Deserialize;
use std::path::Path;

/// Indentation used when the config does not set one
pub const DEFAULT_INDENT: usize = 2;

/// Root configuration structure for omebridge.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Comparison settings.
    #[serde(default)]
    pub compare: CompareConfig,

    /// XML output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Translation settings.
    #[serde(default)]
    pub translate: TranslateConfig,
}

/// Configuration for the compare command.
#[derive(Debug, Default, Deserialize)]
pub struct CompareConfig {
    /// Elements skipped entirely.
    pub ignored_elements: Option<Vec<String>>,

    /// Attributes skipped on every element.
    pub ignored_attributes: Option<Vec<String>>,

    /// Skip namespace declarations and schema locations.
    pub ignore_namespace_declarations: Option<bool>,
}

/// Configuration for written XML.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Spaces per nesting level.
    pub indent: Option<usize>,
}

/// Configuration for translation.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateConfig {
    /// Fail when a field cannot be carried over.
    pub strict: Option<bool>,
}

impl Config {
    /// Load the file at `path`, or the defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Comparator options, starting from the library defaults.
    pub fn comparator_options(&self) -> ComparatorOptions {
        let mut options = ComparatorOptions::default();
        if let Some(elements) = &self.compare.ignored_elements {
            options.ignored_elements = elements.clone();
        }
        if let Some(attributes) = &self.compare.ignored_attributes {
            options.ignored_attributes = attributes.clone();
        }
        if let Some(ignore) = self.compare.ignore_namespace_declarations {
            options.ignore_namespace_declarations = ignore;
        }
        options
    }

    /// Indentation of written XML.
    pub fn indent(&self) -> usize {
        self.output.indent.unwrap_or(DEFAULT_INDENT)
    }

    /// Strict translation unless overridden on the command line.
    pub fn strict(&self) -> bool {
        self.translate.strict.unwrap_or(false)
    }
}
