//! # Schema Migration
//!
//! Brings a document written against any known schema release up to the
//! latest one by running authored per-release steps in order.
//!
//! ## Algorithm
//!
//! Starting from the detected version, the step leaving the current version
//! is looked up, compiled on first use (see [`TransformCache`]) and applied;
//! its target becomes the current version until the latest release is
//! reached. Each step:
//!
//! 1. normalizes the root namespace declarations (some legacy documents only
//!    declare an `ome:` alias),
//! 2. applies its rules to the tree it exclusively owns,
//! 3. re-targets the root namespace, marking the elements it created with a
//!    synthetic prefix.
//!
//! A final cleanup pass folds every schema-family prefix back into the
//! default namespace.
//!
//! A document already at the latest release is left untouched. A failing
//! step leaves the caller's document exactly as it was.
//!
//! ```rust
//! use omebridge::document::MetadataDocument;
//! use omebridge::migration::MigrationChain;
//! use omebridge::schema::SchemaVersion;
//!
//! let mut doc = MetadataDocument::parse(
//!     r#"<OME xmlns="http://www.openmicroscopy.org/Schemas/OME/2015-01">
//!          <Image ID="Image:0"><Pixels ID="Pixels:0" DimensionOrder="XYZCT" Type="uint8"
//!            SizeX="4" SizeY="4" SizeZ="1" SizeC="1" SizeT="1"/></Image>
//!        </OME>"#,
//! )?;
//! let report = MigrationChain::new().migrate(&mut doc)?;
//! assert_eq!(report.to, SchemaVersion::LATEST);
//! assert_eq!(doc.version, SchemaVersion::LATEST);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::document::MetadataDocument;
use crate::schema::SchemaVersion;

mod cache;
mod error;
mod namespace;
mod rules;
mod steps;

#[cfg(test)]
mod tests;

pub use cache::TransformCache;
pub use error::MigrationError;
pub use namespace::{cleanup, normalize_namespace};
pub use rules::{
    compile_step, synthetic_prefix, CompiledTransform, RestructureFn, RuleSpec, Selector,
    StepDefinition, ValueMapFn,
};
pub use steps::{step_from, STEPS};

/// One applied step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedStep {
    /// Version consumed
    pub from: SchemaVersion,
    /// Version produced
    pub to: SchemaVersion,
}

/// Outcome of a successful migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version the document started at
    pub from: SchemaVersion,
    /// Version the document ended at
    pub to: SchemaVersion,
    /// Steps applied, in order
    pub steps: Vec<AppliedStep>,
}

impl MigrationReport {
    /// True when the document was already current
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Ordered per-release upgrade pipeline
#[derive(Debug, Clone, Default)]
pub struct MigrationChain {
    cache: Arc<TransformCache>,
}

impl MigrationChain {
    /// A chain with its own transform cache
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain sharing an existing cache
    pub fn with_cache(cache: Arc<TransformCache>) -> Self {
        Self { cache }
    }

    /// The cache backing this chain
    pub fn cache(&self) -> &Arc<TransformCache> {
        &self.cache
    }

    /// Steps that would be applied to a document at `from`
    pub fn plan(&self, from: SchemaVersion) -> Result<Vec<AppliedStep>, MigrationError> {
        let mut plan = Vec::new();
        let mut current = from;
        while !current.is_latest() {
            let step = step_from(current).ok_or(MigrationError::MissingStep(current))?;
            plan.push(AppliedStep {
                from: step.from,
                to: step.to,
            });
            current = step.to;
        }
        Ok(plan)
    }

    /// Upgrade `doc` in place to the latest release.
    ///
    /// On error `doc` is unchanged.
    pub fn migrate(&self, doc: &mut MetadataDocument) -> Result<MigrationReport, MigrationError> {
        let from = doc.version;
        if from.is_latest() {
            debug!("Document already at {}, nothing to migrate", from);
            return Ok(MigrationReport {
                from,
                to: from,
                steps: Vec::new(),
            });
        }

        let mut tree = doc.root.clone();
        let mut current = from;
        let mut applied = Vec::new();

        while !current.is_latest() {
            let transform = self.cache.get_or_compile(current)?;
            debug!("Applying migration step {} -> {}", transform.from, transform.to);
            tree = normalize_namespace(tree, current)?;
            tree = transform.apply(tree)?;
            applied.push(AppliedStep {
                from: transform.from,
                to: transform.to,
            });
            current = transform.to;
        }

        doc.root = cleanup(tree, current);
        doc.version = current;
        info!("Migrated document from {} to {} in {} steps", from, current, applied.len());

        Ok(MigrationReport {
            from,
            to: current,
            steps: applied,
        })
    }

    /// Parse, upgrade and serialize
    pub fn upgrade_str(&self, text: &str) -> Result<String, MigrationError> {
        let mut doc = MetadataDocument::parse(text)?;
        self.migrate(&mut doc)?;
        Ok(doc.to_xml_string()?)
    }

    /// Like [`MigrationChain::upgrade_str`], reporting failure as `None`.
    ///
    /// The error is logged.
    pub fn upgrade_text(&self, text: &str) -> Option<String> {
        match self.upgrade_str(text) {
            Ok(upgraded) => Some(upgraded),
            Err(e) => {
                warn!("Migration failed: {}", e);
                None
            }
        }
    }

    /// Upgrade many independent documents concurrently
    #[cfg(feature = "parallel")]
    pub fn upgrade_all(&self, texts: &[String]) -> Vec<Option<String>> {
        use rayon::prelude::*;

        texts.par_iter().map(|text| self.upgrade_text(text)).collect()
    }
}
