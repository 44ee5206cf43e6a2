use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use super::rules::{compile_step, CompiledTransform};
use super::steps::step_from;
use super::MigrationError;
use crate::schema::SchemaVersion;

/// Lazily compiled transforms, keyed by the version they consume.
///
/// Lookups take a read lock; a miss compiles outside any lock and then
/// inserts. Two threads missing on the same key both compile and the first
/// insert wins, which is harmless since compilation is pure.
#[derive(Debug, Default)]
pub struct TransformCache {
    compiled: RwLock<HashMap<SchemaVersion, Arc<CompiledTransform>>>,
}

impl TransformCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled step leaving `from`, compiling it on first use
    pub fn get_or_compile(
        &self,
        from: SchemaVersion,
    ) -> Result<Arc<CompiledTransform>, MigrationError> {
        let cached = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&from)
            .cloned();
        if let Some(transform) = cached {
            return Ok(transform);
        }

        let step = step_from(from).ok_or(MigrationError::MissingStep(from))?;
        let transform = Arc::new(compile_step(step)?);
        debug!("Caching compiled step {} -> {}", step.from, step.to);

        let mut map = self.compiled.write().unwrap_or_else(PoisonError::into_inner);
        Ok(map.entry(from).or_insert(transform).clone())
    }

    /// Number of compiled steps held
    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when nothing has been compiled yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
