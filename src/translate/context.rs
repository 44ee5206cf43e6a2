use super::PartialFieldError;
use crate::formats::FormatRegistry;

/// State shared by the translators of one request
#[derive(Debug)]
pub struct TranslationContext<'a> {
    formats: &'a FormatRegistry,
    strict: bool,
    warnings: Vec<PartialFieldError>,
}

impl<'a> TranslationContext<'a> {
    /// Context using `formats` for naming
    pub fn new(formats: &'a FormatRegistry) -> Self {
        Self {
            formats,
            strict: false,
            warnings: Vec::new(),
        }
    }

    /// Promote skipped fields to failures
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Format registry used for default names
    pub fn formats(&self) -> &'a FormatRegistry {
        self.formats
    }

    /// True in strict mode
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Record a skipped field
    pub fn warn(&mut self, warning: PartialFieldError) {
        self.warnings.push(warning);
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[PartialFieldError] {
        &self.warnings
    }

    /// Remove and return the warnings recorded after `mark`
    pub(crate) fn rollback(&mut self, mark: usize) -> Vec<PartialFieldError> {
        self.warnings.split_off(mark.min(self.warnings.len()))
    }

    /// Consume the context, keeping its warnings
    pub fn into_warnings(self) -> Vec<PartialFieldError> {
        self.warnings
    }
}
