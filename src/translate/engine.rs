use std::fmt;

use log::{debug, info, warn};

use super::{
    CanonicalMetadata, Capability, MetadataKind, MetadataObject, PartialFieldError,
    TranslationContext, TranslationError, Translator, TranslatorRegistry,
};
use crate::formats::FormatRegistry;

/// How a request was served
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A translator registered for the exact pair
    Direct {
        /// Translator name
        translator: String,
    },
    /// Through the canonical model
    ViaCanonical {
        /// Translator into the canonical model
        to_canonical: String,
        /// Translator out of the canonical model
        from_canonical: String,
    },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Direct { translator } => write!(f, "direct ({})", translator),
            Route::ViaCanonical {
                to_canonical,
                from_canonical,
            } => write!(f, "via canonical ({} then {})", to_canonical, from_canonical),
        }
    }
}

/// Outcome of a successful translation
#[derive(Debug, Clone)]
pub struct TranslationReport {
    /// Kind translated from
    pub from: Capability,
    /// Kind translated to
    pub to: Capability,
    /// Translators used
    pub route: Route,
    /// Fields skipped along the way
    pub warnings: Vec<PartialFieldError>,
}

impl TranslationReport {
    /// True when every field was carried over
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Resolves and runs translators between metadata objects
#[derive(Debug, Clone, Copy)]
pub struct TranslationEngine<'r> {
    registry: &'r TranslatorRegistry,
    formats: &'r FormatRegistry,
    strict: bool,
}

impl Default for TranslationEngine<'static> {
    fn default() -> Self {
        Self::new(TranslatorRegistry::standard(), FormatRegistry::standard())
    }
}

impl TranslationEngine<'static> {
    /// Engine over the built-in translators and formats
    pub fn standard() -> Self {
        Self::default()
    }
}

impl<'r> TranslationEngine<'r> {
    /// Engine over a custom registry
    pub fn new(registry: &'r TranslatorRegistry, formats: &'r FormatRegistry) -> Self {
        Self {
            registry,
            formats,
            strict: false,
        }
    }

    /// Fail instead of skipping fields
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Registry in use
    pub fn registry(&self) -> &'r TranslatorRegistry {
        self.registry
    }

    /// The route a request between two kinds would take
    pub fn route(&self, from: Capability, to: Capability) -> Result<Route, TranslationError> {
        if let Some(direct) = self.registry.resolve(from, to) {
            return Ok(Route::Direct {
                translator: direct.name().to_string(),
            });
        }
        let (first, second) = self.hops(from, to)?;
        Ok(Route::ViaCanonical {
            to_canonical: first.name().to_string(),
            from_canonical: second.name().to_string(),
        })
    }

    fn hops(
        &self,
        from: Capability,
        to: Capability,
    ) -> Result<(&'r dyn Translator, &'r dyn Translator), TranslationError> {
        let missing = || TranslationError::NoTranslator { from, to };
        let first = self
            .registry
            .resolve(from, Capability::CANONICAL)
            .ok_or_else(missing)?;
        let second = self
            .registry
            .resolve(Capability::CANONICAL, to)
            .ok_or_else(missing)?;
        Ok((&**first, &**second))
    }

    /// Populate `destination` from `source`.
    ///
    /// Uses the best direct translator for the pair, otherwise goes through
    /// the canonical model. On error `destination` is unchanged.
    pub fn translate(
        &self,
        source: &dyn MetadataObject,
        destination: &mut dyn MetadataObject,
    ) -> Result<TranslationReport, TranslationError> {
        let (from, to) = (source.capability(), destination.capability());
        let mut ctx = TranslationContext::new(self.formats).with_strict(self.strict);

        let route = match self.registry.resolve(from, to) {
            Some(direct) => {
                debug!("Translating {} -> {} with '{}'", from, to, direct.name());
                direct.translate(source, destination, &mut ctx)?;
                Route::Direct {
                    translator: direct.name().to_string(),
                }
            }
            None => {
                let (first, second) = self.hops(from, to)?;
                debug!(
                    "Translating {} -> {} via canonical with '{}' then '{}'",
                    from,
                    to,
                    first.name(),
                    second.name()
                );
                let mut hub = CanonicalMetadata::default();
                first.translate(source, &mut hub, &mut ctx)?;
                second.translate(&hub, destination, &mut ctx)?;
                Route::ViaCanonical {
                    to_canonical: first.name().to_string(),
                    from_canonical: second.name().to_string(),
                }
            }
        };

        let warnings = ctx.into_warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }
        info!("Translated {} -> {} {} ({} skipped fields)", from, to, route, warnings.len());
        Ok(TranslationReport {
            from,
            to,
            route,
            warnings,
        })
    }

    /// Translate into a fresh default destination
    pub fn translate_into<D: MetadataKind>(
        &self,
        source: &dyn MetadataObject,
    ) -> Result<(D, TranslationReport), TranslationError> {
        let mut destination = D::default();
        let report = self.translate(source, &mut destination)?;
        Ok((destination, report))
    }
}
