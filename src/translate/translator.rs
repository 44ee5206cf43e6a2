use std::fmt;

use log::debug;

use super::{
    Capability, MetadataKind, MetadataObject, TranslationContext, TranslationError,
};

/// Signature of a typed translation function
pub type TranslateFn<S, D> =
    fn(&S, &mut D, &mut TranslationContext<'_>) -> Result<(), TranslationError>;

/// A converter between two metadata kinds
pub trait Translator: Send + Sync {
    /// Name used in logs and reports
    fn name(&self) -> &str;

    /// Kind read
    fn source(&self) -> Capability;

    /// Kind written
    fn destination(&self) -> Capability;

    /// Higher wins when several translators handle the same pair
    fn priority(&self) -> i32;

    /// Populate `destination` from `source`.
    ///
    /// Implementations must leave `destination` untouched on error.
    fn translate(
        &self,
        source: &dyn MetadataObject,
        destination: &mut dyn MetadataObject,
        ctx: &mut TranslationContext<'_>,
    ) -> Result<(), TranslationError>;
}

impl fmt::Debug for dyn Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("name", &self.name())
            .field("source", &self.source())
            .field("destination", &self.destination())
            .field("priority", &self.priority())
            .finish()
    }
}

/// [`Translator`] over a plain function between concrete kinds.
///
/// The function writes into a clone of the destination, which replaces the
/// destination only when the function succeeds (and, in strict mode, skipped
/// no field).
pub struct TypedTranslator<S, D> {
    name: String,
    priority: i32,
    apply: TranslateFn<S, D>,
}

impl<S: MetadataKind, D: MetadataKind> TypedTranslator<S, D> {
    /// Wrap `apply`
    pub fn new(name: impl Into<String>, priority: i32, apply: TranslateFn<S, D>) -> Self {
        Self {
            name: name.into(),
            priority,
            apply,
        }
    }
}

impl<S: MetadataKind, D: MetadataKind> Translator for TypedTranslator<S, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> Capability {
        S::KIND
    }

    fn destination(&self) -> Capability {
        D::KIND
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn translate(
        &self,
        source: &dyn MetadataObject,
        destination: &mut dyn MetadataObject,
        ctx: &mut TranslationContext<'_>,
    ) -> Result<(), TranslationError> {
        let source = source
            .as_any()
            .downcast_ref::<S>()
            .ok_or_else(|| TranslationError::TypeMismatch {
                expected: S::KIND,
                found: source.capability(),
            })?;
        let found = destination.capability();
        let destination = destination
            .as_any_mut()
            .downcast_mut::<D>()
            .ok_or(TranslationError::TypeMismatch {
                expected: D::KIND,
                found,
            })?;

        debug!("Running translator '{}' ({} -> {})", self.name, S::KIND, D::KIND);
        let mark = ctx.warnings().len();
        let mut staged = destination.clone();
        if let Err(e) = (self.apply)(source, &mut staged, ctx) {
            ctx.rollback(mark);
            return Err(e);
        }
        if ctx.is_strict() && ctx.warnings().len() > mark {
            return Err(TranslationError::PartialFields(ctx.rollback(mark)));
        }

        *destination = staged;
        Ok(())
    }
}
