use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use log::debug;

use super::builtin::register_builtins;
use super::{
    CanonicalDirection, Capability, MetadataKind, RegistryError, TranslateFn, Translator,
    TypedTranslator,
};

type Pair = (Capability, Capability);

/// Immutable map from capability pair to translators, best first
pub struct TranslatorRegistry {
    translators: HashMap<Pair, Vec<Arc<dyn Translator>>>,
    kinds: BTreeSet<Capability>,
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("kinds", &self.kinds)
            .field("pairs", &self.translators.len())
            .finish()
    }
}

/// Collects translators, then freezes them into a [`TranslatorRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Arc<dyn Translator>>,
}

impl RegistryBuilder {
    /// Register a typed translation function
    pub fn register<S: MetadataKind, D: MetadataKind>(
        self,
        name: &str,
        priority: i32,
        apply: TranslateFn<S, D>,
    ) -> Self {
        self.register_translator(Arc::new(TypedTranslator::<S, D>::new(name, priority, apply)))
    }

    /// Register any translator
    pub fn register_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.entries.push(translator);
        self
    }

    /// Add the built-in translators
    pub fn with_builtins(self) -> Self {
        register_builtins(self)
    }

    /// Freeze the registry.
    ///
    /// Fails unless every kind other than the canonical model can be
    /// translated both to and from it, which is what makes every pair of
    /// kinds reachable.
    pub fn build(self) -> Result<TranslatorRegistry, RegistryError> {
        let registry = self.assemble();
        for kind in registry.kinds.iter().filter(|k| !k.is_canonical()) {
            if registry.resolve(*kind, Capability::CANONICAL).is_none() {
                return Err(RegistryError::MissingCanonicalTranslator {
                    kind: *kind,
                    direction: CanonicalDirection::ToCanonical,
                });
            }
            if registry.resolve(Capability::CANONICAL, *kind).is_none() {
                return Err(RegistryError::MissingCanonicalTranslator {
                    kind: *kind,
                    direction: CanonicalDirection::FromCanonical,
                });
            }
        }
        Ok(registry)
    }

    fn assemble(self) -> TranslatorRegistry {
        let mut translators: HashMap<Pair, Vec<Arc<dyn Translator>>> = HashMap::new();
        let mut kinds = BTreeSet::new();
        for translator in self.entries {
            kinds.insert(translator.source());
            kinds.insert(translator.destination());
            translators
                .entry((translator.source(), translator.destination()))
                .or_default()
                .push(translator);
        }
        // stable: equal priorities keep registration order
        for list in translators.values_mut() {
            list.sort_by_key(|t| std::cmp::Reverse(t.priority()));
        }
        debug!("Registry holds {} kinds, {} pairs", kinds.len(), translators.len());
        TranslatorRegistry { translators, kinds }
    }
}

impl TranslatorRegistry {
    /// Start an empty registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Process-wide registry of the built-in translators, built on first use
    pub fn standard() -> &'static TranslatorRegistry {
        static STANDARD: OnceLock<TranslatorRegistry> = OnceLock::new();
        // the built-in set is closed under the canonical check
        STANDARD.get_or_init(|| RegistryBuilder::default().with_builtins().assemble())
    }

    /// The translator chosen for a pair: highest priority, then first registered
    pub fn resolve(&self, from: Capability, to: Capability) -> Option<&Arc<dyn Translator>> {
        self.candidates(from, to).first()
    }

    /// Every translator for a pair, in selection order
    pub fn candidates(&self, from: Capability, to: Capability) -> &[Arc<dyn Translator>] {
        self.translators
            .get(&(from, to))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every kind known to the registry
    pub fn kinds(&self) -> impl Iterator<Item = Capability> + '_ {
        self.kinds.iter().copied()
    }

    /// Number of registered translators
    pub fn len(&self) -> usize {
        self.translators.values().map(Vec::len).sum()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}
