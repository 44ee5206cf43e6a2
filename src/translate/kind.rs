use std::any::Any;
use std::fmt;

/// Type tag naming a kind of metadata object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(&'static str);

impl Capability {
    /// Tag of the canonical axis model every kind translates through
    pub const CANONICAL: Capability = Capability("CanonicalMetadata");

    /// Create a tag
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Tag name
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// True for the canonical hub
    pub fn is_canonical(&self) -> bool {
        *self == Self::CANONICAL
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A concrete metadata type taking part in translation
pub trait MetadataKind: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Tag of this type
    const KIND: Capability;
}

/// Object-safe view of any [`MetadataKind`]
pub trait MetadataObject: fmt::Debug + Send + Sync {
    /// Runtime tag of the object
    fn capability(&self) -> Capability;
    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: MetadataKind> MetadataObject for T {
    fn capability(&self) -> Capability {
        T::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
