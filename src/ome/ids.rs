use std::fmt;

/// Node kinds that receive synthesized identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// `Image:<image>`
    Image,
    /// `Pixels:<image>`
    Pixels,
    /// `Channel:<image>:<channel>`
    Channel,
    /// `Instrument:<instrument>`
    Instrument,
    /// `Detector:<instrument>:<detector>`
    Detector,
    /// `Objective:<instrument>:<objective>`
    Objective,
    /// `Annotation:<annotation>`
    Annotation,
}

impl IdKind {
    /// Leading token of identifiers of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            IdKind::Image => "Image",
            IdKind::Pixels => "Pixels",
            IdKind::Channel => "Channel",
            IdKind::Instrument => "Instrument",
            IdKind::Detector => "Detector",
            IdKind::Objective => "Objective",
            IdKind::Annotation => "Annotation",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier for a node of `kind` at `indices`.
///
/// Depends on nothing else, so translating the same input twice yields the
/// same identifiers.
pub fn make_id(kind: IdKind, indices: &[usize]) -> String {
    indices
        .iter()
        .fold(kind.as_str().to_string(), |mut id, index| {
            id.push(':');
            id.push_str(&index.to_string());
            id
        })
}
