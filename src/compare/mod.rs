//! # Metadata Equality
//!
//! Decides whether two metadata trees describe the same dataset, which is how
//! translation round-trips are validated.
//!
//! The comparison is structural and ordered:
//!
//! - local names must match, prefixes are ignored
//! - `StructuredAnnotations` blocks are auxiliary and always equal
//! - `ID` attributes are arbitrary per tree and never compared as strings
//! - an `XxxSettings` element references an `Xxx` element by identifier; each
//!   side's reference is resolved in its own tree and the *targets* are
//!   compared (both unresolved counts as equal, one unresolved as different)
//! - children are compared pairwise by position and their counts must match
//! - text must match exactly, except on elements with an empty local name
//!
//! Every difference is collected into a [`ComparisonReport`] instead of
//! stopping at the first one. A malformed reference is recorded for that
//! element only and the walk carries on.
//!
//! ```rust
//! use omebridge::compare::EqualityComparator;
//! use omebridge::xml::parse_document;
//!
//! let a = parse_document(r#"<OME><Image ID="Image:0" Name="x"/></OME>"#)?;
//! let b = parse_document(r#"<OME><Image ID="urn:lsid:1" Name="x"/></OME>"#)?;
//! assert!(EqualityComparator::new().equals(&a, &b));
//! # Ok::<(), omebridge::xml::XmlError>(())
//! ```

use std::collections::HashSet;

use log::{debug, warn};

use crate::document::MetadataDocument;
use crate::xml::XmlElement;

mod options;
mod report;


pub use options::ComparatorOptions;
pub use report::{ComparisonReport, Difference, DifferenceKind, Side};

const SETTINGS_SUFFIX: &str = "Settings";

/// Concrete elements a `LightSourceSettings` reference may point at
const LIGHT_SOURCE_KINDS: [&str; 6] = [
    "LightSource",
    "Laser",
    "Arc",
    "Filament",
    "LightEmittingDiode",
    "GenericExcitationSource",
];

/// Reference-aware recursive tree comparison
#[derive(Debug, Clone, Default)]
pub struct EqualityComparator {
    options: ComparatorOptions,
}

impl EqualityComparator {
    /// Comparator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Comparator with custom options
    pub fn with_options(options: ComparatorOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &ComparatorOptions {
        &self.options
    }

    /// Compare two trees and collect every difference
    pub fn compare(&self, left: &XmlElement, right: &XmlElement) -> ComparisonReport {
        let mut walk = Walk {
            options: &self.options,
            left_root: left,
            right_root: right,
            in_progress: HashSet::new(),
            report: ComparisonReport::default(),
        };
        let path = format!("/{}", left.local_name);
        walk.node(left, right, &path);
        debug!(
            "Compared {} node pairs, {} differences",
            walk.report.nodes_compared,
            walk.report.differences.len()
        );
        walk.report
    }

    /// True when the trees describe the same dataset
    pub fn equals(&self, left: &XmlElement, right: &XmlElement) -> bool {
        self.compare(left, right).is_equal()
    }

    /// Compare the trees of two documents
    pub fn compare_documents(
        &self,
        left: &MetadataDocument,
        right: &MetadataDocument,
    ) -> ComparisonReport {
        self.compare(&left.root, &right.root)
    }
}

/// Element kind a settings element refers to, if it is one
fn reference_kind(local_name: &str) -> Option<&str> {
    local_name
        .strip_suffix(SETTINGS_SUFFIX)
        .filter(|kind| !kind.is_empty())
}

fn resolve<'t>(root: &'t XmlElement, kind: &str, id: &str) -> Option<&'t XmlElement> {
    let kinds: &[&str] = if kind == "LightSource" {
        &LIGHT_SOURCE_KINDS
    } else {
        std::slice::from_ref(&kind)
    };
    root.descendants()
        .into_iter()
        .find(|n| kinds.contains(&n.local_name.as_str()) && n.attribute("ID") == Some(id))
}

struct Walk<'a> {
    options: &'a ComparatorOptions,
    left_root: &'a XmlElement,
    right_root: &'a XmlElement,
    // node pairs on the current path; reference jumps could otherwise loop
    in_progress: HashSet<(*const XmlElement, *const XmlElement)>,
    report: ComparisonReport,
}

impl<'a> Walk<'a> {
    fn node(&mut self, left: &'a XmlElement, right: &'a XmlElement, path: &str) {
        self.report.nodes_compared += 1;

        if left.local_name != right.local_name {
            self.report.push(
                path,
                DifferenceKind::Name {
                    left: left.local_name.clone(),
                    right: right.local_name.clone(),
                },
            );
            return;
        }
        if self.options.ignores_element(&left.local_name) {
            return;
        }
        let key = (left as *const XmlElement, right as *const XmlElement);
        if !self.in_progress.insert(key) {
            return;
        }
        self.contents(left, right, path);
        self.in_progress.remove(&key);
    }

    fn contents(&mut self, left: &'a XmlElement, right: &'a XmlElement, path: &str) {
        if let Some(kind) = reference_kind(&left.local_name) {
            self.reference(kind, left, right, path);
        }
        self.attributes(left, right, path);

        if !left.local_name.is_empty() {
            let (l, r) = (
                left.text.as_deref().unwrap_or(""),
                right.text.as_deref().unwrap_or(""),
            );
            if l != r {
                self.report.push(
                    path,
                    DifferenceKind::Text {
                        left: l.to_string(),
                        right: r.to_string(),
                    },
                );
            }
        }

        let compared = |e: &'a XmlElement| -> Vec<&'a XmlElement> {
            e.children
                .iter()
                .filter(|c| !self.options.ignores_element(&c.local_name))
                .collect()
        };
        let (left_children, right_children) = (compared(left), compared(right));
        if left_children.len() != right_children.len() {
            self.report.push(
                path,
                DifferenceKind::ChildCount {
                    left: left_children.len(),
                    right: right_children.len(),
                },
            );
            return;
        }
        for (index, (l, r)) in left_children.into_iter().zip(right_children).enumerate() {
            let child_path = format!("{}/{}[{}]", path, l.local_name, index);
            self.node(l, r, &child_path);
        }
    }

    fn attributes(&mut self, left: &XmlElement, right: &XmlElement, path: &str) {
        for (name, value) in &left.attributes {
            if self.options.ignores_attribute(name) {
                continue;
            }
            match right.attribute(name) {
                Some(other) if other == value => {}
                Some(other) => self.report.push(
                    path,
                    DifferenceKind::AttributeValue {
                        name: name.clone(),
                        left: value.clone(),
                        right: other.to_string(),
                    },
                ),
                None => self.report.push(
                    path,
                    DifferenceKind::MissingAttribute {
                        name: name.clone(),
                        present_on: Side::Left,
                    },
                ),
            }
        }
        for (name, _) in &right.attributes {
            if !self.options.ignores_attribute(name) && left.attribute(name).is_none() {
                self.report.push(
                    path,
                    DifferenceKind::MissingAttribute {
                        name: name.clone(),
                        present_on: Side::Right,
                    },
                );
            }
        }
    }

    fn reference(&mut self, kind: &str, left: &XmlElement, right: &XmlElement, path: &str) {
        let (left_id, right_id) = match (left.attribute("ID"), right.attribute("ID")) {
            (Some(l), Some(r)) if !l.is_empty() && !r.is_empty() => (l, r),
            (l, _) => {
                let side = if l.map_or(true, str::is_empty) {
                    Side::Left
                } else {
                    Side::Right
                };
                warn!("Malformed {} reference at {} ({} side has no ID)", kind, path, side);
                self.report.push(
                    path,
                    DifferenceKind::MalformedReference {
                        reason: format!("{}{} without ID on {} side", kind, SETTINGS_SUFFIX, side),
                    },
                );
                return;
            }
        };

        let targets = (
            resolve(self.left_root, kind, left_id),
            resolve(self.right_root, kind, right_id),
        );
        match targets {
            (Some(l), Some(r)) => {
                let target_path = format!("{}->{}", path, kind);
                self.node(l, r, &target_path);
            }
            (None, None) => debug!("{} reference at {} unresolved on both sides", kind, path),
            (Some(_), None) => self.report.push(
                path,
                DifferenceKind::UnresolvedReference {
                    id: left_id.to_string(),
                    resolved_on: Side::Left,
                },
            ),
            (None, Some(_)) => self.report.push(
                path,
                DifferenceKind::UnresolvedReference {
                    id: right_id.to_string(),
                    resolved_on: Side::Right,
                },
            ),
        }
    }
}
