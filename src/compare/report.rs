use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Which side of a comparison something was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first tree
    Left,
    /// The second tree
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// What differed at a given node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DifferenceKind {
    /// Local names differ
    Name {
        /// Left local name
        left: String,
        /// Right local name
        right: String,
    },
    /// An attribute exists on one side only
    MissingAttribute {
        /// Attribute name
        name: String,
        /// Side carrying the attribute
        present_on: Side,
    },
    /// An attribute has different values
    AttributeValue {
        /// Attribute name
        name: String,
        /// Left value
        left: String,
        /// Right value
        right: String,
    },
    /// Text content differs
    Text {
        /// Left text
        left: String,
        /// Right text
        right: String,
    },
    /// Different numbers of compared children
    ChildCount {
        /// Left count
        left: usize,
        /// Right count
        right: usize,
    },
    /// A settings reference resolved on one side only
    UnresolvedReference {
        /// Identifier being resolved
        id: String,
        /// Side where it resolved
        resolved_on: Side,
    },
    /// A settings element whose reference cannot be read
    MalformedReference {
        /// Why the reference is unusable
        reason: String,
    },
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceKind::Name { left, right } => {
                write!(f, "element <{}> vs <{}>", left, right)
            }
            DifferenceKind::MissingAttribute { name, present_on } => {
                write!(f, "attribute {} only on {} side", name, present_on)
            }
            DifferenceKind::AttributeValue { name, left, right } => {
                write!(f, "attribute {}: '{}' vs '{}'", name, left, right)
            }
            DifferenceKind::Text { left, right } => write!(f, "text '{}' vs '{}'", left, right),
            DifferenceKind::ChildCount { left, right } => {
                write!(f, "{} children vs {}", left, right)
            }
            DifferenceKind::UnresolvedReference { id, resolved_on } => {
                write!(f, "reference {} resolves only on {} side", id, resolved_on)
            }
            DifferenceKind::MalformedReference { reason } => {
                write!(f, "malformed reference: {}", reason)
            }
        }
    }
}

/// One difference found while comparing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Location of the node, e.g. `/OME/Image[0]/Pixels[0]`
    pub path: String,
    /// What differed
    pub kind: DifferenceKind,
}

/// Result of comparing two trees
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    /// Every difference in visiting order
    pub differences: Vec<Difference>,
    /// Number of node pairs visited
    pub nodes_compared: usize,
}

impl ComparisonReport {
    /// True when no difference was recorded
    pub fn is_equal(&self) -> bool {
        self.differences.is_empty()
    }

    pub(crate) fn push(&mut self, path: &str, kind: DifferenceKind) {
        self.differences.push(Difference {
            path: path.to_string(),
            kind,
        });
    }

    /// Count of malformed references met along the way
    pub fn malformed_count(&self) -> usize {
        self.differences
            .iter()
            .filter(|d| matches!(d.kind, DifferenceKind::MalformedReference { .. }))
            .count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static SAME: Emoji<'_, '_> = Emoji("✓", "[EQUAL]");
            static DIFF: Emoji<'_, '_> = Emoji("✗", "[DIFF]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Metadata Comparison Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("==========================").cyan()));

            for difference in &self.differences {
                output.push_str(&format!(
                    "[{}] {}: {}\n",
                    DIFF,
                    style(&difference.path).red(),
                    difference.kind
                ));
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} nodes compared, {} differences\n",
                style("Summary").bold(),
                style(self.nodes_compared).green(),
                style(self.differences.len()).red()
            ));
            if self.is_equal() {
                output.push_str(&format!("[{}] {}\n", SAME, style("Trees are EQUAL").green().bold()));
            } else {
                output.push_str(&format!("{}\n", style("Trees DIFFER").red().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metadata Comparison Report")?;
        writeln!(f, "==========================")?;

        for difference in &self.differences {
            writeln!(f, "[✗] {}: {}", difference.path, difference.kind)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} nodes compared, {} differences",
            self.nodes_compared,
            self.differences.len()
        )?;
        if self.is_equal() {
            writeln!(f, "Trees are EQUAL")
        } else {
            writeln!(f, "Trees DIFFER")
        }
    }
}
