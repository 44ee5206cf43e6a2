use log::debug;

use super::MigrationError;
use crate::schema::SchemaVersion;
use crate::xml::XmlElement;

/// A structural rewrite too irregular for the declarative rules.
///
/// Receives the whole tree and the prefix new elements must carry.
pub type RestructureFn = fn(&mut XmlElement, &str) -> Result<(), String>;

/// Maps an attribute value; `None` removes the attribute
pub type ValueMapFn = fn(&str) -> Option<String>;

/// One authored rule of a migration step.
///
/// Selectors are either a bare local name (`Pixels`) or `Parent/Child`.
#[derive(Debug, Clone, Copy)]
pub enum RuleSpec {
    /// Rename matching elements
    RenameElement {
        /// Element selector
        select: &'static str,
        /// New local name
        to: &'static str,
    },
    /// Delete matching elements with their subtree
    RemoveElement {
        /// Element selector
        select: &'static str,
    },
    /// Rename an attribute on matching elements
    RenameAttribute {
        /// Element selector
        select: &'static str,
        /// Current attribute name
        from: &'static str,
        /// New attribute name
        to: &'static str,
    },
    /// Delete an attribute from matching elements
    RemoveAttribute {
        /// Element selector
        select: &'static str,
        /// Attribute name
        name: &'static str,
    },
    /// Rewrite an attribute value on matching elements
    MapAttribute {
        /// Element selector
        select: &'static str,
        /// Attribute name
        name: &'static str,
        /// Value mapping
        map: ValueMapFn,
    },
    /// Add an attribute when absent, optionally only if another is present
    DefaultAttribute {
        /// Element selector
        select: &'static str,
        /// Attribute to add
        name: &'static str,
        /// Value to add
        value: &'static str,
        /// Only add when this attribute is present
        when: Option<&'static str>,
    },
    /// Free-form rewrite of the whole tree
    Restructure {
        /// Name used in logs and errors
        name: &'static str,
        /// Rewrite function
        apply: RestructureFn,
    },
}

/// The authored definition of one step
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    /// Version the step consumes
    pub from: SchemaVersion,
    /// Version the step produces
    pub to: SchemaVersion,
    /// Rules applied in order
    pub rules: &'static [RuleSpec],
}

/// Parsed element selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parent: Option<String>,
    name: String,
}

impl Selector {
    /// Parse `Name` or `Parent/Name`
    pub fn parse(text: &str) -> Result<Self, String> {
        let segments: Vec<&str> = text.split('/').collect();
        let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        match segments.as_slice() {
            [name] if valid(*name) => Ok(Self {
                parent: None,
                name: name.to_string(),
            }),
            [parent, name] if valid(*parent) && valid(*name) => Ok(Self {
                parent: Some(parent.to_string()),
                name: name.to_string(),
            }),
            _ => Err(format!("invalid selector '{}'", text)),
        }
    }

    fn matches(&self, element: &XmlElement, parent: Option<&str>) -> bool {
        element.local_name == self.name
            && self.parent.as_deref().map_or(true, |p| parent == Some(p))
    }
}

#[derive(Debug, Clone)]
enum CompiledRule {
    RenameElement(Selector, &'static str),
    RemoveElement(Selector),
    RenameAttribute(Selector, &'static str, &'static str),
    RemoveAttribute(Selector, &'static str),
    MapAttribute(Selector, &'static str, ValueMapFn),
    DefaultAttribute(Selector, &'static str, &'static str, Option<&'static str>),
    Restructure(&'static str, RestructureFn),
}

/// A step ready to run: selectors parsed and the output prefix fixed
#[derive(Debug, Clone)]
pub struct CompiledTransform {
    /// Version the transform consumes
    pub from: SchemaVersion,
    /// Version the transform produces
    pub to: SchemaVersion,
    /// Synthetic prefix carried by elements this step creates or renames
    pub prefix: String,
    rules: Vec<CompiledRule>,
}

/// Synthetic prefix used by the step producing `to`
pub fn synthetic_prefix(to: SchemaVersion) -> String {
    let ordinal = SchemaVersion::ALL
        .iter()
        .position(|v| *v == to)
        .unwrap_or_default();
    format!("ns{}", ordinal)
}

/// Compile an authored step
pub fn compile_step(step: &StepDefinition) -> Result<CompiledTransform, MigrationError> {
    let fail = |reason: String| MigrationError::Compile {
        from: step.from,
        reason,
    };
    if step.to <= step.from {
        return Err(fail(format!("step does not advance ({} -> {})", step.from, step.to)));
    }

    let mut rules = Vec::with_capacity(step.rules.len());
    for spec in step.rules {
        let rule = match *spec {
            RuleSpec::RenameElement { select, to } => {
                CompiledRule::RenameElement(Selector::parse(select).map_err(fail)?, to)
            }
            RuleSpec::RemoveElement { select } => {
                CompiledRule::RemoveElement(Selector::parse(select).map_err(fail)?)
            }
            RuleSpec::RenameAttribute { select, from, to } => {
                CompiledRule::RenameAttribute(Selector::parse(select).map_err(fail)?, from, to)
            }
            RuleSpec::RemoveAttribute { select, name } => {
                CompiledRule::RemoveAttribute(Selector::parse(select).map_err(fail)?, name)
            }
            RuleSpec::MapAttribute { select, name, map } => {
                CompiledRule::MapAttribute(Selector::parse(select).map_err(fail)?, name, map)
            }
            RuleSpec::DefaultAttribute {
                select,
                name,
                value,
                when,
            } => CompiledRule::DefaultAttribute(
                Selector::parse(select).map_err(fail)?,
                name,
                value,
                when,
            ),
            RuleSpec::Restructure { name, apply } => CompiledRule::Restructure(name, apply),
        };
        rules.push(rule);
    }

    debug!("Compiled migration step {} -> {} ({} rules)", step.from, step.to, rules.len());
    Ok(CompiledTransform {
        from: step.from,
        to: step.to,
        prefix: synthetic_prefix(step.to),
        rules,
    })
}

impl CompiledTransform {
    /// Run every rule over `root`, then re-target the root namespace.
    pub fn apply(&self, mut root: XmlElement) -> Result<XmlElement, MigrationError> {
        for rule in &self.rules {
            match rule {
                CompiledRule::Restructure(name, apply) => {
                    apply(&mut root, &self.prefix).map_err(|reason| MigrationError::Step {
                        from: self.from,
                        to: self.to,
                        reason: format!("{}: {}", name, reason),
                    })?;
                }
                other => self.visit(&mut root, None, other),
            }
        }

        let namespace = self.to.namespace();
        root.set_attribute("xmlns", &namespace);
        root.set_attribute(&format!("xmlns:{}", self.prefix), &namespace);

        if root.local_name != "OME" {
            return Err(MigrationError::Step {
                from: self.from,
                to: self.to,
                reason: format!("output root is <{}>, expected <OME>", root.local_name),
            });
        }
        Ok(root)
    }

    fn visit(&self, element: &mut XmlElement, parent: Option<&str>, rule: &CompiledRule) {
        match rule {
            CompiledRule::RenameElement(selector, to) if selector.matches(element, parent) => {
                element.local_name = to.to_string();
                element.prefix = Some(self.prefix.clone());
            }
            CompiledRule::RenameAttribute(selector, from, to) if selector.matches(element, parent) => {
                element.rename_attribute(from, to);
            }
            CompiledRule::RemoveAttribute(selector, name) if selector.matches(element, parent) => {
                element.remove_attribute(name);
            }
            CompiledRule::MapAttribute(selector, name, map) if selector.matches(element, parent) => {
                if let Some(value) = element.attribute(name) {
                    match map(value) {
                        Some(mapped) => element.set_attribute(name, mapped),
                        None => {
                            element.remove_attribute(name);
                        }
                    }
                }
            }
            CompiledRule::DefaultAttribute(selector, name, value, when)
                if selector.matches(element, parent) =>
            {
                let applies = when.map_or(true, |w| element.attribute(w).is_some());
                if applies && element.attribute(name).is_none() {
                    element.set_attribute(name, value);
                }
            }
            _ => {}
        }

        if let CompiledRule::RemoveElement(selector) = rule {
            let name = element.local_name.clone();
            element
                .children
                .retain(|child| !selector.matches(child, Some(name.as_str())));
        }

        let name = element.local_name.clone();
        for child in &mut element.children {
            self.visit(child, Some(name.as_str()), rule);
        }
    }
}
