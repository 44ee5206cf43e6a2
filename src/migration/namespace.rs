use log::debug;

use super::MigrationError;
use crate::schema::{namespace_of, SchemaVersion};
use crate::xml::XmlElement;

/// Namespaces under this root belong to the schema family and its sub-schemas
const SCHEMA_FAMILY_ROOTS: [&str; 2] = [
    "http://www.openmicroscopy.org/Schemas/",
    "http://www.openmicroscopy.org/XMLschemas/",
];

/// Binary data keeps its own namespace in every release
const BINARY_FILE_SCHEMA: &str = "http://www.openmicroscopy.org/Schemas/BinaryFile/";

/// Make sure the root declares the default namespace the next step matches on.
///
/// Legacy writers sometimes declared the schema only under an `ome`/`OME`
/// alias; the alias is copied to `xmlns` so the step sees a default
/// namespace. Fails if no alias is declared or if it names another release.
pub fn normalize_namespace(
    mut root: XmlElement,
    expected: SchemaVersion,
) -> Result<XmlElement, MigrationError> {
    let fail = |reason: String| MigrationError::Namespace {
        version: expected,
        reason,
    };

    let namespace = namespace_of(&root)
        .ok_or_else(|| fail(format!("<{}> declares no namespace", root.qualified_name())))?
        .to_string();

    let found = SchemaVersion::from_namespace(&namespace)
        .map_err(|token| fail(format!("unrecognized namespace token '{}'", token)))?;
    if found != expected {
        return Err(fail(format!("namespace names {}, expected {}", found, expected)));
    }

    if root.attribute("xmlns").map_or(true, str::is_empty) {
        debug!("Adding default namespace alias {}", namespace);
        root.set_attribute("xmlns", &namespace);
    }
    Ok(root)
}

fn is_schema_family(namespace: &str) -> bool {
    SCHEMA_FAMILY_ROOTS.iter().any(|r| namespace.starts_with(r))
        && !namespace.starts_with(BINARY_FILE_SCHEMA)
}

/// Rewrite every prefix bound to a schema-family namespace back to the
/// default namespace of `version`.
///
/// This covers the synthetic prefixes introduced by the steps as well as
/// `ome`/`OME` and legacy sub-schema prefixes (`SA`, `SPW`, `ROI`, ...).
pub fn cleanup(mut root: XmlElement, version: SchemaVersion) -> XmlElement {
    let prefixes: Vec<String> = root
        .attributes
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix("xmlns:")
                .filter(|_| is_schema_family(value))
                .map(str::to_string)
        })
        .collect();

    root.attributes.retain(|(key, _)| {
        key.strip_prefix("xmlns:")
            .map_or(true, |p| !prefixes.iter().any(|x| x == p))
    });
    root.set_attribute("xmlns", version.namespace());
    if root.attribute("xsi:schemaLocation").is_some() {
        root.set_attribute("xsi:schemaLocation", version.schema_location());
    }

    root.walk_mut(&mut |element: &mut XmlElement| {
        if element
            .prefix
            .as_ref()
            .map_or(false, |p| prefixes.contains(p))
        {
            element.prefix = None;
        }
    });
    debug!("Namespace cleanup rewrote prefixes {:?}", prefixes);
    root
}
