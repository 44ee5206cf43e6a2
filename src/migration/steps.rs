//! Authored upgrade steps, one per schema release.
//!
//! The 2003 release predates the regular namespace scheme and upgrades in a
//! single jump to 2008-09; every later release has a step to its successor.

use log::warn;

use super::rules::{RuleSpec, StepDefinition};
use crate::dimension::PixelType;
use crate::schema::SchemaVersion;
use crate::xml::XmlElement;

use RuleSpec::*;

/// Every authored step, ordered by source version
pub static STEPS: &[StepDefinition] = &[
    StepDefinition {
        from: SchemaVersion::V2003Fc,
        to: SchemaVersion::V2008_09,
        rules: &[
            RenameElement { select: "Image/ChannelInfo", to: "LogicalChannel" },
            MapAttribute { select: "Pixels", name: "PixelType", map: lowercase },
            RenameElement { select: "Image/CreationDate", to: "AcquiredDate" },
            RemoveAttribute { select: "Image", name: "DefaultPixels" },
            RemoveElement { select: "CustomAttributes" },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2007_06,
        to: SchemaVersion::V2008_02,
        rules: &[
            RenameElement { select: "Image/ChannelInfo", to: "LogicalChannel" },
            MapAttribute { select: "Pixels", name: "PixelType", map: lowercase },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2008_02,
        to: SchemaVersion::V2008_09,
        rules: &[
            RenameElement { select: "Image/CreationDate", to: "AcquiredDate" },
            RemoveAttribute { select: "Image", name: "DefaultPixels" },
            RemoveElement { select: "CustomAttributes" },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2008_09,
        to: SchemaVersion::V2009_09,
        rules: &[
            Restructure { name: "move Dimensions onto Pixels", apply: move_dimensions_to_pixels },
            Restructure { name: "move LogicalChannel into Pixels", apply: move_logical_channels },
            RenameAttribute { select: "Pixels", from: "PixelType", to: "Type" },
            RemoveElement { select: "Image/DisplayOptions" },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2009_09,
        to: SchemaVersion::V2010_04,
        rules: &[
            RenameAttribute { select: "Channel", from: "ExWave", to: "ExcitationWavelength" },
            RenameAttribute { select: "Channel", from: "EmWave", to: "EmissionWavelength" },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2010_04,
        to: SchemaVersion::V2010_06,
        rules: &[Restructure { name: "wrap XMLAnnotation values", apply: wrap_xml_annotation_values }],
    },
    StepDefinition {
        from: SchemaVersion::V2010_06,
        to: SchemaVersion::V2011_06,
        rules: &[
            RemoveAttribute { select: "Experimenter", name: "DisplayName" },
            Restructure { name: "drop non-positive physical sizes", apply: drop_non_positive_sizes },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2011_06,
        to: SchemaVersion::V2012_06,
        rules: &[
            RenameElement { select: "Image/AcquiredDate", to: "AcquisitionDate" },
            RenameAttribute { select: "Experimenter", from: "OMEName", to: "UserName" },
            RenameElement { select: "Group", to: "ExperimenterGroup" },
            RenameElement { select: "GroupRef", to: "ExperimenterGroupRef" },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2012_06,
        to: SchemaVersion::V2013_06,
        rules: &[Restructure { name: "derive SignificantBits", apply: derive_significant_bits }],
    },
    StepDefinition {
        from: SchemaVersion::V2013_06,
        to: SchemaVersion::V2015_01,
        rules: &[
            DefaultAttribute { select: "Pixels", name: "PhysicalSizeXUnit", value: "µm", when: Some("PhysicalSizeX") },
            DefaultAttribute { select: "Pixels", name: "PhysicalSizeYUnit", value: "µm", when: Some("PhysicalSizeY") },
            DefaultAttribute { select: "Pixels", name: "PhysicalSizeZUnit", value: "µm", when: Some("PhysicalSizeZ") },
            DefaultAttribute { select: "Pixels", name: "TimeIncrementUnit", value: "s", when: Some("TimeIncrement") },
            DefaultAttribute { select: "Plane", name: "DeltaTUnit", value: "s", when: Some("DeltaT") },
            DefaultAttribute { select: "Plane", name: "ExposureTimeUnit", value: "s", when: Some("ExposureTime") },
            DefaultAttribute { select: "Channel", name: "ExcitationWavelengthUnit", value: "nm", when: Some("ExcitationWavelength") },
            DefaultAttribute { select: "Channel", name: "EmissionWavelengthUnit", value: "nm", when: Some("EmissionWavelength") },
        ],
    },
    StepDefinition {
        from: SchemaVersion::V2015_01,
        to: SchemaVersion::V2016_06,
        rules: &[
            MapAttribute { select: "Channel", name: "Color", map: packed_color_to_signed },
            DefaultAttribute { select: "Pixels", name: "Interleaved", value: "false", when: None },
        ],
    },
];

/// The step leaving `from`, if one is authored
pub fn step_from(from: SchemaVersion) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|step| step.from == from)
}

fn lowercase(value: &str) -> Option<String> {
    Some(value.to_ascii_lowercase())
}

fn packed_color_to_signed(value: &str) -> Option<String> {
    match value.trim().parse::<i64>() {
        Ok(v) if (0..=i64::from(u32::MAX)).contains(&v) => Some((v as u32 as i32).to_string()),
        Ok(v) if (i64::from(i32::MIN)..0).contains(&v) => Some(v.to_string()),
        _ => {
            warn!("Dropping unparseable channel color '{}'", value);
            None
        }
    }
}

fn images_mut(root: &mut XmlElement) -> impl Iterator<Item = &mut XmlElement> {
    root.children.iter_mut().filter(|c| c.local_name == "Image")
}

fn move_dimensions_to_pixels(root: &mut XmlElement, _prefix: &str) -> Result<(), String> {
    const MOVED: [(&str, &str); 4] = [
        ("PixelSizeX", "PhysicalSizeX"),
        ("PixelSizeY", "PhysicalSizeY"),
        ("PixelSizeZ", "PhysicalSizeZ"),
        ("TimeIncrement", "TimeIncrement"),
    ];

    for image in images_mut(root) {
        let Some(index) = image.children.iter().position(|c| c.local_name == "Dimensions") else {
            continue;
        };
        let dimensions = image.children.remove(index);
        let pixels = image
            .child_mut("Pixels")
            .ok_or_else(|| "Image has Dimensions but no Pixels".to_string())?;
        for (from, to) in MOVED {
            if let Some(value) = dimensions.attribute(from) {
                if pixels.attribute(to).is_none() {
                    pixels.set_attribute(to, value);
                }
            }
        }
    }
    Ok(())
}

fn move_logical_channels(root: &mut XmlElement, prefix: &str) -> Result<(), String> {
    for image in images_mut(root) {
        let (channels, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut image.children)
            .into_iter()
            .partition(|c| c.local_name == "LogicalChannel");
        image.children = rest;
        if channels.is_empty() {
            continue;
        }

        let id = image.attribute("ID").unwrap_or("?").to_string();
        let pixels = image
            .child_mut("Pixels")
            .ok_or_else(|| format!("Image {} has channels but no Pixels", id))?;
        for mut channel in channels {
            channel.local_name = "Channel".to_string();
            channel.prefix = Some(prefix.to_string());
            pixels.children.push(channel);
        }
    }
    Ok(())
}

fn wrap_xml_annotation_values(root: &mut XmlElement, prefix: &str) -> Result<(), String> {
    root.walk_mut(&mut |element: &mut XmlElement| {
        if element.local_name != "XMLAnnotation" {
            return;
        }
        let already_wrapped =
            element.children.len() == 1 && element.children[0].local_name == "Value";
        if already_wrapped {
            return;
        }
        let mut value = XmlElement::new("Value");
        value.prefix = Some(prefix.to_string());
        value.children = std::mem::take(&mut element.children);
        value.text = element.text.take();
        element.children.push(value);
    });
    Ok(())
}

fn drop_non_positive_sizes(root: &mut XmlElement, _prefix: &str) -> Result<(), String> {
    root.walk_mut(&mut |element: &mut XmlElement| {
        if element.local_name != "Pixels" {
            return;
        }
        for name in ["PhysicalSizeX", "PhysicalSizeY", "PhysicalSizeZ"] {
            let keep = element
                .attribute(name)
                .map(|v| v.trim().parse::<f64>().map_or(false, |f| f > 0.0));
            if keep == Some(false) {
                warn!("Dropping non-positive {} on Pixels", name);
                element.remove_attribute(name);
            }
        }
    });
    Ok(())
}

fn derive_significant_bits(root: &mut XmlElement, _prefix: &str) -> Result<(), String> {
    root.walk_mut(&mut |element: &mut XmlElement| {
        if element.local_name != "Pixels" || element.attribute("SignificantBits").is_some() {
            return;
        }
        let bits = element
            .attribute("Type")
            .and_then(|t| t.parse::<PixelType>().ok())
            .map(|t| t.bits());
        if let Some(bits) = bits {
            element.set_attribute("SignificantBits", bits);
        }
    });
    Ok(())
}
