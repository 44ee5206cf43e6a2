//! Conversion between the typed model and latest-schema trees.

use std::str::FromStr;

use super::{
    make_id, Channel, CommentAnnotation, Detector, DetectorSettings, IdKind, Image, Instrument,
    Objective, ObjectiveSettings, OmeError, OmeRoot, Pixels, Plane, Quantity,
};
use crate::dimension::{is_valid_dimension_order, PixelType};
use crate::document::MetadataDocument;
use crate::schema::SchemaVersion;
use crate::translate::PartialFieldError;
use crate::xml::XmlElement;

/// Attribute access for one node, collecting skipped optional values
struct Fields<'e, 'w> {
    element: &'e XmlElement,
    object: String,
    warnings: &'w mut Vec<PartialFieldError>,
}

impl<'e, 'w> Fields<'e, 'w> {
    fn new(element: &'e XmlElement, object: &str, warnings: &'w mut Vec<PartialFieldError>) -> Self {
        Self {
            element,
            object: object.to_string(),
            warnings,
        }
    }

    fn text(&self, name: &str) -> Option<String> {
        self.element.attribute(name).map(str::to_string)
    }

    fn skip(&mut self, field: &str, value: &str, reason: &str) {
        self.warnings
            .push(PartialFieldError::new(&self.object, field, value, reason));
    }

    fn required<T: FromStr>(&self, field: &'static str) -> Result<T, OmeError> {
        let value = self.element.attribute(field).ok_or_else(|| OmeError::MissingField {
            object: self.object.clone(),
            field,
        })?;
        value.trim().parse().map_err(|_| OmeError::InvalidField {
            object: self.object.clone(),
            field,
            value: value.to_string(),
        })
    }

    fn size(&self, field: &'static str) -> Result<u32, OmeError> {
        match self.required::<u32>(field)? {
            0 => Err(OmeError::InvalidField {
                object: self.object.clone(),
                field,
                value: "0".to_string(),
            }),
            size => Ok(size),
        }
    }

    fn optional<T: FromStr>(&mut self, field: &str) -> Option<T> {
        let value = self.element.attribute(field)?;
        match value.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.skip(field, value, "not a valid value");
                None
            }
        }
    }

    fn flag(&mut self, field: &str) -> Option<bool> {
        let value = self.element.attribute(field)?;
        match value.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => {
                self.skip(field, value, "not a boolean");
                None
            }
        }
    }

    fn positive(&mut self, field: &str) -> Option<f64> {
        let value: f64 = self.optional(field)?;
        if value.is_finite() && value > 0.0 {
            Some(value)
        } else {
            self.skip(field, &value.to_string(), "must be positive");
            None
        }
    }

    fn quantity(&mut self, field: &str, positive: bool) -> Option<Quantity> {
        let value = if positive {
            self.positive(field)?
        } else {
            let value: f64 = self.optional(field)?;
            if !value.is_finite() {
                self.skip(field, &value.to_string(), "must be finite");
                return None;
            }
            value
        };
        let unit = self.text(&format!("{}Unit", field));
        Some(Quantity { value, unit })
    }
}

impl OmeRoot {
    /// Read a typed root from a latest-schema tree.
    ///
    /// Missing identifiers are synthesized. Invalid optional values are
    /// skipped and reported through `warnings`; a missing or invalid Pixels
    /// geometry field aborts.
    pub fn from_element(
        root: &XmlElement,
        warnings: &mut Vec<PartialFieldError>,
    ) -> Result<Self, OmeError> {
        if root.local_name != "OME" {
            return Err(OmeError::UnexpectedRoot(root.qualified_name()));
        }

        let instruments = root
            .children_named("Instrument")
            .enumerate()
            .map(|(i, el)| read_instrument(el, i, warnings))
            .collect();

        let mut images = Vec::new();
        for (i, el) in root.children_named("Image").enumerate() {
            images.push(read_image(el, i, warnings)?);
        }

        let annotations = root
            .child("StructuredAnnotations")
            .map(|sa| {
                sa.children_named("CommentAnnotation")
                    .enumerate()
                    .map(|(i, el)| CommentAnnotation {
                        id: id_or(el, IdKind::Annotation, &[i]),
                        value: el
                            .child("Value")
                            .and_then(|v| v.text.clone())
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            creator: root.attribute("Creator").map(str::to_string),
            instruments,
            images,
            annotations,
        })
    }

    /// Build the latest-schema tree
    pub fn to_element(&self) -> XmlElement {
        let mut root =
            XmlElement::new("OME").with_attribute("xmlns", SchemaVersion::LATEST.namespace());
        set_opt(&mut root, "Creator", self.creator.as_ref());

        root.children
            .extend(self.instruments.iter().map(instrument_element));
        root.children.extend(self.images.iter().map(image_element));

        if !self.annotations.is_empty() {
            let mut annotations = XmlElement::new("StructuredAnnotations");
            for annotation in &self.annotations {
                annotations.children.push(
                    XmlElement::new("CommentAnnotation")
                        .with_attribute("ID", &annotation.id)
                        .with_child(XmlElement::new("Value").with_text(annotation.value.clone())),
                );
            }
            root.children.push(annotations);
        }
        root
    }

    /// Wrap [`OmeRoot::to_element`] in a latest-version document
    pub fn to_document(&self) -> MetadataDocument {
        MetadataDocument {
            version: SchemaVersion::LATEST,
            root: self.to_element(),
        }
    }
}

fn id_or(element: &XmlElement, kind: IdKind, indices: &[usize]) -> String {
    element
        .attribute("ID")
        .filter(|id| !id.is_empty())
        .map_or_else(|| make_id(kind, indices), str::to_string)
}

fn child_text(element: &XmlElement, name: &str) -> Option<String> {
    element.child(name).and_then(|c| c.text.clone())
}

fn read_instrument(
    element: &XmlElement,
    index: usize,
    warnings: &mut Vec<PartialFieldError>,
) -> Instrument {
    let id = id_or(element, IdKind::Instrument, &[index]);

    let detectors = element
        .children_named("Detector")
        .enumerate()
        .map(|(d, el)| {
            let detector_id = id_or(el, IdKind::Detector, &[index, d]);
            let mut fields = Fields::new(el, &detector_id, warnings);
            Detector {
                model: fields.text("Model"),
                detector_type: fields.text("Type"),
                gain: fields.optional("Gain"),
                id: detector_id,
            }
        })
        .collect();

    let objectives = element
        .children_named("Objective")
        .enumerate()
        .map(|(o, el)| {
            let objective_id = id_or(el, IdKind::Objective, &[index, o]);
            let mut fields = Fields::new(el, &objective_id, warnings);
            Objective {
                model: fields.text("Model"),
                nominal_magnification: fields.positive("NominalMagnification"),
                lens_na: fields.positive("LensNA"),
                id: objective_id,
            }
        })
        .collect();

    Instrument {
        microscope_model: element
            .child("Microscope")
            .and_then(|m| m.attribute("Model"))
            .map(str::to_string),
        id,
        detectors,
        objectives,
    }
}

fn read_image(
    element: &XmlElement,
    index: usize,
    warnings: &mut Vec<PartialFieldError>,
) -> Result<Image, OmeError> {
    let id = id_or(element, IdKind::Image, &[index]);
    let pixels = element.child("Pixels").ok_or_else(|| OmeError::MissingElement {
        object: id.clone(),
        element: "Pixels",
    })?;

    Ok(Image {
        name: element.attribute("Name").map(str::to_string),
        acquisition_date: child_text(element, "AcquisitionDate"),
        description: child_text(element, "Description"),
        instrument_ref: element
            .child("InstrumentRef")
            .and_then(|r| r.attribute("ID"))
            .map(str::to_string),
        objective_settings: element
            .child("ObjectiveSettings")
            .and_then(|s| s.attribute("ID"))
            .map(|id| ObjectiveSettings { id: id.to_string() }),
        pixels: read_pixels(pixels, index, warnings)?,
        id,
    })
}

fn read_pixels(
    element: &XmlElement,
    image: usize,
    warnings: &mut Vec<PartialFieldError>,
) -> Result<Pixels, OmeError> {
    let id = id_or(element, IdKind::Pixels, &[image]);
    let mut fields = Fields::new(element, &id, warnings);

    let dimension_order: String = fields.required("DimensionOrder")?;
    if !is_valid_dimension_order(&dimension_order) || !dimension_order.starts_with("XY") {
        return Err(OmeError::InvalidField {
            object: id,
            field: "DimensionOrder",
            value: dimension_order,
        });
    }
    let pixel_type: PixelType = fields.required("Type")?;

    let mut pixels = Pixels {
        id: id.clone(),
        dimension_order,
        pixel_type,
        size_x: fields.size("SizeX")?,
        size_y: fields.size("SizeY")?,
        size_z: fields.size("SizeZ")?,
        size_c: fields.size("SizeC")?,
        size_t: fields.size("SizeT")?,
        significant_bits: fields.optional("SignificantBits"),
        big_endian: fields.flag("BigEndian"),
        interleaved: fields.flag("Interleaved"),
        physical_size_x: fields.quantity("PhysicalSizeX", true),
        physical_size_y: fields.quantity("PhysicalSizeY", true),
        physical_size_z: fields.quantity("PhysicalSizeZ", true),
        time_increment: fields.quantity("TimeIncrement", false),
        channels: Vec::new(),
        planes: Vec::new(),
    };

    for (c, el) in element.children_named("Channel").enumerate() {
        pixels.channels.push(read_channel(el, image, c, warnings));
    }
    for el in element.children_named("Plane") {
        let mut fields = Fields::new(el, &id, warnings);
        pixels.planes.push(Plane {
            the_z: fields.optional("TheZ").unwrap_or_default(),
            the_c: fields.optional("TheC").unwrap_or_default(),
            the_t: fields.optional("TheT").unwrap_or_default(),
            delta_t: fields.quantity("DeltaT", false),
            exposure_time: fields.quantity("ExposureTime", false),
        });
    }
    Ok(pixels)
}

fn read_channel(
    element: &XmlElement,
    image: usize,
    index: usize,
    warnings: &mut Vec<PartialFieldError>,
) -> Channel {
    let id = id_or(element, IdKind::Channel, &[image, index]);
    let mut fields = Fields::new(element, &id, warnings);

    let samples_per_pixel = match fields.optional::<u32>("SamplesPerPixel") {
        Some(0) => {
            fields.skip("SamplesPerPixel", "0", "must be positive");
            None
        }
        other => other,
    };
    let mut channel = Channel {
        id: id.clone(),
        name: fields.text("Name"),
        samples_per_pixel,
        color: fields.optional("Color"),
        excitation_wavelength: fields.quantity("ExcitationWavelength", true),
        emission_wavelength: fields.quantity("EmissionWavelength", true),
        detector_settings: None,
    };

    if let Some(settings) = element.child("DetectorSettings") {
        let mut fields = Fields::new(settings, &id, warnings);
        match fields.text("ID") {
            Some(detector) => {
                channel.detector_settings = Some(DetectorSettings {
                    id: detector,
                    gain: fields.optional("Gain"),
                })
            }
            None => fields.skip("DetectorSettings", "", "reference without ID"),
        }
    }
    channel
}

fn set_opt<T: ToString>(element: &mut XmlElement, name: &str, value: Option<T>) {
    if let Some(value) = value {
        element.set_attribute(name, value);
    }
}

fn set_quantity(element: &mut XmlElement, name: &str, quantity: &Option<Quantity>) {
    if let Some(quantity) = quantity {
        element.set_attribute(name, quantity.value);
        set_opt(element, &format!("{}Unit", name), quantity.unit.as_ref());
    }
}

fn instrument_element(instrument: &Instrument) -> XmlElement {
    let mut element = XmlElement::new("Instrument").with_attribute("ID", &instrument.id);
    if let Some(model) = &instrument.microscope_model {
        element
            .children
            .push(XmlElement::new("Microscope").with_attribute("Model", model));
    }
    for detector in &instrument.detectors {
        let mut el = XmlElement::new("Detector").with_attribute("ID", &detector.id);
        set_opt(&mut el, "Model", detector.model.as_ref());
        set_opt(&mut el, "Type", detector.detector_type.as_ref());
        set_opt(&mut el, "Gain", detector.gain);
        element.children.push(el);
    }
    for objective in &instrument.objectives {
        let mut el = XmlElement::new("Objective").with_attribute("ID", &objective.id);
        set_opt(&mut el, "Model", objective.model.as_ref());
        set_opt(&mut el, "NominalMagnification", objective.nominal_magnification);
        set_opt(&mut el, "LensNA", objective.lens_na);
        element.children.push(el);
    }
    element
}

fn image_element(image: &Image) -> XmlElement {
    let mut element = XmlElement::new("Image").with_attribute("ID", &image.id);
    set_opt(&mut element, "Name", image.name.as_ref());

    if let Some(date) = &image.acquisition_date {
        element
            .children
            .push(XmlElement::new("AcquisitionDate").with_text(date.clone()));
    }
    if let Some(description) = &image.description {
        element
            .children
            .push(XmlElement::new("Description").with_text(description.clone()));
    }
    if let Some(instrument) = &image.instrument_ref {
        element
            .children
            .push(XmlElement::new("InstrumentRef").with_attribute("ID", instrument));
    }
    if let Some(settings) = &image.objective_settings {
        element
            .children
            .push(XmlElement::new("ObjectiveSettings").with_attribute("ID", &settings.id));
    }
    element.children.push(pixels_element(&image.pixels));
    element
}

fn pixels_element(pixels: &Pixels) -> XmlElement {
    let mut element = XmlElement::new("Pixels")
        .with_attribute("ID", &pixels.id)
        .with_attribute("DimensionOrder", &pixels.dimension_order)
        .with_attribute("Type", pixels.pixel_type);
    set_opt(&mut element, "SignificantBits", pixels.significant_bits);
    set_opt(&mut element, "Interleaved", pixels.interleaved);
    set_opt(&mut element, "BigEndian", pixels.big_endian);
    element.set_attribute("SizeX", pixels.size_x);
    element.set_attribute("SizeY", pixels.size_y);
    element.set_attribute("SizeZ", pixels.size_z);
    element.set_attribute("SizeC", pixels.size_c);
    element.set_attribute("SizeT", pixels.size_t);
    set_quantity(&mut element, "PhysicalSizeX", &pixels.physical_size_x);
    set_quantity(&mut element, "PhysicalSizeY", &pixels.physical_size_y);
    set_quantity(&mut element, "PhysicalSizeZ", &pixels.physical_size_z);
    set_quantity(&mut element, "TimeIncrement", &pixels.time_increment);

    for channel in &pixels.channels {
        let mut el = XmlElement::new("Channel").with_attribute("ID", &channel.id);
        set_opt(&mut el, "Name", channel.name.as_ref());
        set_opt(&mut el, "SamplesPerPixel", channel.samples_per_pixel);
        set_opt(&mut el, "Color", channel.color);
        set_quantity(&mut el, "ExcitationWavelength", &channel.excitation_wavelength);
        set_quantity(&mut el, "EmissionWavelength", &channel.emission_wavelength);
        if let Some(settings) = &channel.detector_settings {
            let mut s = XmlElement::new("DetectorSettings").with_attribute("ID", &settings.id);
            set_opt(&mut s, "Gain", settings.gain);
            el.children.push(s);
        }
        element.children.push(el);
    }
    element.children.push(XmlElement::new("MetadataOnly"));
    for plane in &pixels.planes {
        let mut el = XmlElement::new("Plane")
            .with_attribute("TheZ", plane.the_z)
            .with_attribute("TheC", plane.the_c)
            .with_attribute("TheT", plane.the_t);
        set_quantity(&mut el, "DeltaT", &plane.delta_t);
        set_quantity(&mut el, "ExposureTime", &plane.exposure_time);
        element.children.push(el);
    }
    element
}
