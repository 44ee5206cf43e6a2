use super::{unit_scale, MICROMETER, SECOND};
use crate::dimension::{AxisType, CanonicalImageMetadata, CanonicalMetadata};
use crate::formats::SyntheticDescriptor;
use crate::translate::{PartialFieldError, TranslationContext, TranslationError};

pub(super) fn to_canonical(
    source: &SyntheticDescriptor,
    destination: &mut CanonicalMetadata,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    let count = source.series as usize;
    let sizes = [
        source.size_x,
        source.size_y,
        source.size_z,
        source.size_c,
        source.size_t,
    ];

    let mut series = Vec::with_capacity(count);
    for index in 0..count {
        let mut image = CanonicalImageMetadata::from_sizes(
            &source.dimension_order,
            sizes,
            source.pixel_type,
            source.rgb,
        )?;
        image.name = Some(if count > 1 {
            format!("{} #{}", source.name, index + 1)
        } else {
            source.name.clone()
        });
        image.little_endian = source.little_endian;
        image.interleaved = source.interleaved;
        image.indexed = source.indexed;
        image.acquisition_date = source.acquisition_date.clone();
        image.set_calibration(AxisType::X, source.physical_size_x, Some(MICROMETER));
        image.set_calibration(AxisType::Y, source.physical_size_y, Some(MICROMETER));
        image.set_calibration(AxisType::Z, source.physical_size_z, Some(MICROMETER));
        image.set_calibration(AxisType::Time, source.time_increment, Some(SECOND));
        series.push(image);
    }

    let descriptor = source.to_descriptor_string();
    destination.format = ctx
        .formats()
        .identify(&descriptor)
        .map(|f| f.name.to_string());
    destination.source_name = Some(descriptor);
    destination.series = series;
    Ok(())
}

fn same_geometry(a: &CanonicalImageMetadata, b: &CanonicalImageMetadata) -> bool {
    a.dimension_order() == b.dimension_order()
        && AxisType::ALL.iter().all(|axis| a.size(*axis) == b.size(*axis))
        && a.pixel_type == b.pixel_type
        && a.samples_per_pixel == b.samples_per_pixel
}

/// Calibration in the descriptor's fixed unit, if it can be expressed
fn calibration(
    image: &CanonicalImageMetadata,
    axis: AxisType,
    field: &str,
    ctx: &mut TranslationContext<'_>,
) -> Option<f64> {
    let axis_ref = image.axis(axis)?;
    let value = axis_ref.calibration?;
    let base = if axis == AxisType::Time { SECOND } else { MICROMETER };
    let object = image.name.as_deref().unwrap_or("series");

    let Some(scale) = unit_scale(axis_ref.unit.as_deref(), base) else {
        let unit = axis_ref.unit.as_deref().unwrap_or_default();
        ctx.warn(PartialFieldError::new(object, field, unit, "unsupported unit"));
        return None;
    };
    let scaled = value * scale;
    let valid = scaled.is_finite() && (scaled > 0.0 || (axis == AxisType::Time && scaled == 0.0));
    if !valid {
        ctx.warn(PartialFieldError::new(object, field, &value.to_string(), "out of range"));
        return None;
    }
    Some(scaled)
}

pub(super) fn from_canonical(
    source: &CanonicalMetadata,
    destination: &mut SyntheticDescriptor,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    let first = source.series.first().ok_or_else(|| TranslationError::MissingField {
        object: "CanonicalMetadata".to_string(),
        field: "series".to_string(),
    })?;
    first.validate()?;

    for (index, other) in source.series.iter().enumerate().skip(1) {
        if !same_geometry(first, other) {
            ctx.warn(PartialFieldError::new(
                &format!("series {}", index),
                "geometry",
                &other.dimension_order(),
                "descriptors repeat the first series",
            ));
        }
    }

    let count = source.series.len();
    let name = match &first.name {
        Some(name) if count > 1 => name.strip_suffix(" #1").unwrap_or(name).to_string(),
        Some(name) => name.clone(),
        None => match &source.source_name {
            Some(source_name) => ctx.formats().base_name(source_name).to_string(),
            None => SyntheticDescriptor::default().name,
        },
    };

    *destination = SyntheticDescriptor {
        name,
        size_x: first.size(AxisType::X),
        size_y: first.size(AxisType::Y),
        size_z: first.size(AxisType::Z),
        size_c: first.size(AxisType::Channel),
        size_t: first.size(AxisType::Time),
        pixel_type: first.pixel_type,
        dimension_order: first.dimension_order(),
        rgb: first.samples_per_pixel,
        indexed: first.indexed,
        little_endian: first.little_endian,
        interleaved: first.interleaved,
        series: u32::try_from(count).unwrap_or(u32::MAX),
        physical_size_x: calibration(first, AxisType::X, "physicalSizeX", ctx),
        physical_size_y: calibration(first, AxisType::Y, "physicalSizeY", ctx),
        physical_size_z: calibration(first, AxisType::Z, "physicalSizeZ", ctx),
        time_increment: calibration(first, AxisType::Time, "timeIncrement", ctx),
        acquisition_date: first.acquisition_date.clone(),
    };
    Ok(())
}
