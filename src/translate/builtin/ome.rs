use super::{MICROMETER, SECOND};
use crate::dimension::{ome_dimension_order, AxisType, CanonicalImageMetadata, CanonicalMetadata};
use crate::ome::{make_id, Channel, IdKind, Image, OmeRoot, Pixels, Quantity};
use crate::translate::{PartialFieldError, TranslationContext, TranslationError};

const FALLBACK_SOURCE: &str = "image";

fn image_to_canonical(
    image: &Image,
    ctx: &mut TranslationContext<'_>,
) -> Result<CanonicalImageMetadata, TranslationError> {
    let pixels = &image.pixels;
    let mut samples_per_pixel = pixels.samples_per_pixel();
    if samples_per_pixel == 0 {
        ctx.warn(PartialFieldError::new(
            &pixels.id,
            "SamplesPerPixel",
            "0",
            "must be positive",
        ));
        samples_per_pixel = 1;
    } else if pixels.size_c % samples_per_pixel != 0 {
        ctx.warn(PartialFieldError::new(
            &pixels.id,
            "SamplesPerPixel",
            &samples_per_pixel.to_string(),
            "does not divide SizeC",
        ));
        samples_per_pixel = 1;
    }

    let mut series = CanonicalImageMetadata::from_sizes(
        &pixels.dimension_order,
        [
            pixels.size_x,
            pixels.size_y,
            pixels.size_z,
            pixels.size_c,
            pixels.size_t,
        ],
        pixels.pixel_type,
        samples_per_pixel,
    )?;
    series.name = image.name.clone();
    series.acquisition_date = image.acquisition_date.clone();
    series.little_endian = !pixels.big_endian.unwrap_or(false);
    series.interleaved = pixels.interleaved.unwrap_or(false);

    let calibrations = [
        (AxisType::X, &pixels.physical_size_x, MICROMETER),
        (AxisType::Y, &pixels.physical_size_y, MICROMETER),
        (AxisType::Z, &pixels.physical_size_z, MICROMETER),
        (AxisType::Time, &pixels.time_increment, SECOND),
    ];
    for (axis, quantity, default_unit) in calibrations {
        if let Some(quantity) = quantity {
            let unit = quantity.unit.as_deref().unwrap_or(default_unit);
            series.set_calibration(axis, Some(quantity.value), Some(unit));
        }
    }
    Ok(series)
}

pub(super) fn to_canonical(
    source: &OmeRoot,
    destination: &mut CanonicalMetadata,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    let series = source
        .images
        .iter()
        .map(|image| image_to_canonical(image, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    if destination.format.is_none() {
        destination.format = Some("OME-XML".to_string());
    }
    destination.series = series;
    Ok(())
}

/// Calibration of `axis` as a quantity, skipping values the schema rejects
fn quantity(
    series: &CanonicalImageMetadata,
    axis: AxisType,
    object: &str,
    field: &str,
    ctx: &mut TranslationContext<'_>,
) -> Option<Quantity> {
    let axis_ref = series.axis(axis)?;
    let value = axis_ref.calibration?;
    let valid = match axis {
        AxisType::Time => value.is_finite() && value >= 0.0,
        _ => value.is_finite() && value > 0.0,
    };
    if !valid {
        ctx.warn(PartialFieldError::new(object, field, &value.to_string(), "out of range"));
        return None;
    }
    let default_unit = if axis == AxisType::Time { SECOND } else { MICROMETER };
    Some(Quantity::new(
        value,
        Some(axis_ref.unit.as_deref().unwrap_or(default_unit)),
    ))
}

fn canonical_to_image(
    series: &CanonicalImageMetadata,
    index: usize,
    count: usize,
    source_name: &str,
    ctx: &mut TranslationContext<'_>,
) -> Image {
    let pixels_id = make_id(IdKind::Pixels, &[index]);
    let channels = (0..series.effective_channel_count() as usize)
        .map(|c| Channel {
            id: make_id(IdKind::Channel, &[index, c]),
            samples_per_pixel: Some(series.samples_per_pixel),
            ..Default::default()
        })
        .collect();
    let name = match &series.name {
        Some(name) => name.clone(),
        None => ctx.formats().default_image_name(source_name, index, count),
    };

    let pixels = Pixels {
        dimension_order: ome_dimension_order(&series.dimension_order()),
        pixel_type: series.pixel_type,
        significant_bits: Some(series.pixel_type.bits()),
        big_endian: Some(!series.little_endian),
        interleaved: Some(series.interleaved),
        size_x: series.size(AxisType::X),
        size_y: series.size(AxisType::Y),
        size_z: series.size(AxisType::Z),
        size_c: series.size(AxisType::Channel),
        size_t: series.size(AxisType::Time),
        physical_size_x: quantity(series, AxisType::X, &pixels_id, "PhysicalSizeX", ctx),
        physical_size_y: quantity(series, AxisType::Y, &pixels_id, "PhysicalSizeY", ctx),
        physical_size_z: quantity(series, AxisType::Z, &pixels_id, "PhysicalSizeZ", ctx),
        time_increment: quantity(series, AxisType::Time, &pixels_id, "TimeIncrement", ctx),
        channels,
        planes: Vec::new(),
        id: pixels_id,
    };

    Image {
        id: make_id(IdKind::Image, &[index]),
        name: Some(name),
        acquisition_date: series.acquisition_date.clone(),
        pixels,
        ..Default::default()
    }
}

pub(super) fn from_canonical(
    source: &CanonicalMetadata,
    destination: &mut OmeRoot,
    ctx: &mut TranslationContext<'_>,
) -> Result<(), TranslationError> {
    source.validate()?;
    let count = source.series.len();
    let source_name = source.source_name.as_deref().unwrap_or(FALLBACK_SOURCE);
    destination.images = source
        .series
        .iter()
        .enumerate()
        .map(|(index, series)| canonical_to_image(series, index, count, source_name, ctx))
        .collect();
    Ok(())
}
