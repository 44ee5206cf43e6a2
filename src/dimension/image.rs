use serde::{Deserialize, Serialize};

use super::{
    canonicalize_dimension_order, Axis, AxisType, DimensionError, PixelType,
    DEFAULT_DIMENSION_ORDER,
};

/// Axis-based description of one image series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalImageMetadata {
    /// Series name, if the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Axes in dimension order
    pub axes: Vec<Axis>,
    /// Sample storage type
    pub pixel_type: PixelType,
    /// Byte order of multi-byte samples
    pub little_endian: bool,
    /// Samples stored per pixel (3 for packed RGB)
    pub samples_per_pixel: u32,
    /// Samples of one pixel are stored contiguously
    pub interleaved: bool,
    /// Pixel values are indices into a lookup table
    pub indexed: bool,
    /// ISO 8601 acquisition timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<String>,
}

impl Default for CanonicalImageMetadata {
    fn default() -> Self {
        Self {
            name: None,
            axes: axes_for(DEFAULT_DIMENSION_ORDER, [1, 1, 1, 1, 1]),
            pixel_type: PixelType::default(),
            little_endian: true,
            samples_per_pixel: 1,
            interleaved: false,
            indexed: false,
            acquisition_date: None,
        }
    }
}

/// Build axes for a canonical order from sizes given in XYZCT order
fn axes_for(order: &str, sizes: [u32; 5]) -> Vec<Axis> {
    order
        .chars()
        .filter_map(AxisType::from_letter)
        .map(|axis| {
            let index = AxisType::ALL
                .iter()
                .position(|a| *a == axis)
                .unwrap_or_default();
            Axis::new(axis, sizes[index])
        })
        .collect()
}

impl CanonicalImageMetadata {
    /// Build a series from sizes given in `X, Y, Z, C, T` order.
    ///
    /// `order` is canonicalized first, so any raw string is accepted.
    pub fn from_sizes(
        order: &str,
        sizes: [u32; 5],
        pixel_type: PixelType,
        samples_per_pixel: u32,
    ) -> Result<Self, DimensionError> {
        let order = canonicalize_dimension_order(order);
        let image = Self {
            axes: axes_for(&order, sizes),
            pixel_type,
            samples_per_pixel,
            ..Default::default()
        };
        image.validate()?;
        Ok(image)
    }

    /// Check every dimension invariant
    pub fn validate(&self) -> Result<(), DimensionError> {
        let order = self.dimension_order();
        let complete = order.len() == 5
            && AxisType::ALL
                .iter()
                .all(|a| self.axes.iter().filter(|x| x.axis_type == *a).count() == 1);
        if !complete {
            return Err(DimensionError::InvalidDimensionOrder(order));
        }

        if let Some(axis) = self.axes.iter().find(|a| a.length == 0) {
            return Err(DimensionError::InvalidAxisLength {
                axis: axis.axis_type,
                length: axis.length,
            });
        }

        let total = self.size(AxisType::Channel);
        if self.samples_per_pixel == 0 || total % self.samples_per_pixel != 0 {
            return Err(DimensionError::ChannelMismatch {
                total,
                samples_per_pixel: self.samples_per_pixel,
            });
        }
        Ok(())
    }

    /// Dimension order string, one letter per axis
    pub fn dimension_order(&self) -> String {
        self.axes.iter().map(|a| a.axis_type.letter()).collect()
    }

    /// Reorder axes according to `order` (canonicalized first)
    pub fn set_dimension_order(&mut self, order: &str) {
        let order = canonicalize_dimension_order(order);
        let mut reordered = Vec::with_capacity(5);
        for axis_type in order.chars().filter_map(AxisType::from_letter) {
            match self.axes.iter().find(|a| a.axis_type == axis_type) {
                Some(axis) => reordered.push(axis.clone()),
                None => reordered.push(Axis::new(axis_type, 1)),
            }
        }
        self.axes = reordered;
    }

    /// Axis of the given type
    pub fn axis(&self, axis_type: AxisType) -> Option<&Axis> {
        self.axes.iter().find(|a| a.axis_type == axis_type)
    }

    /// Mutable axis of the given type
    pub fn axis_mut(&mut self, axis_type: AxisType) -> Option<&mut Axis> {
        self.axes.iter_mut().find(|a| a.axis_type == axis_type)
    }

    /// Length of an axis; 1 when the axis is absent
    pub fn size(&self, axis_type: AxisType) -> u32 {
        self.axis(axis_type).map_or(1, |a| a.length)
    }

    /// Calibration of an axis; 1.0 when unknown
    pub fn calibration(&self, axis_type: AxisType) -> f64 {
        self.axis(axis_type).map_or(1.0, Axis::calibration_or_default)
    }

    /// Set or clear an axis calibration
    pub fn set_calibration(&mut self, axis_type: AxisType, value: Option<f64>, unit: Option<&str>) {
        if let Some(axis) = self.axis_mut(axis_type) {
            axis.calibration = value;
            axis.unit = value.and(unit).map(str::to_string);
        }
    }

    /// Channels per plane once RGB samples are folded together
    pub fn effective_channel_count(&self) -> u32 {
        let total = self.size(AxisType::Channel);
        if self.samples_per_pixel == 0 {
            return total;
        }
        total / self.samples_per_pixel
    }

    /// True when pixels carry more than one sample
    pub fn is_rgb(&self) -> bool {
        self.samples_per_pixel > 1
    }

    /// Number of planes: the product of the non-planar axis lengths, with
    /// the channel axis counted by its effective channel count
    pub fn plane_count(&self) -> u64 {
        self.axes
            .iter()
            .filter(|a| !a.axis_type.is_planar())
            .map(|a| match a.axis_type {
                AxisType::Channel => u64::from(self.effective_channel_count()),
                _ => u64::from(a.length),
            })
            .product()
    }
}
