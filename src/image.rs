//! Image metadata supplied at session start.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DISK_RADIUS_RATIO, RING_INNER_RATIO, RING_OUTER_RATIO};
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("image metadata has a zero dimension (scan {scan_width}x{scan_height}, image {image_width}x{image_height})")]
    ZeroDimension { scan_height: u32, scan_width: u32, image_height: u32, image_width: u32 },
}

/// Dimensions of the scan grid and of each detector frame.
///
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub scan_height: u32,
    pub scan_width: u32,
    pub image_height: u32,
    pub image_width: u32,
}

impl ImageMeta {
    /// Validate and build metadata. Every dimension must be positive.
    pub fn new(scan_height: u32, scan_width: u32, image_height: u32, image_width: u32) -> Result<Self, ImageError> {
        let meta = Self { scan_height, scan_width, image_height, image_width };
        meta.validate()?;
        Ok(meta)
    }

    /// Build from a dataset shape `[scan_height, scan_width, image_height, image_width]`.
    pub fn from_shape(shape: [u32; 4]) -> Result<Self, ImageError> {
        let [scan_height, scan_width, image_height, image_width] = shape;
        Self::new(scan_height, scan_width, image_height, image_width)
    }

    /// Reject zero dimensions; deserialized metadata skips the constructor.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.scan_height == 0 || self.scan_width == 0 || self.image_height == 0 || self.image_width == 0 {
            return Err(ImageError::ZeroDimension {
                scan_height: self.scan_height,
                scan_width: self.scan_width,
                image_height: self.image_height,
                image_width: self.image_width,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        f64::from(self.image_width)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        f64::from(self.image_height)
    }

    /// The smaller of the frame width and height.
    #[must_use]
    pub fn min_dimension(&self) -> f64 {
        self.width().min(self.height())
    }

    /// Center of the detector frame.
    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.width() / 2.0, y: self.height() / 2.0 }
    }

    #[must_use]
    pub fn default_ring_inner(&self) -> f64 {
        self.min_dimension() * RING_INNER_RATIO
    }

    #[must_use]
    pub fn default_ring_outer(&self) -> f64 {
        self.min_dimension() * RING_OUTER_RATIO
    }

    #[must_use]
    pub fn default_disk_radius(&self) -> f64 {
        self.min_dimension() * DISK_RADIUS_RATIO
    }
}
