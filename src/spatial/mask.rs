use bitvec::prelude::*;
use std::fmt;

use crate::spatial::geometry::Pixel;

/// Flat boolean raster marking boundary pixels still available for tracing
///
/// Bits are addressed as `y * width + x`. Tracing consumes the mask: every
/// pixel added to a path, kept or discarded, is cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryMask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl BoundaryMask {
    /// Create a mask with no active pixels
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: bitvec![0; width * height],
            width,
            height,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    const fn index(&self, pixel: Pixel) -> Option<usize> {
        if pixel.x < self.width && pixel.y < self.height {
            Some(pixel.y * self.width + pixel.x)
        } else {
            None
        }
    }

    /// Mark a pixel as active; positions outside the mask are ignored
    pub fn activate(&mut self, pixel: Pixel) {
        if let Some(index) = self.index(pixel) {
            self.bits.set(index, true);
        }
    }

    /// Clear a pixel so it can no longer join a path
    pub fn consume(&mut self, pixel: Pixel) {
        if let Some(index) = self.index(pixel) {
            self.bits.set(index, false);
        }
    }

    /// Test whether a pixel is active
    pub fn is_active(&self, pixel: Pixel) -> bool {
        self.index(pixel)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Number of active pixels
    pub fn active_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no pixel is active
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Active pixels in row-major order
    pub fn active_pixels(&self) -> Vec<Pixel> {
        let width = self.width.max(1);
        self.bits
            .iter_ones()
            .map(|index| Pixel::new(index % width, index / width))
            .collect()
    }
}

impl fmt::Display for BoundaryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundaryMask({}x{}, {} active)",
            self.width,
            self.height,
            self.active_count()
        )
    }
}
