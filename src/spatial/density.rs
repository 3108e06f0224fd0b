//! Immutable per-pixel density grid
//!
//! Densities lie in `[0, 1]`, higher values standing for darker source pixels.
//! The grid is stored row-major as an `(height, width)` array so that
//! `densities[(y, x)]` addresses column `x` of row `y`.

use ndarray::Array2;

use crate::io::error::{Result, invalid_geometry};
use crate::spatial::geometry::Pixel;

/// Grid of density weights derived from an image
#[derive(Debug, Clone, PartialEq)]
pub struct DensityField {
    densities: Array2<f64>,
}

impl DensityField {
    /// Build a field from a row-major density buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The buffer length differs from `width * height`
    /// - A value is not finite or lies outside `[0, 1]`
    pub fn from_densities(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_geometry(&format!(
                "density field must have positive dimensions, got {width}x{height}"
            )));
        }

        let expected = width
            .checked_mul(height)
            .ok_or_else(|| invalid_geometry(&"density field dimensions overflow"))?;
        if values.len() != expected {
            return Err(invalid_geometry(&format!(
                "expected {expected} density values for {width}x{height}, got {}",
                values.len()
            )));
        }

        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|&(_, value)| !(0.0..=1.0).contains(value))
        {
            return Err(invalid_geometry(&format!(
                "density {value} at index {index} is outside [0, 1]"
            )));
        }

        let densities = Array2::from_shape_vec((height, width), values)
            .map_err(|e| invalid_geometry(&e))?;

        Ok(Self { densities })
    }

    /// Build a field where every pixel has the same density
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Self::from_densities`]
    pub fn uniform(width: usize, height: usize, density: f64) -> Result<Self> {
        let count = width.saturating_mul(height);
        Self::from_densities(width, height, vec![density; count])
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.densities.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.densities.nrows()
    }

    /// Number of pixels in the field
    pub fn pixel_count(&self) -> usize {
        self.densities.len()
    }

    /// Density at column `x`, row `y`, or `None` outside the field
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.densities.get((y, x)).copied()
    }

    /// Sum of all densities
    pub fn total_mass(&self) -> f64 {
        self.densities.sum()
    }

    /// Iterate over `(pixel, density)` in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (Pixel, f64)> + '_ {
        self.densities
            .indexed_iter()
            .map(|((y, x), &density)| (Pixel::new(x, y), density))
    }
}
