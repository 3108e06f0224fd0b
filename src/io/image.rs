//! Image decoding into a density field

use image::{DynamicImage, ImageBuffer, Luma};
use std::path::Path;

use crate::io::error::{Result, StippleError};
use crate::spatial::density::DensityField;

/// Decode an image file and convert it to densities
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has a zero dimension
pub fn load_density_field<P: AsRef<Path>>(path: P) -> Result<DensityField> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| StippleError::ImageLoad {
        path: path_buf,
        source: e,
    })?;

    density_from_image(&img)
}

/// Reduce an image to one channel and map it to `1 - sample / max`
///
/// Samples are widened to 16 bits first, so 8-bit sources map exactly to
/// `1 - sample / 255`.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension
pub fn density_from_image(img: &DynamicImage) -> Result<DensityField> {
    density_from_luma(&img.to_luma16())
}

/// Convert a 16-bit single-channel buffer to densities
///
/// # Errors
///
/// Returns an error if the buffer has a zero dimension
pub fn density_from_luma(luma: &ImageBuffer<Luma<u16>, Vec<u16>>) -> Result<DensityField> {
    let max_sample = f64::from(u16::MAX);
    let values = luma
        .pixels()
        .map(|&Luma([sample])| 1.0 - f64::from(sample) / max_sample)
        .collect();

    DensityField::from_densities(luma.width() as usize, luma.height() as usize, values)
}
