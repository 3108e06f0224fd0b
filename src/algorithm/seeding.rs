//! First-generation site placement

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::density::DensityField;
use crate::spatial::geometry::Point;

/// Place `count` sites uniformly at random over the field's area
///
/// The same seed always yields the same sites.
///
/// # Errors
///
/// Returns an error if `count` is zero
pub fn initial_sites(field: &DensityField, count: usize, seed: u64) -> Result<Vec<Point>> {
    if count == 0 {
        return Err(invalid_parameter(
            "initial_sites",
            &count,
            &"at least one site is required",
        ));
    }

    let width = field.width() as f64;
    let height = field.height() as f64;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok((0..count)
        .map(|_| Point::new(rng.random::<f64>() * width, rng.random::<f64>() * height))
        .collect())
}
