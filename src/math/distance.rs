//! Distance metrics used by nearest-site search

use crate::spatial::geometry::Point;

/// Euclidean distance between two points
pub fn euclidean(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Euclidean distance from `pixel` to `site`, scaled by the density at `pixel`
///
/// The density of the query pixel, not of the site, is the multiplier, so a
/// pixel of zero density is at distance zero from every site.
pub fn weighted_distance(pixel: Point, pixel_density: f64, site: Point) -> f64 {
    euclidean(pixel, site) * pixel_density
}

/// Index of the site nearest to `pixel` under [`weighted_distance`]
///
/// Uses a strict comparison, so the first site wins exact ties. Returns
/// `None` only for an empty site slice.
pub fn nearest_site(pixel: Point, pixel_density: f64, sites: &[Point]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &site) in sites.iter().enumerate() {
        let distance = weighted_distance(pixel, pixel_density, site);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}
