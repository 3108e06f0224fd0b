//! Density-weighted Voronoi partition of a raster
//!
//! Every pixel is assigned to its nearest site under
//! `euclidean(pixel, site) * density(pixel)` by a brute-force scan over all
//! sites, so a pass costs `O(width * height * sites)`. Assigned pixels are
//! accumulated into one [`Cell`] per site.

use ndarray::Array2;

use crate::io::error::{Result, invalid_geometry, reserve_buffer};
use crate::math::distance::nearest_site;
use crate::spatial::density::DensityField;
use crate::spatial::geometry::{Pixel, Point};

/// Per-site statistics from one partition pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pixel_count: usize,
    mass: f64,
    weighted_x: f64,
    weighted_y: f64,
}

impl Cell {
    /// Add one pixel and its density to the accumulators
    pub const fn accumulate(&mut self, pixel: Pixel, density: f64) {
        self.pixel_count += 1;
        self.mass += density;
        self.weighted_x += pixel.x as f64 * density;
        self.weighted_y += pixel.y as f64 * density;
    }

    /// Number of pixels assigned to the site
    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Sum of the densities of the assigned pixels
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// True when no pixel was assigned to the site
    pub const fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    /// Density-weighted centroid
    ///
    /// `None` when the mass is zero, in which case the centroid is undefined.
    pub fn centroid(&self) -> Option<Point> {
        (self.mass > 0.0)
            .then(|| Point::new(self.weighted_x / self.mass, self.weighted_y / self.mass))
    }

    /// Mean density of the assigned pixels, `None` for an empty cell
    pub fn mean_density(&self) -> Option<f64> {
        (self.pixel_count > 0).then(|| self.mass / self.pixel_count as f64)
    }
}

/// Nearest-site index for every pixel of one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMap {
    sites: Array2<usize>,
}

impl AssignmentMap {
    /// Build a map from a row-major buffer of site indices
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length differs from `width * height`
    /// or either dimension is zero
    pub fn from_indices(width: usize, height: usize, indices: Vec<usize>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_geometry(&format!(
                "assignment map must have positive dimensions, got {width}x{height}"
            )));
        }
        let sites = Array2::from_shape_vec((height, width), indices)
            .map_err(|e| invalid_geometry(&e))?;
        Ok(Self { sites })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.sites.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.sites.nrows()
    }

    /// Site index owning a pixel, or `None` outside the map
    pub fn site_at(&self, pixel: Pixel) -> Option<usize> {
        self.sites.get((pixel.y, pixel.x)).copied()
    }

    /// Count of pixels assigned to each of `site_count` sites
    pub fn histogram(&self, site_count: usize) -> Vec<usize> {
        let mut counts = vec![0; site_count];
        for &site in &self.sites {
            if let Some(count) = counts.get_mut(site) {
                *count += 1;
            }
        }
        counts
    }
}

/// Result of one partition pass: one cell per site plus the assignment map
#[derive(Debug, Clone)]
pub struct Partition {
    cells: Vec<Cell>,
    assignment: AssignmentMap,
}

impl Partition {
    /// Partition `field` among `sites`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sites` is empty
    /// - Storage for the cells or the assignment map cannot be reserved
    pub fn compute(field: &DensityField, sites: &[Point]) -> Result<Self> {
        if sites.is_empty() {
            return Err(invalid_geometry(&"cannot partition with an empty site set"));
        }

        let mut cells = reserve_buffer("cell accumulators", sites.len())?;
        cells.resize(sites.len(), Cell::default());

        let mut indices = reserve_buffer("assignment map", field.pixel_count())?;

        for (pixel, density) in field.pixels() {
            let nearest = nearest_site(Point::from(pixel), density, sites).unwrap_or(0);
            indices.push(nearest);
            if let Some(cell) = cells.get_mut(nearest) {
                cell.accumulate(pixel, density);
            }
        }

        let assignment = AssignmentMap::from_indices(field.width(), field.height(), indices)?;

        Ok(Self { cells, assignment })
    }

    /// Cells in site order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Per-pixel nearest-site indices
    pub const fn assignment(&self) -> &AssignmentMap {
        &self.assignment
    }

    /// Total number of pixels accounted for by all cells
    pub fn assigned_pixels(&self) -> usize {
        self.cells.iter().map(Cell::pixel_count).sum()
    }

    /// Split into cells and assignment map
    pub fn into_parts(self) -> (Vec<Cell>, AssignmentMap) {
        (self.cells, self.assignment)
    }
}
