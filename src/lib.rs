//! Density-weighted Voronoi stippling driven by Linde-Buzo-Gray refinement
//!
//! A grayscale image becomes a density field; sites are repeatedly
//! partitioned over it, and each cell is dropped, split or relaxed to its
//! centroid according to its density mass until no cell changes. Each
//! generation can be rendered as an SVG of stipples and traced cell
//! boundaries.

#![forbid(unsafe_code)]

/// Partitioning, boundary tracing and the refinement loop
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Distance metrics
pub mod math;
/// Density field, point types and raster masks
pub mod spatial;

pub use io::error::{Result, StippleError};
