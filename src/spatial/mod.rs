//! Raster and point data structures
//!
//! This module contains spatial-related functionality including:
//! - Site and pixel coordinate types
//! - The immutable density field
//! - The boundary mask consumed by path tracing

/// Immutable per-pixel density grid
pub mod density;
/// Continuous and integer point types with neighbour arithmetic
pub mod geometry;
/// Flat bit raster of boundary pixels
pub mod mask;

pub use density::DensityField;
pub use geometry::{Pixel, Point};
pub use mask::BoundaryMask;
