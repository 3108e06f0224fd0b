//! Mathematical utilities for the partition pass

/// Euclidean and density-weighted distance metrics
pub mod distance;
