//! Boundary pixel detection and greedy raster tracing into polylines
//!
//! A pixel lies on a boundary when any in-bounds 8-neighbour belongs to a
//! different site. Boundary pixels are then linked greedily: each path
//! prefers to continue straight and never turns back against its previous
//! step. The result is a heuristic raster trace, not an exact reconstruction
//! of the Voronoi edges.

use crate::algorithm::partition::AssignmentMap;
use crate::io::configuration::{
    MAX_BOUNDARY_PATH_LENGTH, MAX_BOUNDARY_PATHS, MIN_BOUNDARY_PATH_LENGTH,
};
use crate::spatial::geometry::{Direction, NEIGHBOR_DIRECTIONS, Pixel};
use crate::spatial::mask::BoundaryMask;

/// One traced polyline of 8-connected pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryPath {
    points: Vec<Pixel>,
}

impl BoundaryPath {
    /// Pixels of the path in trace order
    pub fn points(&self) -> &[Pixel] {
        &self.points
    }

    /// Number of pixels in the path
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a path without pixels
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Take ownership of the pixel buffer
    pub fn into_points(self) -> Vec<Pixel> {
        self.points
    }
}

/// Length bounds applied while tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLimits {
    /// Paths shorter than this are discarded
    pub min_path_length: usize,
    /// A path stops growing at this many pixels
    pub max_path_length: usize,
    /// Tracing stops once this many paths are retained
    pub max_paths: usize,
}

impl Default for TraceLimits {
    fn default() -> Self {
        Self {
            min_path_length: MIN_BOUNDARY_PATH_LENGTH,
            max_path_length: MAX_BOUNDARY_PATH_LENGTH,
            max_paths: MAX_BOUNDARY_PATHS,
        }
    }
}

/// Mark every pixel that has an 8-neighbour assigned to another site
pub fn detect_boundaries(assignment: &AssignmentMap) -> BoundaryMask {
    let (width, height) = (assignment.width(), assignment.height());
    let mut mask = BoundaryMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let pixel = Pixel::new(x, y);
            let Some(owner) = assignment.site_at(pixel) else {
                continue;
            };
            let on_boundary = pixel
                .neighbors(width, height)
                .any(|neighbor| assignment.site_at(neighbor) != Some(owner));
            if on_boundary {
                mask.activate(pixel);
            }
        }
    }

    mask
}

/// Greedy tracer linking boundary pixels into polylines
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryTracer {
    limits: TraceLimits,
}

impl BoundaryTracer {
    /// Create a tracer with the given limits
    pub const fn new(limits: TraceLimits) -> Self {
        Self { limits }
    }

    /// Limits applied by this tracer
    pub const fn limits(&self) -> TraceLimits {
        self.limits
    }

    /// Detect and trace the boundaries of an assignment map
    pub fn trace_assignment(&self, assignment: &AssignmentMap) -> Vec<BoundaryPath> {
        let mut mask = detect_boundaries(assignment);
        self.trace(&mut mask)
    }

    /// Trace all active pixels of `mask`, consuming them
    ///
    /// Start pixels are taken in row-major order. Pixels belonging to traces
    /// shorter than the minimum length are consumed but not returned.
    pub fn trace(&self, mask: &mut BoundaryMask) -> Vec<BoundaryPath> {
        let mut paths = Vec::new();

        for start in mask.active_pixels() {
            if paths.len() >= self.limits.max_paths {
                break;
            }
            // Pixels may have been consumed by an earlier path
            if !mask.is_active(start) {
                continue;
            }

            let points = self.follow(mask, start);
            if points.len() >= self.limits.min_path_length {
                paths.push(BoundaryPath { points });
            }
        }

        paths
    }

    fn follow(&self, mask: &mut BoundaryMask, start: Pixel) -> Vec<Pixel> {
        let (width, height) = (mask.width(), mask.height());
        let mut points = vec![start];
        mask.consume(start);

        let mut current = start;
        let mut last_step: Option<Direction> = None;

        while points.len() < self.limits.max_path_length {
            let Some((direction, next)) = best_step(mask, current, last_step, width, height)
            else {
                break;
            };

            mask.consume(next);
            points.push(next);
            current = next;
            last_step = Some(direction);
        }

        points
    }
}

// Highest dot product with the previous step wins; negative scores are never
// taken and the first step scores every neighbour 0
fn best_step(
    mask: &BoundaryMask,
    current: Pixel,
    last_step: Option<Direction>,
    width: usize,
    height: usize,
) -> Option<(Direction, Pixel)> {
    let mut best: Option<(i32, Direction, Pixel)> = None;

    for direction in NEIGHBOR_DIRECTIONS {
        let Some(next) = current.step(direction, width, height) else {
            continue;
        };
        if !mask.is_active(next) {
            continue;
        }

        let score = last_step.map_or(0, |last| last.dot(direction));
        if score < 0 {
            continue;
        }
        if best.is_none_or(|(best_score, _, _)| score > best_score) {
            best = Some((score, direction, next));
        }
    }

    best.map(|(_, direction, next)| (direction, next))
}
