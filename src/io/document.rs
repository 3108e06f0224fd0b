//! Vector document rendering of stipples and cell boundaries

use log::{debug, warn};
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Group, Polyline};

use crate::algorithm::boundary::BoundaryPath;
use crate::algorithm::partition::Cell;
use crate::io::configuration::{
    BOUNDARY_OPACITY, BOUNDARY_STROKE, BOUNDARY_STROKE_WIDTH, STIPPLE_FILL, STIPPLE_RADIUS_SCALE,
};
use crate::io::error::{Result, StippleError};

/// Counts of what a rendered document contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Polylines drawn
    pub paths: usize,
    /// Circles drawn
    pub stipples: usize,
    /// Cells skipped for having no centroid or lying off the canvas
    pub skipped: usize,
}

/// Build a document of `width x height` with a boundary layer and one
/// circle per cell
///
/// Circles sit at the cell centroid with radius proportional to the mean
/// density of the cell. Cells without a centroid, and centroids outside the
/// canvas, are skipped.
pub fn render_document(
    width: usize,
    height: usize,
    cells: &[Cell],
    paths: &[BoundaryPath],
) -> (Document, RenderSummary) {
    let mut summary = RenderSummary::default();

    let mut boundaries = Group::new()
        .set("id", "boundaries")
        .set("stroke", BOUNDARY_STROKE)
        .set("stroke-width", BOUNDARY_STROKE_WIDTH)
        .set("fill", "none")
        .set("opacity", BOUNDARY_OPACITY);

    for path in paths.iter().filter(|path| path.len() >= 2) {
        boundaries = boundaries.add(Polyline::new().set("points", polyline_points(path)));
        summary.paths += 1;
    }

    let mut stipples = Group::new()
        .set("id", "stipples")
        .set("fill", STIPPLE_FILL);

    for (index, cell) in cells.iter().enumerate() {
        let (Some(centroid), Some(mean_density)) = (cell.centroid(), cell.mean_density()) else {
            debug!("Skipping cell {index}: no density mass");
            summary.skipped += 1;
            continue;
        };

        if !centroid.is_within(width, height) {
            warn!(
                "Invalid stipple point coordinates: ({:.2}, {:.2})",
                centroid.x, centroid.y
            );
            summary.skipped += 1;
            continue;
        }

        stipples = stipples.add(
            Circle::new()
                .set("cx", round2(centroid.x))
                .set("cy", round2(centroid.y))
                .set("r", round2(STIPPLE_RADIUS_SCALE * mean_density)),
        );
        summary.stipples += 1;
    }

    let document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height))
        .add(boundaries)
        .add(stipples);

    (document, summary)
}

/// Write a document, creating the parent directory if needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The document cannot be written
pub fn save_document(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StippleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    svg::save(path, document).map_err(|e| StippleError::SvgExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Render and write a document in one call
///
/// # Errors
///
/// Returns an error if the document cannot be written
pub fn export_document(
    path: &Path,
    width: usize,
    height: usize,
    cells: &[Cell],
    paths: &[BoundaryPath],
) -> Result<RenderSummary> {
    let (document, summary) = render_document(width, height, cells, paths);
    save_document(path, &document)?;
    Ok(summary)
}

fn polyline_points(path: &BoundaryPath) -> String {
    path.points()
        .iter()
        .map(|pixel| format!("{:.2},{:.2}", pixel.x as f64, pixel.y as f64))
        .collect::<Vec<_>>()
        .join(" ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
