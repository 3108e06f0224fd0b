//! Refinement constants and runtime configuration defaults

// Density-mass bounds for a single stipple
/// Default lower threshold: cells with less mass than this are dropped
pub const DEFAULT_LOWER_THRESHOLD: f64 = 300.0;
/// Default upper threshold: cells with more mass than this are split
pub const DEFAULT_UPPER_THRESHOLD: f64 = 500.0;

/// Number of sites a split cell is replaced with
pub const SPLIT_COUNT: usize = 2;
/// Horizontal offset of split sites from the parent centroid
pub const SPLIT_OFFSET: f64 = 0.01;

// Seeding
/// Number of sites in the first generation
pub const DEFAULT_INITIAL_SITES: usize = 10;
/// Fixed seed for reproducible initial placement
pub const DEFAULT_SEED: u64 = 42;

/// Default refinement iteration cap (0 disables the cap)
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

// Boundary tracing limits
/// Traces shorter than this are discarded as noise
pub const MIN_BOUNDARY_PATH_LENGTH: usize = 5;
/// Maximum number of pixels in one traced path
pub const MAX_BOUNDARY_PATH_LENGTH: usize = 100_000;
/// Maximum number of paths retained per pass
pub const MAX_BOUNDARY_PATHS: usize = 100_000;

// Document rendering
/// Stipple radius multiplier applied to the mean cell density
pub const STIPPLE_RADIUS_SCALE: f64 = 4.0;
/// Fill colour of stipple circles
pub const STIPPLE_FILL: &str = "black";
/// Stroke colour of boundary polylines
pub const BOUNDARY_STROKE: &str = "red";
/// Stroke width of boundary polylines
pub const BOUNDARY_STROKE_WIDTH: f64 = 1.0;
/// Opacity of the boundary layer
pub const BOUNDARY_OPACITY: f64 = 0.7;

// Output settings
/// Directory receiving all documents
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Prefix of per-iteration document names
pub const ITERATION_FILE_PREFIX: &str = "iteration_";
/// Name of the document written after refinement stops
pub const FINAL_OUTPUT_NAME: &str = "output_stipples.svg";

/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
