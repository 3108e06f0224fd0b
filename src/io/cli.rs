//! Command-line interface and the stippling run it drives

use crate::algorithm::boundary::BoundaryTracer;
use crate::algorithm::refiner::{LbgRefiner, RefinementConfig, RefinementOutcome, Thresholds};
use crate::algorithm::seeding::initial_sites;
use crate::io::configuration::{
    DEFAULT_INITIAL_SITES, DEFAULT_LOWER_THRESHOLD, DEFAULT_MAX_ITERATIONS, DEFAULT_OUTPUT_DIR,
    DEFAULT_SEED, DEFAULT_UPPER_THRESHOLD, FINAL_OUTPUT_NAME, ITERATION_FILE_PREFIX,
};
use crate::io::document::export_document;
use crate::io::error::Result;
use crate::io::image::load_density_field;
use crate::io::progress::RefinementProgress;
use clap::Parser;
use log::{LevelFilter, debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lbgstipple")]
#[command(
    author,
    version,
    about = "Stipple an image with density-weighted Voronoi LBG refinement"
)]
/// Command-line arguments for the stippling tool
// Output and verbosity switches are independent user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image; darker pixels attract more stipples
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Directory receiving the SVG documents
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Cells with less density mass than this are dropped
    #[arg(short, long, default_value_t = DEFAULT_LOWER_THRESHOLD)]
    pub lower_threshold: f64,

    /// Cells with more density mass than this are split in two
    #[arg(short, long, default_value_t = DEFAULT_UPPER_THRESHOLD)]
    pub upper_threshold: f64,

    /// Number of randomly placed sites in the first generation
    #[arg(short = 'n', long, default_value_t = DEFAULT_INITIAL_SITES)]
    pub initial_sites: usize,

    /// Random seed for initial site placement
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum refinement iterations (0 runs until convergence)
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Write only the final document, not one per iteration
    #[arg(long)]
    pub final_only: bool,

    /// Omit the traced cell boundaries from documents
    #[arg(long)]
    pub no_boundaries: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report per-cell and per-stipple detail
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Iteration cap, `None` when disabled
    pub const fn iteration_cap(&self) -> Option<usize> {
        if self.max_iterations == 0 {
            None
        } else {
            Some(self.max_iterations)
        }
    }

    /// Validated refinement configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the thresholds are invalid
    pub fn refinement_config(&self) -> Result<RefinementConfig> {
        Ok(RefinementConfig {
            thresholds: Thresholds::new(self.lower_threshold, self.upper_threshold)?,
            max_iterations: self.iteration_cap(),
        })
    }

    /// Path of the document written after iteration `iteration`
    pub fn iteration_path(&self, iteration: usize) -> PathBuf {
        self.output_dir.join(format!("{ITERATION_FILE_PREFIX}{iteration}.svg"))
    }

    /// Path of the document written after refinement stops
    pub fn final_path(&self) -> PathBuf {
        self.output_dir.join(FINAL_OUTPUT_NAME)
    }
}

/// Loads the image, runs refinement and writes the documents
pub struct StippleRunner {
    cli: Cli,
    tracer: BoundaryTracer,
}

impl StippleRunner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            tracer: BoundaryTracer::default(),
        }
    }

    /// Stipple the image and write all documents
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded, the configuration is
    /// invalid, a partition pass fails, or a document cannot be written
    pub fn process(&self) -> Result<RefinementOutcome> {
        let start_time = Instant::now();
        let config = self.cli.refinement_config()?;
        let field = load_density_field(&self.cli.image)?;

        info!(
            "Loaded {} ({}x{}, total mass {:.1})",
            self.cli.image.display(),
            field.width(),
            field.height(),
            field.total_mass()
        );

        let sites = initial_sites(&field, self.cli.initial_sites, self.cli.seed)?;
        info!("Initialized {} sites", sites.len());

        let mut refiner = LbgRefiner::new(&field, sites, config)?;
        let progress = self
            .cli
            .should_show_progress()
            .then(|| RefinementProgress::new(&self.cli.image, config.max_iterations));

        while refiner.should_continue() {
            let report = suspended(progress.as_ref(), || refiner.step())?;

            if let Some(progress) = &progress {
                progress.update(&report);
            }

            if !self.cli.final_only {
                let path = self.cli.iteration_path(report.iteration);
                suspended(progress.as_ref(), || self.export_current(&mut refiner, &path))?;
            }
        }

        let final_path = self.cli.final_path();
        suspended(progress.as_ref(), || self.export_current(&mut refiner, &final_path))?;
        let outcome = suspended(progress.as_ref(), || refiner.finish());

        if let Some(progress) = &progress {
            progress.finish(outcome.state, outcome.sites.len());
        }

        info!(
            "Generated {} stipples in {} iterations ({:.2?})",
            outcome.sites.len(),
            outcome.iterations,
            start_time.elapsed()
        );
        for site in &outcome.sites {
            debug!("  {:.4}, {:.4}", site.x, site.y);
        }

        Ok(outcome)
    }

    fn export_current(&self, refiner: &mut LbgRefiner<'_>, path: &Path) -> Result<()> {
        let (width, height) = (refiner.field().width(), refiner.field().height());
        let partition = refiner.current_partition()?;

        let paths = if self.cli.no_boundaries {
            Vec::new()
        } else {
            self.tracer.trace_assignment(partition.assignment())
        };

        let summary = export_document(path, width, height, partition.cells(), &paths)?;
        info!(
            "Wrote {} ({} stipples, {} boundary paths, {} skipped)",
            path.display(),
            summary.stipples,
            summary.paths,
            summary.skipped
        );

        Ok(())
    }
}

// Log lines emitted while the bar is drawn would tear it
fn suspended<R>(progress: Option<&RefinementProgress>, f: impl FnOnce() -> R) -> R {
    match progress {
        Some(progress) => progress.suspend(f),
        None => f(),
    }
}
