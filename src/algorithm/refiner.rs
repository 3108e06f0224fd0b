//! Linde-Buzo-Gray refinement of the site set
//!
//! Each iteration partitions the field among the current sites and rewrites
//! every cell according to its density mass:
//! - below the lower threshold the site is dropped
//! - above the upper threshold it is split into [`SPLIT_COUNT`] sites
//!   offset horizontally from the centroid
//! - otherwise it moves to its centroid (a Lloyd step)
//!
//! Drops and splits count as changes. An iteration with no changes leaves the
//! refiner `Converged`.

use log::{debug, info, warn};

use crate::algorithm::partition::{Cell, Partition};
use crate::io::configuration::{
    DEFAULT_LOWER_THRESHOLD, DEFAULT_MAX_ITERATIONS, DEFAULT_UPPER_THRESHOLD, SPLIT_COUNT,
    SPLIT_OFFSET,
};
use crate::io::error::{Result, invalid_geometry, invalid_parameter};
use crate::spatial::density::DensityField;
use crate::spatial::geometry::Point;

/// Density-mass bounds deciding the fate of each cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Cells with less mass are dropped
    pub lower: f64,
    /// Cells with more mass are split
    pub upper: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_THRESHOLD,
            upper: DEFAULT_UPPER_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Create validated thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or not finite, or if
    /// `lower > upper`
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        let thresholds = Self { lower, upper };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check the bounds
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or not finite, or if
    /// `lower > upper`
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("lower_threshold", self.lower),
            ("upper_threshold", self.upper),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be a finite, non-negative mass",
                ));
            }
        }
        if self.lower > self.upper {
            return Err(invalid_parameter(
                "lower_threshold",
                &self.lower,
                &format!("must not exceed upper threshold {}", self.upper),
            ));
        }
        Ok(())
    }

    /// Decide what happens to the cell of the site at `site`
    ///
    /// Cells without pixels are always dropped. A kept cell of zero mass has
    /// no centroid, so its site stays where it is.
    pub fn classify(&self, cell: &Cell, site: Point) -> CellDecision {
        if cell.is_empty() || cell.mass() < self.lower {
            return CellDecision::Drop;
        }

        let centroid = cell.centroid().unwrap_or(site);
        if cell.mass() > self.upper {
            CellDecision::Split(split_sites(centroid))
        } else {
            CellDecision::Keep(centroid)
        }
    }
}

/// Outcome of the policy for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellDecision {
    /// Remove the site
    Drop,
    /// Replace the site with these sites
    Split([Point; SPLIT_COUNT]),
    /// Move the site to the cell centroid
    Keep(Point),
}

impl CellDecision {
    /// Whether the decision counts as a change
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Keep(_))
    }
}

/// Sites replacing a split cell, offset along the x-axis
pub const fn split_sites(centroid: Point) -> [Point; SPLIT_COUNT] {
    [
        Point::new(centroid.x + SPLIT_OFFSET, centroid.y),
        Point::new(centroid.x - SPLIT_OFFSET, centroid.y),
    ]
}

/// Counts of each decision taken in one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyTally {
    /// Sites removed
    pub dropped: usize,
    /// Sites split
    pub split: usize,
    /// Sites moved to their centroid
    pub kept: usize,
}

impl PolicyTally {
    /// Drops plus splits
    pub const fn changes(&self) -> usize {
        self.dropped + self.split
    }
}

/// Apply the split/keep/drop policy to every cell in site order
///
/// `cells` and `sites` are paired by index, as produced by one partition pass.
pub fn apply_policy(
    cells: &[Cell],
    sites: &[Point],
    thresholds: &Thresholds,
) -> (Vec<Point>, PolicyTally) {
    let mut next_sites = Vec::with_capacity(cells.len());
    let mut tally = PolicyTally::default();

    for (index, (cell, &site)) in cells.iter().zip(sites).enumerate() {
        if index % 10 == 0 {
            debug!(
                "Processing cell {index}/{}, mass: {:.4}",
                cells.len(),
                cell.mass()
            );
        }

        match thresholds.classify(cell, site) {
            CellDecision::Drop => tally.dropped += 1,
            CellDecision::Split(sites) => {
                next_sites.extend(sites);
                tally.split += 1;
            }
            CellDecision::Keep(centroid) => {
                next_sites.push(centroid);
                tally.kept += 1;
            }
        }
    }

    (next_sites, tally)
}

/// Refinement state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementState {
    /// The last iteration changed at least one cell, or none has run yet
    Running,
    /// The last iteration changed no cell
    Converged,
}

/// Refinement parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementConfig {
    /// Mass bounds for dropping and splitting
    pub thresholds: Thresholds,
    /// Safety cap on iterations; `None` runs until convergence
    pub max_iterations: Option<usize>,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
        }
    }
}

/// Summary of one completed iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationReport {
    /// 1-based iteration number
    pub iteration: usize,
    /// Sites before the iteration
    pub sites_before: usize,
    /// Sites after the iteration
    pub sites_after: usize,
    /// Decisions taken
    pub tally: PolicyTally,
    /// State after the iteration
    pub state: RefinementState,
}

impl IterationReport {
    /// Drops plus splits
    pub const fn changes(&self) -> usize {
        self.tally.changes()
    }
}

/// Final result of [`LbgRefiner::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementOutcome {
    /// Site set of the last generation
    pub sites: Vec<Point>,
    /// Iterations performed
    pub iterations: usize,
    /// `Converged`, or `Running` when the iteration cap stopped the loop
    pub state: RefinementState,
}

/// Drives repeated partition and policy passes over one density field
pub struct LbgRefiner<'a> {
    field: &'a DensityField,
    sites: Vec<Point>,
    config: RefinementConfig,
    iteration: usize,
    state: RefinementState,
    /// Partition of the current generation, kept until the next step
    current: Option<Partition>,
}

impl<'a> LbgRefiner<'a> {
    /// Create a refiner starting from `sites`
    ///
    /// # Errors
    ///
    /// Returns an error if the thresholds are invalid or `sites` is empty
    pub fn new(
        field: &'a DensityField,
        sites: Vec<Point>,
        config: RefinementConfig,
    ) -> Result<Self> {
        config.thresholds.validate()?;
        if sites.is_empty() {
            return Err(invalid_geometry(&"refinement needs at least one site"));
        }

        Ok(Self {
            field,
            sites,
            config,
            iteration: 0,
            state: RefinementState::Running,
            current: None,
        })
    }

    /// Current site generation
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    /// Iterations completed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Current state
    pub const fn state(&self) -> RefinementState {
        self.state
    }

    /// Field being stippled
    pub const fn field(&self) -> &'a DensityField {
        self.field
    }

    /// Whether the iteration cap has been reached
    pub fn is_exhausted(&self) -> bool {
        self.config
            .max_iterations
            .is_some_and(|limit| self.iteration >= limit)
    }

    /// Whether another iteration should run: still `Running` and under the cap
    pub fn should_continue(&self) -> bool {
        self.state == RefinementState::Running && !self.is_exhausted()
    }

    /// Partition of the current generation, computed on first use
    ///
    /// # Errors
    ///
    /// Propagates partition failures (empty site set, allocation failure)
    pub fn current_partition(&mut self) -> Result<&Partition> {
        if self.current.is_none() {
            self.current = Some(Partition::compute(self.field, &self.sites)?);
        }
        self.current
            .as_ref()
            .ok_or_else(|| invalid_geometry(&"partition cache unexpectedly empty"))
    }

    /// Run one partition and policy pass, producing the next generation
    ///
    /// # Errors
    ///
    /// Propagates partition failures; the site set is left untouched
    pub fn step(&mut self) -> Result<IterationReport> {
        let partition = match self.current.take() {
            Some(partition) => partition,
            None => Partition::compute(self.field, &self.sites)?,
        };

        let (next_sites, tally) =
            apply_policy(partition.cells(), &self.sites, &self.config.thresholds);
        let sites_before = self.sites.len();
        self.sites = next_sites;
        self.iteration += 1;
        self.state = if tally.changes() == 0 {
            RefinementState::Converged
        } else {
            RefinementState::Running
        };

        let report = IterationReport {
            iteration: self.iteration,
            sites_before,
            sites_after: self.sites.len(),
            tally,
            state: self.state,
        };

        info!(
            "Iteration {}: {} -> {} sites ({} dropped, {} split, {} kept)",
            report.iteration,
            report.sites_before,
            report.sites_after,
            tally.dropped,
            tally.split,
            tally.kept
        );

        Ok(report)
    }

    /// Iterate until convergence or until the iteration cap is reached
    ///
    /// # Errors
    ///
    /// Propagates the first partition failure, aborting the run
    pub fn run(&mut self) -> Result<RefinementOutcome> {
        while self.should_continue() {
            self.step()?;
        }

        Ok(self.finish())
    }

    /// Snapshot of the current generation, warning if it never converged
    pub fn finish(&self) -> RefinementOutcome {
        if self.state == RefinementState::Running {
            warn!(
                "Stopped after {} iterations without converging",
                self.iteration
            );
        }

        RefinementOutcome {
            sites: self.sites.clone(),
            iterations: self.iteration,
            state: self.state,
        }
    }
}
