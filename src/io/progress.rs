//! Terminal progress display for refinement iterations

use crate::algorithm::refiner::{IterationReport, RefinementState};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BOUNDED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static UNBOUNDED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("[{elapsed_precise}] {prefix} {spinner} iteration {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Progress bar tracking iterations of one refinement run
///
/// Shows a bar when an iteration cap is set and a spinner otherwise.
pub struct RefinementProgress {
    bar: ProgressBar,
}

impl RefinementProgress {
    /// Create a progress display for the image at `path`
    pub fn new(path: &Path, max_iterations: Option<usize>) -> Self {
        let bar = match max_iterations {
            Some(limit) => {
                let bar = ProgressBar::new(limit as u64);
                bar.set_style(BOUNDED_STYLE.clone());
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(UNBOUNDED_STYLE.clone());
                bar
            }
        };

        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
        );

        Self { bar }
    }

    /// Report a completed iteration
    pub fn update(&self, report: &IterationReport) {
        self.bar.set_position(report.iteration as u64);
        self.bar.set_message(format!(
            "{} sites, {} changes",
            report.sites_after,
            report.changes()
        ));
    }

    /// Run `f` with the bar hidden so log lines do not tear it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Close the display with a final status line
    pub fn finish(&self, state: RefinementState, sites: usize) {
        let status = match state {
            RefinementState::Converged => "converged",
            RefinementState::Running => "stopped at iteration cap",
        };
        self.bar.finish_with_message(format!("{status}, {sites} sites"));
    }
}
