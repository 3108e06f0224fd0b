//! Tests for command-line parsing and the end-to-end stippling run

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{GrayImage, Luma};
    use lbgstipple::StippleError;
    use lbgstipple::algorithm::refiner::RefinementState;
    use lbgstipple::io::cli::{Cli, StippleRunner};
    use lbgstipple::io::configuration::{
        DEFAULT_INITIAL_SITES, DEFAULT_LOWER_THRESHOLD, DEFAULT_MAX_ITERATIONS, DEFAULT_SEED,
        DEFAULT_UPPER_THRESHOLD,
    };
    use log::LevelFilter;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_image(dir: &Path, image: &GrayImage) -> PathBuf {
        let path = dir.join("source.png");
        image.save(&path).expect("Failed to save image");
        path
    }

    fn path_arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    // Tests parsing with only the image argument uses the defaults
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["lbgstipple", "input.png"]);

        assert_eq!(cli.image, PathBuf::from("input.png"));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!((cli.lower_threshold - DEFAULT_LOWER_THRESHOLD).abs() < f64::EPSILON);
        assert!((cli.upper_threshold - DEFAULT_UPPER_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(cli.initial_sites, DEFAULT_INITIAL_SITES);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.iteration_cap(), Some(DEFAULT_MAX_ITERATIONS));
        assert!(!cli.final_only && !cli.no_boundaries);
        assert_eq!(cli.log_level(), LevelFilter::Info);
        assert!(cli.should_show_progress());
    }

    // Tests every flag is parsed
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "lbgstipple",
            "input.png",
            "--output-dir",
            "out",
            "--lower-threshold",
            "10.5",
            "--upper-threshold",
            "40",
            "--initial-sites",
            "3",
            "--seed",
            "9",
            "--max-iterations",
            "0",
            "--final-only",
            "--no-boundaries",
            "--verbose",
        ]);

        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert!((cli.lower_threshold - 10.5).abs() < f64::EPSILON);
        assert!((cli.upper_threshold - 40.0).abs() < f64::EPSILON);
        assert_eq!(cli.initial_sites, 3);
        assert_eq!(cli.seed, 9);
        assert_eq!(cli.iteration_cap(), None);
        assert!(cli.final_only && cli.no_boundaries);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    // Tests quiet lowers the log level and hides progress
    #[test]
    fn test_cli_quiet() {
        let cli = Cli::parse_from(["lbgstipple", "input.png", "-q"]);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
        assert!(!cli.should_show_progress());
    }

    // Tests quiet and verbose cannot be combined
    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["lbgstipple", "input.png", "-q", "-v"]).is_err());
    }

    // Tests the image argument is required
    #[test]
    fn test_cli_requires_image() {
        assert!(Cli::try_parse_from(["lbgstipple"]).is_err());
    }

    // Tests document paths are placed in the output directory
    #[test]
    fn test_output_paths() {
        let cli = Cli::parse_from(["lbgstipple", "input.png", "-o", "docs"]);
        assert_eq!(cli.iteration_path(3), PathBuf::from("docs/iteration_3.svg"));
        assert_eq!(cli.final_path(), PathBuf::from("docs/output_stipples.svg"));
    }

    // Tests inverted thresholds are rejected before any work starts
    #[test]
    fn test_refinement_config_rejects_inverted_thresholds() {
        let cli = Cli::parse_from(["lbgstipple", "input.png", "-l", "50", "-u", "10"]);
        assert!(matches!(
            cli.refinement_config(),
            Err(StippleError::InvalidParameter { .. })
        ));
    }

    // Tests a full run writes one document per iteration plus the final one
    #[test]
    fn test_runner_writes_documents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let image = write_image(temp_dir.path(), &GrayImage::from_pixel(20, 16, Luma([0])));
        let output = temp_dir.path().join("out");

        let (image, output_arg) = (path_arg(&image), path_arg(&output));
        let cli = Cli::parse_from([
            "lbgstipple",
            image.as_str(),
            "-o",
            output_arg.as_str(),
            "-l",
            "0",
            "-u",
            "1000",
            "-n",
            "1",
            "-q",
        ]);
        let runner = StippleRunner::new(cli);
        let outcome = runner.process().expect("Failed to process image");

        assert_eq!(outcome.state, RefinementState::Converged);
        assert_eq!(outcome.iterations, 1);
        let site = outcome.sites.first().copied().unwrap_or_default();
        assert_eq!(outcome.sites.len(), 1);
        assert!((site.x - 9.5).abs() < 1e-9);
        assert!((site.y - 7.5).abs() < 1e-9);
        assert!(output.join("iteration_1.svg").is_file());
        assert!(output.join("output_stipples.svg").is_file());
    }

    // Tests a capped run with progress shown exports every iteration and stops unconverged
    #[test]
    fn test_runner_with_progress_stops_at_cap() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let image = write_image(temp_dir.path(), &GrayImage::from_pixel(12, 12, Luma([0])));
        let output = temp_dir.path().join("out");

        // Every cell outweighs the upper bound, so each iteration splits
        let (image, output_arg) = (path_arg(&image), path_arg(&output));
        let cli = Cli::parse_from([
            "lbgstipple",
            image.as_str(),
            "-o",
            output_arg.as_str(),
            "-l",
            "0",
            "-u",
            "1",
            "-n",
            "1",
            "-i",
            "2",
        ]);
        assert!(cli.should_show_progress());

        let outcome = StippleRunner::new(cli)
            .process()
            .expect("Failed to process image");
        assert_eq!(outcome.state, RefinementState::Running);
        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.sites.len(), 4);
        assert!(output.join("iteration_1.svg").is_file());
        assert!(output.join("iteration_2.svg").is_file());
        assert!(output.join("output_stipples.svg").is_file());
    }

    // Tests final-only runs skip the per-iteration documents
    #[test]
    fn test_runner_final_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let image = write_image(temp_dir.path(), &GrayImage::from_pixel(12, 12, Luma([64])));
        let output = temp_dir.path().join("out");

        let (image, output_arg) = (path_arg(&image), path_arg(&output));
        let cli = Cli::parse_from([
            "lbgstipple",
            image.as_str(),
            "-o",
            output_arg.as_str(),
            "-l",
            "0",
            "-u",
            "1000",
            "--final-only",
            "--no-boundaries",
            "-q",
        ]);
        let result = StippleRunner::new(cli).process();

        assert!(result.is_ok());
        assert!(!output.join("iteration_1.svg").exists());
        assert!(output.join("output_stipples.svg").is_file());
    }

    // Tests a missing image fails the run
    #[test]
    fn test_runner_missing_image() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing.png");
        let missing = path_arg(&missing);
        let cli = Cli::parse_from(["lbgstipple", missing.as_str(), "-q"]);

        assert!(matches!(
            StippleRunner::new(cli).process(),
            Err(StippleError::ImageLoad { .. })
        ));
    }
}
