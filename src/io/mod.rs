//! Input/output operations and error handling

/// Command-line parsing and run orchestration
pub mod cli;
/// Refinement constants and defaults
pub mod configuration;
/// SVG rendering of stipples and boundaries
pub mod document;
/// Error types
pub mod error;
/// Image decoding into density fields
pub mod image;
/// Iteration progress display
pub mod progress;
