/// Boundary pixel detection and greedy path tracing
pub mod boundary;
/// Density-weighted Voronoi partition and cell statistics
pub mod partition;
/// Linde-Buzo-Gray split/keep/drop refinement loop
pub mod refiner;
/// Initial site placement
pub mod seeding;
