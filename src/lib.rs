pub mod api;
pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod runner;
pub mod setup;
pub mod solver;
pub mod utils;

pub use distance::DistanceMatrix;
pub use error::{Result, TspError};
pub use solver::baseline::RandomRouteGenerator;
pub use solver::genetic::{GaConfig, GeneticOptimizer};
