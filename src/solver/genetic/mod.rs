pub mod operators;
pub mod params;
pub mod population;
pub mod search;
pub mod selection;

pub use params::GaConfig;
pub use search::{GenerationProgress, GeneticOptimizer, OptimizeOutcome};
