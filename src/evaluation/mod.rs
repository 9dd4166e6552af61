pub mod fitness;
pub mod stats;
