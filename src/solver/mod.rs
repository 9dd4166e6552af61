pub mod baseline;
pub mod genetic;
pub mod restarts;
