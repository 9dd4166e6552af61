use serde::Serialize;

use crate::config::constant::{
    CROSSOVER_RATE, ELITE_SIZE, MUTATION_RATE, POPULATION_SIZE, TOURNAMENT_SIZE,
};
use crate::domain::types::TourKind;
use crate::error::{Result, TspError};

/// Genetic algorithm parameters, fixed for the lifetime of an optimizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaConfig {
    pub population_size: usize,
    /// Probability of one pairwise swap per bred child.
    pub mutation_rate: f64,
    /// Probability that ordered crossover fires for a child.
    pub crossover_rate: f64,
    /// Number of top-ranked routes carried over unchanged.
    pub elite_size: usize,
    pub tournament_size: usize,
    pub tour_kind: TourKind,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            mutation_rate: MUTATION_RATE,
            crossover_rate: CROSSOVER_RATE,
            elite_size: ELITE_SIZE,
            tournament_size: TOURNAMENT_SIZE,
            tour_kind: TourKind::Path,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    pub fn with_elite_size(mut self, elite_size: usize) -> Self {
        self.elite_size = elite_size;
        self
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    pub fn with_tour_kind(mut self, tour_kind: TourKind) -> Self {
        self.tour_kind = tour_kind;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::invalid_input("population_size must be at least 1"));
        }
        if self.elite_size >= self.population_size {
            return Err(TspError::invalid_input(format!(
                "elite_size ({}) must be smaller than population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid_input(format!(
                "mutation_rate {} is not a probability",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(TspError::invalid_input(format!(
                "crossover_rate {} is not a probability",
                self.crossover_rate
            )));
        }
        if self.tournament_size == 0 {
            return Err(TspError::invalid_input("tournament_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.mutation_rate, 0.01);
        assert_eq!(config.crossover_rate, 0.8);
        assert_eq!(config.elite_size, 5);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.tour_kind, TourKind::Path);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_elite_must_be_smaller_than_population() {
        let config = GaConfig::default().with_population_size(5).with_elite_size(5);
        assert!(matches!(config.validate(), Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_rates_must_be_probabilities() {
        assert!(GaConfig::default().with_mutation_rate(1.5).validate().is_err());
        assert!(GaConfig::default().with_crossover_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_crossover_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_empty_population_and_tournament_rejected() {
        assert!(GaConfig::default()
            .with_population_size(0)
            .with_elite_size(0)
            .validate()
            .is_err());
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
    }
}
