use std::ops::ControlFlow;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, span, trace, Level};

use crate::config::constant::PROGRESS_EVERY;
use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::{BestTracker, Population, RankedIndividual, Route};
use crate::error::Result;
use crate::evaluation::fitness::{find_distance, find_fitness};

use super::operators;
use super::params::GaConfig;
use super::population::{initial_population, rank_population};
use super::selection::select_mating_indices;

/// Snapshot handed to the observer after every generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProgress {
    /// 0-based generation index within the current run.
    pub generation: usize,
    /// Distance of the best route in this generation.
    pub candidate_distance: f64,
    /// Best distance seen by the optimizer so far.
    pub best_distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeOutcome {
    pub route: Route,
    pub distance: f64,
    pub elapsed_secs: f64,
    /// Best distance of each generation, in order.
    pub trace: Vec<f64>,
    pub generations_run: usize,
}

/// Genetic algorithm over route permutations.
///
/// Owns its random source and its [`BestTracker`]; build one optimizer per
/// run. The tracker survives repeated `optimize` calls on the same instance
/// and only ever improves.
#[derive(Debug)]
pub struct GeneticOptimizer<R: Rng = ChaCha8Rng> {
    config: GaConfig,
    rng: R,
    generation: usize,
    population: Population,
    best: BestTracker,
}

impl GeneticOptimizer<ChaCha8Rng> {
    pub fn with_seed(config: GaConfig, seed: u64) -> Result<Self> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GaConfig) -> Result<Self> {
        Self::new(config, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> GeneticOptimizer<R> {
    pub fn new(config: GaConfig, rng: R) -> Result<Self> {
        config.validate()?;
        info!(
            "GeneticOptimizer initialized with population_size={}, elite_size={}",
            config.population_size, config.elite_size
        );
        Ok(Self {
            config,
            rng,
            generation: 0,
            population: Vec::new(),
            best: BestTracker::default(),
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Generations evolved over this optimizer's lifetime.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Route] {
        &self.population
    }

    pub fn best(&self) -> &BestTracker {
        &self.best
    }

    pub fn initialize(&mut self, num_locations: usize) -> Population {
        let population =
            initial_population(self.config.population_size, num_locations, &mut self.rng);
        debug!(
            "Created initial population of {} individuals",
            population.len()
        );
        population
    }

    pub fn fitness(&self, route: &[usize], dm: &DistanceMatrix) -> f64 {
        find_fitness(route, dm, self.config.tour_kind)
    }

    pub fn distance(&self, route: &[usize], dm: &DistanceMatrix) -> f64 {
        find_distance(route, dm, self.config.tour_kind)
    }

    pub fn rank(&self, population: &[Route], dm: &DistanceMatrix) -> Vec<RankedIndividual> {
        rank_population(population, dm, self.config.tour_kind)
    }

    pub fn select(&mut self, ranked: &[RankedIndividual]) -> Vec<usize> {
        select_mating_indices(
            ranked,
            self.config.population_size,
            self.config.elite_size,
            self.config.tournament_size,
            &mut self.rng,
        )
    }

    pub fn crossover(&mut self, parent1: &[usize], parent2: &[usize]) -> Route {
        operators::crossover(parent1, parent2, self.config.crossover_rate, &mut self.rng)
    }

    pub fn mutate(&mut self, route: &mut Route) -> bool {
        operators::mutate(route, self.config.mutation_rate, &mut self.rng)
    }

    /// Elites pass through untouched; every other child is crossover + mutation
    /// of two parents drawn uniformly (with replacement) from the whole pool.
    pub fn breed(&mut self, mating_pool: &[Route]) -> Population {
        let elite_size = self.config.elite_size.min(mating_pool.len());
        let mut children: Population = mating_pool[..elite_size].to_vec();
        if mating_pool.is_empty() {
            return children;
        }

        for _ in elite_size..self.config.population_size {
            let parent1 = &mating_pool[self.rng.gen_range(0..mating_pool.len())];
            let parent2 = &mating_pool[self.rng.gen_range(0..mating_pool.len())];
            let mut child = self.crossover(parent1, parent2);
            self.mutate(&mut child);
            children.push(child);
        }

        children
    }

    /// One generation: rank, select, breed.
    pub fn evolve(&mut self, population: &[Route], dm: &DistanceMatrix) -> Population {
        let ranked = self.rank(population, dm);
        let selection = self.select(&ranked);
        let mating_pool: Population = selection.iter().map(|&i| population[i].clone()).collect();
        self.breed(&mating_pool)
    }

    pub fn optimize(&mut self, dm: &DistanceMatrix, num_generations: usize) -> OptimizeOutcome {
        self.optimize_with(dm, num_generations, |_| ControlFlow::Continue(()))
    }

    /// Run up to `num_generations` generations, calling `observer` after each
    /// one. Returning `ControlFlow::Break` stops the run after that generation.
    pub fn optimize_with<F>(
        &mut self,
        dm: &DistanceMatrix,
        num_generations: usize,
        mut observer: F,
    ) -> OptimizeOutcome
    where
        F: FnMut(&GenerationProgress) -> ControlFlow<()>,
    {
        let num_locations = dm.size();
        let run_span = span!(
            Level::INFO,
            "optimize",
            locations = num_locations,
            generations = num_generations
        );
        let _run_guard = run_span.enter();

        let start_time = Instant::now();
        info!(
            "Starting optimization with {} generations",
            num_generations
        );

        let mut population = self.initialize(num_locations);
        self.offer_best(&population, dm);

        let mut trace = Vec::with_capacity(num_generations);
        for generation in 0..num_generations {
            let gen_span = span!(Level::TRACE, "generation", gen = generation);
            let _gen_guard = gen_span.enter();

            population = self.evolve(&population, dm);
            self.generation += 1;

            let candidate_distance = self.offer_best(&population, dm);
            trace.push(candidate_distance);

            if generation % PROGRESS_EVERY == 0 {
                info!(
                    "Generation {}: Best distance = {:.2} km",
                    generation, candidate_distance
                );
            }

            let progress = GenerationProgress {
                generation,
                candidate_distance,
                best_distance: self.best.distance,
            };
            if observer(&progress).is_break() {
                info!("Optimization stopped by caller after generation {}", generation);
                break;
            }
        }
        self.population = population;

        let elapsed_secs = start_time.elapsed().as_secs_f64();
        info!("Optimization completed in {:.3} seconds", elapsed_secs);
        info!("Best route distance: {:.2} km", self.best.distance);

        OptimizeOutcome {
            route: self.best.route.clone(),
            distance: self.best.distance,
            elapsed_secs,
            generations_run: trace.len(),
            trace,
        }
    }

    /// Offer the population's top-ranked route to the tracker and return its distance.
    fn offer_best(&mut self, population: &[Route], dm: &DistanceMatrix) -> f64 {
        let ranked = self.rank(population, dm);
        let Some(&(best_idx, _)) = ranked.first() else {
            return f64::INFINITY;
        };

        let candidate = &population[best_idx];
        let candidate_distance = self.distance(candidate, dm);
        if self.best.offer(candidate, candidate_distance) {
            trace!(
                "New best at generation {}: {:.3} km",
                self.generation,
                candidate_distance
            );
        }
        candidate_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_permutation;

    fn grid_matrix() -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r as f64 * 0.5, c as f64 * 0.5)))
            .collect();
        DistanceMatrix::build(&coords).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GaConfig::default().with_population_size(4).with_elite_size(4);
        assert!(GeneticOptimizer::with_seed(config, 1).is_err());
    }

    #[test]
    fn test_evolve_keeps_population_size_and_permutations() {
        let dm = grid_matrix();
        let mut ga = GeneticOptimizer::with_seed(GaConfig::default(), 3).unwrap();
        let population = ga.initialize(dm.size());
        let next = ga.evolve(&population, &dm);
        assert_eq!(next.len(), 50);
        assert!(next.iter().all(|r| is_permutation(r, 9)));
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let dm = grid_matrix();
        let config = GaConfig::default()
            .with_mutation_rate(1.0)
            .with_elite_size(7);
        let mut ga = GeneticOptimizer::with_seed(config, 21).unwrap();

        let mut population = ga.initialize(dm.size());
        for _ in 0..10 {
            let ranked = ga.rank(&population, &dm);
            let elites: Vec<Route> = ranked[..7]
                .iter()
                .map(|&(i, _)| population[i].clone())
                .collect();

            let next = ga.evolve(&population, &dm);
            assert_eq!(&next[..7], elites.as_slice());
            population = next;
        }
    }

    #[test]
    fn test_breed_without_crossover_or_mutation_copies_parents() {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_elite_size(2)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut ga = GeneticOptimizer::with_seed(config, 4).unwrap();
        let pool: Population = vec![
            vec![0, 1, 2],
            vec![2, 1, 0],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![0, 2, 1],
            vec![2, 0, 1],
        ];
        let children = ga.breed(&pool);
        assert_eq!(children.len(), 6);
        assert_eq!(&children[..2], &pool[..2]);
        assert!(children.iter().all(|c| pool.contains(c)));
    }

    #[test]
    fn test_optimize_returns_consistent_outcome() {
        let dm = grid_matrix();
        let mut ga = GeneticOptimizer::with_seed(GaConfig::default(), 17).unwrap();
        let outcome = ga.optimize(&dm, 60);

        assert!(is_permutation(&outcome.route, 9));
        assert_eq!(outcome.distance, dm.route_distance(&outcome.route));
        assert_eq!(outcome.trace.len(), 60);
        assert_eq!(outcome.generations_run, 60);
        assert_eq!(ga.generation(), 60);
        assert_eq!(ga.population().len(), 50);
        assert!(outcome.trace.iter().all(|d| *d >= outcome.distance));
    }

    #[test]
    fn test_best_distance_never_increases() {
        let dm = grid_matrix();
        let mut ga = GeneticOptimizer::with_seed(GaConfig::default(), 23).unwrap();
        let mut seen = Vec::new();
        ga.optimize_with(&dm, 40, |p| {
            seen.push(p.best_distance);
            ControlFlow::Continue(())
        });
        assert_eq!(seen.len(), 40);
        assert!(seen.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_observer_can_stop_the_run() {
        let dm = grid_matrix();
        let mut ga = GeneticOptimizer::with_seed(GaConfig::default(), 5).unwrap();
        let outcome = ga.optimize_with(&dm, 100, |p| {
            if p.generation == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(outcome.generations_run, 5);
        assert!(is_permutation(&outcome.route, 9));
    }

    #[test]
    fn test_zero_generations_still_returns_a_route() {
        let dm = grid_matrix();
        let mut ga = GeneticOptimizer::with_seed(GaConfig::default(), 5).unwrap();
        let outcome = ga.optimize(&dm, 0);
        assert!(outcome.trace.is_empty());
        assert!(is_permutation(&outcome.route, 9));
        assert_eq!(outcome.distance, dm.route_distance(&outcome.route));
    }

    #[test]
    fn test_same_seed_same_result() {
        let dm = grid_matrix();
        let a = GeneticOptimizer::with_seed(GaConfig::default(), 99)
            .unwrap()
            .optimize(&dm, 30);
        let b = GeneticOptimizer::with_seed(GaConfig::default(), 99)
            .unwrap()
            .optimize(&dm, 30);
        assert_eq!(a.route, b.route);
        assert_eq!(a.trace, b.trace);
    }

    #[test]
    fn test_tracker_persists_across_runs() {
        let dm = grid_matrix();
        let mut ga = GeneticOptimizer::with_seed(GaConfig::default(), 8).unwrap();
        let first = ga.optimize(&dm, 20);
        assert_eq!(ga.best().distance, first.distance);
        assert_eq!(ga.best().route, first.route);

        let second = ga.optimize(&dm, 5);
        assert!(second.distance <= first.distance);
        assert_eq!(ga.best().distance, second.distance);
        assert_eq!(ga.best().route, second.route);
        assert_eq!(ga.generation(), 25);
    }
}
