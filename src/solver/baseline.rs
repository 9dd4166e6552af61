use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::{Route, TourKind};
use crate::evaluation::fitness::find_distance;
use crate::evaluation::stats::DistanceSummary;
use crate::solver::genetic::population::random_route;

/// Random-permutation baseline used to measure how much the optimizer helps.
///
/// Holds its own random source so a baseline is never correlated with an
/// optimizer run through a shared seed.
#[derive(Debug)]
pub struct RandomRouteGenerator<R: Rng = ChaCha8Rng> {
    rng: R,
    tour_kind: TourKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct BaselineReport {
    pub num_routes: usize,
    pub distances: Vec<f64>,
    pub mean_distance: f64,
    pub std_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub best_route: Route,
    pub best_distance: f64,
    pub execution_time: f64,
}

impl RandomRouteGenerator<ChaCha8Rng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomRouteGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            tour_kind: TourKind::Path,
        }
    }

    /// Score routes the same way the optimizer it is compared against does.
    pub fn with_tour_kind(mut self, tour_kind: TourKind) -> Self {
        self.tour_kind = tour_kind;
        self
    }

    pub fn tour_kind(&self) -> TourKind {
        self.tour_kind
    }

    /// Length of `route` under this generator's tour kind.
    pub fn distance(&self, route: &[usize], dm: &DistanceMatrix) -> f64 {
        find_distance(route, dm, self.tour_kind)
    }

    pub fn generate(&mut self, num_locations: usize) -> Route {
        let route = random_route(num_locations, &mut self.rng);
        debug!("Generated random route: {:?}", route);
        route
    }

    pub fn generate_many(&mut self, num_locations: usize, num_routes: usize) -> Vec<Route> {
        (0..num_routes)
            .map(|_| self.generate(num_locations))
            .collect()
    }

    /// Score `routes` against `dm` under the generator's tour kind.
    /// `best_route` is empty when `routes` is.
    pub fn evaluate(&self, routes: &[Route], dm: &DistanceMatrix) -> BaselineReport {
        let distances: Vec<f64> = routes.iter().map(|r| self.distance(r, dm)).collect();
        let summary = DistanceSummary::from_values(&distances);

        let best = distances
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, &d)| (routes[i].clone(), d));
        let (best_route, best_distance) = best.unwrap_or_default();

        info!(
            "Route evaluation complete. Mean distance: {:.2} km",
            summary.mean
        );

        BaselineReport {
            num_routes: routes.len(),
            distances,
            mean_distance: summary.mean,
            std_distance: summary.std,
            min_distance: summary.min,
            max_distance: summary.max,
            best_route,
            best_distance,
            execution_time: 0.0,
        }
    }

    /// Generate `num_routes` random routes over `dm` and report on them, with timing.
    pub fn run_experiment(&mut self, dm: &DistanceMatrix, num_routes: usize) -> BaselineReport {
        let start_time = Instant::now();
        let routes = self.generate_many(dm.size(), num_routes);
        let mut report = self.evaluate(&routes, dm);
        report.execution_time = start_time.elapsed().as_secs_f64();

        info!(
            "Baseline experiment completed in {:.3} seconds, best random route {:.2} km",
            report.execution_time, report.best_distance
        );
        report
    }
}

/// One-shot baseline over `dm` with a caller-supplied random source.
pub fn run_baseline_experiment<R: Rng>(
    dm: &DistanceMatrix,
    num_routes: usize,
    tour_kind: TourKind,
    rng: R,
) -> BaselineReport {
    RandomRouteGenerator::new(rng)
        .with_tour_kind(tour_kind)
        .run_experiment(dm, num_routes)
}
