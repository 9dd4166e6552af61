use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{info, span, Level};

use crate::config::constant::BASELINE_ROUTES;
use crate::domain::solution::{
    AlgorithmInfo, ComparisonSummary, OptimizationResponse, RandomRoute, RouteComparison,
    RouteDetails, RouteResult,
};
use crate::domain::types::{Location, ProblemInstance, TourKind};
use crate::error::Result;
use crate::evaluation::stats::route_statistics;
use crate::setup::init::setup;
use crate::setup::validation::{validate_catalog, validate_location};
use crate::solver::baseline::{BaselineReport, RandomRouteGenerator};
use crate::solver::restarts::{optimize_with_restarts, RunPlan};

const ALGORITHM_NAME: &str = "Genetic Algorithm";

/// In-process entry point over a catalog of named locations.
///
/// Callers address locations by id; every result is mapped back to ids and
/// names in visiting order.
#[derive(Debug, Clone)]
pub struct RouteOptimizationApi {
    locations: Vec<Location>,
}

impl RouteOptimizationApi {
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        validate_catalog(&locations)?;
        info!("Route API ready with {} locations", locations.len());
        Ok(Self { locations })
    }

    pub fn get_all_locations(&self) -> &[Location] {
        &self.locations
    }

    /// Append a location and return its id (one past the largest existing id).
    pub fn add_custom_location(&mut self, name: impl Into<String>, lat: f64, lon: f64) -> Result<u64> {
        let id = self
            .locations
            .iter()
            .map(|l| l.id)
            .max()
            .map_or(0, |max_id| max_id + 1);
        let location = Location::new(id, name, lat, lon);
        validate_location(&location)?;

        info!("Added custom location {} ({})", id, location.name);
        self.locations.push(location);
        Ok(id)
    }

    pub fn problem(&self, location_ids: &[u64]) -> Result<ProblemInstance> {
        setup(&self.locations, location_ids)
    }

    pub fn optimize_route(&self, location_ids: &[u64], plan: &RunPlan) -> Result<OptimizationResponse> {
        let span = span!(Level::INFO, "optimize_route", locations = location_ids.len());
        let _guard = span.enter();

        let instance = self.problem(location_ids)?;
        let optimized_route = optimize_instance(&instance, plan)?;

        Ok(OptimizationResponse {
            optimized_route,
            algorithm_info: AlgorithmInfo {
                population_size: plan.ga.population_size,
                generations: plan.generations,
                algorithm: ALGORITHM_NAME.to_string(),
            },
        })
    }

    /// Optimize the selection and compare it against one random permutation,
    /// both measured with the plan's tour kind. The random route comes from its
    /// own generator; `baseline_seed` makes it reproducible without tying it to
    /// the optimizer's seed.
    pub fn compare_with_random(
        &self,
        location_ids: &[u64],
        plan: &RunPlan,
        baseline_seed: Option<u64>,
    ) -> Result<RouteComparison> {
        let span = span!(Level::INFO, "compare_with_random", locations = location_ids.len());
        let _guard = span.enter();

        let instance = self.problem(location_ids)?;
        let optimized_route = optimize_instance(&instance, plan)?;

        let mut generator = baseline_generator(baseline_seed, plan.ga.tour_kind);
        let route = generator.generate(instance.size());
        let random_distance = generator.distance(&route, &instance.distance_matrix);
        let random_route = RandomRoute::from_route(&route, random_distance, &instance.locations);

        let comparison = ComparisonSummary::between(random_distance, optimized_route.total_distance);
        info!(
            "Optimized {:.2} km vs random {:.2} km ({:.1}% better)",
            optimized_route.total_distance, random_distance, comparison.improvement_percentage
        );

        Ok(RouteComparison {
            random_route,
            optimized_route,
            comparison,
        })
    }

    /// Distance statistics of `num_routes` random permutations of the selection,
    /// measured as `tour_kind`.
    pub fn baseline_report(
        &self,
        location_ids: &[u64],
        num_routes: Option<usize>,
        baseline_seed: Option<u64>,
        tour_kind: TourKind,
    ) -> Result<BaselineReport> {
        let instance = self.problem(location_ids)?;
        let mut generator = baseline_generator(baseline_seed, tour_kind);
        Ok(generator.run_experiment(
            &instance.distance_matrix,
            num_routes.unwrap_or(BASELINE_ROUTES),
        ))
    }

    /// Ids, names, coordinates and segment breakdown of visiting
    /// `location_ids` in the given order (open path).
    pub fn route_details(&self, location_ids: &[u64]) -> Result<RouteDetails> {
        let instance = self.problem(location_ids)?;
        let route: Vec<usize> = (0..instance.size()).collect();
        let statistics = route_statistics(&route, &instance.distance_matrix);
        Ok(RouteDetails::new(&route, &instance.locations, statistics))
    }
}

/// Run the optimizer over a prepared instance and map the result onto its locations.
pub fn optimize_instance(instance: &ProblemInstance, plan: &RunPlan) -> Result<RouteResult> {
    let outcome = optimize_with_restarts(&instance.distance_matrix, plan)?;
    Ok(RouteResult::from_outcome(&outcome, &instance.locations))
}

/// Pretty-printed JSON dump of any result record.
pub fn export_results_to_json<T: Serialize>(results: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.flush()?;
    info!("Results exported to {}", path.display());
    Ok(())
}

fn baseline_generator(seed: Option<u64>, tour_kind: TourKind) -> RandomRouteGenerator {
    let generator = match seed {
        Some(seed) => RandomRouteGenerator::with_seed(seed),
        None => RandomRouteGenerator::from_entropy(),
    };
    generator.with_tour_kind(tour_kind)
}
