use serde::Serialize;

use crate::domain::types::Location;
use crate::evaluation::stats::{improvement_percentage, RouteStatistics};
use crate::solver::genetic::OptimizeOutcome;
use crate::utils::locations_in_order;

/// Optimizer result mapped back onto the caller's identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub location_ids: Vec<u64>,
    pub location_names: Vec<String>,
    /// Kilometers.
    pub total_distance: f64,
    /// Seconds.
    pub execution_time: f64,
    #[serde(skip_serializing)]
    pub trace: Vec<f64>,
}

impl RouteResult {
    pub fn from_outcome(outcome: &OptimizeOutcome, locations: &[Location]) -> Self {
        let ordered = locations_in_order(&outcome.route, locations);
        Self {
            location_ids: ordered.iter().map(|l| l.id).collect(),
            location_names: ordered.iter().map(|l| l.name.clone()).collect(),
            total_distance: outcome.distance,
            execution_time: outcome.elapsed_secs,
            trace: outcome.trace.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmInfo {
    pub population_size: usize,
    pub generations: usize,
    pub algorithm: String,
}

/// `{ "optimized_route": {...}, "algorithm_info": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResponse {
    pub optimized_route: RouteResult,
    pub algorithm_info: AlgorithmInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomRoute {
    pub location_ids: Vec<u64>,
    pub location_names: Vec<String>,
    pub total_distance: f64,
}

impl RandomRoute {
    pub fn from_route(route: &[usize], total_distance: f64, locations: &[Location]) -> Self {
        let ordered = locations_in_order(route, locations);
        Self {
            location_ids: ordered.iter().map(|l| l.id).collect(),
            location_names: ordered.iter().map(|l| l.name.clone()).collect(),
            total_distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub distance_saved: f64,
    pub improvement_percentage: f64,
}

impl ComparisonSummary {
    pub fn between(random_distance: f64, optimized_distance: f64) -> Self {
        Self {
            distance_saved: random_distance - optimized_distance,
            improvement_percentage: improvement_percentage(random_distance, optimized_distance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteComparison {
    pub random_route: RandomRoute,
    pub optimized_route: RouteResult,
    pub comparison: ComparisonSummary,
}

/// A route in visiting order with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDetails {
    pub location_ids: Vec<u64>,
    pub location_names: Vec<String>,
    /// `(lat, lon)` in degrees, in visiting order.
    pub coordinates: Vec<(f64, f64)>,
    #[serde(flatten)]
    pub statistics: RouteStatistics,
}

impl RouteDetails {
    pub fn new(route: &[usize], locations: &[Location], statistics: RouteStatistics) -> Self {
        let ordered = locations_in_order(route, locations);
        Self {
            location_ids: ordered.iter().map(|l| l.id).collect(),
            location_names: ordered.iter().map(|l| l.name.clone()).collect(),
            coordinates: ordered.iter().map(|l| l.coordinate()).collect(),
            statistics,
        }
    }
}
