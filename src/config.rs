use std::env;
use std::str::FromStr;

use dotenv::dotenv;
use tracing::{debug, warn};

pub mod constant {
    pub(crate) const EARTH_RADIUS_KM: f64 = 6371.0;
    pub(crate) const FITNESS_EPSILON: f64 = 1e-10;

    pub(crate) const POPULATION_SIZE: usize = 50;
    pub(crate) const MUTATION_RATE: f64 = 0.01;
    pub(crate) const CROSSOVER_RATE: f64 = 0.8;
    pub(crate) const ELITE_SIZE: usize = 5;
    pub(crate) const TOURNAMENT_SIZE: usize = 3;
    pub(crate) const GENERATIONS: usize = 100;
    pub(crate) const PROGRESS_EVERY: usize = 10;

    pub(crate) const BASELINE_ROUTES: usize = 20;
    pub(crate) const SEED: u64 = 42;
    pub(crate) const RESTARTS: usize = 1;
    pub(crate) const LOCATION_COUNT: usize = 10;

    pub(crate) const LOCATIONS_CSV_PATH: &str = "data/locations.csv";
    pub(crate) const RESULTS_JSON_PATH: &str = "optimization_results.json";
    pub(crate) const TRACE_CSV_PATH: &str = "generation_trace.csv";
}

/// Runtime settings for the `tsp-solver` binary.
///
/// Defaults come from [`constant`]; every field can be overridden through a
/// `TSP_*` environment variable (a `.env` file is honoured).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub locations_csv: String,
    pub location_ids: Option<Vec<u64>>,
    pub location_count: usize,
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elite_size: usize,
    pub seed: u64,
    pub restarts: usize,
    pub time_limit_secs: Option<f64>,
    pub results_json: String,
    pub trace_csv: String,
    pub closed_tour: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            locations_csv: constant::LOCATIONS_CSV_PATH.to_string(),
            location_ids: None,
            location_count: constant::LOCATION_COUNT,
            generations: constant::GENERATIONS,
            population_size: constant::POPULATION_SIZE,
            mutation_rate: constant::MUTATION_RATE,
            crossover_rate: constant::CROSSOVER_RATE,
            elite_size: constant::ELITE_SIZE,
            seed: constant::SEED,
            restarts: constant::RESTARTS,
            time_limit_secs: None,
            results_json: constant::RESULTS_JSON_PATH.to_string(),
            trace_csv: constant::TRACE_CSV_PATH.to_string(),
            closed_tour: false,
        }
    }
}

impl RunConfig {
    /// Load `.env` (if present) and build the config from `TSP_*` variables.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Unparsable values are
    /// logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let location_ids = lookup("TSP_LOCATION_IDS").and_then(|raw| {
            let parsed: Result<Vec<u64>, _> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<u64>)
                .collect();
            match parsed {
                Ok(ids) => Some(ids),
                Err(e) => {
                    warn!("Ignoring TSP_LOCATION_IDS='{}': {}", raw, e);
                    None
                }
            }
        });

        let config = Self {
            locations_csv: lookup("TSP_LOCATIONS_CSV").unwrap_or(defaults.locations_csv),
            location_ids,
            location_count: parse_or(&lookup, "TSP_LOCATION_COUNT", defaults.location_count),
            generations: parse_or(&lookup, "TSP_GENERATIONS", defaults.generations),
            population_size: parse_or(&lookup, "TSP_POPULATION_SIZE", defaults.population_size),
            mutation_rate: parse_or(&lookup, "TSP_MUTATION_RATE", defaults.mutation_rate),
            crossover_rate: parse_or(&lookup, "TSP_CROSSOVER_RATE", defaults.crossover_rate),
            elite_size: parse_or(&lookup, "TSP_ELITE_SIZE", defaults.elite_size),
            seed: parse_or(&lookup, "TSP_SEED", defaults.seed),
            restarts: parse_or(&lookup, "TSP_RESTARTS", defaults.restarts).max(1),
            time_limit_secs: parse_opt(&lookup, "TSP_TIME_LIMIT_SECS"),
            results_json: lookup("TSP_RESULTS_JSON").unwrap_or(defaults.results_json),
            trace_csv: lookup("TSP_TRACE_CSV").unwrap_or(defaults.trace_csv),
            closed_tour: parse_or(&lookup, "TSP_CLOSED_TOUR", defaults.closed_tour),
        };

        debug!("Run config: {:?}", config);
        config
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_opt(lookup, key).unwrap_or(default)
}

/// `None` when the key is unset or its value does not parse (logged).
fn parse_opt<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}='{}': {}", key, raw, e);
            None
        }
    }
}
