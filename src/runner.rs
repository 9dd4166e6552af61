use std::error::Error;
use std::path::Path;
use std::time::Duration;

use colored::*;
use csv::Writer;
use dotenv::dotenv;
use tracing::{info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::route_api::{export_results_to_json, RouteOptimizationApi};
use crate::config::constant::BASELINE_ROUTES;
use crate::config::RunConfig;
use crate::domain::solution::RouteResult;
use crate::domain::types::{Location, TourKind};
use crate::evaluation::stats::improvement_percentage;
use crate::fixtures::data_generator::load_locations;
use crate::solver::baseline::BaselineReport;
use crate::solver::genetic::GaConfig;
use crate::solver::restarts::RunPlan;

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .try_init()?;

    dotenv().ok();
    Ok(())
}

pub fn plan_from_config(config: &RunConfig) -> RunPlan {
    let tour_kind = if config.closed_tour {
        TourKind::Cycle
    } else {
        TourKind::Path
    };
    let ga = GaConfig::default()
        .with_population_size(config.population_size)
        .with_mutation_rate(config.mutation_rate)
        .with_crossover_rate(config.crossover_rate)
        .with_elite_size(config.elite_size)
        .with_tour_kind(tour_kind);

    RunPlan {
        ga,
        generations: config.generations,
        seed: Some(config.seed),
        restarts: config.restarts,
        time_limit: config
            .time_limit_secs
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64),
    }
}

/// Configured ids, or the first `location_count` of the catalog.
pub fn select_ids(config: &RunConfig, catalog: &[Location]) -> Vec<u64> {
    match &config.location_ids {
        Some(ids) => ids.clone(),
        None => catalog
            .iter()
            .take(config.location_count)
            .map(|l| l.id)
            .collect(),
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;
    let config = RunConfig::from_env();

    let catalog = load_locations(&config.locations_csv, config.location_count, config.seed)?;
    let api = RouteOptimizationApi::new(catalog)?;
    let ids = select_ids(&config, api.get_all_locations());
    let plan = plan_from_config(&config);

    info!(
        "Starting TSP solver with {} locations, {} generations and {} restart(s)",
        ids.len(),
        plan.generations,
        plan.restarts
    );

    let response = {
        let span = span!(Level::INFO, "optimization");
        let _guard = span.enter();
        api.optimize_route(&ids, &plan)?
    };

    // Offset so the baseline never shares a stream with restart 0.
    let baseline_seed = config.seed.wrapping_add(plan.restarts as u64);
    let baseline = api.baseline_report(
        &ids,
        Some(BASELINE_ROUTES),
        Some(baseline_seed),
        plan.ga.tour_kind,
    )?;

    print_summary(&response.optimized_route, &baseline);

    save_to_csv(&response.optimized_route.trace, &config.trace_csv)?;
    export_results_to_json(&response, &config.results_json)?;

    Ok(())
}

fn save_to_csv(trace: &[f64], filename: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename.as_ref())?;

    wtr.write_record(["generation", "candidate_distance", "best_distance"])?;

    let mut best = f64::INFINITY;
    for (generation, candidate) in trace.iter().enumerate() {
        best = best.min(*candidate);
        wtr.write_record([
            generation.to_string(),
            candidate.to_string(),
            best.to_string(),
        ])?;
    }

    wtr.flush()?;
    info!("Generation trace saved to {}", filename.as_ref().display());
    Ok(())
}

fn print_summary(route: &RouteResult, baseline: &BaselineReport) {
    println!("{}", "Optimized route".bold());
    for (step, (id, name)) in route
        .location_ids
        .iter()
        .zip(&route.location_names)
        .enumerate()
    {
        println!("  {:>3}. [{}] {}", step + 1, id, name);
    }

    println!(
        "{}",
        format!("Distance: {:.2} km", route.total_distance).green()
    );
    println!("Time: {:.3} s", route.execution_time);
    println!(
        "Random baseline ({} routes): mean {:.2} km, std {:.2}, best {:.2} km",
        baseline.num_routes,
        baseline.mean_distance,
        baseline.std_distance,
        baseline.best_distance
    );

    let improvement = improvement_percentage(baseline.mean_distance, route.total_distance);
    if improvement > 0.0 {
        println!(
            "{}",
            format!("Improvement over random mean: {:.1}%", improvement).green()
        );
    } else {
        warn!("Optimized route is no better than the random mean");
        println!(
            "{}",
            format!("Improvement over random mean: {:.1}%", improvement).red()
        );
    }
}
