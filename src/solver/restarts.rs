use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::distance::matrix::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::solver::genetic::{GaConfig, GeneticOptimizer, OptimizeOutcome};

/// How to run the optimizer over one matrix.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub ga: GaConfig,
    pub generations: usize,
    /// Restart `i` is seeded with `seed + i`; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Independent optimizer instances run in parallel; the shortest wins.
    pub restarts: usize,
    /// Wall-clock budget per restart, checked between generations.
    pub time_limit: Option<Duration>,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            generations: crate::config::constant::GENERATIONS,
            seed: None,
            restarts: 1,
            time_limit: None,
        }
    }
}

/// Run one optimizer with a fresh tracker and random source.
pub fn run_single(
    dm: &DistanceMatrix,
    plan: &RunPlan,
    restart_index: usize,
) -> Result<OptimizeOutcome> {
    let mut optimizer = match plan.seed {
        Some(seed) => {
            GeneticOptimizer::with_seed(plan.ga.clone(), seed.wrapping_add(restart_index as u64))?
        }
        None => GeneticOptimizer::from_entropy(plan.ga.clone())?,
    };

    let outcome = match plan.time_limit {
        Some(limit) => {
            let deadline = Instant::now() + limit;
            optimizer.optimize_with(dm, plan.generations, |_| {
                if Instant::now() >= deadline {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
        }
        None => optimizer.optimize(dm, plan.generations),
    };

    if outcome.generations_run < plan.generations {
        warn!(
            "Restart {} hit its time limit after {} of {} generations",
            restart_index, outcome.generations_run, plan.generations
        );
    }
    Ok(outcome)
}

/// Run `plan.restarts` independent optimizers over the shared matrix in
/// parallel and keep the shortest route. `elapsed_secs` covers the whole batch.
pub fn optimize_with_restarts(dm: &DistanceMatrix, plan: &RunPlan) -> Result<OptimizeOutcome> {
    plan.ga.validate()?;
    let restarts = plan.restarts.max(1);
    if restarts == 1 {
        return run_single(dm, plan, 0);
    }

    let start_time = Instant::now();
    let outcomes: Vec<OptimizeOutcome> = (0..restarts)
        .into_par_iter()
        .map(|i| run_single(dm, plan, i))
        .collect::<Result<Vec<_>>>()?;

    let (best_index, mut best) = outcomes
        .into_iter()
        .enumerate()
        .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
        .ok_or_else(|| TspError::invalid_input("no restart produced a route"))?;

    best.elapsed_secs = start_time.elapsed().as_secs_f64();
    info!(
        "Best of {} restarts is #{} at {:.2} km",
        restarts, best_index, best.distance
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_permutation;

    fn matrix() -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..8)
            .map(|i| ((i as f64 * 0.7).sin(), (i as f64 * 1.3).cos()))
            .collect();
        DistanceMatrix::build(&coords).unwrap()
    }

    #[test]
    fn test_restarts_pick_the_shortest() {
        let dm = matrix();
        let plan = RunPlan {
            generations: 20,
            seed: Some(10),
            restarts: 4,
            ..RunPlan::default()
        };
        let best = optimize_with_restarts(&dm, &plan).unwrap();
        assert!(is_permutation(&best.route, 8));

        for i in 0..4 {
            let single = run_single(&dm, &plan, i).unwrap();
            assert!(best.distance <= single.distance);
        }
    }

    #[test]
    fn test_invalid_plan_is_rejected() {
        let dm = matrix();
        let plan = RunPlan {
            ga: GaConfig::default().with_elite_size(50),
            restarts: 3,
            ..RunPlan::default()
        };
        assert!(optimize_with_restarts(&dm, &plan).is_err());
    }

    #[test]
    fn test_zero_time_limit_stops_after_first_generation() {
        let dm = matrix();
        let plan = RunPlan {
            generations: 500,
            seed: Some(1),
            time_limit: Some(Duration::ZERO),
            ..RunPlan::default()
        };
        let outcome = run_single(&dm, &plan, 0).unwrap();
        assert_eq!(outcome.generations_run, 1);
    }
}
