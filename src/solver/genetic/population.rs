use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::{Population, RankedIndividual, Route, TourKind};
use crate::evaluation::fitness::find_fitness;

/// Uniformly random permutation of `0..num_locations`.
pub fn random_route<R: Rng + ?Sized>(num_locations: usize, rng: &mut R) -> Route {
    let mut route: Route = (0..num_locations).collect();
    route.shuffle(rng);
    route
}

pub fn initial_population<R: Rng + ?Sized>(
    population_size: usize,
    num_locations: usize,
    rng: &mut R,
) -> Population {
    (0..population_size)
        .map(|_| random_route(num_locations, rng))
        .collect()
}

/// Rank a population by fitness, best first. The sort is stable, so equal
/// fitness keeps ascending population index.
pub fn rank_population(
    population: &[Route],
    dm: &DistanceMatrix,
    tour_kind: TourKind,
) -> Vec<RankedIndividual> {
    let mut ranked: Vec<RankedIndividual> = population
        .iter()
        .enumerate()
        .map(|(i, route)| (i, find_fitness(route, dm, tour_kind)))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}
