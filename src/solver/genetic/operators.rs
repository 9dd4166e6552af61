use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::domain::types::Route;

/// Ordered crossover (OX) with probability `crossover_rate`; otherwise an owned
/// copy of `parent1`.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    crossover_rate: f64,
    rng: &mut R,
) -> Route {
    if rng.gen::<f64>() >= crossover_rate {
        return parent1.to_vec();
    }
    ordered_crossover(parent1, parent2, rng)
}

/// Copy `parent1[start..end]` in place and fill the other positions, left to
/// right, with the genes of `parent2` that are not in that slice.
pub fn ordered_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Route {
    let n = parent1.len();
    if n < 2 || parent2.len() != n {
        return parent1.to_vec();
    }

    let mut cuts: Vec<usize> = (0..n).choose_multiple(rng, 2);
    cuts.sort_unstable();
    ordered_crossover_at(parent1, parent2, cuts[0], cuts[1])
}

pub(crate) fn ordered_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Route {
    let n = parent1.len();
    let inherited: HashSet<usize> = parent1[start..end].iter().copied().collect();
    let mut fill = parent2.iter().copied().filter(|gene| !inherited.contains(gene));

    let mut child: Route = Vec::with_capacity(n);
    child.extend(fill.by_ref().take(start));
    child.extend_from_slice(&parent1[start..end]);
    child.extend(fill);
    child
}

/// Swap two distinct random positions with probability `mutation_rate`.
/// Returns whether a swap happened.
pub fn mutate<R: Rng + ?Sized>(route: &mut Route, mutation_rate: f64, rng: &mut R) -> bool {
    if rng.gen::<f64>() < mutation_rate {
        swap_mutation(route, rng)
    } else {
        false
    }
}

pub fn swap_mutation<R: Rng + ?Sized>(route: &mut Route, rng: &mut R) -> bool {
    let n = route.len();
    if n < 2 {
        return false;
    }

    let pair: Vec<usize> = (0..n).choose_multiple(rng, 2);
    route.swap(pair[0], pair[1]);
    true
}
