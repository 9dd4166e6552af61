use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::types::RankedIndividual;

/// Build the mating pool as indices into the current population.
///
/// The first `elite_size` slots are the top of `ranked`; the rest are
/// tournament winners drawn from the whole ranked list.
pub fn select_mating_indices<R: Rng + ?Sized>(
    ranked: &[RankedIndividual],
    population_size: usize,
    elite_size: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut selection: Vec<usize> = ranked.iter().take(elite_size).map(|&(i, _)| i).collect();

    for _ in elite_size..population_size {
        if let Some(winner) = tournament(ranked, tournament_size, rng) {
            selection.push(winner);
        }
    }

    selection
}

/// Sample `size` distinct entries and return the fittest one's index.
/// The earliest sampled entry wins a tie.
pub fn tournament<R: Rng + ?Sized>(
    ranked: &[RankedIndividual],
    size: usize,
    rng: &mut R,
) -> Option<usize> {
    ranked
        .choose_multiple(rng, size)
        .fold(None, |best: Option<&RankedIndividual>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map(|&(i, _)| i)
}
