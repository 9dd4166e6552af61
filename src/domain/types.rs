use serde::{Deserialize, Serialize};

use crate::distance::matrix::DistanceMatrix;

/// A visiting order: a permutation of `0..n` over the problem's locations.
pub type Route = Vec<usize>;

/// One generation's worth of candidate routes.
pub type Population = Vec<Route>;

/// `(index into population, fitness)` as produced by ranking.
pub type RankedIndividual = (usize, f64);

/// How a route is measured. `Path` is the default everywhere; `Cycle` adds the
/// edge from the last location back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TourKind {
    #[default]
    Path,
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lon: f64,
}

impl Location {
    pub fn new(id: u64, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lon,
        }
    }

    pub fn coordinate(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Best route seen by one optimizer. Distance only ever decreases.
#[derive(Debug, Clone)]
pub struct BestTracker {
    pub route: Route,
    pub distance: f64,
}

impl Default for BestTracker {
    fn default() -> Self {
        Self {
            route: Vec::new(),
            distance: f64::INFINITY,
        }
    }
}

impl BestTracker {
    /// Replace the tracked route only on strict improvement.
    pub fn offer(&mut self, route: &[usize], distance: f64) -> bool {
        if distance < self.distance {
            self.route = route.to_vec();
            self.distance = distance;
            true
        } else {
            false
        }
    }
}

/// Validated selection of locations plus the matrix built over them.
/// Index `i` in every route refers to `locations[i]`.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub locations: Vec<Location>,
    pub distance_matrix: DistanceMatrix,
}

impl ProblemInstance {
    pub fn size(&self) -> usize {
        self.locations.len()
    }
}
