use itertools::Itertools;
use tracing::{debug, info, trace};

use crate::distance::haversine::{haversine_km, is_valid_coordinate};
use crate::error::{Result, TspError};

/// Symmetric great-circle distance matrix in kilometers.
///
/// Built once per coordinate set and read-only afterwards, so one matrix can be
/// shared by any number of concurrent optimizer runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build the matrix from `(lat, lon)` pairs in degrees.
    pub fn build(coordinates: &[(f64, f64)]) -> Result<Self> {
        for (index, &(lat, lon)) in coordinates.iter().enumerate() {
            if !is_valid_coordinate(lat, lon) {
                return Err(TspError::InvalidCoordinate { index, lat, lon });
            }
        }

        let n = coordinates.len();
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(coordinates[i], coordinates[j]);
                if !d.is_finite() {
                    return Err(TspError::NonFiniteDistance { from: i, to: j });
                }
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }

        info!("Distance matrix calculated for {} locations", n);
        Ok(Self { rows })
    }

    /// Wrap an externally supplied matrix (for example a road-distance table).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(TspError::invalid_input(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(TspError::invalid_input(format!(
                        "entry ({}, {}) = {} is not a finite non-negative distance",
                        i, j, d
                    )));
                }
            }
            if row[i] != 0.0 {
                return Err(TspError::invalid_input(format!(
                    "diagonal entry ({}, {}) must be 0",
                    i, i
                )));
            }
        }

        debug!("Accepted explicit {}x{} distance matrix", n, n);
        Ok(Self { rows })
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Length of the open path through `route`. No edge back to the start.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        route
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| self.rows[a][b])
            .sum()
    }

    /// Length of the closed tour through `route`, including the return edge.
    pub fn closed_route_distance(&self, route: &[usize]) -> f64 {
        match (route.first(), route.last()) {
            (Some(&first), Some(&last)) if route.len() > 1 => {
                self.route_distance(route) + self.rows[last][first]
            }
            _ => 0.0,
        }
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.rows[i][j] - self.rows[j][i]).abs() <= tol))
    }
}

// Dump the matrix for debugging
pub fn print_dist_matrix(dm: &DistanceMatrix) {
    trace!("Distance matrix:");
    for row in dm.rows() {
        trace!("{:?}", row);
    }
}
