use itertools::Itertools;
use serde::Serialize;

use crate::distance::matrix::DistanceMatrix;
use crate::evaluation::fitness::dist_between;

/// Per-segment breakdown of an open route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStatistics {
    pub total_distance: f64,
    pub num_locations: usize,
    pub segment_distances: Vec<f64>,
    pub avg_segment_distance: f64,
    pub max_segment_distance: f64,
    pub min_segment_distance: f64,
}

pub fn route_statistics(route: &[usize], dm: &DistanceMatrix) -> RouteStatistics {
    let segment_distances: Vec<f64> = route
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| dist_between(a, b, dm))
        .collect();

    let summary = DistanceSummary::from_values(&segment_distances);
    RouteStatistics {
        total_distance: dm.route_distance(route),
        num_locations: route.len(),
        avg_segment_distance: summary.mean,
        max_segment_distance: summary.max,
        min_segment_distance: summary.min,
        segment_distances,
    }
}

/// Mean / population standard deviation / extremes of a set of distances.
/// All fields are 0 for an empty input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl DistanceSummary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            std: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Percentage by which `optimized` undercuts `reference`. 0 when the reference is 0.
pub fn improvement_percentage(reference: f64, optimized: f64) -> f64 {
    if reference > 0.0 {
        (reference - optimized) / reference * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_values() {
        let s = DistanceSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std, 2.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn test_summary_of_nothing() {
        let s = DistanceSummary::from_values(&[]);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.max, 0.0);
    }

    #[test]
    fn test_route_statistics_segments() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 3.0],
            vec![1.0, 0.0, 2.0],
            vec![3.0, 2.0, 0.0],
        ])
        .unwrap();
        let stats = route_statistics(&[2, 0, 1], &dm);
        assert_eq!(stats.segment_distances, vec![3.0, 1.0]);
        assert_eq!(stats.total_distance, 4.0);
        assert_eq!(stats.num_locations, 3);
        assert_eq!(stats.avg_segment_distance, 2.0);
        assert_eq!(stats.max_segment_distance, 3.0);
        assert_eq!(stats.min_segment_distance, 1.0);
    }

    #[test]
    fn test_improvement_percentage() {
        assert_eq!(improvement_percentage(200.0, 150.0), 25.0);
        assert_eq!(improvement_percentage(0.0, 0.0), 0.0);
    }
}
