use crate::config::constant::FITNESS_EPSILON;
use crate::distance::matrix::DistanceMatrix;
use crate::domain::types::TourKind;

pub fn find_fitness(route: &[usize], dm: &DistanceMatrix, tour_kind: TourKind) -> f64 {
    1.0 / (find_distance(route, dm, tour_kind) + FITNESS_EPSILON)
}

pub fn find_distance(route: &[usize], dm: &DistanceMatrix, tour_kind: TourKind) -> f64 {
    match tour_kind {
        TourKind::Path => dm.route_distance(route),
        TourKind::Cycle => dm.closed_route_distance(route),
    }
}

pub fn dist_between(from_loc: usize, to_loc: usize, dm: &DistanceMatrix) -> f64 {
    dm.get(from_loc, to_loc)
}
