use tracing::{debug, info};

use crate::distance::matrix::{print_dist_matrix, DistanceMatrix};
use crate::domain::types::{Location, ProblemInstance};
use crate::error::{Result, TspError};
use crate::setup::validation::{select_locations, MIN_LOCATIONS};

/// Validate the selected ids against the catalog and build the problem over them.
pub fn setup(catalog: &[Location], selected_ids: &[u64]) -> Result<ProblemInstance> {
    info!(
        "Starting setup with {} selected of {} catalog locations",
        selected_ids.len(),
        catalog.len()
    );

    let locations = select_locations(catalog, selected_ids)?;
    build_instance(locations)
}

/// Build the problem over every given location, in order.
pub fn setup_all(locations: Vec<Location>) -> Result<ProblemInstance> {
    if locations.len() < MIN_LOCATIONS {
        return Err(TspError::invalid_input(format!(
            "need at least {} locations for route optimization, got {}",
            MIN_LOCATIONS,
            locations.len()
        )));
    }
    build_instance(locations)
}

fn build_instance(locations: Vec<Location>) -> Result<ProblemInstance> {
    let coordinates: Vec<(f64, f64)> = locations.iter().map(Location::coordinate).collect();
    debug!("Selected coordinates: {:?}", coordinates);

    let distance_matrix = DistanceMatrix::build(&coordinates)?;
    print_dist_matrix(&distance_matrix);

    info!("Setup completed successfully");
    Ok(ProblemInstance {
        locations,
        distance_matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Location> {
        vec![
            Location::new(10, "A", 0.0, 0.0),
            Location::new(11, "B", 0.0, 1.0),
            Location::new(12, "C", 1.0, 1.0),
        ]
    }

    #[test]
    fn test_setup_builds_matrix_over_selection() {
        let instance = setup(&catalog(), &[12, 10]).unwrap();
        assert_eq!(instance.size(), 2);
        assert_eq!(instance.locations[0].id, 12);
        assert_eq!(instance.distance_matrix.size(), 2);
        assert!(instance.distance_matrix.get(0, 1) > 0.0);
    }

    #[test]
    fn test_setup_all_requires_two_locations() {
        assert!(setup_all(vec![Location::new(1, "solo", 0.0, 0.0)]).is_err());
        assert!(setup_all(catalog()).is_ok());
    }

    #[test]
    fn test_setup_all_reports_bad_coordinate() {
        let mut locations = catalog();
        locations[1].lat = -100.0;
        assert!(matches!(
            setup_all(locations),
            Err(TspError::InvalidCoordinate { index: 1, .. })
        ));
    }
}
