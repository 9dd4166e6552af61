use crate::config::constant::EARTH_RADIUS_KM;

/// Great-circle distance in kilometers between two `(lat, lon)` points given in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km((37.77, -122.42), (37.77, -122.42)), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // pi * R / 180
        let d = haversine_km((0.0, 0.0), (1.0, 0.0));
        assert!((d - 111.19492664455873).abs() < 1e-9, "got {}", d);
    }

    #[test]
    fn test_known_city_pair() {
        // San Francisco -> Los Angeles, roughly 559 km great-circle
        let d = haversine_km((37.7749, -122.4194), (34.0522, -118.2437));
        assert!((d - 559.0).abs() < 2.0, "got {}", d);
    }

    #[test]
    fn test_antipodal_points() {
        let d = haversine_km((0.0, 0.0), (0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_coordinate_ranges() {
        assert!(is_valid_coordinate(90.0, -180.0));
        assert!(is_valid_coordinate(-90.0, 180.0));
        assert!(!is_valid_coordinate(90.5, 0.0));
        assert!(!is_valid_coordinate(0.0, -180.1));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
    }
}
