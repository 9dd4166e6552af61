use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::ReaderBuilder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::domain::types::Location;
use crate::error::{Result, TspError};
use crate::setup::validation::validate_catalog;

// Bounding box used for generated locations (California)
const LAT_RANGE: (f64, f64) = (32.5, 42.0);
const LON_RANGE: (f64, f64) = (-124.4, -114.1);

/// Reads locations from a CSV file with an `id,name,latitude,longitude` header.
/// Rows are validated as a whole: ranges and unique ids.
pub fn read_locations_from_csv(csv_path: impl AsRef<Path>) -> Result<Vec<Location>> {
    let file = File::open(csv_path.as_ref())?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut locations = Vec::new();
    for row in reader.deserialize() {
        let location: Location = row?;
        locations.push(location);
    }

    validate_catalog(&locations)?;
    Ok(locations)
}

/// Generates `count` named locations inside the bounding box from a fixed seed.
pub fn random_location_generator(count: usize, seed: u64) -> Vec<Location> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lat = rng.gen_range(LAT_RANGE.0..=LAT_RANGE.1);
            let lon = rng.gen_range(LON_RANGE.0..=LON_RANGE.1);
            Location::new(i as u64, format!("Stop {}", i + 1), lat, lon)
        })
        .collect()
}

/// Loads locations from CSV, falling back to `fallback_count` generated ones
/// when the file does not exist or has no rows. A file that exists but cannot
/// be read or fails validation is an error.
pub fn load_locations(csv_path: &str, fallback_count: usize, seed: u64) -> Result<Vec<Location>> {
    match read_locations_from_csv(csv_path) {
        Ok(list) if !list.is_empty() => {
            info!("Successfully loaded {} locations from {}", list.len(), csv_path);
            Ok(list)
        }
        Ok(_) => {
            warn!(
                "{} has no locations, falling back to {} generated ones",
                csv_path, fallback_count
            );
            Ok(random_location_generator(fallback_count, seed))
        }
        Err(TspError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            warn!(
                "No locations CSV at {}. Falling back to random generation.",
                csv_path
            );
            Ok(random_location_generator(fallback_count, seed))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_locations() {
        let file = write_csv(
            "id,name,latitude,longitude\n\
             0, Golden Gate Bridge ,37.8199,-122.4783\n\
             1,Alcatraz Island,37.8267,-122.4230\n",
        );
        let locations = read_locations_from_csv(file.path()).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name, "Golden Gate Bridge");
        assert_eq!(locations[1].lat, 37.8267);
        assert_eq!(locations[1].lon, -122.4230);
    }

    #[test]
    fn test_read_rejects_out_of_range_rows() {
        let file = write_csv("id,name,latitude,longitude\n0,Bad,123.0,0.0\n");
        assert!(read_locations_from_csv(file.path()).is_err());
    }

    #[test]
    fn test_read_rejects_malformed_rows() {
        let file = write_csv("id,name,latitude,longitude\nx,Bad,1.0,0.0\n");
        assert!(read_locations_from_csv(file.path()).is_err());
    }

    #[test]
    fn test_generator_is_seeded_and_in_range() {
        let a = random_location_generator(15, 64);
        let b = random_location_generator(15, 64);
        assert_eq!(a, b);
        assert!(a.iter().all(|l| (LAT_RANGE.0..=LAT_RANGE.1).contains(&l.lat)
            && (LON_RANGE.0..=LON_RANGE.1).contains(&l.lon)));
        assert!(validate_catalog(&a).is_ok());
    }

    #[test]
    fn test_load_falls_back_when_file_missing() {
        let locations = load_locations("definitely/not/here.csv", 6, 1).unwrap();
        assert_eq!(locations.len(), 6);
        assert_eq!(locations[0].name, "Stop 1");
    }

    #[test]
    fn test_load_keeps_rows_from_valid_file() {
        let file = write_csv(
            "id,name,latitude,longitude\n\
             4,Home,37.0,-122.0\n\
             5,Work,37.1,-122.1\n",
        );
        let locations = load_locations(file.path().to_str().unwrap(), 6, 1).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name, "Home");
    }

    #[test]
    fn test_load_rejects_invalid_existing_file() {
        let out_of_range = write_csv("id,name,latitude,longitude\n0,Home,123.0,0.0\n");
        let path = out_of_range.path().to_str().unwrap();
        assert!(matches!(
            load_locations(path, 6, 1),
            Err(TspError::InvalidInput(_))
        ));

        let duplicate_ids = write_csv("id,name,latitude,longitude\n1,A,1.0,1.0\n1,B,2.0,2.0\n");
        let path = duplicate_ids.path().to_str().unwrap();
        assert!(matches!(
            load_locations(path, 6, 1),
            Err(TspError::InvalidInput(_))
        ));

        let malformed = write_csv("id,name,latitude,longitude\nx,Bad,1.0,0.0\n");
        let path = malformed.path().to_str().unwrap();
        assert!(matches!(load_locations(path, 6, 1), Err(TspError::Csv(_))));
    }
}
