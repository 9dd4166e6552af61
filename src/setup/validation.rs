//! Input checks run before any optimizer state exists.
//!
//! Everything here returns `TspError::InvalidInput`: too few locations,
//! unknown or repeated ids, coordinates outside their ranges.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::distance::haversine::is_valid_coordinate;
use crate::domain::types::Location;
use crate::error::{Result, TspError};

pub const MIN_LOCATIONS: usize = 2;

pub fn validate_location(location: &Location) -> Result<()> {
    if !is_valid_coordinate(location.lat, location.lon) {
        return Err(TspError::invalid_input(format!(
            "location {} ('{}') has invalid coordinates ({}, {})",
            location.id, location.name, location.lat, location.lon
        )));
    }
    Ok(())
}

/// Every location in range and every id unique.
pub fn validate_catalog(locations: &[Location]) -> Result<()> {
    let mut ids = HashSet::new();
    for location in locations {
        validate_location(location)?;
        if !ids.insert(location.id) {
            return Err(TspError::invalid_input(format!(
                "duplicate location id {}",
                location.id
            )));
        }
    }
    Ok(())
}

/// Resolve `ids` against `catalog`, keeping the order of `ids`.
pub fn select_locations(catalog: &[Location], ids: &[u64]) -> Result<Vec<Location>> {
    if ids.len() < MIN_LOCATIONS {
        return Err(TspError::invalid_input(format!(
            "need at least {} locations for route optimization, got {}",
            MIN_LOCATIONS,
            ids.len()
        )));
    }

    let by_id: HashMap<u64, &Location> = catalog.iter().map(|l| (l.id, l)).collect();
    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(ids.len());

    for id in ids {
        if !seen.insert(*id) {
            return Err(TspError::invalid_input(format!(
                "location id {} selected twice",
                id
            )));
        }
        match by_id.get(id) {
            Some(location) => {
                validate_location(location)?;
                selected.push((*location).clone());
            }
            None => {
                warn!("Unknown location id {} requested", id);
                return Err(TspError::invalid_input(format!("unknown location id {}", id)));
            }
        }
    }

    Ok(selected)
}
