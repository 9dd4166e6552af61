use crate::domain::types::Location;

/// True when `route` visits every index in `0..n` exactly once.
pub fn is_permutation(route: &[usize], n: usize) -> bool {
    if route.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &idx in route {
        if idx >= n || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Reorder caller-side locations by an index permutation.
pub fn locations_in_order<'a>(route: &[usize], locations: &'a [Location]) -> Vec<&'a Location> {
    route.iter().map(|&i| &locations[i]).collect()
}

/// Position of each location index within `route`.
pub fn positions(route: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; route.len()];
    for (p, &idx) in route.iter().enumerate() {
        if let Some(slot) = pos.get_mut(idx) {
            *slot = p;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }

    #[test]
    fn test_locations_in_order() {
        let locations = vec![
            Location::new(10, "a", 0.0, 0.0),
            Location::new(20, "b", 1.0, 1.0),
        ];
        let ordered = locations_in_order(&[1, 0], &locations);
        assert_eq!(ordered[0].id, 20);
        assert_eq!(ordered[1].id, 10);
    }

    #[test]
    fn test_positions() {
        assert_eq!(positions(&[2, 0, 1]), vec![1, 2, 0]);
    }
}
