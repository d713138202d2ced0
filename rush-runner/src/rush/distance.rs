//! Great-circle distance between two positions.

use crate::domain::Coordinates;

/// Mean earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in metres.
///
/// # Examples
///
/// ```
/// use rush_runner::domain::Coordinates;
/// use rush_runner::rush::distance_m;
///
/// let a = Coordinates::new(0.0, 0.0).unwrap();
/// let b = Coordinates::new(0.0, 1.0).unwrap();
/// let d = distance_m(a, b);
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
pub fn distance_m(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let delta_phi = (to.latitude() - from.latitude()).to_radians();
    let delta_lambda = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let p = coords(35.6812, 139.7671);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn tokyo_to_shinjuku() {
        let tokyo = coords(35.6812, 139.7671);
        let shinjuku = coords(35.6896, 139.7006);
        let d = distance_m(tokyo, shinjuku);
        assert!((d - 6078.2).abs() < 1.0, "{d}");
    }

    #[test]
    fn short_hop_along_meridian() {
        let d = distance_m(coords(35.6812, 139.7671), coords(35.6830, 139.7671));
        assert!((d - 200.15).abs() < 0.1, "{d}");
    }

    #[test]
    fn antipodal_on_equator() {
        let d = distance_m(coords(0.0, 0.0), coords(0.0, 180.0));
        assert!((d - 20_015_086.8).abs() < 1.0, "{d}");
    }

    #[test]
    fn symmetric() {
        let a = coords(51.5308, -0.1238);
        let b = coords(51.5282, -0.1337);
        assert!((distance_m(a, b) - distance_m(b, a)).abs() < 1e-9);
    }
}
