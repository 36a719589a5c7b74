//! Great-circle distance between coordinates.

use geo::{Distance, HaversineMeasure, Point};

use super::Coordinates;

/// Mean Earth radius used for straight-line distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_M);

/// Returns the great-circle distance between two positions, in meters.
///
/// Identical positions are exactly zero apart.
///
/// # Examples
///
/// ```
/// use transit_server::domain::{Coordinates, great_circle_distance};
///
/// let a = Coordinates::new(0.0, 0.0);
/// let b = Coordinates::new(0.0, 1.0);
/// let d = great_circle_distance(a, b);
/// assert!((d - 111_194.9).abs() < 1.0);
/// ```
pub fn great_circle_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }
    EARTH.distance(Point::from(from), Point::from(to))
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.lng, c.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        let p = Coordinates::new(55.611087, 37.20829);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_on_equator() {
        let d = great_circle_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn matches_law_of_cosines_on_nearby_stops() {
        let a = Coordinates::new(55.611087, 37.20829);
        let b = Coordinates::new(55.595884, 37.209755);
        let d = great_circle_distance(a, b);
        assert!((d - 1692.9993987670864).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn points_take_longitude_as_x() {
        let p = Point::from(Coordinates::new(10.0, 20.0));
        assert_eq!(p.x(), 20.0);
        assert_eq!(p.y(), 10.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(55.595884, 37.209755);
        let b = Coordinates::new(55.632761, 37.333324);
        assert!((great_circle_distance(a, b) - great_circle_distance(b, a)).abs() < 1e-9);
    }
}
