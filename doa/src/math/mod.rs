//! Closed-form TDOA/FDOA geometry on the synthetic plane.
//!
//! All routines are pure and generic over the float type so they can
//! be evaluated in `f32` or `f64`.

mod fdoa;
mod tdoa;
mod velocity;

pub use {
    fdoa::{fdoa, fdoa_baseline, projected_rate},
    tdoa::{tdoa, tdoa_baseline},
    velocity::Velocity,
};
use geo::{algorithm::EuclideanDistance, geometry::Point, Coord, GeoFloat};

/// Euclidean distance between `a` and `b`.
#[inline]
pub fn distance<T: GeoFloat>(a: Coord<T>, b: Coord<T>) -> T {
    Point::from(a).euclidean_distance(&Point::from(b))
}

#[cfg(test)]
mod tests {
    use super::distance;
    use approx::assert_relative_eq;
    use geo::coord;

    #[test]
    fn test_distance() {
        assert_eq!(distance(coord!(x: 0.0, y: 0.0), coord!(x: 3.0, y: 4.0)), 5.0);
        assert_eq!(distance(coord!(x: 7.0, y: 7.0), coord!(x: 7.0, y: 7.0)), 0.0);
        assert_relative_eq!(
            distance(coord!(x: 10.0, y: 10.0), coord!(x: 90.0, y: 90.0)),
            113.137_084_989_847_6,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = coord!(x: 12.0_f32, y: 81.0);
        let b = coord!(x: 64.0_f32, y: 3.0);
        assert_eq!(distance(a, b), distance(b, a));
    }
}
