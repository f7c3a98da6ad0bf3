use super::distance;
use geo::{Coord, GeoFloat};

/// Returns how far the range difference at `p` deviates from the
/// range difference at the true emitter location.
///
/// The result is `dist(p, r1) - dist(p, r2) - (d1_true - d2_true)`,
/// so the zero contour is the hyperbola branch passing through the
/// emitter.
#[inline]
pub fn tdoa<T: GeoFloat>(p: Coord<T>, r1: Coord<T>, r2: Coord<T>, d1_true: T, d2_true: T) -> T {
    distance(p, r1) - distance(p, r2) - (d1_true - d2_true)
}

/// Returns `(d1_true, d2_true)`, the emitter's distance to each
/// receiver.
#[inline]
pub fn tdoa_baseline<T: GeoFloat>(r1: Coord<T>, r2: Coord<T>, emitter: Coord<T>) -> (T, T) {
    (distance(emitter, r1), distance(emitter, r2))
}
