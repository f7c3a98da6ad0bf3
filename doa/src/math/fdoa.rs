use super::distance;
use geo::{Coord, GeoFloat};

/// Returns the emitter velocity `v` projected onto the unit vector
/// from receiver `r` towards `p`.
///
/// When `p` coincides with `r` the direction is undefined and the
/// projection is `0`.
#[inline]
pub fn projected_rate<T: GeoFloat>(p: Coord<T>, r: Coord<T>, v: Coord<T>) -> T {
    let range = distance(p, r);
    if range == T::zero() {
        return T::zero();
    }
    (v.x * (p.x - r.x) + v.y * (p.y - r.y)) / range
}

/// Returns how far the projected-rate difference at `p` deviates from
/// the difference at the true emitter location.
#[inline]
pub fn fdoa<T: GeoFloat>(
    p: Coord<T>,
    v: Coord<T>,
    r1: Coord<T>,
    r2: Coord<T>,
    f1_true: T,
    f2_true: T,
) -> T {
    projected_rate(p, r1, v) - projected_rate(p, r2, v) - (f1_true - f2_true)
}

/// Returns `(f1_true, f2_true)`, the emitter's projected rate towards
/// each receiver.
#[inline]
pub fn fdoa_baseline<T: GeoFloat>(
    r1: Coord<T>,
    r2: Coord<T>,
    emitter: Coord<T>,
    v: Coord<T>,
) -> (T, T) {
    (projected_rate(emitter, r1, v), projected_rate(emitter, r2, v))
}
