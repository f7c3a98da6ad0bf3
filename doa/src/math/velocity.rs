use geo::{Coord, CoordFloat};

/// Emitter velocity as speed and heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity<T = f64> {
    /// Speed in meters/second.
    pub speed: T,

    /// Heading in degrees, counter-clockwise from +x.
    pub direction_deg: T,
}

impl<T: CoordFloat> Velocity<T> {
    pub fn new(speed: T, direction_deg: T) -> Self {
        Self {
            speed,
            direction_deg,
        }
    }

    /// Returns `(vx, vy)`.
    pub fn components(&self) -> Coord<T> {
        let (sin, cos) = self.direction_deg.to_radians().sin_cos();
        Coord {
            x: self.speed * cos,
            y: self.speed * sin,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.speed.is_finite() && self.direction_deg.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::Velocity;
    use approx::assert_relative_eq;

    #[test]
    fn test_components() {
        let east = Velocity::new(10.0, 0.0).components();
        assert_eq!((east.x, east.y), (10.0, 0.0));

        let north = Velocity::new(10.0, 90.0).components();
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(north.y, 10.0);

        let south_west = Velocity::new(2.0_f64.sqrt(), 225.0).components();
        assert_relative_eq!(south_west.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(south_west.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_speed() {
        let c = Velocity::new(0.0, 123.0).components();
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, 0.0);
        assert_eq!(Velocity::<f64>::default(), Velocity::new(0.0, 0.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Velocity::new(1.0, 359.0).is_finite());
        assert!(!Velocity::new(f64::NAN, 0.0).is_finite());
        assert!(!Velocity::new(1.0, f64::INFINITY).is_finite());
    }
}
