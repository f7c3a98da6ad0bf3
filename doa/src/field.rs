use crate::{
    error::DoaError,
    math::{fdoa, fdoa_baseline, tdoa, tdoa_baseline, Velocity},
};
use geo::Coord;
use itertools::Itertools;
use log::debug;
use std::{fmt, str::FromStr, time::Instant};

/// Largest grid coordinate on either axis.
pub const GRID_MAX: u16 = 100;

/// Number of grid cells along one axis.
pub const GRID_LEN: usize = GRID_MAX as usize + 1;

/// Number of samples in a complete field.
pub const FIELD_LEN: usize = GRID_LEN * GRID_LEN;

/// Which difference-of-arrival relation a field evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum PlotMode {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "tdoa"))]
    Tdoa,
    #[cfg_attr(feature = "serde", serde(alias = "fdoa"))]
    Fdoa,
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tdoa => f.write_str("TDOA"),
            Self::Fdoa => f.write_str("FDOA"),
        }
    }
}

impl FromStr for PlotMode {
    type Err = DoaError;
    fn from_str(s: &str) -> Result<Self, DoaError> {
        if s.eq_ignore_ascii_case("tdoa") {
            Ok(Self::Tdoa)
        } else if s.eq_ignore_ascii_case("fdoa") {
            Ok(Self::Fdoa)
        } else {
            Err(DoaError::PlotMode(s.to_owned()))
        }
    }
}

/// One grid cell of a [`ContourField`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub x: u16,
    pub y: u16,
    pub value: f64,
}

/// A dense TDOA or FDOA field over the `[0,100]×[0,100]` integer
/// grid, ordered by `x` then `y`.
///
/// A field is either complete ([`FIELD_LEN`] samples) or empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourField {
    mode: PlotMode,
    samples: Vec<Sample>,
}

impl ContourField {
    /// Returns a field with no samples.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ContourFieldBuilder {
        ContourFieldBuilder {
            mode: PlotMode::default(),
            receivers: Vec::with_capacity(2),
            emitter: None,
            velocity: Velocity::default(),
        }
    }

    /// The mode this field was computed for.
    pub fn mode(&self) -> PlotMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Returns the value at grid cell `(x, y)`, or `None` if the field
    /// is empty or the cell is off the grid.
    pub fn get(&self, x: u16, y: u16) -> Option<f64> {
        if x > GRID_MAX || y > GRID_MAX {
            return None;
        }
        self.samples
            .get(usize::from(x) * GRID_LEN + usize::from(y))
            .map(|sample| sample.value)
    }

    /// Returns the samples within `tolerance` of zero, a coarse trace
    /// of the zero contour.
    pub fn near_zero(&self, tolerance: f64) -> impl Iterator<Item = &Sample> + '_ {
        self.samples
            .iter()
            .filter(move |sample| sample.value.abs() <= tolerance)
    }
}

impl<'a> IntoIterator for &'a ContourField {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

pub struct ContourFieldBuilder {
    /// Relation to evaluate (defaults to TDOA).
    mode: PlotMode,

    /// Exactly two receivers (required).
    receivers: Vec<Coord<f64>>,

    /// True emitter location (required).
    emitter: Option<Coord<f64>>,

    /// Emitter velocity (defaults to stationary, only used by FDOA).
    velocity: Velocity,
}

impl ContourFieldBuilder {
    #[must_use]
    pub fn mode(mut self, mode: PlotMode) -> Self {
        self.mode = mode;
        self
    }

    /// Appends a receiver; call exactly twice. Coordinates are
    /// rounded to the grid when built.
    #[must_use]
    pub fn receiver(mut self, coord: Coord<f64>) -> Self {
        self.receivers.push(coord);
        self
    }

    #[must_use]
    pub fn emitter(mut self, coord: Coord<f64>) -> Self {
        self.emitter = Some(coord);
        self
    }

    #[must_use]
    pub fn velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn build(&self) -> Result<ContourField, DoaError> {
        let [r1, r2] = <[Coord<f64>; 2]>::try_from(self.receivers.as_slice())
            .map_err(|_| DoaError::Builder("receivers"))?;
        let receivers = [snap(r1.x, r1.y)?, snap(r2.x, r2.y)?];
        let emitter = self.emitter.ok_or(DoaError::Builder("emitter"))?;
        let emitter = snap(emitter.x, emitter.y)?;
        for (name, value) in [
            ("velocity", self.velocity.speed),
            ("direction", self.velocity.direction_deg),
        ] {
            if !value.is_finite() {
                return Err(DoaError::NonFinite { name, value });
            }
        }
        Ok(generate_field(self.mode, receivers, emitter, self.velocity))
    }
}

/// Evaluates `mode` at every cell of the grid.
///
/// The true baseline is taken from `emitter`, which pins the zero
/// contour to the emitter location. Every call recomputes the whole
/// field.
pub fn generate_field(
    mode: PlotMode,
    receivers: [Coord<f64>; 2],
    emitter: Coord<f64>,
    velocity: Velocity,
) -> ContourField {
    let now = Instant::now();
    let [r1, r2] = receivers;
    let cells = (0..=GRID_MAX).cartesian_product(0..=GRID_MAX);

    let samples: Vec<Sample> = match mode {
        PlotMode::Tdoa => {
            let (d1_true, d2_true) = tdoa_baseline(r1, r2, emitter);
            cells
                .map(|(x, y)| Sample {
                    x,
                    y,
                    value: tdoa(cell(x, y), r1, r2, d1_true, d2_true),
                })
                .collect()
        }
        PlotMode::Fdoa => {
            let v = velocity.components();
            let (f1_true, f2_true) = fdoa_baseline(r1, r2, emitter, v);
            cells
                .map(|(x, y)| Sample {
                    x,
                    y,
                    value: fdoa(cell(x, y), v, r1, r2, f1_true, f2_true),
                })
                .collect()
        }
    };

    debug!(
        "field; mode: {mode}, len: {}, exec: {:?}",
        samples.len(),
        now.elapsed()
    );

    ContourField { mode, samples }
}

/// Rounds plot coordinates to the nearest grid cell.
pub fn snap(x: f64, y: f64) -> Result<Coord<f64>, DoaError> {
    let max = f64::from(GRID_MAX);
    let (gx, gy) = (x.round(), y.round());
    if (0.0..=max).contains(&gx) && (0.0..=max).contains(&gy) {
        Ok(Coord { x: gx, y: gy })
    } else {
        Err(DoaError::OutOfBounds { x, y })
    }
}

fn cell(x: u16, y: u16) -> Coord<f64> {
    Coord {
        x: f64::from(x),
        y: f64::from(y),
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_field, snap, ContourField, PlotMode, FIELD_LEN, GRID_LEN};
    use crate::{math::Velocity, DoaError};
    use approx::assert_relative_eq;
    use geo::coord;

    fn placement() -> ([geo::Coord<f64>; 2], geo::Coord<f64>) {
        (
            [coord!(x: 10.0, y: 10.0), coord!(x: 90.0, y: 90.0)],
            coord!(x: 50.0, y: 50.0),
        )
    }

    #[test]
    fn test_field_covers_grid() {
        let (receivers, emitter) = placement();
        for mode in [PlotMode::Tdoa, PlotMode::Fdoa] {
            let field = generate_field(mode, receivers, emitter, Velocity::new(3.0, 30.0));
            assert_eq!(field.len(), FIELD_LEN);
            assert_eq!(field.mode(), mode);
            for (idx, sample) in field.iter().enumerate() {
                assert_eq!(usize::from(sample.x), idx / GRID_LEN);
                assert_eq!(usize::from(sample.y), idx % GRID_LEN);
            }
        }
    }

    #[test]
    fn test_field_is_deterministic() {
        let (receivers, emitter) = placement();
        let velocity = Velocity::new(7.5, 212.0);
        for mode in [PlotMode::Tdoa, PlotMode::Fdoa] {
            let a = generate_field(mode, receivers, emitter, velocity);
            let b = generate_field(mode, receivers, emitter, velocity);
            assert!(a
                .iter()
                .zip(b.iter())
                .all(|(a, b)| a.x == b.x && a.y == b.y && a.value.to_bits() == b.value.to_bits()));
        }
    }

    #[test]
    fn test_tdoa_field_values() {
        let (receivers, emitter) = placement();
        let field = generate_field(PlotMode::Tdoa, receivers, emitter, Velocity::default());
        assert_eq!(field.get(50, 50), Some(0.0));
        assert_relative_eq!(
            field.get(10, 10).unwrap(),
            -113.137_084_989_847_6,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            field.get(90, 90).unwrap(),
            113.137_084_989_847_6,
            epsilon = 1e-9
        );
        // Perpendicular bisector of the receivers.
        assert_eq!(field.get(0, 100), Some(0.0));
        assert_eq!(field.get(101, 0), None);
    }

    #[test]
    fn test_fdoa_field_stationary_is_zero() {
        let (receivers, emitter) = placement();
        let field = generate_field(PlotMode::Fdoa, receivers, emitter, Velocity::new(0.0, 45.0));
        assert_eq!(field.len(), FIELD_LEN);
        assert!(field.iter().all(|sample| sample.value == 0.0));
    }

    #[test]
    fn test_fdoa_field_is_finite() {
        let (receivers, _) = placement();
        // Emitter on top of a receiver and receivers on grid cells.
        let field = generate_field(
            PlotMode::Fdoa,
            receivers,
            receivers[1],
            Velocity::new(12.0, 135.0),
        );
        assert!(field.iter().all(|sample| sample.value.is_finite()));
        assert_eq!(field.get(90, 90), Some(0.0));
    }

    #[test]
    fn test_fdoa_field_zero_at_emitter() {
        let (receivers, emitter) = placement();
        let field = generate_field(PlotMode::Fdoa, receivers, emitter, Velocity::new(5.0, 10.0));
        assert_eq!(field.get(50, 50), Some(0.0));
        assert!(field.iter().any(|sample| sample.value != 0.0));
    }

    #[test]
    fn test_near_zero() {
        let (receivers, emitter) = placement();
        let field = generate_field(PlotMode::Tdoa, receivers, emitter, Velocity::default());
        let trace: Vec<_> = field.near_zero(0.0).collect();
        // The bisector x + y = 100 has 101 grid cells.
        assert_eq!(trace.len(), GRID_LEN);
        assert!(trace.iter().all(|sample| sample.x + sample.y == 100));
    }

    #[test]
    fn test_empty_field() {
        let field = ContourField::empty();
        assert!(field.is_empty());
        assert_eq!(field.get(0, 0), None);
        assert_eq!(field.near_zero(f64::MAX).count(), 0);
    }

    #[test]
    fn test_builder() {
        let field = ContourField::builder()
            .mode(PlotMode::Tdoa)
            .receiver(coord!(x: 10.0, y: 10.0))
            .receiver(coord!(x: 90.0, y: 90.0))
            .emitter(coord!(x: 50.0, y: 50.0))
            .build()
            .unwrap();
        let (receivers, emitter) = placement();
        assert_eq!(
            field,
            generate_field(PlotMode::Tdoa, receivers, emitter, Velocity::default())
        );
    }

    #[test]
    fn test_builder_errors() {
        let missing_receiver = ContourField::builder()
            .receiver(coord!(x: 10.0, y: 10.0))
            .emitter(coord!(x: 50.0, y: 50.0))
            .build();
        assert!(matches!(missing_receiver, Err(DoaError::Builder("receivers"))));

        let extra_receiver = ContourField::builder()
            .receiver(coord!(x: 10.0, y: 10.0))
            .receiver(coord!(x: 20.0, y: 10.0))
            .receiver(coord!(x: 30.0, y: 10.0))
            .emitter(coord!(x: 50.0, y: 50.0))
            .build();
        assert!(matches!(extra_receiver, Err(DoaError::Builder("receivers"))));

        let missing_emitter = ContourField::builder()
            .receiver(coord!(x: 10.0, y: 10.0))
            .receiver(coord!(x: 20.0, y: 10.0))
            .build();
        assert!(matches!(missing_emitter, Err(DoaError::Builder("emitter"))));

        let bad_velocity = ContourField::builder()
            .mode(PlotMode::Fdoa)
            .receiver(coord!(x: 10.0, y: 10.0))
            .receiver(coord!(x: 20.0, y: 10.0))
            .emitter(coord!(x: 50.0, y: 50.0))
            .velocity(Velocity::new(f64::NAN, 0.0))
            .build();
        assert!(matches!(
            bad_velocity,
            Err(DoaError::NonFinite {
                name: "velocity",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_rejects_points_off_grid() {
        let nan_receiver = ContourField::builder()
            .receiver(coord!(x: f64::NAN, y: 0.0))
            .receiver(coord!(x: 90.0, y: 90.0))
            .emitter(coord!(x: 50.0, y: 50.0))
            .build();
        assert!(matches!(nan_receiver, Err(DoaError::OutOfBounds { .. })));

        let far_receiver = ContourField::builder()
            .receiver(coord!(x: 500.0, y: -20.0))
            .receiver(coord!(x: 90.0, y: 90.0))
            .emitter(coord!(x: 50.0, y: 50.0))
            .build();
        assert!(matches!(
            far_receiver,
            Err(DoaError::OutOfBounds { x, y }) if x == 500.0 && y == -20.0
        ));

        let infinite_emitter = ContourField::builder()
            .receiver(coord!(x: 10.0, y: 10.0))
            .receiver(coord!(x: 90.0, y: 90.0))
            .emitter(coord!(x: 50.0, y: f64::INFINITY))
            .build();
        assert!(matches!(infinite_emitter, Err(DoaError::OutOfBounds { .. })));
    }

    #[test]
    fn test_builder_snaps_points() {
        let field = ContourField::builder()
            .receiver(coord!(x: 9.6, y: 10.4))
            .receiver(coord!(x: 90.0, y: 90.0))
            .emitter(coord!(x: 50.4, y: 49.5))
            .build()
            .unwrap();
        let (receivers, emitter) = placement();
        assert_eq!(
            field,
            generate_field(PlotMode::Tdoa, receivers, emitter, Velocity::default())
        );
        assert!(field.iter().all(|sample| sample.value.is_finite()));
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap(10.4, 99.6).unwrap(), coord!(x: 10.0, y: 100.0));
        assert_eq!(snap(-0.4, 100.4).unwrap(), coord!(x: 0.0, y: 100.0));
        assert!(snap(-0.6, 50.0).is_err());
        assert!(snap(50.0, 100.5).is_err());
        assert!(snap(f64::NAN, 50.0).is_err());
    }

    #[test]
    fn test_plot_mode_parse() {
        assert_eq!("TDOA".parse::<PlotMode>().unwrap(), PlotMode::Tdoa);
        assert_eq!("fdoa".parse::<PlotMode>().unwrap(), PlotMode::Fdoa);
        assert!("doppler".parse::<PlotMode>().is_err());
        assert_eq!(PlotMode::Fdoa.to_string(), "FDOA");
    }
}
