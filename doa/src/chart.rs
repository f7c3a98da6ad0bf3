//! Chart command interface.
//!
//! The interaction model talks to a chart only through
//! [`ChartAdapter`]: replace the contour data, add or remove a marker,
//! and redraw.

use crate::field::ContourField;
use geo::Coord;
use std::{convert::Infallible, error::Error, fmt};

/// Fixed `[min, max]` of both plot axes.
pub const PLOT_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Fixed `[min, max]` of the heatmap color scale.
pub const COLOR_DOMAIN: (f64, f64) = (-40.0, 40.0);

/// The three series every chart is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Contours,
    Receivers,
    Emitter,
}

impl Series {
    pub const ALL: [Self; 3] = [Self::Contours, Self::Receivers, Self::Emitter];

    pub fn name(self) -> &'static str {
        match self {
            Self::Contours => "TDOA Contours",
            Self::Receivers => "Receivers",
            Self::Emitter => "Emitter",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-placed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Receiver,
    Emitter,
}

impl Marker {
    /// The series this marker is drawn on.
    pub fn series(self) -> Series {
        match self {
            Self::Receiver => Series::Receivers,
            Self::Emitter => Series::Emitter,
        }
    }
}

pub trait ChartAdapter {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Replaces the contour series data wholesale, without redrawing.
    fn set_field(&mut self, field: &ContourField) -> Result<(), Self::Error>;

    /// Appends `point` to the marker's series.
    fn add_point(&mut self, marker: Marker, point: Coord<f64>) -> Result<(), Self::Error>;

    /// Removes the `index`th point of the marker's series.
    fn remove_point(&mut self, marker: Marker, index: usize) -> Result<(), Self::Error>;

    fn redraw(&mut self) -> Result<(), Self::Error>;

    /// Replaces the contour data and redraws.
    fn push_field(&mut self, field: &ContourField) -> Result<(), Self::Error> {
        self.set_field(field)?;
        self.redraw()
    }

    /// Empties the contour series, without redrawing.
    fn clear_field(&mut self) -> Result<(), Self::Error> {
        self.set_field(&ContourField::empty())
    }
}

/// An in-memory chart holding the three series.
///
/// Useful on its own for headless sessions, and as the retained state
/// behind rendering backends.
#[derive(Debug, Clone, Default)]
pub struct ChartModel {
    field: ContourField,
    receivers: Vec<Coord<f64>>,
    emitter: Vec<Coord<f64>>,
    redraws: usize,
}

impl ChartModel {
    /// Returns a chart with all three series empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contour series data.
    pub fn field(&self) -> &ContourField {
        &self.field
    }

    /// Points drawn on the marker's series.
    pub fn points(&self, marker: Marker) -> &[Coord<f64>] {
        match marker {
            Marker::Receiver => &self.receivers,
            Marker::Emitter => &self.emitter,
        }
    }

    /// Number of data points currently on `series`.
    pub fn series_len(&self, series: Series) -> usize {
        match series {
            Series::Contours => self.field.len(),
            Series::Receivers => self.receivers.len(),
            Series::Emitter => self.emitter.len(),
        }
    }

    /// Number of redraws requested so far.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    fn points_mut(&mut self, marker: Marker) -> &mut Vec<Coord<f64>> {
        match marker {
            Marker::Receiver => &mut self.receivers,
            Marker::Emitter => &mut self.emitter,
        }
    }
}

impl ChartAdapter for ChartModel {
    type Error = Infallible;

    fn set_field(&mut self, field: &ContourField) -> Result<(), Infallible> {
        self.field.clone_from(field);
        Ok(())
    }

    fn add_point(&mut self, marker: Marker, point: Coord<f64>) -> Result<(), Infallible> {
        self.points_mut(marker).push(point);
        Ok(())
    }

    fn remove_point(&mut self, marker: Marker, index: usize) -> Result<(), Infallible> {
        let points = self.points_mut(marker);
        if index < points.len() {
            points.remove(index);
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), Infallible> {
        self.redraws += 1;
        Ok(())
    }
}
