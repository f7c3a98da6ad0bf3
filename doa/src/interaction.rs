//! Click-driven placement of receivers and the emitter.
//!
//! A primary click adds a receiver, a shift-click adds the emitter,
//! and a click on an existing marker removes it. Once two receivers
//! and the emitter are placed the contour field is recomputed on
//! every change and pushed to the chart.

use crate::{
    chart::{ChartAdapter, Marker},
    error::DoaError,
    field::{generate_field, snap, ContourField, PlotMode},
    math::Velocity,
};
use geo::Coord;
use log::debug;
use std::error::Error;

/// Receiver capacity.
pub const MAX_RECEIVERS: usize = 2;

/// Where a session is in the placement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    OneReceiver,
    TwoReceivers,
    /// The emitter is placed but fewer than two receivers are.
    EmitterOnly {
        receivers: usize,
    },
    /// Two receivers and the emitter are placed; a field is shown.
    Ready,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddedReceiver,
    AddedEmitter,
    /// Removed the receiver at this index.
    RemovedReceiver(usize),
    RemovedEmitter,
    /// Nothing changed, the target set is full.
    Ignored,
}

/// Everything a single visualization session tracks.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    receivers: Vec<Coord<f64>>,
    emitter: Option<Coord<f64>>,
    mode: PlotMode,
    velocity: Velocity,
    field: ContourField,
}

impl InteractionState {
    pub fn receivers(&self) -> &[Coord<f64>] {
        &self.receivers
    }

    pub fn emitter(&self) -> Option<Coord<f64>> {
        self.emitter
    }

    pub fn mode(&self) -> PlotMode {
        self.mode
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// The field currently displayed; empty unless [`Phase::Ready`].
    pub fn field(&self) -> &ContourField {
        &self.field
    }

    pub fn phase(&self) -> Phase {
        match (self.receivers.len(), self.emitter.is_some()) {
            (0, false) => Phase::Empty,
            (1, false) => Phase::OneReceiver,
            (MAX_RECEIVERS, false) => Phase::TwoReceivers,
            (MAX_RECEIVERS, true) => Phase::Ready,
            (receivers, _) => Phase::EmitterOnly { receivers },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Returns the marker drawn at `point`, if any. The emitter is
    /// drawn above the receivers and wins ties.
    fn hit(&self, point: Coord<f64>) -> Option<(Marker, usize)> {
        if self.emitter == Some(point) {
            return Some((Marker::Emitter, 0));
        }
        self.receivers
            .iter()
            .position(|receiver| *receiver == point)
            .map(|idx| (Marker::Receiver, idx))
    }

    fn compute_field(&self) -> Option<ContourField> {
        match (self.receivers.as_slice(), self.emitter) {
            ([r1, r2], Some(emitter)) => Some(generate_field(
                self.mode,
                [*r1, *r2],
                emitter,
                self.velocity,
            )),
            _ => None,
        }
    }
}

/// A placement session bound to a chart.
pub struct Interaction<A> {
    state: InteractionState,
    chart: A,
}

impl<A: ChartAdapter> Interaction<A> {
    /// Starts an empty session drawing on `chart`.
    pub fn new(chart: A) -> Self {
        Self {
            state: InteractionState::default(),
            chart,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn chart(&self) -> &A {
        &self.chart
    }

    pub fn into_chart(self) -> A {
        self.chart
    }

    /// Primary click at plot coordinates `(x, y)`.
    pub fn click(&mut self, x: f64, y: f64) -> Result<Action, DoaError> {
        self.place(Marker::Receiver, x, y)
    }

    /// Shift-click at plot coordinates `(x, y)`.
    pub fn shift_click(&mut self, x: f64, y: f64) -> Result<Action, DoaError> {
        self.place(Marker::Emitter, x, y)
    }

    pub fn set_mode(&mut self, mode: PlotMode) -> Result<(), DoaError> {
        if self.state.mode == mode {
            return Ok(());
        }
        debug!("mode; {} -> {mode}", self.state.mode);
        self.state.mode = mode;
        self.refresh()
    }

    /// Sets emitter speed in meters/second.
    pub fn set_velocity(&mut self, speed: f64) -> Result<(), DoaError> {
        let velocity = Velocity::new(speed, self.state.velocity.direction_deg);
        self.set_velocity_vector("velocity", speed, velocity)
    }

    /// Sets emitter heading in degrees counter-clockwise from +x.
    pub fn set_direction(&mut self, direction_deg: f64) -> Result<(), DoaError> {
        let velocity = Velocity::new(self.state.velocity.speed, direction_deg);
        self.set_velocity_vector("direction", direction_deg, velocity)
    }

    fn set_velocity_vector(
        &mut self,
        name: &'static str,
        value: f64,
        velocity: Velocity,
    ) -> Result<(), DoaError> {
        if !value.is_finite() {
            return Err(DoaError::NonFinite { name, value });
        }
        if self.state.velocity == velocity {
            return Ok(());
        }
        debug!("{name}; {value}");
        self.state.velocity = velocity;
        self.refresh()
    }

    fn place(&mut self, marker: Marker, x: f64, y: f64) -> Result<Action, DoaError> {
        let point = snap(x, y)?;

        if let Some((hit, index)) = self.state.hit(point) {
            return self.remove(hit, index);
        }

        let action = match marker {
            Marker::Receiver if self.state.receivers.len() < MAX_RECEIVERS => {
                self.chart.add_point(marker, point).map_err(chart_err)?;
                self.state.receivers.push(point);
                Action::AddedReceiver
            }
            Marker::Emitter if self.state.emitter.is_none() => {
                self.chart.add_point(marker, point).map_err(chart_err)?;
                self.state.emitter = Some(point);
                Action::AddedEmitter
            }
            _ => {
                debug!("{marker:?} at ({}, {}) ignored, series full", point.x, point.y);
                return Ok(Action::Ignored);
            }
        };
        debug!("{action:?} at ({}, {}), phase: {:?}", point.x, point.y, self.phase());

        if self.state.is_ready() {
            self.recompute()?;
        } else {
            self.chart.redraw().map_err(chart_err)?;
        }
        Ok(action)
    }

    fn remove(&mut self, marker: Marker, index: usize) -> Result<Action, DoaError> {
        self.chart.clear_field().map_err(chart_err)?;
        self.chart.remove_point(marker, index).map_err(chart_err)?;
        self.state.field = ContourField::empty();
        let action = match marker {
            Marker::Receiver => {
                self.state.receivers.remove(index);
                Action::RemovedReceiver(index)
            }
            Marker::Emitter => {
                self.state.emitter = None;
                Action::RemovedEmitter
            }
        };
        debug!("{action:?}, phase: {:?}", self.phase());
        self.chart.redraw().map_err(chart_err)?;
        Ok(action)
    }

    /// Clears and recomputes the field after a control change.
    fn refresh(&mut self) -> Result<(), DoaError> {
        if !self.state.is_ready() {
            return Ok(());
        }
        self.chart.clear_field().map_err(chart_err)?;
        self.state.field = ContourField::empty();
        self.chart.redraw().map_err(chart_err)?;
        self.recompute()
    }

    fn recompute(&mut self) -> Result<(), DoaError> {
        if let Some(field) = self.state.compute_field() {
            self.state.field = field;
            self.chart
                .push_field(&self.state.field)
                .map_err(chart_err)?;
        }
        Ok(())
    }
}

fn chart_err<E: Into<Box<dyn Error + Send + Sync>>>(err: E) -> DoaError {
    DoaError::Chart(err.into())
}
