//! # Difference of Arrival
//!
//! `doa` computes Time-Difference-of-Arrival (TDOA) and
//! Frequency-Difference-of-Arrival (FDOA) contour fields for a pair
//! of receivers and a single emitter on a synthetic `[0,100]×[0,100]`
//! plane, and models the click-driven placement of those points.
//!
//! Rendering is delegated to a [`ChartAdapter`]; nothing in this
//! crate depends on a concrete charting library.

pub mod chart;
mod error;
pub mod field;
pub mod interaction;
pub mod math;

pub use {
    crate::{
        chart::{ChartAdapter, ChartModel, Marker, Series},
        error::DoaError,
        field::{generate_field, ContourField, PlotMode, Sample},
        interaction::{Action, Interaction, InteractionState, Phase},
        math::Velocity,
    },
    geo,
};
