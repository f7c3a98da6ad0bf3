//! Scripted interaction sessions.
//!
//! A script is a JSON array of events, for example
//!
//! ```json
//! [
//!     {"click": [10, 10]},
//!     {"click": [90, 90]},
//!     {"shift_click": [50, 50]},
//!     {"mode": "FDOA"},
//!     {"velocity": 12.5},
//!     {"direction": 45}
//! ]
//! ```

use anyhow::Error as AnyError;
use doa::{Action, ChartAdapter, DoaError, Interaction, PlotMode};
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Primary click at `[x, y]`.
    Click([f64; 2]),

    /// Shift-click at `[x, y]`.
    ShiftClick([f64; 2]),

    Mode(PlotMode),

    /// Emitter speed, meters/second.
    Velocity(f64),

    /// Emitter heading, degrees.
    Direction(f64),
}

impl Event {
    /// Applies this event to `session`, returning the click action if
    /// the event was a click.
    pub fn apply<A: ChartAdapter>(
        self,
        session: &mut Interaction<A>,
    ) -> Result<Option<Action>, DoaError> {
        match self {
            Self::Click([x, y]) => session.click(x, y).map(Some),
            Self::ShiftClick([x, y]) => session.shift_click(x, y).map(Some),
            Self::Mode(mode) => session.set_mode(mode).map(|()| None),
            Self::Velocity(speed) => session.set_velocity(speed).map(|()| None),
            Self::Direction(deg) => session.set_direction(deg).map(|()| None),
        }
    }
}

pub fn load(path: &Path) -> Result<Vec<Event>, AnyError> {
    let file = File::open(path)?;
    let events = serde_json::from_reader(BufReader::new(file))?;
    Ok(events)
}
