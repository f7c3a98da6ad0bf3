use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand};
use doa::{geo::Coord, PlotMode};
use std::{path::PathBuf, str::FromStr};

/// Plot TDOA and FDOA contours for a pair of receivers and an emitter
/// on a 100×100 plane.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Field to evaluate, "TDOA" or "FDOA".
    #[arg(short, long, default_value_t = PlotMode::Tdoa)]
    pub mode: PlotMode,

    /// Emitter speed, in meters/second.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub velocity: f64,

    /// Emitter heading, in degrees counter-clockwise from +x.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub direction: f64,

    /// Receiver "x,y". Pass twice.
    #[arg(short, long)]
    pub receiver: Vec<XY>,

    /// Emitter "x,y".
    #[arg(short, long)]
    pub emitter: Option<XY>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct XY(pub Coord<f64>);

impl FromStr for XY {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (x_str, y_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid x,y pair"))?;
        let x = f64::from_str(x_str.trim())?;
        let y = f64::from_str(y_str.trim())?;
        Ok(Self(Coord { x, y }))
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print field values to stdout as CSV.
    Csv,

    /// Print field values to stdout as JSON.
    Json,

    /// Plot the zero contour to terminal.
    Ascii {
        /// Largest absolute value treated as on the contour.
        #[arg(short, long, default_value_t = 1.0)]
        tolerance: f64,
    },

    /// Export an SVG.
    Plot {
        /// SVG file path.
        out: PathBuf,
    },

    /// Replay a JSON click script, re-rendering an SVG on every redraw.
    Replay {
        /// Script file, a JSON array of events.
        script: PathBuf,

        /// SVG file path.
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, XY};
    use clap::Parser;
    use doa::{geo::coord, PlotMode};

    #[test]
    fn test_parse_xy() {
        assert_eq!("10,20".parse::<XY>().unwrap(), XY(coord!(x: 10.0, y: 20.0)));
        assert_eq!(" 3.5 , 7".parse::<XY>().unwrap(), XY(coord!(x: 3.5, y: 7.0)));
        assert!("10".parse::<XY>().is_err());
        assert!("a,b".parse::<XY>().is_err());
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from([
            "doaplot",
            "--mode=fdoa",
            "--velocity=12",
            "--direction=-45",
            "--receiver=10,10",
            "--receiver=90,90",
            "--emitter=50,50",
            "plot",
            "out.svg",
        ])
        .unwrap();
        assert_eq!(cli.mode, PlotMode::Fdoa);
        assert_eq!(cli.velocity, 12.0);
        assert_eq!(cli.direction, -45.0);
        assert_eq!(cli.receiver.len(), 2);
        assert_eq!(cli.emitter, Some(XY(coord!(x: 50.0, y: 50.0))));
        assert!(matches!(cli.cmd, Command::Plot { .. }));
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["doaplot", "csv"]).unwrap();
        assert_eq!(cli.mode, PlotMode::Tdoa);
        assert_eq!(cli.velocity, 0.0);
        assert!(cli.receiver.is_empty());
        assert!(cli.emitter.is_none());
    }
}
