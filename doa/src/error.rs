use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoaError {
    #[error("missing or invalid parameter '{0}'")]
    Builder(&'static str),

    #[error("{name} is not a finite number: {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("({x}, {y}) is outside the plot area")]
    OutOfBounds { x: f64, y: f64 },

    #[error("unknown plot mode '{0}', expected TDOA or FDOA")]
    PlotMode(String),

    #[error("chart: {0}")]
    Chart(Box<dyn std::error::Error + Send + Sync>),
}
