//! SVG rendering backend for [`ChartAdapter`].

use anyhow::Error as AnyError;
use doa::{
    chart::{COLOR_DOMAIN, PLOT_DOMAIN},
    geo::Coord,
    ChartAdapter, ChartModel, ContourField, Marker,
};
use log::debug;
use plotters::prelude::*;
use std::path::PathBuf;

const RECEIVER_COLOR: RGBColor = RGBColor(0x00, 0xff, 0x00);
const EMITTER_COLOR: RGBColor = RGBColor(0xff, 0x00, 0xff);
const MARKER_RADIUS: i32 = 6;

/// Heatmap color stops over the normalized color domain.
const STOPS: [(f64, RGBColor); 3] = [
    (0.0, RGBColor(0x30, 0x60, 0xcf)),
    (0.5, RGBColor(0xff, 0xfb, 0xbc)),
    (1.0, RGBColor(0xc4, 0x46, 0x3a)),
];

/// A chart that re-renders itself to an SVG file on every redraw.
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
    model: ChartModel,
}

impl SvgChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (800, 800),
            model: ChartModel::new(),
        }
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    fn render(&self) -> Result<(), AnyError> {
        let now = std::time::Instant::now();
        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        // Cells are centered on integer coordinates.
        let (min, max) = PLOT_DOMAIN;
        let mut chart = ChartBuilder::on(&root)
            .caption("TDOA and FDOA lines", ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d((min - 0.5)..(max + 0.5), (min - 0.5)..(max + 0.5))?;

        chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

        chart.draw_series(self.model.field().iter().map(|sample| {
            let x = f64::from(sample.x);
            let y = f64::from(sample.y);
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                heat_color(sample.value).filled(),
            )
        }))?;

        chart.draw_series(
            self.model
                .points(Marker::Receiver)
                .iter()
                .map(|&Coord { x, y }| {
                    Circle::new((x, y), MARKER_RADIUS, RECEIVER_COLOR.stroke_width(2))
                }),
        )?;

        chart.draw_series(
            self.model
                .points(Marker::Emitter)
                .iter()
                .map(|&Coord { x, y }| Circle::new((x, y), MARKER_RADIUS, EMITTER_COLOR.filled())),
        )?;

        root.present()?;
        debug!(
            "render; path: {}, cells: {}, exec: {:?}",
            self.path.display(),
            self.model.field().len(),
            now.elapsed()
        );
        Ok(())
    }
}

impl ChartAdapter for SvgChart {
    type Error = AnyError;

    fn set_field(&mut self, field: &ContourField) -> Result<(), AnyError> {
        self.model.set_field(field).map_err(|never| match never {})
    }

    fn add_point(&mut self, marker: Marker, point: Coord<f64>) -> Result<(), AnyError> {
        self.model
            .add_point(marker, point)
            .map_err(|never| match never {})
    }

    fn remove_point(&mut self, marker: Marker, index: usize) -> Result<(), AnyError> {
        self.model
            .remove_point(marker, index)
            .map_err(|never| match never {})
    }

    fn redraw(&mut self) -> Result<(), AnyError> {
        self.model.redraw().map_err(|never| -> Self::Error { match never {} })?;
        self.render()
    }
}

/// Maps `value` onto the fixed heatmap scale, clamping at the ends.
pub fn heat_color(value: f64) -> RGBColor {
    let (min, max) = COLOR_DOMAIN;
    if value.is_nan() {
        return STOPS[1].1;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    for pair in STOPS.windows(2) {
        let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
        if t <= t1 {
            return lerp(c0, c1, (t - t0) / (t1 - t0));
        }
    }
    STOPS[STOPS.len() - 1].1
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: RGBColor, b: RGBColor, f: f64) -> RGBColor {
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
