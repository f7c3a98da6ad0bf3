mod options;
mod script;
mod svg;

use anyhow::Error as AnyError;
use clap::Parser;
use doa::{ChartAdapter, ContourField, Interaction, Velocity};
use log::info;
use options::{Cli, Command as CliCmd};
use std::{io::Write, path::Path};
use svg::SvgChart;
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    env_logger::init();

    match &cli.cmd {
        CliCmd::Csv => write_csv(&build_field(&cli)?, std::io::stdout().lock()),
        CliCmd::Json => write_json(&build_field(&cli)?, std::io::stdout().lock()),
        CliCmd::Ascii { tolerance } => {
            plot_ascii(&cli, &build_field(&cli)?, *tolerance);
            Ok(())
        }
        CliCmd::Plot { out } => {
            let session = start_session(&cli, SvgChart::new(out))?;
            let phase = session.phase();
            // Render at least once, even with nothing placed.
            session.into_chart().redraw()?;
            info!("wrote {}, phase: {phase:?}", out.display());
            Ok(())
        }
        CliCmd::Replay { script, out } => replay(&cli, script, out),
    }
}

fn build_field(cli: &Cli) -> Result<ContourField, AnyError> {
    let mut builder = ContourField::builder()
        .mode(cli.mode)
        .velocity(Velocity::new(cli.velocity, cli.direction));
    for receiver in &cli.receiver {
        builder = builder.receiver(receiver.0);
    }
    if let Some(emitter) = cli.emitter {
        builder = builder.emitter(emitter.0);
    }
    Ok(builder.build()?)
}

/// Applies the command line controls and placements to a fresh
/// session, in the order a user would.
fn start_session<A: ChartAdapter>(cli: &Cli, chart: A) -> Result<Interaction<A>, AnyError> {
    let mut session = Interaction::new(chart);
    session.set_mode(cli.mode)?;
    session.set_velocity(cli.velocity)?;
    session.set_direction(cli.direction)?;
    for receiver in &cli.receiver {
        let action = session.click(receiver.0.x, receiver.0.y)?;
        info!("receiver ({}, {}): {action:?}", receiver.0.x, receiver.0.y);
    }
    if let Some(emitter) = cli.emitter {
        let action = session.shift_click(emitter.0.x, emitter.0.y)?;
        info!("emitter ({}, {}): {action:?}", emitter.0.x, emitter.0.y);
    }
    Ok(session)
}

fn replay(cli: &Cli, script: &Path, out: &Path) -> Result<(), AnyError> {
    let events = script::load(script)?;
    let mut session = start_session(cli, SvgChart::new(out))?;
    for (idx, event) in events.into_iter().enumerate() {
        match event.apply(&mut session)? {
            Some(action) => info!("{idx:4}: {event:?} -> {action:?}"),
            None => info!("{idx:4}: {event:?}"),
        }
    }
    let (phase, mode) = (session.phase(), session.state().mode());
    let mut chart = session.into_chart();
    chart.redraw()?;
    println!(
        "phase: {phase:?}, mode: {mode}, cells: {}, redraws: {}",
        chart.model().field().len(),
        chart.model().redraws()
    );
    Ok(())
}

fn write_csv<W: Write>(field: &ContourField, mut out: W) -> Result<(), AnyError> {
    writeln!(out, "x,y,value")?;
    for sample in field {
        writeln!(out, "{},{},{}", sample.x, sample.y, sample.value)?;
    }
    Ok(())
}

fn write_json<W: Write>(field: &ContourField, mut out: W) -> Result<(), AnyError> {
    serde_json::to_writer(&mut out, field.samples())?;
    writeln!(out)?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(cli: &Cli, field: &ContourField, tolerance: f64) {
    let contour: Vec<(f32, f32)> = field
        .near_zero(tolerance)
        .map(|sample| (f32::from(sample.x), f32::from(sample.y)))
        .collect();
    let markers: Vec<(f32, f32)> = cli
        .receiver
        .iter()
        .chain(cli.emitter.iter())
        .map(|xy| (xy.0.x as f32, xy.0.y as f32))
        .collect();
    println!("{} contour, {} cells within {tolerance}", field.mode(), contour.len());
    Chart::new_with_y_range(200, 100, 0.0, 100.0, 0.0, 100.0)
        .lineplot(&Shape::Points(&contour))
        .lineplot(&Shape::Points(&markers))
        .display();
}
