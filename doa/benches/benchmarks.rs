use criterion::{criterion_group, criterion_main, Criterion};
use doa::{generate_field, geo::coord, ChartModel, Interaction, PlotMode, Velocity};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn contour_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("Contour Field");

    let receivers = [coord!(x: 10.0, y: 10.0), coord!(x: 90.0, y: 90.0)];
    let emitter = coord!(x: 35.0, y: 62.0);
    let velocity = Velocity::new(12.0, 40.0);

    for mode in [PlotMode::Tdoa, PlotMode::Fdoa] {
        group.bench_with_input(
            mode.to_string(),
            &(receivers, emitter, velocity),
            |b, (r, e, v)| b.iter(|| generate_field(mode, *r, *e, *v)),
        );
    }
}

fn mode_switch(c: &mut Criterion) {
    let mut session = Interaction::new(ChartModel::new());
    session.click(10.0, 10.0).unwrap();
    session.click(90.0, 90.0).unwrap();
    session.shift_click(35.0, 62.0).unwrap();
    session.set_velocity(12.0).unwrap();

    let mut modes = [PlotMode::Fdoa, PlotMode::Tdoa].into_iter().cycle();
    c.bench_function("mode switch", |b| {
        b.iter(|| session.set_mode(modes.next().unwrap()).unwrap())
    });
}

criterion_group!(benches, contour_field, mode_switch);
criterion_main!(benches);
