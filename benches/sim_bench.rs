use criterion::{criterion_group, criterion_main, Criterion};
use lab_simulation::{Param, Simulation};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("lab_step");

    // Free flight: kicked sideways with no gravity, bouncing between the walls.
    {
        let mut sim = Simulation::new();
        sim.configure(Param::Gravity, 0.0);
        sim.configure(Param::ImpulseAngle, 90.0);
        sim.apply_impulse();
        group.bench_function("free_flight", |b| {
            b.iter(|| sim.step());
        });
    }

    // Resting on the floor: every tick clamps and reflects.
    {
        let mut sim = Simulation::new();
        sim.configure(Param::ImpulseMagnitude, 0.0);
        sim.apply_impulse();
        for _ in 0..10_000 {
            sim.step();
        }
        group.bench_function("resting", |b| {
            b.iter(|| sim.step());
        });
    }

    // Inactive body: the early exit.
    {
        let mut sim = Simulation::new();
        group.bench_function("inert", |b| {
            b.iter(|| sim.step());
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut sim = Simulation::new();
    sim.apply_impulse();
    c.bench_function("snapshot_with_arrow", |b| {
        b.iter(|| sim.snapshot());
    });
}

criterion_group!(benches, bench_step, bench_snapshot);
criterion_main!(benches);
