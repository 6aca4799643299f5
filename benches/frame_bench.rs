//! Criterion benchmarks for the integrator and the full frame step.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orrery::bodies::BodyTransform;
use orrery::engine::{CameraPose, PrimitiveId};
use orrery::physics::constants::MU_SUN;
use orrery::physics::{step, OrbitIntegrator, StateVector};
use orrery::{Options, RenderBackend, SimulationScheduler};

const EARTH: [f64; 6] = [
    -1.13988e11,
    -9.00639e10,
    1.83944e6,
    2.14668e4,
    -2.69850e4,
    -0.399201,
];

struct NullBackend;

impl RenderBackend for NullBackend {
    fn surface_size(&self) -> Option<(u32, u32)> {
        Some((1920, 1080))
    }
    fn create_body_primitive(&mut self, _radius: f32, _color: [f32; 3]) -> PrimitiveId {
        PrimitiveId(0)
    }
    fn set_transform(&mut self, _primitive: PrimitiveId, _transform: &BodyTransform) {}
    fn set_camera(&mut self, _pose: &CameraPose) {}
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn draw(&mut self) {}
}

fn integrator_benchmark(c: &mut Criterion) {
    let state = StateVector::from_array(EARTH);
    c.bench_function("verlet_step", |b| {
        b.iter(|| black_box(step(black_box(&state), black_box(3600.0), MU_SUN)))
    });

    let mut group = c.benchmark_group("substepped_advance");
    for max in [86_400.0, 3600.0, 60.0] {
        let integrator = OrbitIntegrator::new(MU_SUN).with_max_substep(max);
        group.bench_function(format!("max_{max}s"), |b| {
            b.iter(|| black_box(integrator.advance(&state, black_box(86_400.0))))
        });
    }
    group.finish();
}

fn frame_benchmark(c: &mut Criterion) {
    let Ok(mut scheduler) = SimulationScheduler::start(NullBackend, Options::default())
    else {
        return;
    };
    c.bench_function("full_frame", |b| {
        b.iter(|| black_box(scheduler.frame_with_delta(black_box(1.0 / 60.0))))
    });
}

criterion_group!(benches, integrator_benchmark, frame_benchmark);
criterion_main!(benches);
