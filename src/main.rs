//! Headless orrery demo: runs the simulation against a logging renderer.

use std::path::Path;

use glam::Vec2;
use orrery::bodies::BodyTransform;
use orrery::engine::{CameraPose, PrimitiveId, SnapshotReader};
use orrery::input::InputEvent;
use orrery::{assistant, Options, RenderBackend, SimulationScheduler};

const DEFAULT_FRAMES: u64 = 600;
const SURFACE: (u32, u32) = (1280, 720);

/// Renderer that logs what it would draw.
#[derive(Default)]
struct LogRenderer {
    primitives: u32,
    frames: u64,
    size: (u32, u32),
}

impl RenderBackend for LogRenderer {
    fn surface_size(&self) -> Option<(u32, u32)> {
        Some(self.size)
    }

    fn create_body_primitive(&mut self, radius: f32, color: [f32; 3]) -> PrimitiveId {
        let id = PrimitiveId(self.primitives);
        self.primitives += 1;
        log::debug!("primitive {} radius {radius} color {color:?}", id.0);
        id
    }

    fn set_transform(&mut self, primitive: PrimitiveId, transform: &BodyTransform) {
        log::trace!(
            "primitive {} at {:?} spin {:.2}",
            primitive.0,
            transform.position,
            transform.rotation_y
        );
    }

    fn set_camera(&mut self, pose: &CameraPose) {
        log::trace!("camera eye {:?} target {:?}", pose.eye, pose.target);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        log::debug!("surface resized to {width}x{height}");
    }

    fn draw(&mut self) {
        self.frames += 1;
    }
}

fn load_options(arg: Option<&str>) -> Options {
    let Some(path) = arg else {
        return Options::default();
    };
    match Options::load(Path::new(path)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}; using default options");
            Options::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames = match args.next().map(|a| a.parse::<u64>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Usage: orrery [FRAMES] [OPTIONS.toml] ({e})");
            std::process::exit(1);
        }
    };
    let options = load_options(args.next().as_deref());

    let backend = LogRenderer {
        size: SURFACE,
        ..LogRenderer::default()
    };
    let mut scheduler = match SimulationScheduler::start(backend, options) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let mut reader = scheduler.snapshot_reader();
    let input = scheduler.register_input();

    for frame in 0..frames {
        if frame == frames / 4 {
            // Click on Earth a quarter of the way in.
            let target = scheduler.context().bodies().find("Earth").map(|earth| {
                scheduler.context().bodies().to_render_space(earth.state().position)
            });
            let viewport = Vec2::new(SURFACE.0 as f32, SURFACE.1 as f32);
            if let Some(pixel) = target.and_then(|p| {
                scheduler.context().camera().camera().world_to_screen(p, viewport)
            }) {
                let _ = input.send(InputEvent::Click {
                    x: pixel.x,
                    y: pixel.y,
                });
            }
        }
        if frame == frames / 2 {
            if let Some(action) = scheduler.lookup_key("BracketRight") {
                let _ = input.send(InputEvent::Key(action));
            }
        }

        std::thread::sleep(scheduler.frame_timing().time_until_next_frame());
        if scheduler.frame().is_none() {
            break;
        }
    }

    if let Some(report) = reader.as_mut().and_then(SnapshotReader::latest) {
        log::info!(
            "frame {}: {:.1} simulated days at {:.0}x",
            report.frame,
            report.sim_time / 86_400.0,
            report.time_scale
        );
    }
    for body in scheduler.context().bodies().iter() {
        let p = scheduler.context().bodies().to_render_space(body.state().position);
        log::info!("{:<8} {:>8.2} {:>8.2} {:>8.2}", body.name, p.x, p.y, p.z);
    }
    if let Some(prompt) = assistant::compose_prompt(
        "What would I see from here?",
        scheduler.context().assistant_context().as_deref(),
    ) {
        log::info!("assistant prompt:\n{prompt}");
    }
    log::info!(
        "{} frames drawn, {:.1} fps",
        scheduler.backend().frames,
        scheduler.fps()
    );

    scheduler.shutdown();
}
