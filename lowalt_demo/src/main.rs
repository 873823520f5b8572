//! Low altitude culling demo
//!
//! Simulates a host frame loop: a grid of drone models, a camera that flies
//! over them and stops, a debounced culling run after each stop, and an
//! animated wall material updated every frame.

use std::time::Duration;
use chrono::{DateTime, Utc};
use glam::{DVec3, Vec4};
use low_altitude_culling::lowalt::{Clock, EngineTuning, ManualClock, Runtime, SystemClock};
use low_altitude_culling::lowalt::camera::CameraState;
use low_altitude_culling::lowalt::culling::{
    CullingConfig, EntityRegistry, ModelPlacement, PositionProperty, VisibilityCuller,
};
use low_altitude_culling::lowalt::material::{DynamicWallDesc, DynamicWallMaterial};
use low_altitude_culling::{lowalt_error, lowalt_info};

const SOURCE: &str = "lowalt::Demo";
const FRAME: Duration = Duration::from_millis(16);

fn main() {
    if let Err(e) = run() {
        lowalt_error!(SOURCE, "Demo failed: {}", e);
    }
}

fn run() -> low_altitude_culling::lowalt::Result<()> {
    Runtime::apply_tuning(EngineTuning::default())?;

    // Frames are stepped on the manual clock; run durations use wall time
    let clock = ManualClock::new();
    let config = CullingConfig {
        debug: true,
        debounce_interval: Duration::from_millis(200),
        ..CullingConfig::default()
    };
    let mut culler = VisibilityCuller::new(config, SystemClock::new())?;

    // 20 x 20 drones, 500 m apart, north of the origin
    let mut registry = EntityRegistry::new();
    let summary = registry.place_models((0..20).flat_map(|i| {
        (0..20).map(move |j| ModelPlacement {
            id: format!("drone-{:02}-{:02}", i, j),
            position: PositionProperty::Constant(DVec3::new(
                i as f64 * 500.0 - 4750.0,
                120.0,
                -(j as f64) * 500.0,
            )),
            scale: Some(1.0 + (i + j) as f64 % 3.0),
        })
    }));
    lowalt_info!(SOURCE, "Placed {} drones ({} updated)", summary.added, summary.updated);

    let mut wall = DynamicWallMaterial::new(
        DynamicWallDesc {
            color: Vec4::new(0.0, 0.8, 1.0, 0.9),
            trail_image: "textures/wall_trail.png".to_string(),
            ..DynamicWallDesc::default()
        },
        clock.now(),
    );

    let time = Utc::now();
    let up = DVec3::Y;

    // Initial pass after the bulk placement
    let mut camera = CameraState::new(DVec3::new(0.0, 300.0, 1000.0), DVec3::NEG_Z, up);
    culler.run_once(&camera, &mut registry, time)?;

    // Three flights, each followed by a pause for the debounce to fire
    let legs = [
        (DVec3::new(0.0, 300.0, -2000.0), 90),
        (DVec3::new(-3000.0, 300.0, -6000.0), 120),
        (DVec3::new(3000.0, 600.0, -9000.0), 120),
    ];

    let mut redraws = 0;
    for (target, frames) in legs {
        let start = camera.position();
        for frame in 1..=frames {
            let t = frame as f64 / frames as f64;
            camera = CameraState::new(start.lerp(target, t), DVec3::NEG_Z, up);
            culler.notify()?;
            redraws += step(&clock, &mut culler, &camera, &mut registry, &mut wall, time)?;
        }
        pause(&culler, config.debounce_interval);
        for _ in 0..30 {
            redraws += step(&clock, &mut culler, &camera, &mut registry, &mut wall, time)?;
        }
        lowalt_info!(
            SOURCE,
            "Camera at {:?}: {} of {} drones visible",
            camera.position(),
            registry.visible_count(),
            registry.len()
        );
    }

    let stats = culler.stats();
    lowalt_info!(
        SOURCE,
        "Runs {}, processed {}, frustum culled {}, distance culled {}, last {:.3}ms, mean {:.3}ms",
        stats.total_executions,
        stats.total_processed_entities,
        stats.total_culled_entities,
        stats.total_distance_culled_entities,
        stats.last_execution_time_ms,
        stats.average_execution_time_ms
    );
    lowalt_info!(SOURCE, "Wall redraw requests: {}", redraws);

    culler.teardown();
    Ok(())
}

/// Let the debounce interval elapse on the culler's clock.
fn pause(culler: &VisibilityCuller<SystemClock>, interval: Duration) {
    std::thread::sleep(interval);
    lowalt_info!(SOURCE, "Camera idle, culling run pending: {}", culler.is_pending());
}

/// Advance one frame; returns 1 if the wall asked for a redraw.
fn step(
    clock: &ManualClock,
    culler: &mut VisibilityCuller<SystemClock>,
    camera: &CameraState,
    registry: &mut EntityRegistry,
    wall: &mut DynamicWallMaterial,
    time: DateTime<Utc>,
) -> low_altitude_culling::lowalt::Result<u32> {
    clock.advance(FRAME);
    culler.update(camera, registry, time)?;
    Ok(wall.value(clock.now()).request_render as u32)
}
