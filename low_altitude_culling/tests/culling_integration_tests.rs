//! Integration tests for the culling workflow
//!
//! Drives VisibilityCuller the way a host does: place models, notify on
//! camera changes, poll each frame, run once after bulk changes.
//!
//! Run with: cargo test --test culling_integration_tests

use std::time::Duration;
use chrono::{DateTime, TimeZone, Utc};
use glam::DVec3;
use low_altitude_culling::lowalt::ManualClock;
use low_altitude_culling::lowalt::camera::CameraState;
use low_altitude_culling::lowalt::culling::{
    CullingConfig, EntityRegistry, ModelPlacement, PositionProperty, SampledPosition,
    VisibilityCuller,
};

// ============================================================================
// HELPERS
// ============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

fn camera_at(position: DVec3) -> CameraState {
    CameraState::new(position, DVec3::NEG_Z, DVec3::Y)
}

fn model(id: &str, position: DVec3) -> ModelPlacement {
    ModelPlacement {
        id: id.to_string(),
        position: PositionProperty::Constant(position),
        scale: None,
    }
}

fn shown(registry: &EntityRegistry, id: &str) -> bool {
    registry.get_by_id(id).map(|e| e.show).unwrap_or(false)
}

// ============================================================================
// SCENARIO TESTS
// ============================================================================

#[test]
fn test_integration_reference_scenario() {
    let clock = ManualClock::new();
    let mut culler = VisibilityCuller::new(CullingConfig::default(), clock.clone()).unwrap();
    let mut registry = EntityRegistry::new();

    let summary = registry.place_models([
        model("a", DVec3::new(0.0, 0.0, -100.0)),
        model("b", DVec3::new(0.0, 0.0, -6000.0)),
        model("c", DVec3::new(0.0, 0.0, 500.0)),
        model("d", DVec3::new(0.0, 0.0, 500.0)),
    ]);
    assert_eq!(summary.added, 4);
    let d = registry.key_of("d").unwrap();
    assert!(registry.set_tracked(Some(d)));

    let report = culler
        .run_once(&camera_at(DVec3::ZERO), &mut registry, now())
        .unwrap()
        .unwrap();

    assert!(shown(&registry, "a"));
    assert!(!shown(&registry, "b"));
    assert!(!shown(&registry, "c"));
    assert!(shown(&registry, "d"));
    assert_eq!(report.outcome.frustum_culled, 1);
    assert_eq!(report.outcome.distance_culled, 1);

    let stats = culler.stats();
    assert_eq!(stats.total_executions, 1);
    assert_eq!(stats.total_processed_entities, 4);
    assert_eq!(stats.total_culled_entities, 1);
    assert_eq!(stats.total_distance_culled_entities, 1);
}

#[test]
fn test_integration_camera_flight_burst_runs_once_and_follows_camera() {
    let clock = ManualClock::new();
    let mut culler = VisibilityCuller::new(CullingConfig::default(), clock.clone()).unwrap();
    let mut registry = EntityRegistry::new();
    registry.place_models([
        model("near", DVec3::new(0.0, 0.0, -100.0)),
        model("far", DVec3::new(0.0, 0.0, -8000.0)),
    ]);

    // Camera flies from the origin towards -Z, one frame every 16 ms
    let mut runs = 0;
    for frame in 0..30 {
        let camera = camera_at(DVec3::new(0.0, 0.0, -150.0 * frame as f64));
        culler.notify().unwrap();
        clock.advance(Duration::from_millis(16));
        if culler.update(&camera, &mut registry, now()).unwrap().is_some() {
            runs += 1;
        }
    }
    assert_eq!(runs, 0, "no run while the camera keeps moving");

    // Camera stops at z = -4350; the debounce fires once
    let camera = camera_at(DVec3::new(0.0, 0.0, -4350.0));
    for _ in 0..30 {
        clock.advance(Duration::from_millis(16));
        if culler.update(&camera, &mut registry, now()).unwrap().is_some() {
            runs += 1;
        }
    }
    assert_eq!(runs, 1);

    // "near" is now behind the camera, "far" is 3650 m ahead
    assert!(!shown(&registry, "near"));
    assert!(shown(&registry, "far"));
}

#[test]
fn test_integration_bulk_placement_then_run_once() {
    let clock = ManualClock::new();
    let mut culler = VisibilityCuller::new(CullingConfig::default(), clock).unwrap();
    let mut registry = EntityRegistry::new();

    let grid: Vec<ModelPlacement> = (0..10)
        .flat_map(|x| (0..10).map(move |z| (x, z)))
        .map(|(x, z)| {
            model(
                &format!("drone-{}-{}", x, z),
                DVec3::new(x as f64 * 100.0 - 450.0, 0.0, -(z as f64) * 1000.0 - 100.0),
            )
        })
        .collect();
    registry.place_models(grid);

    let report = culler
        .run_once(&camera_at(DVec3::ZERO), &mut registry, now())
        .unwrap()
        .unwrap();

    // Rows beyond 5000 m are distance culled
    assert_eq!(report.outcome.processed, 100);
    assert_eq!(report.outcome.distance_culled, 50);
    assert_eq!(registry.visible_count() as u64, report.outcome.visible_count());

    // Re-placing the same ids updates rather than adds
    let summary = registry.place_models([model("drone-0-0", DVec3::new(0.0, 0.0, -50.0))]);
    assert_eq!(summary.added, 0);
    assert_eq!(summary.updated, 1);
}

#[test]
fn test_integration_sampled_position_follows_simulation_time() {
    let clock = ManualClock::new();
    let mut culler = VisibilityCuller::new(CullingConfig::default(), clock).unwrap();
    let mut registry = EntityRegistry::new();

    let t0 = now();
    let t1 = t0 + chrono::Duration::seconds(60);
    let path = SampledPosition::new(vec![
        (t0, DVec3::new(0.0, 0.0, -100.0)),
        (t1, DVec3::new(0.0, 0.0, -9900.0)),
    ]);
    registry.place(ModelPlacement {
        id: "flight".to_string(),
        position: PositionProperty::Sampled(path),
        scale: Some(2.0),
    });
    let camera = camera_at(DVec3::ZERO);

    culler.run_once(&camera, &mut registry, t0).unwrap();
    assert!(shown(&registry, "flight"));

    culler.run_once(&camera, &mut registry, t1).unwrap();
    assert!(!shown(&registry, "flight"));

    // Outside the sampled interval the position is unresolved and untouched
    let report = culler
        .run_once(&camera, &mut registry, t1 + chrono::Duration::seconds(1))
        .unwrap()
        .unwrap();
    assert_eq!(report.outcome.unresolved, 1);
    assert!(!shown(&registry, "flight"));
}

#[test]
fn test_integration_reconfigure_and_teardown() {
    let clock = ManualClock::new();
    let mut culler = VisibilityCuller::new(CullingConfig::default(), clock.clone()).unwrap();
    let mut registry = EntityRegistry::new();
    registry.place(model("mid", DVec3::new(0.0, 0.0, -3000.0)));
    let camera = camera_at(DVec3::ZERO);

    culler.run_once(&camera, &mut registry, now()).unwrap();
    assert!(shown(&registry, "mid"));

    culler
        .configure(CullingConfig {
            max_distance: 2000.0,
            debounce_interval: Duration::from_millis(50),
            ..CullingConfig::default()
        })
        .unwrap();
    culler.notify().unwrap();
    clock.advance(Duration::from_millis(50));
    assert!(culler.update(&camera, &mut registry, now()).unwrap().is_some());
    assert!(!shown(&registry, "mid"));

    culler.teardown();
    culler.notify().unwrap();
    clock.advance(Duration::from_secs(1));
    assert!(culler.update(&camera, &mut registry, now()).unwrap().is_none());
    assert!(culler.run_once(&camera, &mut registry, now()).unwrap().is_none());
    assert_eq!(culler.stats().total_executions, 0);
}
