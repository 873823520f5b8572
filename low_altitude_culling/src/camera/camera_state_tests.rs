use glam::DVec3;
use crate::camera::BoundingSphere;
use crate::error::Error;
use super::*;

fn looking_down_negative_z() -> CameraState {
    CameraState::new(DVec3::ZERO, DVec3::NEG_Z, DVec3::Y)
}

// ============================================================================
// Construction and getters
// ============================================================================

#[test]
fn test_new_uses_default_perspective() {
    let camera = looking_down_negative_z();
    assert_eq!(*camera.perspective(), PerspectiveParams::default());
    assert_eq!(camera.position(), DVec3::ZERO);
    assert_eq!(camera.direction(), DVec3::NEG_Z);
    assert_eq!(camera.up(), DVec3::Y);
}

#[test]
fn test_with_perspective_replaces_params() {
    let params = PerspectiveParams { fov_y: 1.0, aspect: 1.0, near: 0.5, far: 1000.0 };
    let camera = looking_down_negative_z().with_perspective(params);
    assert_eq!(camera.perspective().far, 1000.0);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_zero_direction_is_invalid() {
    let camera = CameraState::new(DVec3::ZERO, DVec3::ZERO, DVec3::Y);
    assert!(matches!(camera.validate(), Err(Error::InvalidCamera(_))));
    assert!(camera.culling_volume().is_err());
}

#[test]
fn test_direction_parallel_to_up_is_invalid() {
    let camera = CameraState::new(DVec3::ZERO, DVec3::Y * 3.0, DVec3::Y);
    assert!(matches!(camera.culling_volume(), Err(Error::InvalidCamera(_))));
}

#[test]
fn test_non_finite_position_is_invalid() {
    let camera = CameraState::new(DVec3::new(f64::NAN, 0.0, 0.0), DVec3::NEG_Z, DVec3::Y);
    assert!(camera.validate().is_err());
}

#[test]
fn test_bad_perspective_is_invalid() {
    let params = PerspectiveParams { near: 10.0, far: 5.0, ..PerspectiveParams::default() };
    let camera = looking_down_negative_z().with_perspective(params);
    assert!(camera.projection_matrix().is_err());
    assert!(camera.culling_volume().is_err());
}

// ============================================================================
// Culling volume
// ============================================================================

#[test]
fn test_culling_volume_sees_ahead_not_behind() {
    let frustum = looking_down_negative_z().culling_volume().unwrap();

    assert!(frustum.intersects_sphere(&BoundingSphere::new(DVec3::new(0.0, 0.0, -100.0), 25.0)));
    assert!(!frustum.intersects_sphere(&BoundingSphere::new(DVec3::new(0.0, 0.0, 500.0), 31.25)));
}

#[test]
fn test_culling_volume_follows_camera_position_at_globe_scale() {
    // Camera on the Earth's surface (ECEF, meters) looking straight down
    let position = DVec3::new(6_378_137.0 + 800.0, 0.0, 0.0);
    let camera = CameraState::new(position, DVec3::NEG_X, DVec3::Z);
    let frustum = camera.culling_volume().unwrap();

    let below = DVec3::new(6_378_137.0, 0.0, 0.0);
    let above = DVec3::new(6_378_137.0 + 1_600.0, 0.0, 0.0);
    assert!(frustum.intersects_sphere(&BoundingSphere::new(below, 25.0)));
    assert!(!frustum.intersects_sphere(&BoundingSphere::new(above, 25.0)));
}

#[test]
fn test_unnormalized_direction_gives_same_volume() {
    let a = looking_down_negative_z().culling_volume().unwrap();
    let b = CameraState::new(DVec3::ZERO, DVec3::NEG_Z * 10.0, DVec3::Y * 2.0)
        .culling_volume()
        .unwrap();

    for (pa, pb) in a.planes.iter().zip(b.planes.iter()) {
        assert!((*pa - *pb).length() < 1e-9);
    }
}
