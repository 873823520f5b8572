//! Camera module: camera snapshot and frustum.
//!
//! The host engine owns the real camera. A `CameraState` is copied from it
//! when a culling run fires and turned into a `Frustum` for sphere tests.

mod camera_state;
mod frustum;

pub use camera_state::{CameraState, PerspectiveParams};
pub use frustum::{
    BoundingSphere, Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
