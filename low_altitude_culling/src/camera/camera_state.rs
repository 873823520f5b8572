/// CameraState: snapshot of the host engine's camera for one culling run.
///
/// The host copies position, direction and up from its camera each time a
/// run fires. The culling volume is derived here rather than read from the
/// engine, so the evaluator never depends on a specific engine's frustum type.

use glam::{DMat4, DVec3};
use crate::error::{Result, Error};
use super::frustum::Frustum;

/// Vectors shorter than this are treated as degenerate.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    /// Vertical field of view in radians, in (0, PI)
    pub fov_y: f64,
    /// Width / height
    pub aspect: f64,
    /// Near plane distance in meters
    pub near: f64,
    /// Far plane distance in meters
    pub far: f64,
}

impl Default for PerspectiveParams {
    /// Globe-viewer defaults: 60° field of view, 16:9, 1 m to 500 000 km.
    fn default() -> Self {
        Self {
            fov_y: std::f64::consts::FRAC_PI_3,
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 5.0e8,
        }
    }
}

impl PerspectiveParams {
    fn validate(&self) -> Result<()> {
        if !(self.fov_y.is_finite() && self.fov_y > 0.0 && self.fov_y < std::f64::consts::PI) {
            return Err(Error::InvalidCamera(format!("fov_y {} out of (0, PI)", self.fov_y)));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(Error::InvalidCamera(format!("aspect {} must be > 0", self.aspect)));
        }
        if !(self.near.is_finite() && self.far.is_finite() && self.near > 0.0 && self.far > self.near) {
            return Err(Error::InvalidCamera(format!(
                "near/far ({}, {}) must satisfy 0 < near < far",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

/// Camera position, orientation and projection at culling time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    position: DVec3,
    direction: DVec3,
    up: DVec3,
    perspective: PerspectiveParams,
}

impl CameraState {
    /// Create a camera snapshot with default perspective parameters.
    ///
    /// Direction and up need not be normalized.
    pub fn new(position: DVec3, direction: DVec3, up: DVec3) -> Self {
        Self {
            position,
            direction,
            up,
            perspective: PerspectiveParams::default(),
        }
    }

    /// Replace the perspective parameters.
    pub fn with_perspective(mut self, perspective: PerspectiveParams) -> Self {
        self.perspective = perspective;
        self
    }

    // ===== GETTERS =====

    /// World-space camera position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// View direction as supplied.
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Up vector as supplied.
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Perspective projection parameters.
    pub fn perspective(&self) -> &PerspectiveParams {
        &self.perspective
    }

    // ===== DERIVED =====

    /// Check that the camera can produce a culling volume.
    ///
    /// # Errors
    ///
    /// `InvalidCamera` for non-finite vectors, zero-length direction or up,
    /// direction parallel to up, or unusable perspective parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.position.is_finite() && self.direction.is_finite() && self.up.is_finite()) {
            return Err(Error::InvalidCamera("non-finite position or orientation".to_string()));
        }
        if self.direction.length_squared() < DEGENERATE_EPSILON {
            return Err(Error::InvalidCamera("direction has zero length".to_string()));
        }
        if self.up.length_squared() < DEGENERATE_EPSILON {
            return Err(Error::InvalidCamera("up has zero length".to_string()));
        }
        if self.direction.normalize().cross(self.up.normalize()).length_squared() < DEGENERATE_EPSILON {
            return Err(Error::InvalidCamera("direction is parallel to up".to_string()));
        }
        self.perspective.validate()
    }

    /// View matrix looking from `position` along `direction`.
    pub fn view_matrix(&self) -> Result<DMat4> {
        self.validate()?;
        Ok(DMat4::look_to_rh(
            self.position,
            self.direction.normalize(),
            self.up.normalize(),
        ))
    }

    /// Perspective projection matrix (zero-to-one depth).
    pub fn projection_matrix(&self) -> Result<DMat4> {
        self.perspective.validate()?;
        let p = &self.perspective;
        Ok(DMat4::perspective_rh(p.fov_y, p.aspect, p.near, p.far))
    }

    /// Culling volume: the six frustum planes in world space.
    pub fn culling_volume(&self) -> Result<Frustum> {
        let view = self.view_matrix()?;
        let projection = self.projection_matrix()?;
        Ok(Frustum::from_view_projection(&(projection * view)))
    }
}

#[cfg(test)]
#[path = "camera_state_tests.rs"]
mod tests;
