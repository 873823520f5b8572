/// Culling configuration.
///
/// Plain descriptor structs with defaults. A config is validated once when
/// it is handed to the culler and never changes during an evaluation run;
/// `VisibilityCuller::configure` swaps the whole value between runs.

use std::time::Duration;
use crate::error::{Result, Error};

/// Growth of the bounding radius with distance.
///
/// `radius = base * scale * (1 + min(1, distance / reference_distance) * max_growth)`
///
/// With the defaults the radius stays undilated up close and grows to 1.5x
/// at 1000 m and beyond, to absorb projection error at range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusPolicy {
    /// Distance (meters) at which the full growth is reached
    pub reference_distance: f64,
    /// Fractional growth at or beyond `reference_distance`
    pub max_growth: f64,
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            reference_distance: 1000.0,
            max_growth: 0.5,
        }
    }
}

impl RadiusPolicy {
    /// Dilation factor applied to the scaled radius at `distance`.
    pub fn dilation(&self, distance: f64) -> f64 {
        let distance_factor = (distance / self.reference_distance).min(1.0);
        1.0 + distance_factor * self.max_growth
    }

    fn validate(&self) -> Result<()> {
        if !(self.reference_distance.is_finite() && self.reference_distance > 0.0) {
            return Err(Error::ConfigurationError(format!(
                "radius_policy.reference_distance must be > 0, got {}",
                self.reference_distance
            )));
        }
        if !(self.max_growth.is_finite() && self.max_growth >= 0.0) {
            return Err(Error::ConfigurationError(format!(
                "radius_policy.max_growth must be >= 0, got {}",
                self.max_growth
            )));
        }
        Ok(())
    }
}

/// Culling session configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingConfig {
    /// Master switch: when false the culler never evaluates
    pub enabled: bool,
    /// Quiet time after the last camera change before a run fires
    pub debounce_interval: Duration,
    /// Entities farther than this (meters) are hidden without a frustum test
    pub max_distance: f64,
    /// Bounding radius (meters) of an entity at scale 1
    pub base_bounding_radius: f64,
    /// Log a summary after every run
    pub debug: bool,
    /// Distance dilation of the bounding radius
    pub radius_policy: RadiusPolicy,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_interval: Duration::from_millis(200),
            max_distance: 5000.0,
            base_bounding_radius: 25.0,
            debug: false,
            radius_policy: RadiusPolicy::default(),
        }
    }
}

impl CullingConfig {
    /// Check every value the evaluator relies on.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_interval.is_zero() {
            return Err(Error::ConfigurationError(
                "debounce_interval must be > 0".to_string(),
            ));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(Error::ConfigurationError(format!(
                "max_distance must be > 0, got {}",
                self.max_distance
            )));
        }
        if !(self.base_bounding_radius.is_finite() && self.base_bounding_radius > 0.0) {
            return Err(Error::ConfigurationError(format!(
                "base_bounding_radius must be > 0, got {}",
                self.base_bounding_radius
            )));
        }
        self.radius_policy.validate()
    }

    /// `max_distance` squared, compared against squared distances on the hot path.
    pub fn max_distance_squared(&self) -> f64 {
        self.max_distance * self.max_distance
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
