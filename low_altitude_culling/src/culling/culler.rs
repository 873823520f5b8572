/// VisibilityCuller: the culling subsystem as seen by the host.
///
/// The host wires three calls into its own loop:
/// - `notify()` from the camera-changed event (any frequency)
/// - `update(..)` once per frame; runs the evaluation when the debounce is due
/// - `run_once(..)` right after bulk entity changes, bypassing the debounce
///
/// `teardown()` cancels the pending run and detaches; after it no call can
/// trigger an evaluation.

use chrono::{DateTime, Utc};
use crate::camera::CameraState;
use crate::clock::Clock;
use crate::error::{Result, Error};
use super::config::CullingConfig;
use super::debounce::Debouncer;
use super::evaluator::{self, EvaluationOutcome};
use super::registry::EntityAccess;
use super::stats::CullingStats;

const SOURCE: &str = "lowalt::Culler";

/// A completed run and how long it took.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport<Id> {
    pub outcome: EvaluationOutcome<Id>,
    pub duration_ms: f64,
}

/// Debounced frustum/distance culler.
pub struct VisibilityCuller<C: Clock> {
    config: CullingConfig,
    debouncer: Debouncer,
    stats: CullingStats,
    clock: C,
    attached: bool,
}

impl<C: Clock> VisibilityCuller<C> {
    /// Helper to log errors before returning them
    fn log_and_return_error(error: Error) -> Error {
        crate::lowalt_error!(SOURCE, "{}", error);
        error
    }

    /// Create a culler attached to the host's camera-changed hook.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if `config` is invalid; the culler does not start.
    pub fn new(config: CullingConfig, clock: C) -> Result<Self> {
        config.validate().map_err(Self::log_and_return_error)?;

        crate::lowalt_debug!(
            SOURCE,
            "Culler created (enabled: {}, debounce: {:?}, max distance: {} m)",
            config.enabled,
            config.debounce_interval,
            config.max_distance
        );

        Ok(Self {
            debouncer: Debouncer::new(config.debounce_interval),
            config,
            stats: CullingStats::default(),
            clock,
            attached: true,
        })
    }

    /// Replace the configuration. Takes effect on the next run.
    ///
    /// Disabling cancels a pending run.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if `config` is invalid; the previous config is kept.
    pub fn configure(&mut self, config: CullingConfig) -> Result<()> {
        config.validate().map_err(Self::log_and_return_error)?;

        self.debouncer.set_interval(config.debounce_interval);
        if !config.enabled {
            self.debouncer.cancel();
        }
        self.config = config;
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> &CullingConfig {
        &self.config
    }

    /// Camera-changed hook: (re)schedule a run after the debounce interval.
    ///
    /// Does nothing when disabled or torn down.
    ///
    /// # Errors
    ///
    /// `TimerError` if the run cannot be scheduled; the next call retries.
    pub fn notify(&mut self) -> Result<()> {
        if !self.attached || !self.config.enabled {
            return Ok(());
        }
        let now = self.clock.now();
        self.debouncer.notify(now).map_err(Self::log_and_return_error)
    }

    /// True while a debounced run is waiting.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Per-frame poll: run the evaluation if the debounce deadline has passed.
    ///
    /// Returns `Ok(None)` when nothing ran.
    pub fn update<E: EntityAccess>(
        &mut self,
        camera: &CameraState,
        entities: &mut E,
        time: DateTime<Utc>,
    ) -> Result<Option<EvaluationReport<E::Id>>> {
        if !self.attached || !self.config.enabled {
            return Ok(None);
        }
        if !self.debouncer.poll(self.clock.now()) {
            return Ok(None);
        }
        self.perform(camera, entities, time)
    }

    /// Run immediately, bypassing (and cancelling) the debounce.
    ///
    /// Returns `Ok(None)` when disabled, torn down, or the registry is empty.
    ///
    /// # Errors
    ///
    /// `InvalidCamera` if the camera cannot produce a culling volume; nothing
    /// is written and no stats are recorded.
    pub fn run_once<E: EntityAccess>(
        &mut self,
        camera: &CameraState,
        entities: &mut E,
        time: DateTime<Utc>,
    ) -> Result<Option<EvaluationReport<E::Id>>> {
        if !self.attached || !self.config.enabled {
            return Ok(None);
        }
        self.debouncer.cancel();
        self.perform(camera, entities, time)
    }

    fn perform<E: EntityAccess>(
        &mut self,
        camera: &CameraState,
        entities: &mut E,
        time: DateTime<Utc>,
    ) -> Result<Option<EvaluationReport<E::Id>>> {
        if entities.entity_count() == 0 {
            return Ok(None);
        }

        let start = self.clock.now();
        let outcome = evaluator::evaluate(camera, entities, &self.config, time)
            .map_err(Self::log_and_return_error)?;
        let duration_ms = self.clock.now().saturating_sub(start).as_nanos() as f64 / 1_000_000.0;

        self.stats.record(
            outcome.processed,
            outcome.frustum_culled,
            outcome.distance_culled,
            duration_ms,
        );

        if self.config.debug {
            Self::log_summary(&outcome, duration_ms);
        }

        Ok(Some(EvaluationReport { outcome, duration_ms }))
    }

    fn log_summary<Id>(outcome: &EvaluationOutcome<Id>, duration_ms: f64) {
        let visible = outcome.visible_count();
        crate::lowalt_info!(
            SOURCE,
            "Culling run: processed {}, visible {}, frustum culled {}, distance culled {}, {:.2}ms",
            outcome.processed,
            visible,
            outcome.frustum_culled,
            outcome.distance_culled,
            duration_ms
        );

        if visible == 0 && outcome.processed > 0 {
            crate::lowalt_warn!(
                SOURCE,
                "No visible entity after culling: camera too far, every entity outside the frustum, \
                 or positions not updated correctly. Check camera placement and entity coordinates."
            );
        }
    }

    /// Snapshot of the cumulative stats.
    pub fn stats(&self) -> CullingStats {
        self.stats
    }

    /// Zero the cumulative stats.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Cancel the pending run and detach. Stats are reset.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
        self.stats.reset();
        if self.attached {
            self.attached = false;
            crate::lowalt_debug!(SOURCE, "Culler torn down");
        }
    }

    /// False once torn down.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
