/// Culling policy evaluation.
///
/// One run walks every entity once, in registry order. Decisions are
/// independent per entity:
///
/// 1. tracked or selected → forced visible
/// 2. no position at `time` → skipped
/// 3. beyond `max_distance` → hidden, no frustum test
/// 4. otherwise a distance-dilated bounding sphere is tested against the frustum
///
/// Visibility is written only when it changes. A failing entity is logged and
/// left untouched; it never aborts the run.

use chrono::{DateTime, Utc};
use glam::DVec3;
use crate::camera::{BoundingSphere, CameraState, Frustum};
use crate::error::{Result, Error};
use super::config::CullingConfig;
use super::registry::EntityAccess;

/// A visibility flag written during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange<Id> {
    pub id: Id,
    pub visible: bool,
}

/// Result of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome<Id> {
    /// Entities that reached the distance test, plus tracked/selected ones
    pub processed: u64,
    /// Processed entities left visible (forced or inside the frustum)
    pub visible: u64,
    /// Entities newly hidden by the frustum test
    pub frustum_culled: u64,
    /// Entities newly hidden by the distance test
    pub distance_culled: u64,
    /// Entities without a position at the evaluation time
    pub unresolved: u64,
    /// Entities whose state could not be evaluated
    pub failed: u64,
    /// Every flag written, in evaluation order
    pub changes: Vec<VisibilityChange<Id>>,
}

impl<Id> Default for EvaluationOutcome<Id> {
    fn default() -> Self {
        Self {
            processed: 0,
            visible: 0,
            frustum_culled: 0,
            distance_culled: 0,
            unresolved: 0,
            failed: 0,
            changes: Vec::new(),
        }
    }
}

impl<Id> EvaluationOutcome<Id> {
    /// Processed entities whose flag is set after this run.
    pub fn visible_count(&self) -> u64 {
        self.visible
    }
}

/// Per-entity decision before it is folded into the outcome.
enum Decision {
    /// Tracked or selected
    Forced { changed: bool },
    /// No position at this time
    Unresolved,
    /// Beyond max distance
    TooFar { changed: bool },
    /// Frustum test ran
    Tested { visible: bool, changed: bool },
}

/// Scale factor for the bounding radius: 1 when missing or unusable.
pub fn effective_scale(scale: Option<f64>) -> f64 {
    match scale {
        Some(s) if s.is_finite() && s > 0.0 => s,
        _ => 1.0,
    }
}

/// Bounding radius of an entity at `distance` from the camera.
pub fn effective_radius(config: &CullingConfig, scale: Option<f64>, distance: f64) -> f64 {
    config.base_bounding_radius * effective_scale(scale) * config.radius_policy.dilation(distance)
}

/// Run the culling policy over every entity.
///
/// # Errors
///
/// `InvalidCamera` if the camera cannot produce a culling volume. Nothing is
/// written in that case.
pub fn evaluate<E: EntityAccess>(
    camera: &CameraState,
    entities: &mut E,
    config: &CullingConfig,
    time: DateTime<Utc>,
) -> Result<EvaluationOutcome<E::Id>> {
    let frustum = camera.culling_volume()?;
    let max_distance_squared = config.max_distance_squared();
    let mut outcome = EvaluationOutcome::default();

    for id in entities.entity_ids() {
        let decision = evaluate_entity(
            entities,
            id,
            camera.position(),
            &frustum,
            config,
            max_distance_squared,
            time,
        );

        match decision {
            Ok(Decision::Forced { changed }) => {
                outcome.processed += 1;
                outcome.visible += 1;
                if changed {
                    outcome.changes.push(VisibilityChange { id, visible: true });
                }
            }
            Ok(Decision::Unresolved) => {
                outcome.unresolved += 1;
            }
            Ok(Decision::TooFar { changed }) => {
                outcome.processed += 1;
                if changed {
                    outcome.distance_culled += 1;
                    outcome.changes.push(VisibilityChange { id, visible: false });
                }
            }
            Ok(Decision::Tested { visible, changed }) => {
                outcome.processed += 1;
                if visible {
                    outcome.visible += 1;
                }
                if changed {
                    if !visible {
                        outcome.frustum_culled += 1;
                    }
                    outcome.changes.push(VisibilityChange { id, visible });
                }
            }
            Err(error) => {
                outcome.failed += 1;
                crate::lowalt_warn!("lowalt::Evaluator", "Skipping entity {:?}: {}", id, error);
            }
        }
    }

    Ok(outcome)
}

fn evaluate_entity<E: EntityAccess>(
    entities: &mut E,
    id: E::Id,
    camera_position: DVec3,
    frustum: &Frustum,
    config: &CullingConfig,
    max_distance_squared: f64,
    time: DateTime<Utc>,
) -> Result<Decision> {
    if entities.is_tracked(id) || entities.is_selected(id) {
        let changed = write_visibility(entities, id, true);
        return Ok(Decision::Forced { changed });
    }

    let Some(position) = entities.position(id, time)? else {
        return Ok(Decision::Unresolved);
    };
    if !position.is_finite() {
        return Err(Error::EvaluationError(format!(
            "non-finite position {:?}",
            position
        )));
    }

    let distance_squared = camera_position.distance_squared(position);
    if distance_squared > max_distance_squared {
        let changed = write_visibility(entities, id, false);
        return Ok(Decision::TooFar { changed });
    }

    let radius = effective_radius(config, entities.scale(id, time), distance_squared.sqrt());
    let visible = frustum.intersects_sphere(&BoundingSphere::new(position, radius));
    let changed = write_visibility(entities, id, visible);

    Ok(Decision::Tested { visible, changed })
}

/// Write the flag only if it differs. Returns true if it was written.
fn write_visibility<E: EntityAccess>(entities: &mut E, id: E::Id, visible: bool) -> bool {
    if entities.is_visible(id) == visible {
        return false;
    }
    entities.set_visible(id, visible);
    true
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
