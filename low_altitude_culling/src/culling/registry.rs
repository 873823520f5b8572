/// Entity access for the culler, and an in-memory registry implementing it.
///
/// The culler never owns entities. It reads positions and scales and writes
/// the visibility flag through `EntityAccess`, a capability the host
/// implements over its own engine objects. `EntityRegistry` is a ready-made
/// implementation keyed by stable SlotMap keys, with string ids for batch
/// placement of models.

use std::fmt;
use chrono::{DateTime, Utc};
use glam::DVec3;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::{Result, Error};

// ===== CAPABILITY =====

/// Read/write capability over the host's entities.
///
/// The evaluator only ever calls these methods; it never creates or deletes
/// entities.
pub trait EntityAccess {
    /// Stable entity identifier
    type Id: Copy + Eq + fmt::Debug;

    /// Ids of all entities, in registry iteration order.
    fn entity_ids(&self) -> Vec<Self::Id>;

    /// Number of entities.
    fn entity_count(&self) -> usize;

    /// Position at `time`. `Ok(None)` when the entity has no position then.
    ///
    /// # Errors
    ///
    /// `EvaluationError` when the entity's state cannot be read.
    fn position(&self, id: Self::Id, time: DateTime<Utc>) -> Result<Option<DVec3>>;

    /// Scale factor at `time`, if the entity exposes one.
    ///
    /// Implementations with static scales may ignore `time`.
    fn scale(&self, id: Self::Id, time: DateTime<Utc>) -> Option<f64>;

    /// Current visibility flag.
    fn is_visible(&self, id: Self::Id) -> bool;

    /// Write the visibility flag.
    fn set_visible(&mut self, id: Self::Id, visible: bool);

    /// True if this is the entity the camera currently tracks.
    fn is_tracked(&self, id: Self::Id) -> bool;

    /// True if this is the currently selected entity.
    fn is_selected(&self, id: Self::Id) -> bool;
}

// ===== POSITION PROPERTIES =====

/// Time-sampled position with linear interpolation.
///
/// No extrapolation: outside the sampled interval the position is undefined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledPosition {
    /// Samples sorted by time
    samples: Vec<(DateTime<Utc>, DVec3)>,
}

impl SampledPosition {
    /// Build from unordered samples.
    pub fn new(mut samples: Vec<(DateTime<Utc>, DVec3)>) -> Self {
        samples.sort_by_key(|(time, _)| *time);
        Self { samples }
    }

    /// Insert a sample, keeping time order. A sample at an existing time replaces it.
    pub fn add_sample(&mut self, time: DateTime<Utc>, position: DVec3) {
        match self.samples.binary_search_by_key(&time, |(t, _)| *t) {
            Ok(index) => self.samples[index].1 = position,
            Err(index) => self.samples.insert(index, (time, position)),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Interpolated position at `time`, `None` outside the sampled interval.
    pub fn value_at(&self, time: DateTime<Utc>) -> Option<DVec3> {
        let index = match self.samples.binary_search_by_key(&time, |(t, _)| *t) {
            Ok(index) => return Some(self.samples[index].1),
            Err(index) => index,
        };
        if index == 0 || index >= self.samples.len() {
            return None;
        }

        let (t0, p0) = self.samples[index - 1];
        let (t1, p1) = self.samples[index];
        let span = (t1 - t0).num_microseconds()? as f64;
        let offset = (time - t0).num_microseconds()? as f64;
        Some(p0.lerp(p1, offset / span))
    }
}

/// Position of a placed entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PositionProperty {
    /// No position defined
    #[default]
    Undefined,
    /// Fixed world-space position
    Constant(DVec3),
    /// Time-varying position
    Sampled(SampledPosition),
}

impl PositionProperty {
    /// Position at `time`, if defined.
    pub fn value_at(&self, time: DateTime<Utc>) -> Option<DVec3> {
        match self {
            PositionProperty::Undefined => None,
            PositionProperty::Constant(position) => Some(*position),
            PositionProperty::Sampled(samples) => samples.value_at(time),
        }
    }
}

// ===== REGISTRY =====

new_key_type! {
    /// Stable key for an entity within an EntityRegistry.
    ///
    /// Keys remain valid until their own entity is removed.
    pub struct EntityKey;
}

/// A model placed on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEntity {
    /// Caller-facing identifier (unique within the registry)
    pub id: String,
    /// Position property
    pub position: PositionProperty,
    /// Model scale, `None` for unscaled. Constant over time.
    pub scale: Option<f64>,
    /// Visibility flag
    pub show: bool,
}

/// Placement request for a model: inserted if the id is new, updated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPlacement {
    pub id: String,
    pub position: PositionProperty,
    pub scale: Option<f64>,
}

/// Outcome of a batch placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    /// Entities created by this batch
    pub added: usize,
    /// Existing entities whose position/scale was replaced
    pub updated: usize,
}

/// In-memory entity store with tracked/selected references.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: SlotMap<EntityKey, PlacedEntity>,
    by_id: FxHashMap<String, EntityKey>,
    tracked: Option<EntityKey>,
    selected: Option<EntityKey>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model, or update position and scale of the entity with the same id.
    ///
    /// New entities start visible. Updating keeps the current visibility.
    /// Returns the key and whether the entity was newly created.
    pub fn place(&mut self, placement: ModelPlacement) -> (EntityKey, bool) {
        if let Some(&key) = self.by_id.get(&placement.id) {
            if let Some(entity) = self.entities.get_mut(key) {
                entity.position = placement.position;
                entity.scale = placement.scale;
                return (key, false);
            }
        }

        let key = self.entities.insert(PlacedEntity {
            id: placement.id.clone(),
            position: placement.position,
            scale: placement.scale,
            show: true,
        });
        self.by_id.insert(placement.id, key);
        (key, true)
    }

    /// Place a batch of models, counting additions and updates.
    pub fn place_models<I>(&mut self, placements: I) -> PlacementSummary
    where
        I: IntoIterator<Item = ModelPlacement>,
    {
        let mut summary = PlacementSummary::default();
        for placement in placements {
            let (_, added) = self.place(placement);
            if added {
                summary.added += 1;
            } else {
                summary.updated += 1;
            }
        }
        summary
    }

    /// Remove the entity with `id`. Clears tracked/selected if they pointed at it.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(key) = self.by_id.remove(id) else {
            return false;
        };
        if self.tracked == Some(key) {
            self.tracked = None;
        }
        if self.selected == Some(key) {
            self.selected = None;
        }
        self.entities.remove(key).is_some()
    }

    /// Remove every entity and both references.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.by_id.clear();
        self.tracked = None;
        self.selected = None;
    }

    /// Key of the entity with `id`.
    pub fn key_of(&self, id: &str) -> Option<EntityKey> {
        self.by_id.get(id).copied()
    }

    /// Entity by key.
    pub fn get(&self, key: EntityKey) -> Option<&PlacedEntity> {
        self.entities.get(key)
    }

    /// Entity by caller id.
    pub fn get_by_id(&self, id: &str) -> Option<&PlacedEntity> {
        self.key_of(id).and_then(|key| self.entities.get(key))
    }

    /// Replace the position property. Returns false if the key is invalid.
    pub fn set_position(&mut self, key: EntityKey, position: PositionProperty) -> bool {
        match self.entities.get_mut(key) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    /// Set or clear the tracked entity. Returns false if the key is invalid.
    pub fn set_tracked(&mut self, key: Option<EntityKey>) -> bool {
        if key.is_some_and(|k| !self.entities.contains_key(k)) {
            return false;
        }
        self.tracked = key;
        true
    }

    /// Set or clear the selected entity. Returns false if the key is invalid.
    pub fn set_selected(&mut self, key: Option<EntityKey>) -> bool {
        if key.is_some_and(|k| !self.entities.contains_key(k)) {
            return false;
        }
        self.selected = key;
        true
    }

    /// Currently tracked entity.
    pub fn tracked(&self) -> Option<EntityKey> {
        self.tracked
    }

    /// Currently selected entity.
    pub fn selected(&self) -> Option<EntityKey> {
        self.selected
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the registry holds no entity.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &PlacedEntity)> + '_ {
        self.entities.iter()
    }

    /// Number of entities whose visibility flag is set.
    pub fn visible_count(&self) -> usize {
        self.entities.values().filter(|e| e.show).count()
    }
}

impl EntityAccess for EntityRegistry {
    type Id = EntityKey;

    fn entity_ids(&self) -> Vec<EntityKey> {
        self.entities.keys().collect()
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn position(&self, id: EntityKey, time: DateTime<Utc>) -> Result<Option<DVec3>> {
        self.entities
            .get(id)
            .map(|entity| entity.position.value_at(time))
            .ok_or_else(|| Error::EvaluationError(format!("unknown entity {:?}", id)))
    }

    /// Registry scales are constant, so `time` is not consulted.
    fn scale(&self, id: EntityKey, _time: DateTime<Utc>) -> Option<f64> {
        self.entities.get(id).and_then(|entity| entity.scale)
    }

    fn is_visible(&self, id: EntityKey) -> bool {
        self.entities.get(id).is_some_and(|entity| entity.show)
    }

    fn set_visible(&mut self, id: EntityKey, visible: bool) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.show = visible;
        }
    }

    fn is_tracked(&self, id: EntityKey) -> bool {
        self.tracked == Some(id)
    }

    fn is_selected(&self, id: EntityKey) -> bool {
        self.selected == Some(id)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
