//! Culling module
//!
//! Distance + frustum visibility culling of placed entities, debounced on
//! camera changes, with cumulative stats.

mod config;
mod culler;
mod debounce;
mod evaluator;
mod registry;
mod stats;

pub use config::{CullingConfig, RadiusPolicy};
pub use culler::{VisibilityCuller, EvaluationReport};
pub use debounce::Debouncer;
pub use evaluator::{
    evaluate, effective_radius, effective_scale,
    EvaluationOutcome, VisibilityChange,
};
pub use registry::{
    EntityAccess, EntityKey, EntityRegistry, ModelPlacement,
    PlacedEntity, PlacementSummary, PositionProperty, SampledPosition,
};
pub use stats::CullingStats;
