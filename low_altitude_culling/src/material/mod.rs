//! Material module
//!
//! Animated materials whose per-frame values are computed on the CPU.

mod dynamic_wall;

pub use dynamic_wall::{
    DynamicWallDesc, DynamicWallMaterial, RenderThrottle, ScrollAxis, TimeDirection,
    WallFrame, WallShading, WallUniforms, DEFAULT_DURATION, RENDER_THROTTLE,
};
