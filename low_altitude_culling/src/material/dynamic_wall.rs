/// Dynamic wall material: CPU side of the animated fence/wall shader.
///
/// A trail texture scrolls along one axis of the wall at a rate set by
/// `duration` (one full cycle per duration). The shader text lives in the
/// host engine; this module computes what feeds it each frame: the cyclic
/// progress value, the uniform block, and whether a redraw should be
/// requested (at most one per `RENDER_THROTTLE`).

use std::time::Duration;
use glam::{Vec2, Vec3, Vec4};

/// Minimum spacing between redraw requests (~60 per second).
pub const RENDER_THROTTLE: Duration = Duration::from_millis(16);

/// Default cycle duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Texture axis the trail scrolls along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    /// Along `t` (bottom/top of the wall)
    Vertical,
    /// Along `s` (along the wall)
    Horizontal,
}

/// Whether progress is added to or subtracted from the texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDirection {
    /// `+`: trail moves bottom to top
    Forward,
    /// `-`: trail moves top to bottom
    Backward,
}

impl TimeDirection {
    fn sign(self) -> f32 {
        match self {
            TimeDirection::Forward => 1.0,
            TimeDirection::Backward => -1.0,
        }
    }
}

/// GLSL `fract`: `x - floor(x)`, always in [0, 1).
fn fract_gl(x: f32) -> f32 {
    x - x.floor()
}

/// Wall material description.
#[derive(Debug, Clone)]
pub struct DynamicWallDesc {
    /// Tint (RGBA, linear)
    pub color: Vec4,
    /// Trail texture path or URL
    pub trail_image: String,
    /// Duration of one animation cycle
    pub duration: Duration,
    /// Texture repetitions along the scroll axis
    pub repeat_count: f32,
    pub axis: ScrollAxis,
    pub direction: TimeDirection,
}

impl Default for DynamicWallDesc {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            trail_image: String::new(),
            duration: DEFAULT_DURATION,
            repeat_count: 3.0,
            axis: ScrollAxis::Vertical,
            direction: TimeDirection::Backward,
        }
    }
}

/// Uniform block consumed by the wall shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WallUniforms {
    /// Tint (RGBA)
    pub color: Vec4,
    /// Cycle progress in [0, 1)
    pub time: f32,
    /// Texture repetitions along the scroll axis
    pub repeat_count: f32,
    /// 0 = vertical, 1 = horizontal
    pub axis: u32,
    /// +1 forward, -1 backward
    pub direction: f32,
}

/// Shaded fragment produced from a texture sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallShading {
    pub diffuse: Vec3,
    pub alpha: f32,
    /// Glow, before the engine's gamma correction
    pub emission: Vec3,
}

/// Per-frame material value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallFrame {
    pub uniforms: WallUniforms,
    /// True if the host should ask the engine for a redraw
    pub request_render: bool,
}

/// Spaces redraw requests at least `interval` apart.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    interval: Duration,
    last_request: Option<Duration>,
}

impl RenderThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
        }
    }

    /// True if a request may be issued at `now`; records it if so.
    pub fn should_request(&mut self, now: Duration) -> bool {
        let due = match self.last_request {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        };
        if due {
            self.last_request = Some(now);
        }
        due
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(RENDER_THROTTLE)
    }
}

/// Animated wall material.
#[derive(Debug, Clone)]
pub struct DynamicWallMaterial {
    color: Vec4,
    trail_image: String,
    duration: Duration,
    repeat_count: f32,
    axis: ScrollAxis,
    direction: TimeDirection,
    start_time: Duration,
    throttle: RenderThrottle,
}

impl DynamicWallMaterial {
    /// Create a material whose animation starts at `start_time` (monotonic clock).
    ///
    /// A zero duration falls back to `DEFAULT_DURATION` with a warning.
    pub fn new(desc: DynamicWallDesc, start_time: Duration) -> Self {
        let duration = if desc.duration.is_zero() {
            crate::lowalt_warn!(
                "lowalt::DynamicWall",
                "Duration must be positive, using default {:?}",
                DEFAULT_DURATION
            );
            DEFAULT_DURATION
        } else {
            desc.duration
        };

        Self {
            color: desc.color,
            trail_image: desc.trail_image,
            duration,
            repeat_count: desc.repeat_count,
            axis: desc.axis,
            direction: desc.direction,
            start_time,
            throttle: RenderThrottle::default(),
        }
    }

    // ===== GETTERS =====

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn trail_image(&self) -> &str {
        &self.trail_image
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn axis(&self) -> ScrollAxis {
        self.axis
    }

    pub fn direction(&self) -> TimeDirection {
        self.direction
    }

    /// Set the tint.
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    // ===== ANIMATION =====

    /// Cycle progress `((now - start) mod duration) / duration`, in [0, 1).
    pub fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.start_time).as_nanos();
        let period = self.duration.as_nanos();
        ((elapsed % period) as f64 / period as f64) as f32
    }

    /// Texture coordinate sampled for surface coordinate `st` at `progress`.
    ///
    /// The scroll axis is repeated `repeat_count` times and offset by
    /// `±progress`; the other axis passes through.
    pub fn scroll_coordinate(&self, st: Vec2, progress: f32) -> Vec2 {
        let offset = self.direction.sign() * progress;
        match self.axis {
            ScrollAxis::Vertical => Vec2::new(
                fract_gl(st.x),
                fract_gl(self.repeat_count * st.y + offset),
            ),
            ScrollAxis::Horizontal => Vec2::new(
                fract_gl(self.repeat_count * st.x + offset),
                fract_gl(st.y),
            ),
        }
    }

    /// Blend a trail texture sample with the tint.
    pub fn shade(&self, sample: Vec4) -> WallShading {
        WallShading {
            diffuse: sample.truncate(),
            alpha: sample.w,
            emission: sample.truncate() + self.color.truncate(),
        }
    }

    /// Uniform block at `now`.
    pub fn uniforms(&self, now: Duration) -> WallUniforms {
        WallUniforms {
            color: self.color,
            time: self.progress(now),
            repeat_count: self.repeat_count,
            axis: match self.axis {
                ScrollAxis::Vertical => 0,
                ScrollAxis::Horizontal => 1,
            },
            direction: self.direction.sign(),
        }
    }

    /// Per-frame value: uniforms plus a throttled redraw request.
    pub fn value(&mut self, now: Duration) -> WallFrame {
        WallFrame {
            uniforms: self.uniforms(now),
            request_render: self.throttle.should_request(now),
        }
    }
}

impl PartialEq for DynamicWallMaterial {
    /// Same look: animation start and throttle state are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.trail_image == other.trail_image
            && self.duration == other.duration
            && self.repeat_count == other.repeat_count
            && self.axis == other.axis
            && self.direction == other.direction
    }
}

#[cfg(test)]
#[path = "dynamic_wall_tests.rs"]
mod tests;
