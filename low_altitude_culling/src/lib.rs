/*!
# Low Altitude Culling

Client-side visibility culling for a low-altitude airspace viewer running on
top of an external 3D globe engine.

The engine owns the scene graph, the entities and the camera. This crate only
decides, after the camera moves, which placed entities should be shown. It
reads entity state through the `EntityAccess` capability trait, so the
evaluator can run against any engine (or the in-memory `EntityRegistry`).

## Architecture

- **VisibilityCuller**: Facade driven by the host (notify / update / run_once)
- **Debouncer**: Single-slot deadline coalescing camera-change bursts
- **evaluate**: Per-run distance + frustum culling policy
- **CullingStats**: Cumulative counters and running mean duration
- **CameraState / Frustum**: Camera snapshot and its six culling planes
- **DynamicWallMaterial**: Time progress and throttling for the animated wall shader
*/

// Internal modules
mod error;
mod runtime;
pub mod log;
pub mod camera;
pub mod clock;
pub mod culling;
pub mod material;

// Main lowalt namespace module
pub mod lowalt {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide hub (logger, engine tuning)
    pub use crate::runtime::{Runtime, EngineTuning};

    // Clocks
    pub use crate::clock::{Clock, SystemClock, ManualClock};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Culling sub-module
    pub mod culling {
        pub use crate::culling::*;
    }

    // Material sub-module
    pub mod material {
        pub use crate::material::*;
    }
}

// Re-export math library at crate root
pub use glam;
