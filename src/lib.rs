/*!
# Nebula Render

Per-frame scene visibility and preparation core for the Nebula 3D renderer.

Given a camera and a scene flattened into structure-of-arrays form, this crate
determines which renderables and lights are visible for the frame, partitions
the renderable set into disjoint rendering/shadow-casting groups, culls and
ranks dynamic lights, drives the adaptive resolution-scale controller, and
coordinates shadow-map setup. GPU resources are reached through the
`GraphicsDevice` trait; backend implementations (Vulkan, Direct3D 12, etc.)
live in separate crates.

## Architecture

- **View**: per-frame orchestration (culling, classification, partitioning,
  buffer streaming, lighting preparation)
- **Scene**: object/light membership and per-frame SoA flattening
- **Culler**: vectorizable frustum intersection tests
- **ShadowMapManager**: shadow-caster registration and selection
- **DynamicResolutionController**: PID-based render-scale control
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod graphics_device;
pub mod light;
pub mod scene;
pub mod shadow;
pub mod view;

// Main nebula3d namespace module
pub mod nebula3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Graphics device sub-module
    pub mod graphics_device {
        pub use crate::graphics_device::*;
    }

    // Light sub-module
    pub mod light {
        pub use crate::light::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Shadow sub-module
    pub mod shadow {
        pub use crate::shadow::*;
    }

    // View sub-module
    pub mod view {
        pub use crate::view::*;
    }
}

// Re-export math library at crate root
pub use glam;
