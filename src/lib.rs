/*!
# Peacewater Scene

Spatial visibility subsystem for large outdoor water scenes.

This crate provides the scene-side culling machinery for a renderer
that draws many tiled surfaces (water planes, terrain patches) over a
wide world: axis-aligned surround boxes with precomputed corners and
clip planes, frustum plane extraction from a view-projection matrix,
a build-once quad-tree over the world's XZ plane, and a flat
per-model culler as the baseline strategy.

## Architecture

- **SurroundBox**: bounding box kept in local and world space
- **Frustum**: six clip planes extracted per frame from the camera
- **Scene**: slotmap registry of placed models and their render flags
- **QuadTree**: arena-based spatial index queried once per frame
- **Culler**: strategy seam shared by the flat and quad-tree cullers

The renderer itself (GPU resources, draw submission) lives elsewhere;
this crate only decides what is worth drawing.
*/

// Internal modules
mod error;
pub mod log;
pub mod camera;
pub mod scene;

// Main peacewater namespace module
pub mod peacewater {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: scene_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
