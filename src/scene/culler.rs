/// Culling strategy seam.
///
/// A Culler takes the scene and the frame's view-projection matrix and
/// decides which models are worth drawing. FrustumCuller is the flat
/// baseline (every model tested individually); QuadTree implements the
/// same trait with spatial pruning.

use glam::Mat4;
use super::model::SceneModelKey;
use super::scene::Scene;

/// Outcome of one visibility pass.
#[derive(Debug, Clone, Default)]
pub struct CullResults {
    /// Keys of models that passed the visibility test
    pub visible: Vec<SceneModelKey>,
    /// Spatial-index nodes (or models, for the flat culler) that were
    /// frustum-tested and passed. Lets callers compare index pruning
    /// against a flat scan.
    pub nodes_visited: u32,
}

/// Strategy trait for visibility determination.
///
/// Implementations must not mutate the scene; results are applied
/// separately via `Scene::apply_cull_results`.
pub trait Culler: Send + Sync {
    /// Determine the visible set for one frame.
    fn cull(&mut self, scene: &Scene, view_projection: &Mat4) -> CullResults;
}

/// Flat per-model frustum culler.
///
/// Tests every model in the scene against the frustum with no spatial
/// structure. O(n) in model count; the baseline a quad-tree must beat.
pub struct FrustumCuller;

impl FrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FrustumCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl Culler for FrustumCuller {
    fn cull(&mut self, scene: &Scene, view_projection: &Mat4) -> CullResults {
        let mut results = CullResults::default();
        for (key, model) in scene.models() {
            results.nodes_visited += 1;
            if !model.outside_frustum(view_projection) {
                results.visible.push(key);
            }
        }
        results
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
