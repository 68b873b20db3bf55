/// Scene — the registry of placed models.
///
/// Owns all SceneModels in a slotmap and mediates the per-frame
/// needs-render cycle: a culler produces a visible set, the scene marks
/// those models, the renderer draws whatever is marked, and `end_frame`
/// clears every flag so the next pass starts clean.

use slotmap::SlotMap;
use crate::scene_info;
use super::culler::CullResults;
use super::model::{SceneModel, SceneModelKey};

const LOG_SOURCE: &str = "peacewater::Scene";

/// Registry of all models placed in the world.
pub struct Scene {
    models: SlotMap<SceneModelKey, SceneModel>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            models: SlotMap::with_key(),
        }
    }

    // ===== MODEL REGISTRY =====

    /// Add a model, returning its stable key.
    pub fn add_model(&mut self, model: SceneModel) -> SceneModelKey {
        self.models.insert(model)
    }

    /// Look up a model by key. None if the key is stale.
    pub fn model(&self, key: SceneModelKey) -> Option<&SceneModel> {
        self.models.get(key)
    }

    /// Mutable lookup by key. None if the key is stale.
    pub fn model_mut(&mut self, key: SceneModelKey) -> Option<&mut SceneModel> {
        self.models.get_mut(key)
    }

    /// Remove a model, returning it if the key was live.
    ///
    /// Any spatial index still referencing the key will drop it on its
    /// next rebuild.
    pub fn remove_model(&mut self, key: SceneModelKey) -> Option<SceneModel> {
        self.models.remove(key)
    }

    /// Iterate over all (key, model) pairs.
    pub fn models(&self) -> impl Iterator<Item = (SceneModelKey, &SceneModel)> {
        self.models.iter()
    }

    /// All live model keys.
    pub fn model_keys(&self) -> impl Iterator<Item = SceneModelKey> + '_ {
        self.models.keys()
    }

    /// Number of live models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Remove every model. Spatial indexes built over this scene must
    /// be rebuilt before their next query.
    pub fn clear(&mut self) {
        let count = self.models.len();
        self.models.clear();
        scene_info!(LOG_SOURCE, "Scene cleared ({} models removed)", count);
    }

    // ===== RENDER FLAG CYCLE =====

    /// Mark every model in the visible set as needing render.
    ///
    /// Stale keys in the results are ignored. Flags are only set here,
    /// never cleared; clearing happens in `end_frame`.
    pub fn apply_cull_results(&mut self, results: &CullResults) {
        for &key in &results.visible {
            if let Some(model) = self.models.get_mut(key) {
                model.set_needs_render(true);
            }
        }
    }

    /// Keys of models currently marked for rendering.
    pub fn models_needing_render(&self) -> Vec<SceneModelKey> {
        self.models
            .iter()
            .filter(|(_, model)| model.needs_render())
            .map(|(key, _)| key)
            .collect()
    }

    /// Reset every model's needs-render flag.
    ///
    /// Called once per frame after drawing, so visibility never leaks
    /// from one frame into the next.
    pub fn end_frame(&mut self) {
        for (_, model) in self.models.iter_mut() {
            model.set_needs_render(false);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
