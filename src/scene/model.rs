/// SceneModel — a positioned, scaled, rotated renderable placed in the scene.
///
/// Owns a SurroundBox in local space (built once from mesh geometry) and
/// keeps its world-space form consistent with the composed model matrix:
/// every transform mutator refreshes the world box before returning, so
/// callers never observe a stale bound.

use glam::{EulerRot, Mat4, Quat, Vec3};
use slotmap::new_key_type;
use crate::camera::Frustum;
use crate::error::{Error, Result};
use super::surround_box::SurroundBox;

new_key_type! {
    /// Stable key for a SceneModel within a Scene.
    ///
    /// Keys remain valid even after other models are removed.
    /// A key becomes invalid only when its own model is removed.
    pub struct SceneModelKey;
}

/// A placed object instance (e.g., one water-plane tile).
///
/// Created once per placed instance; destroyed at scene teardown.
/// The `needs_render` flag is written by the scene from cull results
/// and reset at end of frame; the renderer only reads it.
pub struct SceneModel {
    surround_box: SurroundBox,
    position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order
    rotation: Vec3,
    scale: Vec3,
    model_matrix: Mat4,
    needs_render: bool,
}

impl SceneModel {
    /// Create a model at the origin with identity rotation and unit scale.
    pub fn new() -> Self {
        Self {
            surround_box: SurroundBox::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            model_matrix: Mat4::IDENTITY,
            needs_render: false,
        }
    }

    // ===== LOCAL BOUNDS =====

    /// Grow the local surround box from one mesh's interleaved vertex data.
    ///
    /// Call once per mesh the model references; the box keeps growing
    /// across calls. The world box is refreshed against the current
    /// model matrix before returning.
    pub fn grow_local_bounds(&mut self, data: &[u8], stride: usize) -> Result<()> {
        self.surround_box.grow_from_vertices(data, stride)?;
        if !self.surround_box.is_empty() {
            self.surround_box.update_world(&self.model_matrix);
        }
        Ok(())
    }

    /// Validate that the local bounds were grown from at least one vertex.
    ///
    /// A model with empty bounds produces meaningless culling results;
    /// call this after all `grow_local_bounds` calls and before placing
    /// the model in a quad-tree.
    pub fn finish_local_bounds(&self) -> Result<()> {
        if self.surround_box.is_empty() {
            return Err(Error::EmptyBounds(
                "model bounds were never grown from mesh vertices".to_string(),
            ));
        }
        Ok(())
    }

    // ===== TRANSFORM =====

    /// Set the world position. No-op if unchanged.
    pub fn set_position(&mut self, position: Vec3) {
        if self.position == position {
            return;
        }
        self.position = position;
        self.rebuild_matrix();
    }

    /// Set the Euler rotation (radians, X, Y, Z order). No-op if unchanged.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        if self.rotation == rotation {
            return;
        }
        self.rotation = rotation;
        self.rebuild_matrix();
    }

    /// Set the scale. No-op if unchanged.
    pub fn set_scale(&mut self, scale: Vec3) {
        if self.scale == scale {
            return;
        }
        self.scale = scale;
        self.rebuild_matrix();
    }

    /// Set position, rotation, and scale in one call. No-op if unchanged.
    pub fn set_transform(&mut self, position: Vec3, rotation: Vec3, scale: Vec3) {
        if self.position == position && self.rotation == rotation && self.scale == scale {
            return;
        }
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self.rebuild_matrix();
    }

    /// Recompose the model matrix and refresh the world surround box.
    ///
    /// The world box stays consistent with the matrix after every
    /// mutator; there is no lazy invalidation visible to callers.
    fn rebuild_matrix(&mut self) {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        self.model_matrix =
            Mat4::from_scale_rotation_translation(self.scale, rotation, self.position);
        if !self.surround_box.is_empty() {
            self.surround_box.update_world(&self.model_matrix);
        }
    }

    // ===== CULLING =====

    /// Direct per-model frustum test, bypassing any spatial index.
    ///
    /// Extracts clip planes from `view_projection * model_matrix` and
    /// tests the local corners. Used by the flat-scan baseline culler.
    pub fn outside_frustum(&self, view_projection: &Mat4) -> bool {
        let frustum = Frustum::from_view_projection(&(*view_projection * self.model_matrix));
        self.surround_box.outside_frustum_local(&frustum)
    }

    // ===== ACCESSORS =====

    /// The model's surround box (local and world forms).
    pub fn surround_box(&self) -> &SurroundBox {
        &self.surround_box
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation (radians, X, Y, Z order)
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Composed model matrix (scale, then rotation, then translation)
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    /// True if the last visibility pass marked this model for drawing.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Set the needs-render flag. Written by the Scene when applying
    /// cull results and by the end-of-frame reset.
    pub fn set_needs_render(&mut self, needs_render: bool) {
        self.needs_render = needs_render;
    }
}

impl Default for SceneModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
