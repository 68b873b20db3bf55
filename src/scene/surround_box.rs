/// SurroundBox — axis-aligned bounding box with precomputed corner points
/// and clip planes, kept in both model (local) and world space.
///
/// Corner ordering (index bit 0 = +X, bit 1 = +Y, bit 2 = +Z):
///
/// ```text
///      2--------3          +Y
///     /|       /|          |
///    6--------7 |          |
///    | |      | |          +----- +X
///    | 0------|-1         /
///    |/       |/        +Z
///    4--------5
/// ```
///
/// Clip planes follow the convention that a point P is inside a plane
/// when dot(plane, P_homogeneous) > 0; the 6 planes face inward
/// (left, right, bottom, top, near, far).

use glam::{Mat4, Vec3, Vec4};
use crate::camera::Frustum;
use crate::error::{Error, Result};

/// Three-way relationship between two boxes, tested in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitState {
    /// The boxes do not overlap
    NoHit,
    /// The boxes overlap without either containing the other
    Cross,
    /// This box lies entirely inside the other box
    Inside,
    /// The other box lies entirely inside this box
    OutSurround,
}

/// Axis-aligned bounding box with derived corners and clip planes.
///
/// Two construction paths:
/// - grown from interleaved mesh vertex data (local space, then
///   transformed into world space via `update_world`), or
/// - built directly from six world-space bounds (`from_bounds`, used
///   for quad-tree node regions).
#[derive(Debug, Clone)]
pub struct SurroundBox {
    /// Minimum corner, expanded monotonically by vertex growth
    min: Vec3,
    /// Maximum corner, expanded monotonically by vertex growth
    max: Vec3,
    center_local: Vec4,
    center_world: Vec4,
    corners_local: [Vec4; 8],
    corners_world: [Vec4; 8],
    planes_local: [Vec4; 6],
    planes_world: [Vec4; 6],
    /// Total vertices scanned so far (0 = degenerate, must not be queried)
    grown_vertices: u32,
    /// World-space fields are valid (after `update_world` or `from_bounds`)
    has_world: bool,
}

impl SurroundBox {
    /// Create an empty box (min = +inf, max = -inf).
    ///
    /// The box must be grown from at least one vertex (or replaced by
    /// `from_bounds`) before any query; see `is_empty`.
    pub fn new() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
            center_local: Vec4::ZERO,
            center_world: Vec4::ZERO,
            corners_local: [Vec4::ZERO; 8],
            corners_world: [Vec4::ZERO; 8],
            planes_local: [Vec4::ZERO; 6],
            planes_world: [Vec4::ZERO; 6],
            grown_vertices: 0,
            has_world: false,
        }
    }

    /// Build a world-space box directly from six scalar bounds.
    ///
    /// Used for quad-tree node regions; only the world-space fields are
    /// populated (there is no model space for a region of the world).
    pub fn from_bounds(
        x_min: f32, x_max: f32,
        y_min: f32, y_max: f32,
        z_min: f32, z_max: f32,
    ) -> Self {
        let min = Vec3::new(x_min, y_min, z_min);
        let max = Vec3::new(x_max, y_max, z_max);
        let mut sbox = Self::new();
        sbox.min = min;
        sbox.max = max;
        sbox.center_world = ((min + max) * 0.5).extend(1.0);
        sbox.corners_world = Self::corner_points(min, max);
        sbox.planes_world = Self::axis_planes(min, max);
        sbox.has_world = true;
        sbox
    }

    /// Scan an interleaved vertex buffer and expand min/max monotonically.
    ///
    /// Reads a little-endian f32 (x, y, z) triple at the start of each
    /// `stride`-sized record. Callable repeatedly: the same box keeps
    /// growing across multiple meshes. After each call the local center,
    /// corners, and clip planes are re-derived from min/max.
    ///
    /// # Errors
    ///
    /// `InvalidVertexStream` if `stride` is smaller than 12 bytes or
    /// `data` is not a whole number of records.
    pub fn grow_from_vertices(&mut self, data: &[u8], stride: usize) -> Result<()> {
        if stride < 12 {
            return Err(Error::InvalidVertexStream(format!(
                "stride {} is smaller than one position (12 bytes)", stride
            )));
        }
        if data.len() % stride != 0 {
            return Err(Error::InvalidVertexStream(format!(
                "buffer length {} is not a multiple of stride {}", data.len(), stride
            )));
        }

        let vertex_count = data.len() / stride;
        for i in 0..vertex_count {
            let base = i * stride;
            let x: f32 = bytemuck::pod_read_unaligned(&data[base..base + 4]);
            let y: f32 = bytemuck::pod_read_unaligned(&data[base + 4..base + 8]);
            let z: f32 = bytemuck::pod_read_unaligned(&data[base + 8..base + 12]);

            self.min = self.min.min(Vec3::new(x, y, z));
            self.max = self.max.max(Vec3::new(x, y, z));
        }
        self.grown_vertices += vertex_count as u32;

        if self.grown_vertices > 0 {
            self.center_local = ((self.min + self.max) * 0.5).extend(1.0);
            self.corners_local = Self::corner_points(self.min, self.max);
            self.planes_local = Self::axis_planes(self.min, self.max);
        }
        Ok(())
    }

    /// Transform the local corners, planes, and center into world space.
    ///
    /// Must be called after every model-matrix change and before any
    /// world-space query. Corners and the center transform by the matrix
    /// itself; planes transform by its inverse-transpose so they remain
    /// valid plane equations under non-uniform scale.
    pub fn update_world(&mut self, model_matrix: &Mat4) {
        debug_assert!(
            self.grown_vertices > 0,
            "update_world on a box that was never grown"
        );
        for i in 0..8 {
            self.corners_world[i] = *model_matrix * self.corners_local[i];
        }
        let plane_matrix = model_matrix.inverse().transpose();
        for i in 0..6 {
            self.planes_world[i] = plane_matrix * self.planes_local[i];
        }
        self.center_world = *model_matrix * self.center_local;
        self.has_world = true;
    }

    /// Test the local corners against the frustum planes.
    ///
    /// Used for direct per-model tests where the frustum was extracted
    /// from a combined model-view-projection matrix.
    pub fn outside_frustum_local(&self, frustum: &Frustum) -> bool {
        debug_assert!(self.grown_vertices > 0, "frustum test on an empty box");
        Self::outside_planes(&self.corners_local, &frustum.planes)
    }

    /// Test the world corners against the frustum planes.
    pub fn outside_frustum_world(&self, frustum: &Frustum) -> bool {
        debug_assert!(self.has_world, "world frustum test without world data");
        Self::outside_planes(&self.corners_world, &frustum.planes)
    }

    /// Three-way box-vs-box relationship in world space.
    ///
    /// `Inside` means this box is inside `other`; `OutSurround` means
    /// `other` is inside this box.
    pub fn hit_state(&self, other: &SurroundBox) -> HitState {
        debug_assert!(self.has_world && other.has_world);

        // Pass 1: this box's corners against the other box's planes.
        let mut outside_corners = 0;
        for plane in &other.planes_world {
            let mut inside = 0;
            for corner in &self.corners_world {
                if plane.dot(*corner) <= 0.0 {
                    outside_corners += 1;
                } else {
                    inside += 1;
                }
            }
            if inside == 0 {
                return HitState::NoHit;
            }
        }
        if outside_corners == 0 {
            return HitState::Inside;
        }

        // Pass 2: the other box's corners against this box's planes.
        let mut outside_corners = 0;
        for plane in &self.planes_world {
            let mut inside = 0;
            for corner in &other.corners_world {
                if plane.dot(*corner) <= 0.0 {
                    outside_corners += 1;
                } else {
                    inside += 1;
                }
            }
            if inside == 0 {
                return HitState::NoHit;
            }
        }
        if outside_corners == 0 {
            return HitState::OutSurround;
        }

        HitState::Cross
    }

    /// Test whether this box's world center lies inside `other`.
    ///
    /// The sole routing test during quad-tree construction. Min-side
    /// planes (left, bottom, near) are strict and max-side planes are
    /// inclusive, so a center sitting exactly on a shared quadrant edge
    /// lands in exactly one quadrant (the low side) instead of both
    /// or neither.
    pub fn center_inside(&self, other: &SurroundBox) -> bool {
        debug_assert!(self.has_world && other.has_world);
        let c = self.center_world;
        let p = &other.planes_world;
        if c.dot(p[0]) <= 0.0 { return false; }
        if c.dot(p[1]) < 0.0 { return false; }
        if c.dot(p[2]) <= 0.0 { return false; }
        if c.dot(p[3]) < 0.0 { return false; }
        if c.dot(p[4]) <= 0.0 { return false; }
        if c.dot(p[5]) < 0.0 { return false; }
        true
    }

    // ===== ACCESSORS =====

    /// Minimum corner (local space for grown boxes, world for `from_bounds`)
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner (local space for grown boxes, world for `from_bounds`)
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center in local space
    pub fn center_local(&self) -> Vec3 {
        self.center_local.truncate()
    }

    /// Center in world space
    pub fn center_world(&self) -> Vec3 {
        self.center_world.truncate()
    }

    /// The 8 local corner points (homogeneous, w = 1)
    pub fn corners_local(&self) -> &[Vec4; 8] {
        &self.corners_local
    }

    /// The 8 world corner points (homogeneous, w = 1)
    pub fn corners_world(&self) -> &[Vec4; 8] {
        &self.corners_world
    }

    /// True if the box was never grown and never built from bounds.
    ///
    /// Querying an empty box is a programming error; corner and plane
    /// values are meaningless until at least one growth call succeeds.
    pub fn is_empty(&self) -> bool {
        self.grown_vertices == 0 && !self.has_world
    }

    // ===== DERIVATION =====

    /// The 8 corners as every min/max combination, w = 1.
    fn corner_points(min: Vec3, max: Vec3) -> [Vec4; 8] {
        [
            Vec4::new(min.x, min.y, min.z, 1.0),
            Vec4::new(max.x, min.y, min.z, 1.0),
            Vec4::new(min.x, max.y, min.z, 1.0),
            Vec4::new(max.x, max.y, min.z, 1.0),
            Vec4::new(min.x, min.y, max.z, 1.0),
            Vec4::new(max.x, min.y, max.z, 1.0),
            Vec4::new(min.x, max.y, max.z, 1.0),
            Vec4::new(max.x, max.y, max.z, 1.0),
        ]
    }

    /// The 6 inward-facing axis-aligned planes of a min/max box.
    fn axis_planes(min: Vec3, max: Vec3) -> [Vec4; 6] {
        [
            Vec4::new(1.0, 0.0, 0.0, -min.x),  // left
            Vec4::new(-1.0, 0.0, 0.0, max.x),  // right
            Vec4::new(0.0, 1.0, 0.0, -min.y),  // bottom
            Vec4::new(0.0, -1.0, 0.0, max.y),  // top
            Vec4::new(0.0, 0.0, 1.0, -min.z),  // near
            Vec4::new(0.0, 0.0, -1.0, max.z),  // far
        ]
    }

    /// True if any single plane has all 8 corners on its negative side.
    ///
    /// Conservative separating-plane test: may report a box as visible
    /// when it is actually outside a diagonal frustum edge (false
    /// positive), but never culls a box that touches the frustum.
    fn outside_planes(corners: &[Vec4; 8], planes: &[Vec4; 6]) -> bool {
        planes
            .iter()
            .any(|plane| corners.iter().all(|corner| plane.dot(*corner) <= 0.0))
    }
}

impl Default for SurroundBox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "surround_box_tests.rs"]
mod tests;
