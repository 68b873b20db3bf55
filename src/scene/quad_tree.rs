/// QuadTree — build-once spatial index over the world's XZ plane.
///
/// Nodes live in a flat arena (`Vec<QuadNode>`) with index-based child
/// links. Each split divides the node's region into four quadrants in
/// the XZ plane while keeping the full Y range; a model is routed to
/// the single quadrant containing its world-space box center. Children
/// are allocated only for quadrants that received at least one model,
/// so the arena never holds empty subtrees.
///
/// The tree is an acceleration structure, not the owner of the models:
/// it stores keys, and the Scene stays the single source of truth.

use glam::Mat4;
use rustc_hash::FxHashSet;
use crate::camera::Frustum;
use crate::error::{Error, Result};
use crate::{scene_debug, scene_warn};
use super::culler::{CullResults, Culler};
use super::model::SceneModelKey;
use super::scene::Scene;
use super::surround_box::SurroundBox;

const LOG_SOURCE: &str = "peacewater::QuadTree";

/// Quadrant order within a node: +X+Z, -X+Z, -X-Z, +X-Z.
const QUADRANT_COUNT: usize = 4;

/// The world region a quad-tree covers.
///
/// Y bounds are carried through every node unchanged; only X and Z
/// are subdivided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldExtent {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl WorldExtent {
    /// Validate and construct a world extent.
    ///
    /// # Errors
    ///
    /// `InvalidExtent` if any axis has max <= min.
    pub fn new(
        x_min: f32, x_max: f32,
        y_min: f32, y_max: f32,
        z_min: f32, z_max: f32,
    ) -> Result<Self> {
        if x_max <= x_min || y_max <= y_min || z_max <= z_min {
            return Err(Error::InvalidExtent(format!(
                "degenerate extent: x [{}, {}], y [{}, {}], z [{}, {}]",
                x_min, x_max, y_min, y_max, z_min, z_max
            )));
        }
        Ok(Self { x_min, x_max, y_min, y_max, z_min, z_max })
    }
}

/// Outcome of a tree build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Models whose box center fell outside the tree extent, or whose
    /// key was no longer live in the scene. They will never appear in
    /// query results.
    pub dropped: Vec<SceneModelKey>,
    /// Arena nodes allocated
    pub node_count: usize,
}

/// One arena node.
///
/// A node with all-None children is a leaf; only leaves carry model
/// keys after a build (interior nodes hand their models down).
#[derive(Debug, Clone)]
pub struct QuadNode {
    /// World-space region of this node
    bounds: SurroundBox,
    /// Arena indices of the four children, in quadrant order
    children: [Option<usize>; QUADRANT_COUNT],
    /// Root is depth 1; leaves sit at the tree's max depth or wherever
    /// subdivision stopped
    depth: u32,
    /// Keys routed to this node (leaves only, after build)
    models: Vec<SceneModelKey>,
}

impl QuadNode {
    fn new(depth: u32, extent: &WorldExtent) -> Self {
        Self {
            bounds: SurroundBox::from_bounds(
                extent.x_min, extent.x_max,
                extent.y_min, extent.y_max,
                extent.z_min, extent.z_max,
            ),
            children: [None; QUADRANT_COUNT],
            depth,
            models: Vec::new(),
        }
    }

    /// The four XZ quadrant extents, in +X+Z, -X+Z, -X-Z, +X-Z order.
    fn quadrant_extents(extent: &WorldExtent) -> [WorldExtent; QUADRANT_COUNT] {
        let x_mid = (extent.x_min + extent.x_max) * 0.5;
        let z_mid = (extent.z_min + extent.z_max) * 0.5;
        [
            WorldExtent { x_min: x_mid, x_max: extent.x_max, z_min: z_mid, z_max: extent.z_max, ..*extent },
            WorldExtent { x_min: extent.x_min, x_max: x_mid, z_min: z_mid, z_max: extent.z_max, ..*extent },
            WorldExtent { x_min: extent.x_min, x_max: x_mid, z_min: extent.z_min, z_max: z_mid, ..*extent },
            WorldExtent { x_min: x_mid, x_max: extent.x_max, z_min: extent.z_min, z_max: z_mid, ..*extent },
        ]
    }

    /// World-space region of this node
    pub fn bounds(&self) -> &SurroundBox {
        &self.bounds
    }

    /// Arena indices of the children, in quadrant order
    pub fn children(&self) -> &[Option<usize>; QUADRANT_COUNT] {
        &self.children
    }

    /// Node depth (root = 1)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Keys routed to this node
    pub fn models(&self) -> &[SceneModelKey] {
        &self.models
    }

    /// True if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Build-once quad-tree over registered scene models.
///
/// Lifecycle: register keys, `build` against the scene once the models
/// have their final transforms, then `query` every frame. Transform
/// changes after a build are not tracked; rebuild to pick them up.
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    max_depth: u32,
    extent: WorldExtent,
    registered: Vec<SceneModelKey>,
    built: bool,
}

impl QuadTree {
    /// Create an empty tree covering `extent`, subdividing until
    /// `max_depth` (root = depth 1, so max_depth 1 means no splits).
    ///
    /// # Errors
    ///
    /// `InvalidExtent` if `max_depth` is zero.
    pub fn new(extent: WorldExtent, max_depth: u32) -> Result<Self> {
        if max_depth == 0 {
            return Err(Error::InvalidExtent(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            nodes: Vec::new(),
            max_depth,
            extent,
            registered: Vec::new(),
            built: false,
        })
    }

    // ===== REGISTRATION =====

    /// Register a model key for the next build.
    ///
    /// Registering after a build has no effect until `build` runs again.
    pub fn register(&mut self, key: SceneModelKey) {
        if self.built {
            scene_warn!(
                LOG_SOURCE,
                "Model registered after build; rebuild to index it"
            );
        }
        self.registered.push(key);
    }

    /// Keys registered so far (including duplicates, which build dedupes).
    pub fn registered(&self) -> &[SceneModelKey] {
        &self.registered
    }

    // ===== BUILD =====

    /// Build the tree from the registered keys and the scene's current
    /// model transforms. Replaces any previous build.
    ///
    /// Stale keys and models whose box center lies outside the extent
    /// are reported in `BuildReport::dropped`, each with a warning.
    pub fn build(&mut self, scene: &Scene) -> BuildReport {
        self.nodes.clear();
        self.nodes.push(QuadNode::new(1, &self.extent));

        let mut report = BuildReport::default();
        let mut seen: FxHashSet<SceneModelKey> = FxHashSet::default();
        let root_bounds = self.nodes[0].bounds.clone();

        let mut accepted = Vec::new();
        for &key in &self.registered {
            if !seen.insert(key) {
                continue;
            }
            let Some(model) = scene.model(key) else {
                scene_warn!(LOG_SOURCE, "Dropping stale model key {:?}", key);
                report.dropped.push(key);
                continue;
            };
            if !model.surround_box().center_inside(&root_bounds) {
                scene_warn!(
                    LOG_SOURCE,
                    "Dropping model {:?}: center {:?} outside tree extent",
                    key,
                    model.surround_box().center_world()
                );
                report.dropped.push(key);
                continue;
            }
            accepted.push(key);
        }

        self.nodes[0].models = accepted;
        self.partition(0, self.extent, scene, &mut report.dropped);
        self.built = true;

        report.node_count = self.nodes.len();
        scene_debug!(
            LOG_SOURCE,
            "Built quad-tree: {} nodes, depth {}, {} models, {} dropped",
            report.node_count,
            self.max_depth,
            seen.len() - report.dropped.len(),
            report.dropped.len()
        );
        report
    }

    /// Split one node's models across its quadrants, creating children
    /// only for quadrants that received models, and recurse.
    fn partition(
        &mut self,
        node_index: usize,
        extent: WorldExtent,
        scene: &Scene,
        dropped: &mut Vec<SceneModelKey>,
    ) {
        if self.nodes[node_index].depth == self.max_depth {
            return;
        }
        let models = std::mem::take(&mut self.nodes[node_index].models);
        if models.is_empty() {
            return;
        }

        let quadrant_extents = QuadNode::quadrant_extents(&extent);
        let quadrant_bounds: [SurroundBox; QUADRANT_COUNT] = std::array::from_fn(|i| {
            let e = &quadrant_extents[i];
            SurroundBox::from_bounds(e.x_min, e.x_max, e.y_min, e.y_max, e.z_min, e.z_max)
        });

        let mut buckets: [Vec<SceneModelKey>; QUADRANT_COUNT] =
            std::array::from_fn(|_| Vec::new());
        for key in models {
            // The key was accepted against this node's region, so the
            // asymmetric center test matches exactly one quadrant.
            let Some(model) = scene.model(key) else { continue };
            let matched = quadrant_bounds
                .iter()
                .position(|bounds| model.surround_box().center_inside(bounds));
            match matched {
                Some(quadrant) => buckets[quadrant].push(key),
                None => {
                    scene_warn!(
                        LOG_SOURCE,
                        "Dropping model {:?}: center matched no quadrant at depth {}",
                        key,
                        self.nodes[node_index].depth
                    );
                    dropped.push(key);
                }
            }
        }

        let depth = self.nodes[node_index].depth;
        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let child_index = self.nodes.len();
            let mut child = QuadNode::new(depth + 1, &quadrant_extents[quadrant]);
            child.models = bucket;
            self.nodes.push(child);
            self.nodes[node_index].children[quadrant] = Some(child_index);
            self.partition(child_index, quadrant_extents[quadrant], scene, dropped);
        }
    }

    // ===== QUERY =====

    /// Collect the models in every leaf whose region intersects the
    /// frustum of `view_projection`.
    ///
    /// Pure: no scene or tree state changes. `nodes_visited` counts the
    /// nodes that passed the frustum test (subtrees behind a culled
    /// node are never examined).
    pub fn query(&self, view_projection: &Mat4) -> CullResults {
        let mut results = CullResults::default();
        if !self.built {
            scene_warn!(LOG_SOURCE, "Query on an unbuilt quad-tree");
            return results;
        }
        let frustum = Frustum::from_view_projection(view_projection);
        self.query_node(0, &frustum, &mut results);
        results
    }

    fn query_node(&self, node_index: usize, frustum: &Frustum, results: &mut CullResults) {
        let node = &self.nodes[node_index];
        if node.bounds.outside_frustum_world(frustum) {
            return;
        }
        results.nodes_visited += 1;
        if node.is_leaf() {
            results.visible.extend_from_slice(&node.models);
            return;
        }
        for child in node.children.iter().flatten() {
            self.query_node(*child, frustum, results);
        }
    }

    // ===== ACCESSORS =====

    /// True once `build` has run
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Arena nodes, root first
    pub fn nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    /// Number of arena nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Maximum depth (root = 1)
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The world region the tree covers
    pub fn extent(&self) -> &WorldExtent {
        &self.extent
    }
}

impl Culler for QuadTree {
    fn cull(&mut self, _scene: &Scene, view_projection: &Mat4) -> CullResults {
        self.query(view_projection)
    }
}

#[cfg(test)]
#[path = "quad_tree_tests.rs"]
mod tests;
