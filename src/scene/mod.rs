//! Scene management module
//!
//! Provides the model registry, bounding volumes, the quad-tree spatial
//! index, and culling strategies.

mod surround_box;
mod model;
mod scene;
mod quad_tree;
mod culler;

pub use surround_box::{HitState, SurroundBox};
pub use model::{SceneModel, SceneModelKey};
pub use scene::Scene;
pub use quad_tree::{BuildReport, QuadNode, QuadTree, WorldExtent};
pub use culler::{CullResults, Culler, FrustumCuller};
