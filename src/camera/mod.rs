//! Camera-side culling math
//!
//! Provides frustum clip-plane extraction from a view-projection matrix.
//! The library does not manage cameras; the caller computes the matrix
//! and hands it in once per frame.

mod frustum;

pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
