use glam::{Mat4, Vec3};
use crate::error::Error;
use super::*;

fn vertex_bytes(points: &[[f32; 3]]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(points.len() * 12);
    for p in points {
        bytes.extend_from_slice(bytemuck::cast_slice(p));
    }
    bytes
}

/// A model with a unit box around the origin as local bounds.
fn unit_model() -> SceneModel {
    let mut model = SceneModel::new();
    model
        .grow_local_bounds(
            &vertex_bytes(&[[-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]]),
            12,
        )
        .unwrap();
    model
}

// ============================================================================
// CONSTRUCTION AND BOUNDS
// ============================================================================

#[test]
fn test_new_model_defaults() {
    let model = SceneModel::new();
    assert_eq!(model.position(), Vec3::ZERO);
    assert_eq!(model.rotation(), Vec3::ZERO);
    assert_eq!(model.scale(), Vec3::ONE);
    assert_eq!(*model.model_matrix(), Mat4::IDENTITY);
    assert!(!model.needs_render());
    assert!(model.surround_box().is_empty());
}

#[test]
fn test_grow_local_bounds_updates_world() {
    let model = unit_model();
    // World box matches local under the identity transform
    assert_eq!(model.surround_box().center_world(), Vec3::ZERO);
    assert_eq!(
        model.surround_box().corners_world()[7].truncate(),
        Vec3::ONE
    );
}

#[test]
fn test_grow_local_bounds_across_meshes() {
    let mut model = unit_model();
    model
        .grow_local_bounds(&vertex_bytes(&[[3.0, 0.0, 0.0]]), 12)
        .unwrap();
    assert_eq!(model.surround_box().max(), Vec3::new(3.0, 1.0, 1.0));
}

#[test]
fn test_grow_local_bounds_propagates_errors() {
    let mut model = SceneModel::new();
    let result = model.grow_local_bounds(&[0u8; 10], 4);
    assert!(matches!(result, Err(Error::InvalidVertexStream(_))));
}

#[test]
fn test_finish_local_bounds() {
    let model = SceneModel::new();
    assert!(matches!(
        model.finish_local_bounds(),
        Err(Error::EmptyBounds(_))
    ));

    let grown = unit_model();
    assert!(grown.finish_local_bounds().is_ok());
}

// ============================================================================
// TRANSFORM
// ============================================================================

#[test]
fn test_set_position_moves_world_box() {
    let mut model = unit_model();
    model.set_position(Vec3::new(100.0, 0.0, -50.0));

    assert_eq!(model.position(), Vec3::new(100.0, 0.0, -50.0));
    assert_eq!(
        model.surround_box().center_world(),
        Vec3::new(100.0, 0.0, -50.0)
    );
    // Local box stays put
    assert_eq!(model.surround_box().center_local(), Vec3::ZERO);
}

#[test]
fn test_set_scale_grows_world_box() {
    let mut model = unit_model();
    model.set_scale(Vec3::splat(5.0));
    assert_eq!(
        model.surround_box().corners_world()[7].truncate(),
        Vec3::splat(5.0)
    );
}

#[test]
fn test_set_rotation_spins_world_box() {
    let mut model = unit_model();
    // 90° about Y: local +X maps to world -Z
    model.set_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));

    let corner = model.surround_box().corners_world()[1].truncate(); // local (1,-1,-1)
    assert!((corner - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
}

#[test]
fn test_set_transform_composes_scale_then_rotation_then_translation() {
    let mut model = unit_model();
    model.set_transform(
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::splat(2.0),
    );

    assert_eq!(
        model.surround_box().corners_world()[7].truncate(),
        Vec3::new(12.0, 2.0, 2.0)
    );
    assert_eq!(model.surround_box().center_world(), Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_unchanged_transform_is_a_no_op() {
    let mut model = unit_model();
    model.set_position(Vec3::new(1.0, 2.0, 3.0));
    let matrix_before = *model.model_matrix();

    model.set_position(Vec3::new(1.0, 2.0, 3.0));
    model.set_rotation(Vec3::ZERO);
    model.set_scale(Vec3::ONE);
    model.set_transform(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::ONE);

    assert_eq!(*model.model_matrix(), matrix_before);
}

#[test]
fn test_transform_before_bounds_does_not_panic() {
    // Transforms may be set before any mesh is attached; the world box
    // refresh is skipped until the box has been grown
    let mut model = SceneModel::new();
    model.set_position(Vec3::new(5.0, 0.0, 0.0));
    assert!(model.surround_box().is_empty());

    model
        .grow_local_bounds(&vertex_bytes(&[[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]), 12)
        .unwrap();
    // The pending transform is applied once bounds exist
    assert_eq!(model.surround_box().center_world(), Vec3::new(5.0, 0.0, 0.0));
}

// ============================================================================
// CULLING AND RENDER FLAG
// ============================================================================

#[test]
fn test_outside_frustum_direct() {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let vp = projection * view;

    let mut model = unit_model();
    assert!(!model.outside_frustum(&vp));

    model.set_position(Vec3::new(500.0, 0.0, 0.0));
    assert!(model.outside_frustum(&vp));
}

#[test]
fn test_needs_render_flag() {
    let mut model = unit_model();
    assert!(!model.needs_render());
    model.set_needs_render(true);
    assert!(model.needs_render());
    model.set_needs_render(false);
    assert!(!model.needs_render());
}
