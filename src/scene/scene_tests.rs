use glam::Vec3;
use crate::scene::{CullResults, SceneModel};
use super::*;

fn vertex_bytes(points: &[[f32; 3]]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(points.len() * 12);
    for p in points {
        bytes.extend_from_slice(bytemuck::cast_slice(p));
    }
    bytes
}

fn model_at(position: Vec3) -> SceneModel {
    let mut model = SceneModel::new();
    model
        .grow_local_bounds(
            &vertex_bytes(&[[-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]]),
            12,
        )
        .unwrap();
    model.set_position(position);
    model
}

// ============================================================================
// MODEL REGISTRY
// ============================================================================

#[test]
fn test_add_and_lookup() {
    let mut scene = Scene::new();
    assert_eq!(scene.model_count(), 0);

    let key = scene.add_model(model_at(Vec3::new(5.0, 0.0, 0.0)));
    assert_eq!(scene.model_count(), 1);
    assert_eq!(
        scene.model(key).unwrap().position(),
        Vec3::new(5.0, 0.0, 0.0)
    );
}

#[test]
fn test_model_mut() {
    let mut scene = Scene::new();
    let key = scene.add_model(model_at(Vec3::ZERO));

    scene
        .model_mut(key)
        .unwrap()
        .set_position(Vec3::new(7.0, 0.0, 0.0));
    assert_eq!(
        scene.model(key).unwrap().position(),
        Vec3::new(7.0, 0.0, 0.0)
    );
}

#[test]
fn test_remove_model_invalidates_key() {
    let mut scene = Scene::new();
    let key = scene.add_model(model_at(Vec3::ZERO));
    let survivor = scene.add_model(model_at(Vec3::ONE));

    let removed = scene.remove_model(key);
    assert!(removed.is_some());
    assert!(scene.model(key).is_none());
    assert!(scene.remove_model(key).is_none());

    // Other keys stay valid
    assert!(scene.model(survivor).is_some());
    assert_eq!(scene.model_count(), 1);
}

#[test]
fn test_iteration_and_keys() {
    let mut scene = Scene::new();
    let k1 = scene.add_model(model_at(Vec3::ZERO));
    let k2 = scene.add_model(model_at(Vec3::ONE));

    let keys: Vec<_> = scene.model_keys().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&k1));
    assert!(keys.contains(&k2));
    assert_eq!(scene.models().count(), 2);
}

#[test]
fn test_clear() {
    let mut scene = Scene::new();
    scene.add_model(model_at(Vec3::ZERO));
    scene.add_model(model_at(Vec3::ONE));

    scene.clear();
    assert_eq!(scene.model_count(), 0);
}

// ============================================================================
// RENDER FLAG CYCLE
// ============================================================================

#[test]
fn test_apply_cull_results_marks_models() {
    let mut scene = Scene::new();
    let visible_key = scene.add_model(model_at(Vec3::ZERO));
    let hidden_key = scene.add_model(model_at(Vec3::new(100.0, 0.0, 0.0)));

    let results = CullResults {
        visible: vec![visible_key],
        nodes_visited: 1,
    };
    scene.apply_cull_results(&results);

    assert!(scene.model(visible_key).unwrap().needs_render());
    assert!(!scene.model(hidden_key).unwrap().needs_render());

    let needing = scene.models_needing_render();
    assert_eq!(needing, vec![visible_key]);
}

#[test]
fn test_apply_cull_results_ignores_stale_keys() {
    let mut scene = Scene::new();
    let key = scene.add_model(model_at(Vec3::ZERO));
    scene.remove_model(key);

    let results = CullResults {
        visible: vec![key],
        nodes_visited: 1,
    };
    // Stale key must not panic
    scene.apply_cull_results(&results);
    assert!(scene.models_needing_render().is_empty());
}

#[test]
fn test_end_frame_resets_flags() {
    let mut scene = Scene::new();
    let k1 = scene.add_model(model_at(Vec3::ZERO));
    let k2 = scene.add_model(model_at(Vec3::ONE));

    scene.apply_cull_results(&CullResults {
        visible: vec![k1, k2],
        nodes_visited: 2,
    });
    assert_eq!(scene.models_needing_render().len(), 2);

    scene.end_frame();
    assert!(scene.models_needing_render().is_empty());
    // A fresh pass can mark models again
    scene.apply_cull_results(&CullResults {
        visible: vec![k2],
        nodes_visited: 1,
    });
    assert_eq!(scene.models_needing_render(), vec![k2]);
}
