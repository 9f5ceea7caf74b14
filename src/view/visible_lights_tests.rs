use glam::{Mat4, Vec3, Vec4};
use crate::camera::{CameraInfo, Frustum};
use crate::light::{LightDesc, LightKey, LightManager, LightType};
use crate::scene::{LightSoa, DIRECTIONAL_LIGHTS_COUNT};
use super::*;
use super::super::MAX_LIGHT_COUNT;

/// The NDC cube as a frustum; positions within [-1, 1]³ are visible
fn cube_frustum() -> Frustum {
    Frustum::from_view_projection(&Mat4::IDENTITY)
}

fn camera() -> CameraInfo {
    CameraInfo::default()
}

fn point_desc(position: Vec3, intensity: f32) -> LightDesc {
    LightDesc {
        light_type: LightType::Point,
        position,
        intensity,
        falloff_radius: 0.5,
        ..LightDesc::default()
    }
}

/// Directional slot + one row per light key
fn soa_for(lm: &LightManager, keys: &[LightKey]) -> LightSoa {
    let mut soa = LightSoa::new();
    soa.push(Vec4::ZERO, Vec3::NEG_Y, None, true);
    for &key in keys {
        soa.push(
            lm.position(key).extend(lm.falloff_radius(key)),
            lm.direction(key),
            Some(key),
            false,
        );
    }
    soa
}

// ============================================================================
// Culling and filtering
// ============================================================================

#[test]
fn test_directional_light_always_retained() {
    let mut lm = LightManager::new();
    // a single positional light far outside the frustum
    let far = lm.create(&point_desc(Vec3::new(100.0, 0.0, 0.0), 1000.0));
    let mut soa = soa_for(&lm, &[far]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), 1);
    assert_eq!(soa.visibility()[0], 1);
}

#[test]
fn test_out_of_frustum_lights_dropped() {
    let mut lm = LightManager::new();
    let inside = lm.create(&point_desc(Vec3::ZERO, 1000.0));
    let outside = lm.create(&point_desc(Vec3::new(50.0, 0.0, 0.0), 1000.0));
    let mut soa = soa_for(&lm, &[inside, outside]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), 2);
    assert_eq!(soa.instances()[1], Some(inside));
}

#[test]
fn test_zero_intensity_lights_dropped() {
    let mut lm = LightManager::new();
    let lit = lm.create(&point_desc(Vec3::ZERO, 1000.0));
    let dead = lm.create(&point_desc(Vec3::ZERO, 0.0));
    let mut soa = soa_for(&lm, &[dead, lit]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), 2);
    assert_eq!(soa.instances()[1], Some(lit));
}

#[test]
fn test_non_caster_lights_dropped() {
    let mut lm = LightManager::new();
    let shadow_only = lm.create(&LightDesc {
        casts_light: false,
        ..point_desc(Vec3::ZERO, 1000.0)
    });
    let mut soa = soa_for(&lm, &[shadow_only]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), 1);
}

#[test]
fn test_unreachable_spot_cone_dropped() {
    let mut lm = LightManager::new();
    // sphere overlaps the frustum, but the narrow cone points away from it
    let unreachable = lm.create(&LightDesc {
        light_type: LightType::Spot,
        position: Vec3::new(0.0, 0.0, 5.0),
        direction: Vec3::Z,
        intensity: 1000.0,
        falloff_radius: 10.0,
        outer_cone_angle: 0.3,
        ..LightDesc::default()
    });
    // same geometry, cone pointing at the frustum
    let reaching = lm.create(&LightDesc {
        light_type: LightType::Spot,
        position: Vec3::new(0.0, 0.0, 5.0),
        direction: Vec3::NEG_Z,
        intensity: 1000.0,
        falloff_radius: 10.0,
        outer_cone_angle: 0.3,
        ..LightDesc::default()
    });
    let mut soa = soa_for(&lm, &[unreachable, reaching]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), 2);
    assert_eq!(soa.instances()[1], Some(reaching));
}

#[test]
fn test_scenario_ten_lights_two_dead_one_unreachable_spot() {
    let mut lm = LightManager::new();
    let mut keys = Vec::new();
    // 7 healthy point lights
    for i in 0..7 {
        keys.push(lm.create(&point_desc(Vec3::new(i as f32 * 0.1, 0.0, 0.0), 1000.0)));
    }
    // 2 zero-intensity lights
    keys.push(lm.create(&point_desc(Vec3::ZERO, 0.0)));
    keys.push(lm.create(&point_desc(Vec3::ZERO, 0.0)));
    // 1 spot light whose cone cannot reach the frustum
    keys.push(lm.create(&LightDesc {
        light_type: LightType::Spot,
        position: Vec3::new(0.0, 0.0, 5.0),
        direction: Vec3::Z,
        intensity: 1000.0,
        falloff_radius: 10.0,
        outer_cone_angle: 0.3,
        ..LightDesc::default()
    }));
    let mut soa = soa_for(&lm, &keys);
    assert_eq!(soa.positional_count(), 10);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    // exactly 7 positional lights retained, plus the directional slot
    assert_eq!(soa.size(), 7 + DIRECTIONAL_LIGHTS_COUNT);
    assert!(soa.visibility()[1..].iter().all(|&v| v != 0));
}

// ============================================================================
// Sorting and capping
// ============================================================================

#[test]
fn test_lights_sorted_by_camera_distance() {
    let mut lm = LightManager::new();
    let far = lm.create(&point_desc(Vec3::new(0.9, 0.0, 0.0), 1000.0));
    let near = lm.create(&point_desc(Vec3::new(0.1, 0.0, 0.0), 1000.0));
    let mid = lm.create(&point_desc(Vec3::new(0.5, 0.0, 0.0), 1000.0));
    let mut soa = soa_for(&lm, &[far, near, mid]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.instances()[1], Some(near));
    assert_eq!(soa.instances()[2], Some(mid));
    assert_eq!(soa.instances()[3], Some(far));
    // the distance column travelled with the rows
    for i in 2..soa.size() {
        assert!(soa.distances()[i - 1] <= soa.distances()[i]);
    }
}

#[test]
fn test_sort_follows_view_matrix_not_world_positions() {
    let mut lm = LightManager::new();
    let a = lm.create(&point_desc(Vec3::new(0.8, 0.0, 0.0), 1000.0));
    let b = lm.create(&point_desc(Vec3::new(-0.2, 0.0, 0.0), 1000.0));
    let mut soa = soa_for(&lm, &[a, b]);

    // camera sitting at x = +0.9: light a is the nearer one
    let camera_obj = crate::camera::Camera::new(
        Mat4::from_translation(Vec3::new(0.9, 0.0, 0.0)),
        Mat4::IDENTITY,
    );
    let info = CameraInfo::new(&camera_obj, &Mat4::IDENTITY);

    prepare_visible_lights(&lm, &info, &cube_frustum(), &mut soa);

    assert_eq!(soa.instances()[1], Some(a));
    assert_eq!(soa.instances()[2], Some(b));
}

#[test]
fn test_light_cap_drops_farthest() {
    let mut lm = LightManager::new();
    let count = MAX_LIGHT_COUNT + 20;
    let mut keys = Vec::with_capacity(count);
    for i in 0..count {
        // spread along x inside the frustum, nearest first
        let x = (i as f32 / count as f32) * 0.9;
        keys.push(lm.create(&point_desc(Vec3::new(x, 0.0, 0.0), 1000.0)));
    }
    let mut soa = soa_for(&lm, &keys);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), MAX_LIGHT_COUNT + DIRECTIONAL_LIGHTS_COUNT);
    // the retained set is the nearest MAX_LIGHT_COUNT lights
    for i in DIRECTIONAL_LIGHTS_COUNT..soa.size() {
        assert_eq!(soa.instances()[i], Some(keys[i - DIRECTIONAL_LIGHTS_COUNT]));
    }
}

#[test]
fn test_all_positional_lights_filtered_leaves_directional() {
    let mut lm = LightManager::new();
    let a = lm.create(&point_desc(Vec3::new(30.0, 0.0, 0.0), 1000.0));
    let b = lm.create(&point_desc(Vec3::ZERO, 0.0));
    let mut soa = soa_for(&lm, &[a, b]);

    prepare_visible_lights(&lm, &camera(), &cube_frustum(), &mut soa);

    assert_eq!(soa.size(), 1);
    assert_eq!(soa.positional_count(), 0);
}
