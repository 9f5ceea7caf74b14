use glam::Vec3;
use super::*;

fn spot_desc() -> LightDesc {
    LightDesc {
        light_type: LightType::Spot,
        position: Vec3::new(0.0, 5.0, 0.0),
        direction: Vec3::NEG_Y,
        intensity: 50_000.0,
        falloff_radius: 12.0,
        outer_cone_angle: std::f32::consts::FRAC_PI_4,
        casts_shadows: true,
        casts_light: true,
        shadow_options: ShadowOptions::default(),
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_create_and_destroy() {
    let mut lm = LightManager::new();
    assert!(lm.is_empty());

    let key = lm.create(&LightDesc::default());
    assert_eq!(lm.len(), 1);
    assert!(lm.is_valid(key));

    assert!(lm.destroy(key));
    assert!(!lm.is_valid(key));
    assert!(lm.is_empty());

    // double destroy is a no-op
    assert!(!lm.destroy(key));
}

#[test]
fn test_keys_stay_valid_after_other_removals() {
    let mut lm = LightManager::new();
    let a = lm.create(&LightDesc::default());
    let b = lm.create(&spot_desc());

    lm.destroy(a);
    assert!(lm.is_valid(b));
    assert!(lm.is_spot_light(b));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_queries_on_spot_light() {
    let mut lm = LightManager::new();
    let key = lm.create(&spot_desc());

    assert!(lm.is_spot_light(key));
    assert!(lm.is_shadow_caster(key));
    assert!(lm.is_light_caster(key));
    assert_eq!(lm.intensity(key), 50_000.0);
    assert_eq!(lm.falloff_radius(key), 12.0);
    assert_eq!(lm.position(key), Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(lm.direction(key), Vec3::NEG_Y);

    // cos²(45°) = 0.5
    assert!((lm.cos_outer_squared(key) - 0.5).abs() < 1e-6);
}

#[test]
fn test_queries_on_invalid_key_are_harmless() {
    let mut lm = LightManager::new();
    let key = lm.create(&LightDesc::default());
    lm.destroy(key);

    assert!(!lm.is_shadow_caster(key));
    assert!(!lm.is_spot_light(key));
    assert!(!lm.is_light_caster(key));
    assert_eq!(lm.intensity(key), 0.0);
    assert_eq!(lm.cos_outer_squared(key), 0.0);
}

#[test]
fn test_direction_is_normalized_on_create() {
    let mut lm = LightManager::new();
    let key = lm.create(&LightDesc {
        direction: Vec3::new(0.0, -10.0, 0.0),
        ..LightDesc::default()
    });
    assert!((lm.direction(key).length() - 1.0).abs() < 1e-6);
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_setters() {
    let mut lm = LightManager::new();
    let key = lm.create(&LightDesc::default());

    assert!(lm.set_position(key, Vec3::X));
    assert_eq!(lm.position(key), Vec3::X);

    assert!(lm.set_direction(key, Vec3::new(2.0, 0.0, 0.0)));
    assert_eq!(lm.direction(key), Vec3::X);

    assert!(lm.set_intensity(key, 0.0));
    assert_eq!(lm.intensity(key), 0.0);

    assert!(lm.set_shadow_caster(key, true));
    assert!(lm.is_shadow_caster(key));

    lm.destroy(key);
    assert!(!lm.set_intensity(key, 1.0));
}
