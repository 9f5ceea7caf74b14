/// Light component storage.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys, like every other
/// component store in the engine. The visibility pipeline holds keys inside
/// the per-frame light SoA and queries photometry/shadow state through the
/// manager.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key for a light within a LightManager.
    ///
    /// Keys remain valid even after other lights are removed.
    pub struct LightKey;
}

/// Light type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Single dominant directional light (sun)
    Directional,
    /// Omnidirectional positional light
    Point,
    /// Positional light with a cone
    Spot,
}

/// Shadow-map options for one light
#[derive(Debug, Clone, Copy)]
pub struct ShadowOptions {
    /// Number of directional cascades (1..=MAX_SHADOW_CASCADES)
    pub shadow_cascades: u8,
    /// Shadow-map resolution in texels
    pub map_size: u32,
    /// Furthest distance shadows are rendered at; 0 = camera far plane
    pub shadow_far: f32,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self {
            shadow_cascades: 1,
            map_size: 1024,
            shadow_far: 0.0,
        }
    }
}

/// Creation-time description of a light
#[derive(Debug, Clone, Copy)]
pub struct LightDesc {
    pub light_type: LightType,
    pub position: Vec3,
    pub direction: Vec3,
    /// Luminous intensity; lights at or below 0 are culled
    pub intensity: f32,
    /// Influence radius for positional lights
    pub falloff_radius: f32,
    /// Outer cone half-angle in radians (spot only)
    pub outer_cone_angle: f32,
    pub casts_shadows: bool,
    /// False turns the light into a shadow-only participant
    pub casts_light: bool,
    pub shadow_options: ShadowOptions,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            light_type: LightType::Point,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Y,
            intensity: 100_000.0,
            falloff_radius: 10.0,
            outer_cone_angle: std::f32::consts::FRAC_PI_4,
            casts_shadows: false,
            casts_light: true,
            shadow_options: ShadowOptions::default(),
        }
    }
}

struct Light {
    light_type: LightType,
    position: Vec3,
    direction: Vec3,
    intensity: f32,
    falloff_radius: f32,
    /// cos²(outer cone half-angle), precomputed for the cone/frustum test
    cos_outer_squared: f32,
    casts_shadows: bool,
    casts_light: bool,
    shadow_options: ShadowOptions,
}

/// Light component store with stable keys
pub struct LightManager {
    lights: SlotMap<LightKey, Light>,
}

impl LightManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self { lights: SlotMap::with_key() }
    }

    /// Create a light component. Direction is normalized on the way in.
    pub fn create(&mut self, desc: &LightDesc) -> LightKey {
        let cos_outer = desc.outer_cone_angle.cos();
        self.lights.insert(Light {
            light_type: desc.light_type,
            position: desc.position,
            direction: desc.direction.normalize_or_zero(),
            intensity: desc.intensity,
            falloff_radius: desc.falloff_radius,
            cos_outer_squared: cos_outer * cos_outer,
            casts_shadows: desc.casts_shadows,
            casts_light: desc.casts_light,
            shadow_options: desc.shadow_options,
        })
    }

    /// Remove a light component. Returns false if the key is invalid.
    pub fn destroy(&mut self, key: LightKey) -> bool {
        self.lights.remove(key).is_some()
    }

    /// Number of live lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether no lights exist
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    // ===== PER-LIGHT QUERIES (visibility pipeline interface) =====

    /// Whether the key refers to a live light
    pub fn is_valid(&self, key: LightKey) -> bool {
        self.lights.contains_key(key)
    }

    pub fn is_shadow_caster(&self, key: LightKey) -> bool {
        self.lights.get(key).map_or(false, |l| l.casts_shadows)
    }

    pub fn is_spot_light(&self, key: LightKey) -> bool {
        self.lights.get(key).map_or(false, |l| l.light_type == LightType::Spot)
    }

    pub fn is_light_caster(&self, key: LightKey) -> bool {
        self.lights.get(key).map_or(false, |l| l.casts_light)
    }

    pub fn intensity(&self, key: LightKey) -> f32 {
        self.lights.get(key).map_or(0.0, |l| l.intensity)
    }

    /// cos²(outer cone half-angle); 0 for non-spot lights
    pub fn cos_outer_squared(&self, key: LightKey) -> f32 {
        self.lights.get(key).map_or(0.0, |l| l.cos_outer_squared)
    }

    pub fn shadow_options(&self, key: LightKey) -> ShadowOptions {
        self.lights
            .get(key)
            .map_or_else(ShadowOptions::default, |l| l.shadow_options)
    }

    pub fn position(&self, key: LightKey) -> Vec3 {
        self.lights.get(key).map_or(Vec3::ZERO, |l| l.position)
    }

    pub fn direction(&self, key: LightKey) -> Vec3 {
        self.lights.get(key).map_or(Vec3::NEG_Y, |l| l.direction)
    }

    pub fn falloff_radius(&self, key: LightKey) -> f32 {
        self.lights.get(key).map_or(0.0, |l| l.falloff_radius)
    }

    // ===== MUTATION =====

    pub fn set_position(&mut self, key: LightKey, position: Vec3) -> bool {
        if let Some(light) = self.lights.get_mut(key) {
            light.position = position;
            true
        } else {
            false
        }
    }

    pub fn set_direction(&mut self, key: LightKey, direction: Vec3) -> bool {
        if let Some(light) = self.lights.get_mut(key) {
            light.direction = direction.normalize_or_zero();
            true
        } else {
            false
        }
    }

    pub fn set_intensity(&mut self, key: LightKey, intensity: f32) -> bool {
        if let Some(light) = self.lights.get_mut(key) {
            light.intensity = intensity;
            true
        } else {
            false
        }
    }

    pub fn set_shadow_caster(&mut self, key: LightKey, casts_shadows: bool) -> bool {
        if let Some(light) = self.lights.get_mut(key) {
            light.casts_shadows = casts_shadows;
            true
        } else {
            false
        }
    }
}

impl Default for LightManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "light_manager_tests.rs"]
mod tests;
