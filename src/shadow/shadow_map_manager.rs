/// Shadow-map registration and shadow-caster selection.
///
/// Holds the frame's shadow-map sources (reset and re-registered every
/// frame by the View), builds a conservative light-space frustum per map,
/// and writes the caster bits of the renderable visibility masks through
/// the shared block culler. The atlas renderer consumes the registrations
/// and the mask bits downstream.

use bitflags::bitflags;
use glam::{Mat4, Vec3, Vec4Swizzles};
use crate::camera::Frustum;
use crate::light::{LightManager, ShadowOptions};
use crate::scene::{LightSoa, RenderableSoa};
use crate::view::{
    Culler, MAX_SHADOW_CASCADES, MAX_SHADOW_CASTING_SPOTS,
    VISIBLE_DIR_SHADOW_CASTER_BIT, spot_shadow_caster_bit,
};

bitflags! {
    /// Shadow techniques a frame ends up using
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShadowTechnique: u8 {
        /// At least one shadow map is rendered this frame
        const SHADOW_MAP = 0x1;
        /// Shadow maps store variance moments (VSM)
        const VSM = 0x2;
    }
}

/// Soft-shadow tuning consumed by the shading stage
#[derive(Debug, Clone, Copy)]
pub struct SoftShadowOptions {
    pub penumbra_scale: f32,
    pub penumbra_ratio_scale: f32,
}

impl Default for SoftShadowOptions {
    fn default() -> Self {
        Self {
            penumbra_scale: 1.0,
            penumbra_ratio_scale: 1.0,
        }
    }
}

struct CascadeShadowMap {
    light_index: usize,
    options: ShadowOptions,
}

struct SpotShadowMap {
    light_index: usize,
    options: ShadowOptions,
}

/// Per-frame shadow-map source registry.
pub struct ShadowMapManager {
    cascade_shadow_map: Option<CascadeShadowMap>,
    spot_shadow_maps: Vec<SpotShadowMap>,
}

impl ShadowMapManager {
    pub fn new() -> Self {
        Self {
            cascade_shadow_map: None,
            spot_shadow_maps: Vec::with_capacity(MAX_SHADOW_CASTING_SPOTS),
        }
    }

    /// Forget last frame's registrations
    pub fn reset(&mut self) {
        self.cascade_shadow_map = None;
        self.spot_shadow_maps.clear();
    }

    /// Register the directional light's cascade configuration
    pub fn set_shadow_cascades(&mut self, light_index: usize, options: &ShadowOptions) {
        debug_assert!(
            options.shadow_cascades >= 1
                && options.shadow_cascades as usize <= MAX_SHADOW_CASCADES
        );
        self.cascade_shadow_map = Some(CascadeShadowMap {
            light_index,
            options: *options,
        });
    }

    /// Register a shadow-casting spot light as a shadow-map source.
    ///
    /// Registrations beyond MAX_SHADOW_CASTING_SPOTS are ignored silently;
    /// the cap is a documented capacity, not an error.
    pub fn add_spot_shadow_map(&mut self, light_index: usize, options: &ShadowOptions) {
        if self.spot_shadow_maps.len() >= MAX_SHADOW_CASTING_SPOTS {
            return;
        }
        self.spot_shadow_maps.push(SpotShadowMap {
            light_index,
            options: *options,
        });
    }

    /// Number of registered shadow-casting spot lights
    pub fn spot_shadow_map_count(&self) -> usize {
        self.spot_shadow_maps.len()
    }

    /// Whether a directional cascade configuration is registered
    pub fn has_cascades(&self) -> bool {
        self.cascade_shadow_map.is_some()
    }

    /// Cascade count registered for the directional light (0 when none)
    pub fn cascade_count(&self) -> u8 {
        self.cascade_shadow_map
            .as_ref()
            .map_or(0, |c| c.options.shadow_cascades)
    }

    /// Select shadow casters for every registered map and report the
    /// techniques in use.
    ///
    /// Writes the directional-caster bit and one spot-caster bit per
    /// registered spot map into the renderable visibility masks. The
    /// classifier later ANDs these geometric bits with the per-object
    /// participation flags.
    pub fn update(
        &mut self,
        vsm: bool,
        culling_view_projection: &Mat4,
        light_manager: &LightManager,
        renderable_data: &mut RenderableSoa,
        light_data: &LightSoa,
    ) -> ShadowTechnique {
        let mut technique = ShadowTechnique::empty();

        if let Some(cascade) = &self.cascade_shadow_map {
            let direction = light_data.directions()[cascade.light_index];
            let frustum = directional_caster_frustum(direction, culling_view_projection);
            let (centers, extents, masks) = renderable_data.cull_slices();
            Culler::intersects_aabbs(
                masks,
                &frustum,
                centers,
                extents,
                VISIBLE_DIR_SHADOW_CASTER_BIT,
            );
            technique |= ShadowTechnique::SHADOW_MAP;
        }

        for (slot, spot) in self.spot_shadow_maps.iter().enumerate() {
            let sphere = light_data.spheres()[spot.light_index];
            let direction = light_data.directions()[spot.light_index];
            let instance = light_data.instances()[spot.light_index];
            let cos_outer_squared =
                instance.map_or(0.0, |key| light_manager.cos_outer_squared(key));
            let frustum =
                spot_caster_frustum(sphere.xyz(), direction, sphere.w, cos_outer_squared);
            let (centers, extents, masks) = renderable_data.cull_slices();
            Culler::intersects_aabbs(
                masks,
                &frustum,
                centers,
                extents,
                spot_shadow_caster_bit(slot),
            );
            technique |= ShadowTechnique::SHADOW_MAP;
        }

        if !technique.is_empty() && vsm {
            technique |= ShadowTechnique::VSM;
        }
        technique
    }
}

impl Default for ShadowMapManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Light-space selection frustum for the directional shadow map.
///
/// An orthographic volume fitted around the camera's culling frustum in
/// light space, pulled back toward the light by its own depth so casters
/// behind the visible range still shadow into it. Conservative on
/// purpose: it selects casters, it is not the render projection.
fn directional_caster_frustum(direction: Vec3, culling_view_projection: &Mat4) -> Frustum {
    let inverse_view_projection = culling_view_projection.inverse();

    let up = if direction.dot(Vec3::Y).abs() > 0.99 {
        Vec3::X
    } else {
        Vec3::Y
    };
    let light_view = Mat4::look_to_rh(Vec3::ZERO, direction, up);

    // world-space corners of the culling frustum, fitted in light space
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for x in [-1.0f32, 1.0] {
        for y in [-1.0f32, 1.0] {
            for z in [-1.0f32, 1.0] {
                let corner = inverse_view_projection * glam::Vec4::new(x, y, z, 1.0);
                let world = corner.truncate() / corner.w;
                let light_space = light_view.transform_point3(world);
                min = min.min(light_space);
                max = max.max(light_space);
            }
        }
    }

    // light looks along -Z in its own space; pull the near plane back by
    // the volume's depth to keep off-screen casters
    let depth = max.z - min.z;
    let projection = Mat4::orthographic_rh(
        min.x,
        max.x,
        min.y,
        max.y,
        -(max.z + depth),
        -min.z,
    );
    Frustum::from_view_projection(&(projection * light_view))
}

/// Selection frustum for one spot shadow map: a perspective volume from
/// the cone's apex along its axis, reaching the falloff radius.
fn spot_caster_frustum(
    position: Vec3,
    direction: Vec3,
    radius: f32,
    cos_outer_squared: f32,
) -> Frustum {
    let cos_outer = cos_outer_squared.clamp(0.0, 1.0).sqrt();
    let outer_angle = cos_outer.acos().clamp(0.01, std::f32::consts::FRAC_PI_2 - 0.01);

    let up = if direction.dot(Vec3::Y).abs() > 0.99 {
        Vec3::X
    } else {
        Vec3::Y
    };
    let view = Mat4::look_to_rh(position, direction, up);
    let projection =
        Mat4::perspective_rh(2.0 * outer_angle, 1.0, 0.01, radius.max(0.01));
    Frustum::from_view_projection(&(projection * view))
}

#[cfg(test)]
#[path = "shadow_map_manager_tests.rs"]
mod tests;
