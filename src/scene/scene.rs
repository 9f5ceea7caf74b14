/// Scene — renderable/light membership and per-frame flattening.
///
/// Renderables are stored in a SlotMap with stable keys. World-space AABBs
/// are cached per object and refreshed lazily through a dirty set, so many
/// transform updates within one frame cost one recomputation. Once per
/// frame, prepare() flattens everything into the SoAs the visibility
/// pipeline consumes; from that point until the render pass has read them,
/// the SoAs belong exclusively to frame preparation.

use glam::{Mat3, Mat4, Vec4};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::error::Result;
use crate::graphics_device::BufferObject;
use crate::light::{LightKey, LightManager};
use super::light_soa::LightSoa;
use super::renderable::{Aabb, RenderableDesc, RenderableKey, VisibilityFlags};
use super::renderable_soa::RenderableSoa;

/// Bytes streamed per renderable row: world matrix, inverse world matrix,
/// and a uvec4 of (layer mask, lod, 0, 0).
///
/// Shared contract with the shading stage's per-object buffer indexing —
/// the uploaded range covers every object referenced by any pass.
pub const PER_RENDERABLE_STRIDE: usize = 64 + 64 + 16;

/// Skybox description (visibility-relevant parts only)
#[derive(Debug, Clone, Copy)]
pub struct Skybox {
    /// 8-bit layer membership; the skybox renders when it intersects the
    /// view's visible layers
    pub layer_mask: u8,
    /// Fallback ambient intensity when no indirect light is set
    pub intensity: f32,
}

/// Image-based (indirect) environment light
#[derive(Debug, Clone, Copy)]
pub struct IndirectLight {
    /// Rigid rotation of the environment; its inverse becomes the frame's
    /// world-origin transform
    pub rotation: Mat3,
    pub intensity: f32,
}

struct SceneObject {
    local_aabb: Aabb,
    world_matrix: Mat4,
    /// Cached local_aabb * world_matrix, refreshed via the dirty set
    world_aabb: Aabb,
    layer_mask: u8,
    visibility: VisibilityFlags,
}

/// A scene: renderable objects, light membership, environment.
pub struct Scene {
    objects: SlotMap<RenderableKey, SceneObject>,
    /// Positional lights added to the scene (keys into the LightManager)
    lights: Vec<LightKey>,
    /// The single dominant directional light, if any
    directional_light: Option<LightKey>,
    skybox: Option<Skybox>,
    indirect_light: Option<IndirectLight>,
    /// Objects whose world matrix changed since their AABB cache was built
    dirty_bounds: FxHashSet<RenderableKey>,
    renderable_data: RenderableSoa,
    light_data: LightSoa,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            lights: Vec::new(),
            directional_light: None,
            skybox: None,
            indirect_light: None,
            dirty_bounds: FxHashSet::default(),
            renderable_data: RenderableSoa::new(),
            light_data: LightSoa::new(),
        }
    }

    // ===== MEMBERSHIP =====

    /// Add a renderable to the scene.
    ///
    /// Returns a stable key that remains valid until the renderable is
    /// removed.
    pub fn add_renderable(&mut self, desc: &RenderableDesc) -> RenderableKey {
        let world_aabb = desc.local_aabb.transformed(&desc.world_matrix);
        self.objects.insert(SceneObject {
            local_aabb: desc.local_aabb,
            world_matrix: desc.world_matrix,
            world_aabb,
            layer_mask: desc.layer_mask,
            visibility: desc.visibility,
        })
    }

    /// Remove a renderable. Returns false if the key is invalid.
    pub fn remove_renderable(&mut self, key: RenderableKey) -> bool {
        self.dirty_bounds.remove(&key);
        self.objects.remove(key).is_some()
    }

    /// Number of renderables in the scene
    pub fn renderable_count(&self) -> usize {
        self.objects.len()
    }

    /// Set the world matrix of a renderable. Returns false if the key is
    /// invalid. The world AABB is recomputed lazily at the next prepare().
    pub fn set_world_matrix(&mut self, key: RenderableKey, matrix: Mat4) -> bool {
        if let Some(object) = self.objects.get_mut(key) {
            object.world_matrix = matrix;
            self.dirty_bounds.insert(key);
            true
        } else {
            false
        }
    }

    /// Set the layer membership mask of a renderable
    pub fn set_layer_mask(&mut self, key: RenderableKey, mask: u8) -> bool {
        if let Some(object) = self.objects.get_mut(key) {
            object.layer_mask = mask;
            true
        } else {
            false
        }
    }

    /// Set the visibility participation flags of a renderable
    pub fn set_visibility_flags(&mut self, key: RenderableKey, flags: VisibilityFlags) -> bool {
        if let Some(object) = self.objects.get_mut(key) {
            object.visibility = flags;
            true
        } else {
            false
        }
    }

    /// Add a positional light (point/spot) to the scene
    pub fn add_light(&mut self, key: LightKey) {
        self.lights.push(key);
    }

    /// Remove a positional light from the scene. Returns false if absent.
    pub fn remove_light(&mut self, key: LightKey) -> bool {
        if let Some(pos) = self.lights.iter().position(|&k| k == key) {
            self.lights.swap_remove(pos);
            true
        } else {
            false
        }
    }

    /// Set (or clear) the dominant directional light
    pub fn set_directional_light(&mut self, key: Option<LightKey>) {
        self.directional_light = key;
    }

    pub fn directional_light(&self) -> Option<LightKey> {
        self.directional_light
    }

    pub fn set_skybox(&mut self, skybox: Option<Skybox>) {
        self.skybox = skybox;
    }

    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }

    pub fn set_indirect_light(&mut self, ibl: Option<IndirectLight>) {
        self.indirect_light = ibl;
    }

    pub fn indirect_light(&self) -> Option<&IndirectLight> {
        self.indirect_light.as_ref()
    }

    // ===== PER-FRAME FLATTENING =====

    /// Flatten scene state into the SoAs under the world-origin transform.
    ///
    /// `uses_vsm` widens the shadow-caster flag to shadow receivers: with
    /// variance shadow maps, receivers must be rendered into the map as
    /// well, so the classifier sees them as casters.
    pub fn prepare(&mut self, world_origin: &Mat4, uses_vsm: bool, light_manager: &LightManager) {
        // Refresh cached world AABBs for objects that moved
        for key in self.dirty_bounds.drain() {
            if let Some(object) = self.objects.get_mut(key) {
                object.world_aabb = object.local_aabb.transformed(&object.world_matrix);
            }
        }

        let origin_rotation = Mat3::from_mat4(*world_origin);
        let origin_rotation_abs = Mat3::from_cols(
            origin_rotation.x_axis.abs(),
            origin_rotation.y_axis.abs(),
            origin_rotation.z_axis.abs(),
        );

        let renderable_data = &mut self.renderable_data;
        renderable_data.clear();
        for (key, object) in self.objects.iter() {
            let mut visibility = object.visibility;
            visibility.cast_shadows |= uses_vsm && visibility.receive_shadows;

            renderable_data.push(
                world_origin.transform_point3(object.world_aabb.center()),
                origin_rotation_abs * object.world_aabb.extent(),
                object.layer_mask,
                visibility,
                *world_origin * object.world_matrix,
                key,
            );
        }
        renderable_data.seal();

        let light_data = &mut self.light_data;
        light_data.clear();

        // Row 0 is always the directional slot, visible and never culled
        let (sun_direction, sun_instance) = match self.directional_light {
            Some(key) if light_manager.is_valid(key) => {
                (origin_rotation * light_manager.direction(key), Some(key))
            }
            _ => (glam::Vec3::NEG_Y, None),
        };
        light_data.push(Vec4::ZERO, sun_direction.normalize_or_zero(), sun_instance, true);

        for &key in &self.lights {
            if !light_manager.is_valid(key) {
                continue;
            }
            let position = world_origin.transform_point3(light_manager.position(key));
            let radius = light_manager.falloff_radius(key);
            light_data.push(
                position.extend(radius),
                (origin_rotation * light_manager.direction(key)).normalize_or_zero(),
                Some(key),
                false,
            );
        }
    }

    // ===== SOA ACCESS =====

    pub fn renderable_data(&self) -> &RenderableSoa {
        &self.renderable_data
    }

    pub fn renderable_data_mut(&mut self) -> &mut RenderableSoa {
        &mut self.renderable_data
    }

    pub fn light_data(&self) -> &LightSoa {
        &self.light_data
    }

    pub fn light_data_mut(&mut self) -> &mut LightSoa {
        &mut self.light_data
    }

    /// Disjoint mutable borrows of both SoAs (for the fork/join point)
    pub fn data_mut(&mut self) -> (&mut RenderableSoa, &mut LightSoa) {
        (&mut self.renderable_data, &mut self.light_data)
    }

    // ===== GPU UPLOAD =====

    /// Stream per-renderable data for `range` rows into the buffer.
    ///
    /// The range always starts at row 0 (the partitioner keeps every
    /// GPU-relevant group at the front), so this is a single contiguous
    /// write at offset 0.
    pub fn update_renderable_buffer(
        &self,
        range: std::ops::Range<u32>,
        buffer: &dyn BufferObject,
    ) -> Result<()> {
        debug_assert!(range.start == 0);
        debug_assert!(
            buffer.size() >= (range.len() * PER_RENDERABLE_STRIDE) as u64,
            "per-renderable buffer too small for upload range"
        );

        let soa = &self.renderable_data;
        let mut bytes = Vec::with_capacity(range.len() * PER_RENDERABLE_STRIDE);
        for i in range.start as usize..range.end as usize {
            let world = soa.world_transforms()[i];
            let world_inverse = world.inverse();
            let misc = [soa.layers()[i] as u32, soa.lods()[i] as u32, 0u32, 0u32];
            bytes.extend_from_slice(bytemuck::bytes_of(&world));
            bytes.extend_from_slice(bytemuck::bytes_of(&world_inverse));
            bytes.extend_from_slice(bytemuck::cast_slice(&misc));
        }
        buffer.update(0, &bytes)
    }

    /// Remove all renderables, lights, and environment state
    pub fn clear(&mut self) {
        self.objects.clear();
        self.lights.clear();
        self.directional_light = None;
        self.skybox = None;
        self.indirect_light = None;
        self.dirty_bounds.clear();
        self.renderable_data.clear();
        self.light_data.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
