/// View — per-frame orchestration of the visibility pipeline.
///
/// prepare() runs once per frame and owns the scene's SoAs for its whole
/// duration: world-origin derivation, frustum setup, scene flattening,
/// the one fork/join point (light culling concurrent with renderable
/// culling), shadow setup, classification, partitioning, and per-object
/// buffer streaming. Exactly one frame is in flight; nothing here is
/// cancelled or retried.

use glam::{Mat4, Vec2, Vec4};
use rayon::prelude::*;
use crate::camera::{Camera, CameraInfo, Frustum};
use crate::error::Result;
use crate::graphics_device::{
    BufferDesc, BufferObject, BufferUsage, GraphicsDevice, Rect2D, Viewport,
};
use crate::light::LightManager;
use crate::scene::{Scene, DIRECTIONAL_LIGHTS_COUNT, PER_RENDERABLE_STRIDE};
use crate::shadow::{ShadowMapManager, ShadowTechnique, SoftShadowOptions};
use crate::{engine_debug, engine_err};
use super::culler::Culler;
use super::dynamic_resolution::{
    DisplayInfo, DynamicResolutionController, DynamicResolutionOptions, FrameInfo,
    FrameRateOptions,
};
use super::visibility::{
    compute_visibility_masks, partition_renderables, VisibleRanges, VISIBLE_RENDERABLE,
    VISIBLE_RENDERABLE_BIT,
};
use super::visible_lights::prepare_visible_lights;
use super::{MAX_LIGHT_COUNT, MAX_SHADOW_CASCADES, MAX_SHADOW_CASTING_SPOTS};

/// Renderable counts below this are culled on the calling thread; the
/// fan-out overhead only pays off past a few thousand objects.
const PARALLEL_CULLING_THRESHOLD: usize = 4096;

/// Sub-range length for parallel culling; must stay a multiple of the
/// culler block width.
const PARALLEL_CULLING_CHUNK: usize = 512;

/// Bytes per light row in the light uniform buffer:
/// position+radius (vec4) and direction+intensity (vec4)
const PER_LIGHT_STRIDE: usize = 32;

/// Per-frame uniform block layout (bytes)
const FRAME_UNIFORMS_VIEW: usize = 0;
const FRAME_UNIFORMS_PROJECTION: usize = 64;
const FRAME_UNIFORMS_VIEW_PROJECTION: usize = 128;
const FRAME_UNIFORMS_PARAMS: usize = 192;
const FRAME_UNIFORMS_SUN: usize = 208;
const FRAME_UNIFORMS_SCALE: usize = 224;
const FRAME_UNIFORMS_SIZE: usize = 240;

/// Ambient intensity used when neither an indirect light nor a skybox
/// provides one (lux)
const DEFAULT_INDIRECT_LIGHT_INTENSITY: f32 = 30_000.0;

/// Number of frames kept in the controller telemetry ring
const FRAME_HISTORY_SIZE: usize = 32;

/// Shadow filtering technique selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowType {
    /// Percentage-closer filtering
    Pcf,
    /// Variance shadow maps
    Vsm,
}

/// A queued picking request at viewport coordinates
#[derive(Debug, Clone, Copy)]
pub struct PickingQuery {
    pub x: u32,
    pub y: u32,
}

/// Result of one picking query
#[derive(Debug, Clone, Copy)]
pub struct PickingResult {
    pub x: u32,
    pub y: u32,
    /// Object id read back from the picking target
    pub renderable: u32,
    pub depth: f32,
}

/// One frame of dynamic-resolution telemetry
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHistoryEntry {
    pub target: f32,
    pub target_with_headroom: f32,
    pub frame_time: f32,
    pub frame_time_denoised: f32,
    /// Scale factor as an area (x * y)
    pub scale: f32,
    pub pid_error: f32,
    pub pid_integral: f32,
    pub pid_derivative: f32,
}

/// A view: one scene rendered from one camera into one viewport.
pub struct View {
    viewport: Viewport,
    visible_layers: u8,
    frustum_culling_enabled: bool,
    shadowing_enabled: bool,
    shadow_type: ShadowType,
    soft_shadow_options: SoftShadowOptions,
    /// Debug: re-center the world origin at the camera to keep shader
    /// math near zero for large scenes
    camera_at_origin: bool,

    dynamic_resolution: DynamicResolutionOptions,
    is_dynamic_resolution_supported: bool,
    resolution_controller: DynamicResolutionController,

    shadow_map_manager: ShadowMapManager,

    // per-frame derived state
    camera_info: CameraInfo,
    culling_frustum: Frustum,
    culling_view_projection: Mat4,
    visible_ranges: VisibleRanges,
    has_shadowing: bool,
    needs_shadow_map: bool,
    has_directional_light: bool,
    has_dynamic_lighting: bool,
    exposure: f32,
    ambient_intensity: f32,
    sun_intensity: f32,
    sun_direction: glam::Vec3,

    // GPU-visible buffers
    light_ubh: Box<dyn BufferObject>,
    frame_ubh: Box<dyn BufferObject>,
    renderable_ubh: Option<Box<dyn BufferObject>>,
    renderable_ubo_size: usize,

    picking_queries: Vec<PickingQuery>,
    frame_history: [FrameHistoryEntry; FRAME_HISTORY_SIZE],
}

impl View {
    /// Create a view and its fixed-size GPU buffers.
    pub fn new(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let light_ubh = device.create_buffer_object(&BufferDesc {
            size: (MAX_LIGHT_COUNT * PER_LIGHT_STRIDE) as u64,
            usage: BufferUsage::Uniform,
        })?;
        let frame_ubh = device.create_buffer_object(&BufferDesc {
            size: FRAME_UNIFORMS_SIZE as u64,
            usage: BufferUsage::Uniform,
        })?;

        Ok(Self {
            viewport: Viewport::new(0, 0, 0, 0),
            visible_layers: 0x01,
            frustum_culling_enabled: true,
            shadowing_enabled: true,
            shadow_type: ShadowType::Pcf,
            soft_shadow_options: SoftShadowOptions::default(),
            camera_at_origin: false,
            dynamic_resolution: DynamicResolutionOptions::default(),
            is_dynamic_resolution_supported: device.is_frame_time_supported(),
            resolution_controller: DynamicResolutionController::new(),
            shadow_map_manager: ShadowMapManager::new(),
            camera_info: CameraInfo::default(),
            culling_frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
            culling_view_projection: Mat4::IDENTITY,
            visible_ranges: VisibleRanges::default(),
            has_shadowing: false,
            needs_shadow_map: false,
            has_directional_light: false,
            has_dynamic_lighting: false,
            exposure: 0.0,
            ambient_intensity: 0.0,
            sun_intensity: 0.0,
            sun_direction: glam::Vec3::NEG_Y,
            light_ubh,
            frame_ubh,
            renderable_ubh: None,
            renderable_ubo_size: 0,
            picking_queries: Vec::new(),
            frame_history: [FrameHistoryEntry::default(); FRAME_HISTORY_SIZE],
        })
    }

    // ===== FRAME PREPARATION =====

    /// Prepare the frame: visibility, shadows, lights, buffer streaming.
    ///
    /// `culling_camera` drives the culling frustum; `viewing_camera`, when
    /// set, drives the matrices used for rendering (debug visualization of
    /// the culling result from a second point of view).
    pub fn prepare(
        &mut self,
        device: &mut dyn GraphicsDevice,
        scene: &mut Scene,
        light_manager: &LightManager,
        culling_camera: &Camera,
        viewing_camera: Option<&Camera>,
        user_time: f32,
    ) -> Result<()> {
        // The world origin implements the environment-light rotation: the
        // IBL transformation is rigid, so the inverse is the transpose.
        let mut world_origin = Mat4::IDENTITY;
        if let Some(ibl) = scene.indirect_light() {
            world_origin = Mat4::from_mat3(ibl.rotation.transpose());
        }

        let camera = viewing_camera.unwrap_or(culling_camera);
        if self.camera_at_origin {
            // Shifting the origin to the camera keeps shader computations
            // near zero, where fp32 precision is highest; objects placed
            // very far from the origin still render and light correctly.
            let shift = world_origin.w_axis.truncate() - camera.position();
            world_origin.w_axis = shift.extend(world_origin.w_axis.w);
        }

        self.camera_info = CameraInfo::new(camera, &world_origin);
        self.culling_view_projection = *culling_camera.culling_projection_matrix()
            * (world_origin * *culling_camera.model_matrix()).inverse();
        self.culling_frustum = Frustum::from_view_projection(&self.culling_view_projection);

        scene.prepare(&world_origin, self.uses_vsm(), light_manager);

        // Light culling runs in parallel with renderable culling; the
        // light job only touches the light SoA, so the borrows are
        // disjoint and the join below is the only synchronization needed.
        let (renderable_data, light_data) = scene.data_mut();
        renderable_data.clear_masks();

        let frustum = self.culling_frustum;
        let camera_info = self.camera_info;
        let culling_enabled = self.frustum_culling_enabled;
        if light_data.positional_count() > 0 {
            rayon::join(
                || prepare_visible_lights(light_manager, &camera_info, &frustum, light_data),
                || Self::prepare_visible_renderables(culling_enabled, &frustum, renderable_data),
            );
        } else {
            Self::prepare_visible_renderables(culling_enabled, &frustum, renderable_data);
        }

        // Shadow setup needs the filtered, sorted light list — the join
        // above guarantees it is complete.
        self.prepare_shadowing(scene, light_manager);

        // Classification and partitioning: compute the final masks, then
        // group the SoA by visibility.
        let visible_layers = self.visible_layers;
        let renderable_data = scene.renderable_data_mut();
        {
            let (layers, visibility, masks) = renderable_data.classify_slices();
            compute_visibility_masks(visible_layers, layers, visibility, masks);
        }
        self.visible_ranges = partition_renderables(renderable_data);

        // Stream per-renderable data for every row any pass may touch.
        let merged = self.visible_ranges.merged();
        let required = merged.len() * PER_RENDERABLE_STRIDE;
        if required > 0 {
            if self.renderable_ubo_size < required {
                // allocate 1/3 extra, with a minimum of 16 objects; the
                // buffer never shrinks
                let count = usize::max(16, (4 * merged.len() + 2) / 3);
                self.renderable_ubo_size = count * PER_RENDERABLE_STRIDE;
                self.renderable_ubh = Some(device.create_buffer_object(&BufferDesc {
                    size: self.renderable_ubo_size as u64,
                    usage: BufferUsage::Stream,
                })?);
                engine_debug!(
                    "nebula3d::View",
                    "per-renderable buffer grown to {} rows",
                    count
                );
            }
            let buffer = self
                .renderable_ubh
                .as_deref()
                .ok_or_else(|| engine_err!("nebula3d::View", "per-renderable buffer missing"))?;
            scene.update_renderable_buffer(merged, buffer)?;
        }

        self.update_primitive_lods(scene);
        self.prepare_lighting(scene, light_manager)?;
        self.commit_uniforms(user_time)?;
        Ok(())
    }

    /// Camera-cull the renderables (or mark everything visible when
    /// frustum culling is disabled).
    fn prepare_visible_renderables(
        culling_enabled: bool,
        frustum: &Frustum,
        renderable_data: &mut crate::scene::RenderableSoa,
    ) {
        if culling_enabled {
            Self::cull_renderables(frustum, renderable_data);
        } else {
            renderable_data.visible_masks_mut().fill(VISIBLE_RENDERABLE);
        }
    }

    /// Frustum-test every renderable AABB, fanning out across sub-ranges
    /// when the object count makes it worthwhile. Results are identical
    /// to the sequential path for any interleaving: sub-ranges are
    /// disjoint and the test is pure.
    fn cull_renderables(frustum: &Frustum, renderable_data: &mut crate::scene::RenderableSoa) {
        let (centers, extents, masks) = renderable_data.cull_slices();
        if masks.len() >= PARALLEL_CULLING_THRESHOLD {
            masks
                .par_chunks_mut(PARALLEL_CULLING_CHUNK)
                .zip(centers.par_chunks(PARALLEL_CULLING_CHUNK))
                .zip(extents.par_chunks(PARALLEL_CULLING_CHUNK))
                .for_each(|((masks, centers), extents)| {
                    Culler::intersects_aabbs(
                        masks,
                        frustum,
                        centers,
                        extents,
                        VISIBLE_RENDERABLE_BIT,
                    );
                });
        } else {
            Culler::intersects_aabbs(masks, frustum, centers, extents, VISIBLE_RENDERABLE_BIT);
        }
    }

    /// Register this frame's shadow maps and select their casters.
    fn prepare_shadowing(&mut self, scene: &mut Scene, light_manager: &LightManager) {
        self.has_shadowing = false;
        self.needs_shadow_map = false;
        if !self.shadowing_enabled {
            return;
        }

        self.shadow_map_manager.reset();

        let uses_vsm = self.uses_vsm();
        let (renderable_data, light_data) = scene.data_mut();

        // dominant directional light is always at index 0
        if let Some(directional) = light_data.instances()[0] {
            if light_manager.is_shadow_caster(directional) {
                let options = light_manager.shadow_options(directional);
                debug_assert!(
                    options.shadow_cascades >= 1
                        && options.shadow_cascades as usize <= MAX_SHADOW_CASCADES
                );
                self.shadow_map_manager.set_shadow_cascades(0, &options);
            }
        }

        // Find shadow-casting spot lights, up to the fixed map budget;
        // the rest are ignored, not an error.
        let mut shadow_casting_spot_count = 0;
        for l in DIRECTIONAL_LIGHTS_COUNT..light_data.size() {
            // when we get here all retained lights are visible
            debug_assert!(light_data.visibility()[l] != 0);

            let instance = match light_data.instances()[l] {
                Some(instance) => instance,
                None => continue,
            };
            if !light_manager.is_shadow_caster(instance) {
                continue;
            }
            if !light_manager.is_spot_light(instance) {
                continue; // point-light shadows are not supported yet
            }

            let options = light_manager.shadow_options(instance);
            self.shadow_map_manager.add_spot_shadow_map(l, &options);
            shadow_casting_spot_count += 1;
            if shadow_casting_spot_count > MAX_SHADOW_CASTING_SPOTS - 1 {
                break; // we ran out of spot shadow-map slots
            }
        }

        let technique = self.shadow_map_manager.update(
            uses_vsm,
            &self.culling_view_projection,
            light_manager,
            renderable_data,
            light_data,
        );

        self.has_shadowing = !technique.is_empty();
        self.needs_shadow_map = technique.contains(ShadowTechnique::SHADOW_MAP);
    }

    /// Refresh the level of detail of every visible renderable.
    fn update_primitive_lods(&self, scene: &mut Scene) {
        let renderable_data = scene.renderable_data_mut();
        let range = self.visible_ranges.visible_renderables.clone();
        for index in range.start as usize..range.end as usize {
            // TODO: select the level from the camera distance
            renderable_data.set_lod(index, 0);
        }
    }

    /// Lighting preparation: light buffer streaming, exposure, ambient
    /// and directional light state for the uniform commit.
    fn prepare_lighting(&mut self, scene: &Scene, light_manager: &LightManager) -> Result<()> {
        let light_data = scene.light_data();

        // here the light list has already been shrunk to the GPU cap
        self.has_dynamic_lighting = light_data.size() > DIRECTIONAL_LIGHTS_COUNT;
        if self.has_dynamic_lighting {
            let count = light_data.size() - DIRECTIONAL_LIGHTS_COUNT;
            let mut bytes = Vec::with_capacity(count * PER_LIGHT_STRIDE);
            for i in DIRECTIONAL_LIGHTS_COUNT..light_data.size() {
                let intensity = light_data.instances()[i]
                    .map_or(0.0, |key| light_manager.intensity(key));
                bytes.extend_from_slice(bytemuck::bytes_of(&light_data.spheres()[i]));
                bytes.extend_from_slice(bytemuck::bytes_of(
                    &light_data.directions()[i].extend(intensity),
                ));
            }
            self.light_ubh.update(0, &bytes)?;
        }

        self.exposure = exposure_from_ev100(self.camera_info.ev100);

        // Without an indirect light, fall back to the skybox's intensity,
        // then to the default.
        self.ambient_intensity = match scene.indirect_light() {
            Some(ibl) => ibl.intensity,
            None => scene
                .skybox()
                .map_or(DEFAULT_INDIRECT_LIGHT_INTENSITY, |skybox| skybox.intensity),
        };

        // directional light (always at index 0)
        let directional = light_data.instances()[0];
        self.has_directional_light = directional.is_some();
        self.sun_direction = light_data.directions()[0];
        self.sun_intensity = directional.map_or(0.0, |key| light_manager.intensity(key));
        Ok(())
    }

    /// Write the per-frame uniform block.
    fn commit_uniforms(&self, user_time: f32) -> Result<()> {
        let scale = self.resolution_controller.scale();
        let mut bytes = vec![0u8; FRAME_UNIFORMS_SIZE];

        let view = self.camera_info.view;
        let projection = self.camera_info.projection;
        let view_projection = projection * view;
        bytes[FRAME_UNIFORMS_VIEW..FRAME_UNIFORMS_VIEW + 64]
            .copy_from_slice(bytemuck::bytes_of(&view));
        bytes[FRAME_UNIFORMS_PROJECTION..FRAME_UNIFORMS_PROJECTION + 64]
            .copy_from_slice(bytemuck::bytes_of(&projection));
        bytes[FRAME_UNIFORMS_VIEW_PROJECTION..FRAME_UNIFORMS_VIEW_PROJECTION + 64]
            .copy_from_slice(bytemuck::bytes_of(&view_projection));

        let params = Vec4::new(self.exposure, self.ambient_intensity, user_time, 0.0);
        bytes[FRAME_UNIFORMS_PARAMS..FRAME_UNIFORMS_PARAMS + 16]
            .copy_from_slice(bytemuck::bytes_of(&params));

        let sun = self.sun_direction.extend(self.sun_intensity);
        bytes[FRAME_UNIFORMS_SUN..FRAME_UNIFORMS_SUN + 16]
            .copy_from_slice(bytemuck::bytes_of(&sun));

        let scale = Vec4::new(
            scale.x,
            scale.y,
            self.viewport.width as f32,
            self.viewport.height as f32,
        );
        bytes[FRAME_UNIFORMS_SCALE..FRAME_UNIFORMS_SCALE + 16]
            .copy_from_slice(bytemuck::bytes_of(&scale));

        self.frame_ubh.update(0, &bytes)
    }

    // ===== DYNAMIC RESOLUTION =====

    /// Advance the resolution controller with this frame's timing.
    ///
    /// Returns the scale to apply to the render targets (rounded so the
    /// scaled viewport is a multiple of 8 pixels on each axis).
    pub fn update_scale(
        &mut self,
        info: &FrameInfo,
        frame_rate: &FrameRateOptions,
        display: &DisplayInfo,
    ) -> Vec2 {
        let mut options = self.dynamic_resolution;
        options.enabled = options.enabled && self.is_dynamic_resolution_supported;
        let scale = self.resolution_controller.update_scale(
            &options,
            frame_rate,
            display,
            &self.viewport,
            info,
        );

        // telemetry ring for debugging UIs
        let target = (1000.0 * frame_rate.interval as f32) / display.refresh_rate;
        let pid = self.resolution_controller.pid();
        self.frame_history.rotate_left(1);
        self.frame_history[FRAME_HISTORY_SIZE - 1] = FrameHistoryEntry {
            target,
            target_with_headroom: target * (1.0 - frame_rate.head_room_ratio),
            frame_time: info.frame_time.as_secs_f32() * 1000.0,
            frame_time_denoised: info.denoised_frame_time.as_secs_f32() * 1000.0,
            scale: self.resolution_controller.scale().x * self.resolution_controller.scale().y,
            pid_error: pid.error(),
            pid_integral: pid.integral(),
            pid_derivative: pid.derivative(),
        };

        scale
    }

    /// Configure dynamic resolution. Inputs are sanitized, never fatal.
    pub fn set_dynamic_resolution_options(&mut self, options: DynamicResolutionOptions) {
        let mut options = options;
        // only enable if the backend can report frame timing
        options.enabled = options.enabled && self.is_dynamic_resolution_supported;
        if options.enabled {
            // minScale cannot be 0 or negative
            options.min_scale = options.min_scale.max(Vec2::splat(1.0 / 1024.0));
            // maxScale cannot be < minScale
            options.max_scale = options.max_scale.max(options.min_scale);
            // clamp maxScale to 2x: above that, bilinear super-sampling
            // stops being useful
            options.max_scale = options.max_scale.min(Vec2::splat(2.0));
            options.sharpness = options.sharpness.clamp(0.0, 2.0);
        }
        self.dynamic_resolution = options;
    }

    pub fn dynamic_resolution_options(&self) -> DynamicResolutionOptions {
        self.dynamic_resolution
    }

    /// Dynamic-resolution telemetry, oldest entry first
    pub fn frame_history(&self) -> &[FrameHistoryEntry] {
        &self.frame_history
    }

    // ===== PICKING =====

    /// Queue a picking query at viewport coordinates.
    ///
    /// Executed by execute_picking_queries() once the picking target of
    /// the frame is available.
    pub fn pick(&mut self, x: u32, y: u32) {
        self.picking_queries.push(PickingQuery { x, y });
    }

    /// Execute all queued picking queries against the picking target.
    ///
    /// `structure_scale` is the extra scale of the picking target itself;
    /// coordinates are additionally adjusted by the dynamic-resolution
    /// scale so queries land on the right texel.
    pub fn execute_picking_queries(
        &mut self,
        device: &mut dyn GraphicsDevice,
        structure_scale: f32,
    ) -> Result<Vec<PickingResult>> {
        let scale = self.resolution_controller.scale();
        let mut results = Vec::with_capacity(self.picking_queries.len());
        for query in self.picking_queries.drain(..) {
            let x = (query.x as f32 * (structure_scale * scale.x)) as i32;
            let y = (query.y as f32 * (structure_scale * scale.y)) as i32;
            let data = device.read_pixels(Rect2D { x, y, width: 1, height: 1 })?;
            debug_assert!(data.len() >= 8);
            let renderable = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
            let depth = f32::from_le_bytes([data[4], data[5], data[6], data[7]]);
            results.push(PickingResult {
                x: query.x,
                y: query.y,
                renderable,
                depth: 1.0 - depth,
            });
        }
        Ok(results)
    }

    // ===== CONFIGURATION =====

    /// Set the viewport in pixels.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        // catch the cases where the caller had an underflow upstream
        debug_assert!(viewport.width as i32 > 0);
        debug_assert!(viewport.height as i32 > 0);
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the visible-layer selector: bits in `select` are replaced
    /// with the corresponding bits of `values`, others are kept.
    pub fn set_visible_layers(&mut self, select: u8, values: u8) {
        self.visible_layers = (self.visible_layers & !select) | (values & select);
    }

    pub fn visible_layers(&self) -> u8 {
        self.visible_layers
    }

    /// Whether the scene's skybox renders in this view
    pub fn is_skybox_visible(&self, scene: &Scene) -> bool {
        scene
            .skybox()
            .map_or(false, |skybox| skybox.layer_mask & self.visible_layers != 0)
    }

    pub fn set_frustum_culling_enabled(&mut self, enabled: bool) {
        self.frustum_culling_enabled = enabled;
    }

    pub fn is_frustum_culling_enabled(&self) -> bool {
        self.frustum_culling_enabled
    }

    pub fn set_shadowing_enabled(&mut self, enabled: bool) {
        self.shadowing_enabled = enabled;
    }

    pub fn is_shadowing_enabled(&self) -> bool {
        self.shadowing_enabled
    }

    pub fn set_shadow_type(&mut self, shadow_type: ShadowType) {
        self.shadow_type = shadow_type;
    }

    pub fn shadow_type(&self) -> ShadowType {
        self.shadow_type
    }

    pub fn set_soft_shadow_options(&mut self, options: SoftShadowOptions) {
        self.soft_shadow_options = options;
    }

    pub fn soft_shadow_options(&self) -> SoftShadowOptions {
        self.soft_shadow_options
    }

    /// Debug toggle: keep the world origin at the camera position
    pub fn set_camera_at_origin_enabled(&mut self, enabled: bool) {
        self.camera_at_origin = enabled;
    }

    fn uses_vsm(&self) -> bool {
        self.shadowing_enabled && self.shadow_type == ShadowType::Vsm
    }

    // ===== FRAME RESULTS =====

    /// Rows to draw in the color pass (groups 1-2)
    pub fn visible_renderables(&self) -> std::ops::Range<u32> {
        self.visible_ranges.visible_renderables.clone()
    }

    /// Rows to draw into the directional shadow map (groups 2-3)
    pub fn visible_directional_shadow_casters(&self) -> std::ops::Range<u32> {
        self.visible_ranges.visible_directional_shadow_casters.clone()
    }

    /// Rows any spot shadow map may draw (groups 1-4)
    pub fn spot_light_shadow_casters(&self) -> std::ops::Range<u32> {
        self.visible_ranges.spot_light_shadow_casters.clone()
    }

    pub fn has_shadowing(&self) -> bool {
        self.has_shadowing
    }

    pub fn needs_shadow_map(&self) -> bool {
        self.needs_shadow_map
    }

    pub fn has_directional_light(&self) -> bool {
        self.has_directional_light
    }

    pub fn has_dynamic_lighting(&self) -> bool {
        self.has_dynamic_lighting
    }

    /// The frame's camera values (world origin applied)
    pub fn camera_info(&self) -> &CameraInfo {
        &self.camera_info
    }

    /// The frame's culling frustum
    pub fn culling_frustum(&self) -> &Frustum {
        &self.culling_frustum
    }

    /// Shadow-map registrations of the current frame
    pub fn shadow_map_manager(&self) -> &ShadowMapManager {
        &self.shadow_map_manager
    }

    /// Capacity of the per-renderable buffer in bytes (never shrinks)
    pub fn renderable_buffer_size(&self) -> usize {
        self.renderable_ubo_size
    }
}

/// Photometric exposure from EV at ISO 100
fn exposure_from_ev100(ev100: f32) -> f32 {
    1.0 / (1.2 * 2f32.powf(ev100))
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
