/// Per-frame light data in structure-of-arrays form.
///
/// Row 0 is always the directional light slot, present even when the scene
/// has no sun (its instance is then None and its visibility stays set; the
/// lighting stage checks the instance before using it). Rows 1.. are
/// positional lights. The light visibility processor partitions, sorts and
/// truncates these rows in place every frame.

use glam::{Vec3, Vec4};
use crate::light::LightKey;

/// Number of reserved directional-light rows at the front of the SoA
pub const DIRECTIONAL_LIGHTS_COUNT: usize = 1;

/// Mask-annotated light rows for one frame
pub struct LightSoa {
    /// Position (xyz) + influence radius (w), world origin applied
    spheres: Vec<Vec4>,
    /// Normalized directions, world origin applied
    directions: Vec<Vec3>,
    /// Light-manager handle; None marks an empty directional slot
    instances: Vec<Option<LightKey>>,
    /// Non-zero = survived culling and filtering
    visibility: Vec<u8>,
    /// Camera-space distance, filled by the visibility processor
    distances: Vec<f32>,
}

impl LightSoa {
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            directions: Vec::new(),
            instances: Vec::new(),
            visibility: Vec::new(),
            distances: Vec::new(),
        }
    }

    /// Drop all rows, keeping allocations for the next frame
    pub fn clear(&mut self) {
        self.spheres.clear();
        self.directions.clear();
        self.instances.clear();
        self.visibility.clear();
        self.distances.clear();
    }

    /// Append one row. Row 0 must be the directional slot.
    pub fn push(
        &mut self,
        sphere: Vec4,
        direction: Vec3,
        instance: Option<LightKey>,
        visible: bool,
    ) {
        self.spheres.push(sphere);
        self.directions.push(direction);
        self.instances.push(instance);
        self.visibility.push(visible as u8);
        self.distances.push(0.0);
    }

    /// Total row count including the directional slot
    pub fn size(&self) -> usize {
        self.spheres.len()
    }

    /// Number of positional-light rows
    pub fn positional_count(&self) -> usize {
        self.size().saturating_sub(DIRECTIONAL_LIGHTS_COUNT)
    }

    // ===== COLUMN ACCESS =====

    pub fn spheres(&self) -> &[Vec4] {
        &self.spheres
    }

    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    pub fn instances(&self) -> &[Option<LightKey>] {
        &self.instances
    }

    pub fn visibility(&self) -> &[u8] {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut [u8] {
        &mut self.visibility
    }

    /// Columns consumed by the sphere culler: (spheres, visibility)
    pub fn cull_slices(&mut self) -> (&[Vec4], &mut [u8]) {
        (&self.spheres, &mut self.visibility)
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn set_distance(&mut self, index: usize, distance: f32) {
        self.distances[index] = distance;
    }

    /// Swap two rows across every column
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.spheres.swap(a, b);
        self.directions.swap(a, b);
        self.instances.swap(a, b);
        self.visibility.swap(a, b);
        self.distances.swap(a, b);
    }

    /// Drop all rows past `len` (excess lights beyond the GPU cap)
    pub fn truncate(&mut self, len: usize) {
        self.spheres.truncate(len);
        self.directions.truncate(len);
        self.instances.truncate(len);
        self.visibility.truncate(len);
        self.distances.truncate(len);
    }
}

impl Default for LightSoa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "light_soa_tests.rs"]
mod tests;
