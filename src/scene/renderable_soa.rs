/// Per-frame renderable data in structure-of-arrays form.
///
/// One row per renderable, all columns indexed by the same integer. The
/// arrays are rebuilt every frame by Scene::prepare and reordered in place
/// by the visibility partitioner, so indices never survive a frame.
///
/// Physical column length is the row count padded up to a multiple of 16:
/// the classifier runs 16-wide and the culler 8-wide over the padded tail.
/// Padding rows are harmless by construction (layer mask 0 classifies to an
/// all-zero visibility mask).

use glam::{Mat4, Vec3};
use super::renderable::{RenderableKey, VisibilityFlags};

/// Padding granularity of the SoA columns
const PADDING: usize = 16;

/// Mask-annotated renderable rows for one frame
pub struct RenderableSoa {
    /// World-space AABB centers (world origin applied)
    centers: Vec<Vec3>,
    /// World-space AABB half-extents
    extents: Vec<Vec3>,
    /// 8-bit layer membership masks
    layers: Vec<u8>,
    /// Visibility participation flags
    visibility: Vec<VisibilityFlags>,
    /// World transforms (world origin applied), streamed to the GPU
    world_transforms: Vec<Mat4>,
    /// Chosen level of detail per row
    lods: Vec<u8>,
    /// Opaque handle back to the scene object
    keys: Vec<RenderableKey>,
    /// Visibility mask, mutated by culler/classifier/partitioner
    visible_masks: Vec<u8>,
    /// Real (unpadded) row count
    size: usize,
}

impl RenderableSoa {
    pub fn new() -> Self {
        Self {
            centers: Vec::new(),
            extents: Vec::new(),
            layers: Vec::new(),
            visibility: Vec::new(),
            world_transforms: Vec::new(),
            lods: Vec::new(),
            keys: Vec::new(),
            visible_masks: Vec::new(),
            size: 0,
        }
    }

    /// Drop all rows, keeping allocations for the next frame
    pub fn clear(&mut self) {
        self.centers.clear();
        self.extents.clear();
        self.layers.clear();
        self.visibility.clear();
        self.world_transforms.clear();
        self.lods.clear();
        self.keys.clear();
        self.visible_masks.clear();
        self.size = 0;
    }

    /// Append one row (before seal())
    pub fn push(
        &mut self,
        center: Vec3,
        extent: Vec3,
        layer_mask: u8,
        visibility: VisibilityFlags,
        world_transform: Mat4,
        key: RenderableKey,
    ) {
        self.centers.push(center);
        self.extents.push(extent);
        self.layers.push(layer_mask);
        self.visibility.push(visibility);
        self.world_transforms.push(world_transform);
        self.lods.push(0);
        self.keys.push(key);
        self.visible_masks.push(0);
        self.size += 1;
    }

    /// Pad all columns up to a multiple of 16 with harmless rows.
    ///
    /// Layer mask 0 guarantees the classifier zeroes the padding masks no
    /// matter what the culler wrote there.
    pub fn seal(&mut self) {
        let padded = (self.size + PADDING - 1) & !(PADDING - 1);
        self.centers.resize(padded, Vec3::ZERO);
        self.extents.resize(padded, Vec3::ZERO);
        self.layers.resize(padded, 0);
        self.visibility.resize(padded, VisibilityFlags::default());
        self.world_transforms.resize(padded, Mat4::IDENTITY);
        self.lods.resize(padded, 0);
        self.keys.resize(padded, RenderableKey::default());
        self.visible_masks.resize(padded, 0);
    }

    /// Real row count (excluding padding)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Physical column length (multiple of 16 after seal())
    pub fn padded_size(&self) -> usize {
        self.visible_masks.len()
    }

    // ===== COLUMN ACCESS =====

    pub fn centers(&self) -> &[Vec3] {
        &self.centers
    }

    pub fn extents(&self) -> &[Vec3] {
        &self.extents
    }

    pub fn layers(&self) -> &[u8] {
        &self.layers
    }

    pub fn visibility(&self) -> &[VisibilityFlags] {
        &self.visibility
    }

    pub fn world_transforms(&self) -> &[Mat4] {
        &self.world_transforms
    }

    pub fn lods(&self) -> &[u8] {
        &self.lods
    }

    pub fn keys(&self) -> &[RenderableKey] {
        &self.keys
    }

    pub fn visible_masks(&self) -> &[u8] {
        &self.visible_masks
    }

    pub fn visible_masks_mut(&mut self) -> &mut [u8] {
        &mut self.visible_masks
    }

    /// Reset every visibility mask to zero (start of frame)
    pub fn clear_masks(&mut self) {
        self.visible_masks.fill(0);
    }

    /// Columns consumed by the frustum culler: (centers, extents, masks)
    pub fn cull_slices(&mut self) -> (&[Vec3], &[Vec3], &mut [u8]) {
        (&self.centers, &self.extents, &mut self.visible_masks)
    }

    /// Columns consumed by the classifier: (layers, visibility, masks)
    pub fn classify_slices(&mut self) -> (&[u8], &[VisibilityFlags], &mut [u8]) {
        (&self.layers, &self.visibility, &mut self.visible_masks)
    }

    /// Set the level of detail chosen for a row
    pub fn set_lod(&mut self, index: usize, lod: u8) {
        self.lods[index] = lod;
    }

    /// Swap two rows across every column.
    ///
    /// This is the partitioner's only mutation primitive; rows move as a
    /// unit so all columns stay in step.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.centers.swap(a, b);
        self.extents.swap(a, b);
        self.layers.swap(a, b);
        self.visibility.swap(a, b);
        self.world_transforms.swap(a, b);
        self.lods.swap(a, b);
        self.keys.swap(a, b);
        self.visible_masks.swap(a, b);
    }
}

impl Default for RenderableSoa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "renderable_soa_tests.rs"]
mod tests;
