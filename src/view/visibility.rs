/// Visibility mask layout, branch-free classification, and the in-place
/// partition of the renderable SoA into visibility-ordered groups.
///
/// The mask bit layout is a contract shared by the classifier, the
/// partitioner, the shadow-map manager (which writes the caster bits), and
/// the per-renderable buffer upload. Consumers must never assume a wider
/// mask than declared here.

use std::ops::Range;
use crate::scene::{RenderableSoa, VisibilityFlags};
use super::MAX_SHADOW_CASTING_SPOTS;

// ===== MASK LAYOUT =====

/// Bit index: object is renderable-visible this frame
pub const VISIBLE_RENDERABLE_BIT: u32 = 0;
/// Bit index: object casts into the directional shadow map
pub const VISIBLE_DIR_SHADOW_CASTER_BIT: u32 = 1;

pub const VISIBLE_RENDERABLE: u8 = 1 << VISIBLE_RENDERABLE_BIT;
pub const VISIBLE_DIR_SHADOW_CASTER: u8 = 1 << VISIBLE_DIR_SHADOW_CASTER_BIT;

/// Bit index for spot-shadow slot `slot`
pub const fn spot_shadow_caster_bit(slot: usize) -> u32 {
    2 + slot as u32
}

/// Mask value for spot-shadow slot `slot`
pub const fn visible_spot_shadow_caster(slot: usize) -> u8 {
    1 << spot_shadow_caster_bit(slot)
}

/// All spot-shadow caster bits
pub const SPOT_SHADOW_CASTERS_MASK: u8 =
    (((1u16 << MAX_SHADOW_CASTING_SPOTS) - 1) << 2) as u8;

// ===== CLASSIFICATION =====

/// Recompute every visibility mask from layer membership, participation
/// flags, and the raw geometric bits already written by the cullers.
///
/// The logic below essentially does the following:
///
/// ```text
/// if in visible layer:
///     if culling disabled for the object:
///         treat every geometric test as passed
/// else:
///     clear all bits
/// if the object does not cast shadows:
///     clear the shadow bits
/// ```
///
/// It is written without if statements so the loop vectorizes 16-wide;
/// slice lengths are the padded SoA length (multiple of 16). Shadow
/// receivers under VSM were already widened into cast_shadows by
/// Scene::prepare, so they classify as casters here without a special case.
pub fn compute_visibility_masks(
    visible_layers: u8,
    layers: &[u8],
    visibility: &[VisibilityFlags],
    visible_mask: &mut [u8],
) {
    let count = visible_mask.len();
    debug_assert_eq!(count % 16, 0);
    debug_assert_eq!(layers.len(), count);
    debug_assert_eq!(visibility.len(), count);

    for i in 0..count {
        let mask = visible_mask[i];
        let v = visibility[i];
        let in_visible_layer = (layers[i] & visible_layers) != 0;

        let vis_renderable =
            (!v.culling || (mask & VISIBLE_RENDERABLE) != 0) && in_visible_layer;
        let vis_shadow_participant = v.cast_shadows;
        let vis_dir_shadow = (!v.culling || (mask & VISIBLE_DIR_SHADOW_CASTER) != 0)
            && in_visible_layer
            && vis_shadow_participant;

        let mut m = (vis_renderable as u8) << VISIBLE_RENDERABLE_BIT
            | (vis_dir_shadow as u8) << VISIBLE_DIR_SHADOW_CASTER_BIT;

        // this loop gets fully unrolled
        for slot in 0..MAX_SHADOW_CASTING_SPOTS {
            let vis_spot_shadow = (!v.culling
                || (mask & visible_spot_shadow_caster(slot)) != 0)
                && in_visible_layer
                && vis_shadow_participant;
            m |= (vis_spot_shadow as u8) << spot_shadow_caster_bit(slot);
        }

        visible_mask[i] = m;
    }
}

// ===== PARTITIONING =====

/// Partitioned index intervals into the renderable SoA, valid for the
/// current frame only.
#[derive(Debug, Clone, Default)]
pub struct VisibleRanges {
    /// Groups 1-2: renderable-visible rows
    pub visible_renderables: Range<u32>,
    /// Groups 2-3: directional-shadow-caster rows
    pub visible_directional_shadow_casters: Range<u32>,
    /// Groups 1-4: every row any pass may reference
    pub spot_light_shadow_casters: Range<u32>,
}

impl VisibleRanges {
    /// The per-renderable buffer upload range.
    ///
    /// Deliberately identical to `spot_light_shadow_casters`: the upload
    /// also subsumes spot-caster-only rows because GPU per-object data
    /// must be present for any object contributing to any pass.
    pub fn merged(&self) -> Range<u32> {
        self.spot_light_shadow_casters.clone()
    }
}

/// Stable-style partition over [begin, end): rows satisfying `pred` move
/// to the front, preserving relative order of the front group. Returns
/// the first index that fails the predicate.
fn partition_by(
    soa: &mut RenderableSoa,
    begin: usize,
    end: usize,
    pred: impl Fn(u8) -> bool,
) -> usize {
    let mut first = begin;
    while first != end && pred(soa.visible_masks()[first]) {
        first += 1;
    }
    if first == end {
        return first;
    }
    for i in first + 1..end {
        if pred(soa.visible_masks()[i]) {
            soa.swap(first, i);
            first += 1;
        }
    }
    first
}

/// Partition on the low two mask bits only (renderable + directional
/// caster); the spot bits are ignored so the first three groups may also
/// contain spot casters.
fn partition(soa: &mut RenderableSoa, begin: usize, end: usize, key: u8) -> usize {
    partition_by(soa, begin, end, move |mask| {
        mask & (VISIBLE_RENDERABLE | VISIBLE_DIR_SHADOW_CASTER) == key
    })
}

/// Reorder the SoA into the five visibility groups:
///
/// 1. renderables only
/// 2. renderables that also cast directional shadows
/// 3. directional shadow casters only
/// 4. spot shadow casters only
/// 5. invisible (trailing remainder)
///
/// Three O(n) partitions keyed on the low two mask bits, each narrowing
/// the remaining range, then a predicate partition that separates group 4
/// from the invisible tail — O(4n) total instead of an O(n log n) sort.
/// After this call, for every i < j the partition key of row i is <= that
/// of row j under the group order above; range slicing relies on it.
pub fn partition_renderables(soa: &mut RenderableSoa) -> VisibleRanges {
    let end = soa.size();

    let begin_casters = partition(soa, 0, end, VISIBLE_RENDERABLE);
    let begin_casters_only = partition(
        soa,
        begin_casters,
        end,
        VISIBLE_RENDERABLE | VISIBLE_DIR_SHADOW_CASTER,
    );
    let begin_spot_casters_only =
        partition(soa, begin_casters_only, end, VISIBLE_DIR_SHADOW_CASTER);
    let end_spot_casters_only = partition_by(soa, begin_spot_casters_only, end, |mask| {
        mask & SPOT_SHADOW_CASTERS_MASK != 0
    });

    VisibleRanges {
        visible_renderables: 0..begin_casters_only as u32,
        visible_directional_shadow_casters: begin_casters as u32..begin_spot_casters_only as u32,
        spot_light_shadow_casters: 0..end_spot_casters_only as u32,
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
