//! View module — the per-frame visibility and preparation pipeline.
//!
//! A View ties one scene and one camera pair (culling + optional debug
//! viewing camera) to the per-frame work: frustum culling, branch-free
//! visibility classification, renderable partitioning, light selection,
//! shadow setup, dynamic resolution control, and GPU buffer streaming.

mod culler;
mod visibility;
mod visible_lights;
mod pid;
mod dynamic_resolution;
mod view;

pub use culler::Culler;
pub use visibility::{
    VisibleRanges, compute_visibility_masks,
    VISIBLE_RENDERABLE, VISIBLE_DIR_SHADOW_CASTER,
    VISIBLE_RENDERABLE_BIT, VISIBLE_DIR_SHADOW_CASTER_BIT,
    SPOT_SHADOW_CASTERS_MASK,
    visible_spot_shadow_caster, spot_shadow_caster_bit,
};
pub use visible_lights::prepare_visible_lights;
pub use pid::PidController;
pub use dynamic_resolution::{
    DynamicResolutionController, DynamicResolutionOptions,
    FrameRateOptions, DisplayInfo, FrameInfo,
};
pub use view::{View, ShadowType, PickingQuery, PickingResult, FrameHistoryEntry};

/// Most lights the GPU light buffer can hold, excluding the directional slot
pub const MAX_LIGHT_COUNT: usize = 256;

/// Most spot lights that can cast shadow maps in one frame
pub const MAX_SHADOW_CASTING_SPOTS: usize = 4;

/// Most cascades a directional shadow map can be split into
pub const MAX_SHADOW_CASCADES: usize = 4;
