//! Scene module — object/light membership and per-frame SoA flattening.
//!
//! A Scene owns renderable objects (via stable keys) and references lights
//! owned by the LightManager. Once per frame it flattens everything into
//! structure-of-arrays form (RenderableSoa, LightSoa) under the frame's
//! world-origin transform; the visibility pipeline then mutates those
//! arrays in place.

mod renderable;
mod renderable_soa;
mod light_soa;
mod scene;

pub use renderable::{Aabb, RenderableKey, RenderableDesc, VisibilityFlags};
pub use renderable_soa::RenderableSoa;
pub use light_soa::{LightSoa, DIRECTIONAL_LIGHTS_COUNT};
pub use scene::{Scene, Skybox, IndirectLight, PER_RENDERABLE_STRIDE};
