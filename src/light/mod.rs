//! Light module — light component storage and per-light queries.
//!
//! The LightManager owns light component data (type, transform, photometry,
//! shadow options). Scenes reference lights by key; the visibility pipeline
//! queries the manager during light culling and shadow setup.

mod light_manager;

pub use light_manager::{
    LightManager, LightKey, LightType, LightDesc, ShadowOptions,
};
