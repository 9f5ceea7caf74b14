/// Renderable object types for the scene system.
///
/// A renderable is described once at creation (bounds, layer, visibility
/// participation) and flattened into the per-frame SoA by Scene::prepare.

use glam::{Mat4, Vec3};
use slotmap::new_key_type;

new_key_type! {
    /// Stable key for a renderable within a Scene.
    ///
    /// Keys remain valid even after other renderables are removed. The
    /// per-frame SoA carries the key of every row as its opaque primitive
    /// handle; SoA *indices* are only valid within one frame.
    pub struct RenderableKey;
}

// ===== AABB =====

/// Axis-Aligned Bounding Box in min/max form
///
/// Stored in local space on the scene object and transformed to world
/// space when the object moves. The per-frame SoA uses the center/extent
/// form instead (extent = half size), which the block culler consumes.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Aabb {
    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Aabb { min: new_min, max: new_max }
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half size along each axis
    pub fn extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

// ===== VISIBILITY FLAGS =====

/// Per-renderable visibility participation flags.
///
/// Read by the branch-free classifier every frame; kept small and Copy so
/// the flag array stays cache-dense.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityFlags {
    /// Whether the object participates in frustum culling.
    /// When false the object is treated as always intersecting.
    pub culling: bool,
    /// Whether the object casts shadows
    pub cast_shadows: bool,
    /// Whether the object receives shadows
    pub receive_shadows: bool,
}

impl Default for VisibilityFlags {
    fn default() -> Self {
        Self {
            culling: true,
            cast_shadows: false,
            receive_shadows: true,
        }
    }
}

/// Creation-time description of a renderable
#[derive(Debug, Clone, Copy)]
pub struct RenderableDesc {
    /// AABB in local space
    pub local_aabb: Aabb,
    /// World transform
    pub world_matrix: Mat4,
    /// 8-bit layer membership mask
    pub layer_mask: u8,
    pub visibility: VisibilityFlags,
}

impl Default for RenderableDesc {
    fn default() -> Self {
        Self {
            local_aabb: Aabb { min: Vec3::splat(-0.5), max: Vec3::splat(0.5) },
            world_matrix: Mat4::IDENTITY,
            layer_mask: 0x01,
            visibility: VisibilityFlags::default(),
        }
    }
}
