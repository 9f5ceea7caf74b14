/// Light visibility processing: cull, filter, sort, cap.
///
/// Runs once per frame when the scene has positional lights, potentially
/// concurrently with renderable culling (it only touches the light SoA).
/// Afterwards the SoA holds the directional slot plus the retained
/// positional lights, visible rows contiguous and sorted by camera
/// proximity, never more than MAX_LIGHT_COUNT + 1 rows in total.

use glam::Vec3;
use crate::camera::{CameraInfo, Frustum};
use crate::light::LightManager;
use crate::scene::{LightSoa, DIRECTIONAL_LIGHTS_COUNT};
use super::culler::Culler;
use super::MAX_LIGHT_COUNT;

/// Cull, filter, distance-sort, and cap the positional lights in place.
///
/// The directional light at row 0 is never tested and never dropped.
/// Dropping the farthest lights beyond the cap is deliberate: nearer
/// lights dominate visual contribution, and the froxelization stage
/// benefits from the proximity ordering as well.
pub fn prepare_visible_lights(
    light_manager: &LightManager,
    camera: &CameraInfo,
    frustum: &Frustum,
    light_data: &mut LightSoa,
) {
    debug_assert!(light_data.size() > DIRECTIONAL_LIGHTS_COUNT);

    {
        let (spheres, visibility) = light_data.cull_slices();
        Culler::intersects_spheres(visibility, frustum, spheres);
        // the directional light is considered visible, whatever the test said
        visibility[0] = 1;
    }

    // Filter the survivors: shadow-only lights, dead lights, and spot
    // lights whose cone provably cannot reach the frustum are dropped.
    let mut visible_light_count = DIRECTIONAL_LIGHTS_COUNT;
    for i in DIRECTIONAL_LIGHTS_COUNT..light_data.size() {
        if light_data.visibility()[i] == 0 {
            continue;
        }
        let instance = match light_data.instances()[i] {
            Some(instance) => instance,
            None => {
                light_data.visibility_mut()[i] = 0;
                continue;
            }
        };
        if !light_manager.is_light_caster(instance) {
            light_data.visibility_mut()[i] = 0;
            continue;
        }
        if light_manager.intensity(instance) <= 0.0 {
            light_data.visibility_mut()[i] = 0;
            continue;
        }
        if light_manager.is_spot_light(instance) {
            // Per-plane cone/frustum separation: the light is excluded if,
            // for some plane, the cone half-angle cannot reach across the
            // plane and the light center lies outside on the positive side.
            let position = light_data.spheres()[i].truncate();
            let axis = light_data.directions()[i];
            let cos_outer_squared = light_manager.cos_outer_squared(instance);
            let mut invisible = false;
            for plane in &frustum.planes {
                let normal = Vec3::new(plane.x, plane.y, plane.z);
                let p = (position + normal * plane.w).dot(normal);
                let c = normal.dot(axis);
                invisible |= (1.0 - c * c) < cos_outer_squared && c > 0.0 && p > 0.0;
            }
            if invisible {
                light_data.visibility_mut()[i] = 0;
                continue;
            }
        }
        visible_light_count += 1;
    }

    // Partition so all surviving lights are contiguous from row 1; the
    // directional row stays untouched at row 0.
    let mut first = DIRECTIONAL_LIGHTS_COUNT;
    let end = light_data.size();
    while first != end && light_data.visibility()[first] != 0 {
        first += 1;
    }
    if first != end {
        for i in first + 1..end {
            if light_data.visibility()[i] != 0 {
                light_data.swap(first, i);
                first += 1;
            }
        }
    }
    debug_assert_eq!(visible_light_count, first);

    // Sort the positional sublist by camera-space distance, nearest first,
    // moving the parallel distance column together with the rows.
    let positional_light_count = visible_light_count - DIRECTIONAL_LIGHTS_COUNT;
    if positional_light_count > 0 {
        compute_light_camera_distances(camera, light_data, visible_light_count);

        let base = DIRECTIONAL_LIGHTS_COUNT;
        let mut order: Vec<usize> = (0..positional_light_count).collect();
        {
            let distances = light_data.distances();
            order.sort_unstable_by(|&a, &b| {
                distances[base + a].total_cmp(&distances[base + b])
            });
        }
        // apply the permutation in place: order[i] names the row (relative
        // to base) that must land at position i; each cycle resolves with
        // one swap per element
        let mut visited = vec![false; positional_light_count];
        for start in 0..positional_light_count {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let mut i = start;
            loop {
                let src = order[i];
                if src == start {
                    break;
                }
                light_data.swap(base + i, base + src);
                visited[src] = true;
                i = src;
            }
        }
    }

    // Drop lights in excess of what the GPU light buffer can hold; the
    // sort above guarantees the farthest ones go first.
    light_data.truncate(visible_light_count.min(MAX_LIGHT_COUNT + DIRECTIONAL_LIGHTS_COUNT));
}

/// Distance from the camera for every retained light row.
///
/// The directional row gets a value too — it is ignored by the sort,
/// skipping it would only break the loop's uniform shape.
fn compute_light_camera_distances(camera: &CameraInfo, light_data: &mut LightSoa, count: usize) {
    for i in 0..count {
        let position = light_data.spheres()[i].truncate();
        let center = camera.view.transform_point3(position);
        light_data.set_distance(i, center.length());
    }
}

#[cfg(test)]
#[path = "visible_lights_tests.rs"]
mod tests;
