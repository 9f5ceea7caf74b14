use glam::{Mat4, Vec3, Vec4};
use crate::camera::Frustum;
use crate::scene::Aabb;
use super::*;

/// Pad parallel center/extent arrays to a multiple of 8 with harmless rows
fn padded(
    rows: &[(Vec3, Vec3)],
) -> (Vec<Vec3>, Vec<Vec3>, Vec<u8>) {
    let padded_len = (rows.len() + 7) & !7;
    let mut centers = vec![Vec3::ZERO; padded_len];
    let mut extents = vec![Vec3::ZERO; padded_len];
    for (i, &(c, e)) in rows.iter().enumerate() {
        centers[i] = c;
        extents[i] = e;
    }
    (centers, extents, vec![0u8; padded_len])
}

// ============================================================================
// Culler::intersects_aabbs
// ============================================================================

#[test]
fn test_aabbs_inside_and_outside() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    let (centers, extents, mut results) = padded(&[
        (Vec3::ZERO, Vec3::splat(0.5)),            // inside
        (Vec3::new(5.0, 0.0, 0.0), Vec3::splat(0.5)), // outside right
        (Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5)), // straddles right plane
    ]);

    Culler::intersects_aabbs(&mut results, &frustum, &centers, &extents, 0);

    assert_eq!(results[0], 1);
    assert_eq!(results[1], 0);
    assert_eq!(results[2], 1);
}

#[test]
fn test_aabbs_matches_scalar_reference() {
    // block culler and the scalar p-vertex test must agree
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 50.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
    let frustum = Frustum::from_view_projection(&(projection * view));

    let mut rows = Vec::new();
    for i in 0..37 {
        let offset = (i as f32) * 2.0 - 36.0;
        rows.push((Vec3::new(offset, 0.0, -offset * 0.5), Vec3::splat(0.75)));
    }
    let (centers, extents, mut results) = padded(&rows);

    Culler::intersects_aabbs(&mut results, &frustum, &centers, &extents, 0);

    for (i, &(center, extent)) in rows.iter().enumerate() {
        let aabb = Aabb { min: center - extent, max: center + extent };
        assert_eq!(
            results[i] != 0,
            frustum.intersects_aabb(&aabb),
            "row {} disagrees with the scalar test",
            i
        );
    }
}

#[test]
fn test_aabbs_write_parameterized_bit() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    let (centers, extents, mut results) = padded(&[(Vec3::ZERO, Vec3::splat(0.5))]);

    // pre-existing bit 0 must survive a pass writing bit 3
    results[0] = 0b0001;
    Culler::intersects_aabbs(&mut results, &frustum, &centers, &extents, 3);
    assert_eq!(results[0], 0b1001);
}

#[test]
fn test_aabbs_outside_does_not_clear_other_bits() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    let (centers, extents, mut results) =
        padded(&[(Vec3::new(100.0, 0.0, 0.0), Vec3::splat(0.5))]);

    results[0] = 0b0001;
    Culler::intersects_aabbs(&mut results, &frustum, &centers, &extents, 3);
    assert_eq!(results[0], 0b0001);
}

#[test]
fn test_aabbs_empty_input() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    let mut results: Vec<u8> = Vec::new();
    Culler::intersects_aabbs(&mut results, &frustum, &[], &[], 0);
}

// ============================================================================
// Culler::intersects_spheres
// ============================================================================

#[test]
fn test_spheres_inside_and_outside() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    let spheres = vec![
        Vec4::new(0.0, 0.0, 0.0, 0.5),  // inside
        Vec4::new(5.0, 0.0, 0.0, 0.5),  // outside
        Vec4::new(1.4, 0.0, 0.0, 0.5),  // radius reaches across the plane
    ];
    let mut results = vec![0u8; spheres.len()];

    Culler::intersects_spheres(&mut results, &frustum, &spheres);

    assert_eq!(results, vec![1, 0, 1]);
}

#[test]
fn test_spheres_overwrite_previous_results() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);
    let spheres = vec![Vec4::new(50.0, 0.0, 0.0, 1.0)];
    let mut results = vec![0xFFu8];

    Culler::intersects_spheres(&mut results, &frustum, &spheres);

    // sphere results replace, they don't OR
    assert_eq!(results[0], 0);
}

#[test]
fn test_spheres_match_scalar_reference() {
    let projection = Mat4::perspective_rh(1.2, 1.5, 0.5, 80.0);
    let view = Mat4::look_at_rh(Vec3::new(3.0, 4.0, 10.0), Vec3::ZERO, Vec3::Y);
    let frustum = Frustum::from_view_projection(&(projection * view));

    let spheres: Vec<Vec4> = (0..23)
        .map(|i| {
            let f = i as f32;
            Vec4::new(f * 1.5 - 16.0, (f * 0.7).sin() * 5.0, -f, 1.0 + (f % 3.0))
        })
        .collect();
    let mut results = vec![0u8; spheres.len()];

    Culler::intersects_spheres(&mut results, &frustum, &spheres);

    for (i, sphere) in spheres.iter().enumerate() {
        assert_eq!(
            results[i] != 0,
            frustum.intersects_sphere(sphere.truncate(), sphere.w),
            "sphere {} disagrees with the scalar test",
            i
        );
    }
}
