use glam::{Mat4, Vec3};
use super::*;

// ============================================================================
// Camera
// ============================================================================

#[test]
fn test_camera_defaults() {
    let camera = Camera::new(Mat4::IDENTITY, Mat4::IDENTITY);
    assert_eq!(camera.position(), Vec3::ZERO);
    assert_eq!(camera.ev100(), 10.0);
    // no explicit culling projection -> falls back to viewing projection
    assert_eq!(
        *camera.culling_projection_matrix(),
        *camera.projection_matrix()
    );
}

#[test]
fn test_camera_position_from_model() {
    let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let camera = Camera::new(model, Mat4::IDENTITY);
    assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_camera_view_is_inverse_of_model() {
    let model = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));
    let camera = Camera::new(model, Mat4::IDENTITY);

    let p = camera.view_matrix().transform_point3(Vec3::new(0.0, 0.0, 5.0));
    assert!(p.length() < 1e-6, "camera position maps to the view origin");
}

#[test]
fn test_camera_culling_projection_override() {
    let viewing = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
    let culling = Mat4::perspective_rh(1.0, 1.0, 0.1, 1000.0);

    let mut camera = Camera::new(Mat4::IDENTITY, viewing);
    camera.set_culling_projection(Some(culling));

    assert_eq!(*camera.culling_projection_matrix(), culling);
    assert_eq!(*camera.projection_matrix(), viewing);

    camera.set_culling_projection(None);
    assert_eq!(*camera.culling_projection_matrix(), viewing);
}

// ============================================================================
// CameraInfo
// ============================================================================

#[test]
fn test_camera_info_identity_origin() {
    let model = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let camera = Camera::new(model, Mat4::IDENTITY);

    let info = CameraInfo::new(&camera, &Mat4::IDENTITY);
    assert_eq!(info.position, Vec3::new(3.0, 0.0, 0.0));
    assert!((info.view * info.model)
        .abs_diff_eq(Mat4::IDENTITY, 1e-5));
}

#[test]
fn test_camera_info_applies_world_origin() {
    let camera = Camera::new(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)), Mat4::IDENTITY);
    let world_origin = Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0));

    let info = CameraInfo::new(&camera, &world_origin);
    // world origin shifts the camera back to the scene origin
    assert!(info.position.length() < 1e-6);
}

#[test]
fn test_camera_info_default_is_identity() {
    let info = CameraInfo::default();
    assert_eq!(info.model, Mat4::IDENTITY);
    assert_eq!(info.view, Mat4::IDENTITY);
    assert_eq!(info.position, Vec3::ZERO);
}
