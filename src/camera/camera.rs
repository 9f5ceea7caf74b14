/// Camera — low-level passive data container.
///
/// The Camera computes nothing. The caller (game engine) is responsible
/// for computing and setting all fields: model matrix, projection matrix,
/// culling projection, and exposure.
///
/// The renderer does NOT store or manage cameras. A View references one
/// camera for culling and, optionally, a second one for viewing (debug
/// visualization of what the culling camera sees).

use glam::{Mat4, Vec3};

/// Low-level camera. A passive data container — computes nothing.
///
/// The culling projection may differ from the viewing projection (e.g. a
/// wider far plane so shadow casters behind the visible range survive
/// culling). When unset it falls back to the viewing projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World transform of the camera (camera-to-world)
    model_matrix: Mat4,
    /// Viewing projection matrix
    projection_matrix: Mat4,
    /// Projection used for culling; None = same as viewing projection
    culling_projection_matrix: Option<Mat4>,
    /// Exposure value at ISO 100
    ev100: f32,
}

impl Camera {
    /// Create a new camera with the given parameters.
    ///
    /// The culling projection defaults to `None` (same as projection),
    /// the exposure to EV 10 (bright indoor scene).
    pub fn new(model: Mat4, projection: Mat4) -> Self {
        Self {
            model_matrix: model,
            projection_matrix: projection,
            culling_projection_matrix: None,
            ev100: 10.0,
        }
    }

    // ===== GETTERS =====

    /// World transform of the camera (camera-to-world).
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> Mat4 {
        self.model_matrix.inverse()
    }

    /// Viewing projection matrix.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Projection matrix used for culling.
    pub fn culling_projection_matrix(&self) -> &Mat4 {
        self.culling_projection_matrix
            .as_ref()
            .unwrap_or(&self.projection_matrix)
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.model_matrix.col(3).truncate()
    }

    /// Exposure value at ISO 100.
    pub fn ev100(&self) -> f32 {
        self.ev100
    }

    // ===== SETTERS — store, compute nothing =====

    /// Set the world transform.
    pub fn set_model(&mut self, matrix: Mat4) {
        self.model_matrix = matrix;
    }

    /// Set the viewing projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the culling projection. `None` means same as viewing projection.
    pub fn set_culling_projection(&mut self, matrix: Option<Mat4>) {
        self.culling_projection_matrix = matrix;
    }

    /// Set the exposure value at ISO 100.
    pub fn set_ev100(&mut self, ev100: f32) {
        self.ev100 = ev100;
    }
}

/// Per-frame camera values derived once by the View.
///
/// All matrices incorporate the frame's world-origin transform, so every
/// consumer (light distance sort, lighting preparation, uniform commit)
/// works in the same scene space.
#[derive(Debug, Clone, Copy)]
pub struct CameraInfo {
    /// Viewing projection
    pub projection: Mat4,
    /// Camera-to-world, world origin applied
    pub model: Mat4,
    /// World-to-camera, world origin applied
    pub view: Mat4,
    /// Camera position in scene space
    pub position: Vec3,
    /// Exposure value at ISO 100
    pub ev100: f32,
}

impl Default for CameraInfo {
    /// Identity camera at the origin (pre-first-frame state)
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            position: Vec3::ZERO,
            ev100: 10.0,
        }
    }
}

impl CameraInfo {
    /// Derive per-frame camera values under the given world-origin transform.
    pub fn new(camera: &Camera, world_origin: &Mat4) -> Self {
        let model = *world_origin * *camera.model_matrix();
        Self {
            projection: *camera.projection_matrix(),
            model,
            view: model.inverse(),
            position: model.col(3).truncate(),
            ev100: camera.ev100(),
        }
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
