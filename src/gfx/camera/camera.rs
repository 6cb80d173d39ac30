use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, CameraUniform, ViewProjection};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera with an explicit eye position and look target.
///
/// The flythrough animator mutates `eye` directly every tick and the
/// orbit controller swings `eye` around `target`, so the camera keeps
/// both as plain state instead of deriving them from angles.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl ViewProjection for Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl Camera {
    pub fn new(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad(75.0 * std::f32::consts::PI / 180.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        }
    }

    /// Points the camera at a new target without moving the eye
    pub fn look_at(&mut self, target: Vector3<f32>) {
        self.target = target;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_tracks_eye_position() {
        let mut camera = Camera::new(
            Vector3::new(10.0, 5.0, 10.0),
            Vector3::new(0.0, 1.5, 0.0),
            1.5,
        );
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [10.0, 5.0, 10.0, 1.0]);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut camera = Camera::new(Vector3::zero(), Vector3::unit_z(), 1.0);
        camera.resize_projection(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
