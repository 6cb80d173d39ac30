//! Pointer-driven orbit controls with inertial damping
//!
//! Drag input does not move the camera immediately; it feeds angular
//! velocity that the per-frame update integrates and decays, so the
//! orbit coasts to a stop after the pointer is released. With no pending
//! velocity the update leaves the camera untouched, so the flythrough's
//! exact per-tick deltas survive.

use cgmath::{InnerSpace, Vector3};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::camera::Camera;

/// Velocities below this are treated as settled
const SETTLE_EPSILON: f32 = 1e-5;

/// Pitch stays strictly inside the poles
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

pub struct OrbitController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Per-frame velocity retention factor (0 = instant stop, 1 = no decay)
    pub damping: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    is_mouse_pressed: bool,
}

impl OrbitController {
    pub fn new(rotate_speed: f32, zoom_speed: f32, damping: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            damping: damping.clamp(0.0, 1.0),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(&mut self, event: &DeviceEvent, window: &Window) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.zoom_velocity += scroll_amount * self.zoom_speed;
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    self.yaw_velocity -= delta.0 as f32 * self.rotate_speed;
                    self.pitch_velocity += delta.1 as f32 * self.rotate_speed;
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Integrates pending velocities into the camera and decays them.
    ///
    /// Called once per frame. The eye swings around the current look
    /// target at constant radius (plus any zoom velocity).
    pub fn update(&mut self, camera: &mut Camera) {
        if self.is_settled() {
            return;
        }

        let offset = camera.eye - camera.target;
        let radius = offset.magnitude();
        if radius <= f32::EPSILON {
            self.clear();
            return;
        }

        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).asin();

        yaw += self.yaw_velocity;
        pitch = (pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let radius = (radius + self.zoom_velocity).max(0.1);

        camera.eye = camera.target
            + Vector3::new(
                radius * pitch.cos() * yaw.sin(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.cos(),
            );

        self.yaw_velocity *= self.damping;
        self.pitch_velocity *= self.damping;
        self.zoom_velocity *= self.damping;
        if self.is_nearly_settled() {
            self.clear();
        }
    }

    /// True when no drag or zoom motion is pending
    pub fn is_settled(&self) -> bool {
        self.yaw_velocity == 0.0 && self.pitch_velocity == 0.0 && self.zoom_velocity == 0.0
    }

    fn is_nearly_settled(&self) -> bool {
        self.yaw_velocity.abs() < SETTLE_EPSILON
            && self.pitch_velocity.abs() < SETTLE_EPSILON
            && self.zoom_velocity.abs() < SETTLE_EPSILON
    }

    fn clear(&mut self) {
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.zoom_velocity = 0.0;
    }

    #[cfg(test)]
    pub(crate) fn inject_drag(&mut self, yaw: f32, pitch: f32) {
        self.yaw_velocity += yaw;
        self.pitch_velocity += pitch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3, Zero};

    fn test_camera() -> Camera {
        Camera::new(
            Vector3::new(10.0, 5.0, 10.0),
            Vector3::new(0.0, 1.5, 0.0),
            1.0,
        )
    }

    #[test]
    fn settled_controller_does_not_move_camera() {
        let mut controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut camera = test_camera();
        let before = camera.eye;

        for _ in 0..100 {
            controller.update(&mut camera);
        }

        assert_eq!(camera.eye, before);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut camera = test_camera();
        let radius_before = (camera.eye - camera.target).magnitude();

        controller.inject_drag(0.3, 0.1);
        for _ in 0..200 {
            controller.update(&mut camera);
        }

        let radius_after = (camera.eye - camera.target).magnitude();
        assert!((radius_after - radius_before).abs() < 1e-3);
    }

    #[test]
    fn drag_velocity_decays_to_rest() {
        let mut controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut camera = test_camera();

        controller.inject_drag(0.2, 0.0);
        for _ in 0..500 {
            controller.update(&mut camera);
        }
        assert!(controller.is_settled());

        // Once settled, further updates are exact no-ops
        let eye = camera.eye;
        controller.update(&mut camera);
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn degenerate_zero_radius_is_ignored() {
        let mut controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut camera = Camera::new(Vector3::zero(), Vector3::zero(), 1.0);

        controller.inject_drag(0.5, 0.5);
        controller.update(&mut camera);

        assert_eq!(camera.eye, Vector3::zero());
        assert!(controller.is_settled());
    }
}
