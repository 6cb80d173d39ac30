//! Automatic camera flythrough
//!
//! The camera approaches the house along a fixed straight path and snaps
//! back to its start point once it has passed through, forever. The tick
//! is a pure function of the current eye position with two observable
//! states: approaching, and the one-tick snap back.

use cgmath::Vector3;

use crate::gfx::scene::Scene;

use super::traits::Animator;

/// Where every cycle begins
pub const START_EYE: [f32; 3] = [10.0, 5.0, 10.0];

/// The camera always looks at the middle of the house
pub const LOOK_TARGET: [f32; 3] = [0.0, 1.5, 0.0];

/// Per-tick movement along X and Z
pub const STEP_X: f32 = 0.005;
pub const STEP_Z: f32 = 0.01;

/// Crossing this Z coordinate triggers the snap back
pub const RESET_THRESHOLD_Z: f32 = -2.0;

/// The flythrough's two observable states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Eye moving toward and through the house
    Approaching,
    /// Eye past the threshold; next tick restores the start pose
    Resetting,
}

/// Classifies an eye position into the cycle phase
pub fn phase(eye: Vector3<f32>) -> Phase {
    if eye.z < RESET_THRESHOLD_Z {
        Phase::Resetting
    } else {
        Phase::Approaching
    }
}

/// One tick of the camera path, as a pure function of the eye position
///
/// An eye past the reset threshold maps to exactly the start position;
/// any other eye advances by the fixed per-tick steps.
pub fn advance(eye: Vector3<f32>) -> Vector3<f32> {
    match phase(eye) {
        Phase::Resetting => START_EYE.into(),
        Phase::Approaching => Vector3::new(eye.x - STEP_X, eye.y, eye.z - STEP_Z),
    }
}

/// Animator driving the camera along the approach/reset cycle
pub struct Flythrough {
    running: bool,
}

impl Flythrough {
    pub fn new() -> Self {
        Self { running: true }
    }
}

impl Default for Flythrough {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for Flythrough {
    fn initialize(&mut self, scene: &mut Scene) {
        let camera = &mut scene.camera_manager.camera;
        camera.eye = START_EYE.into();
        camera.look_at(LOOK_TARGET.into());
    }

    fn tick(&mut self, scene: &mut Scene) {
        let camera = &mut scene.camera_manager.camera;
        camera.eye = advance(camera.eye);
        camera.look_at(LOOK_TARGET.into());
    }

    fn name(&self) -> &str {
        "Camera flythrough"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        self.initialize(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{Camera, CameraManager, OrbitController};

    fn test_scene() -> Scene {
        let camera = Camera::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 1.0);
        let controller = OrbitController::new(0.005, 0.1, 0.9);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn initialize_places_camera_at_start() {
        let mut scene = test_scene();
        let mut fly = Flythrough::new();
        fly.initialize(&mut scene);

        let camera = &scene.camera_manager.camera;
        assert_eq!(camera.eye, Vector3::from(START_EYE));
        assert_eq!(camera.target, Vector3::from(LOOK_TARGET));
    }

    #[test]
    fn ticks_decrease_position_by_exact_steps() {
        let mut scene = test_scene();
        let mut fly = Flythrough::new();
        fly.initialize(&mut scene);

        for _ in 0..100 {
            let before = scene.camera_manager.camera.eye;
            fly.tick(&mut scene);
            let after = scene.camera_manager.camera.eye;

            assert_eq!(after.z, before.z - STEP_Z);
            assert_eq!(after.x, before.x - STEP_X);
            assert_eq!(after.y, before.y);
            assert!(after.z < before.z);
        }
    }

    #[test]
    fn two_hundred_fifty_ticks_leave_camera_short_of_reset() {
        let mut scene = test_scene();
        let mut fly = Flythrough::new();
        fly.initialize(&mut scene);

        for _ in 0..250 {
            fly.tick(&mut scene);
        }

        let eye = scene.camera_manager.camera.eye;
        assert!((eye.z - 7.5).abs() < 1e-3);
        assert!((eye.x - 8.75).abs() < 1e-3);
        assert!(eye.z > RESET_THRESHOLD_Z);
    }

    #[test]
    fn crossing_the_threshold_snaps_back_to_start() {
        let mut scene = test_scene();
        let mut fly = Flythrough::new();
        fly.initialize(&mut scene);

        // Drive until the eye has passed through the house
        let mut guard = 0;
        while scene.camera_manager.camera.eye.z >= RESET_THRESHOLD_Z {
            fly.tick(&mut scene);
            guard += 1;
            assert!(guard < 2000, "flythrough never crossed the threshold");
        }
        assert_eq!(phase(scene.camera_manager.camera.eye), Phase::Resetting);

        // The very next tick restores the start pose and the cycle repeats
        fly.tick(&mut scene);
        assert_eq!(scene.camera_manager.camera.eye, Vector3::from(START_EYE));

        fly.tick(&mut scene);
        let eye = scene.camera_manager.camera.eye;
        assert_eq!(eye.z, START_EYE[2] - STEP_Z);
        assert_eq!(phase(eye), Phase::Approaching);
    }

    #[test]
    fn advance_is_pure_and_deterministic() {
        let eye = Vector3::new(3.0, 5.0, 1.0);
        assert_eq!(advance(eye), advance(eye));
        // The input is not mutated; the same pose always maps to the
        // same successor
        assert_eq!(eye, Vector3::new(3.0, 5.0, 1.0));
    }
}
