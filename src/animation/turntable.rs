//! Turntable spin for the loaded model
//!
//! Attached once the asynchronous load resolves. Completely independent
//! of the camera flythrough: the model's yaw grows by a fixed amount
//! every tick, unconditionally, for as long as the animator runs.

use cgmath::{Rad, Vector3};
use imgui::Ui;

use crate::gfx::scene::Scene;

use super::traits::Animator;

/// Yaw increment per tick, in radians
pub const SPIN_STEP: f32 = 0.01;

pub struct Turntable {
    object_name: String,
    position: Vector3<f32>,
    scale: f32,
    angle: f32,
    running: bool,
}

impl Turntable {
    /// Creates a turntable for the named scene object
    ///
    /// `position` and `scale` are reapplied with the yaw every tick, so
    /// they must match how the object was placed at attachment.
    pub fn new(object_name: impl Into<String>, position: Vector3<f32>, scale: f32) -> Self {
        Self {
            object_name: object_name.into(),
            position,
            scale,
            angle: 0.0,
            running: true,
        }
    }

    /// Accumulated yaw in radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn apply(&self, scene: &mut Scene) {
        if let Some(object) = scene.find_object_mut(&self.object_name) {
            object.set_transform_trs(self.position, Rad(self.angle), self.scale);
        }
    }
}

impl Animator for Turntable {
    fn initialize(&mut self, scene: &mut Scene) {
        self.apply(scene);
    }

    fn tick(&mut self, scene: &mut Scene) {
        self.angle += SPIN_STEP;
        self.apply(scene);
    }

    fn render_ui(&mut self, ui: &Ui) {
        ui.text(format!("{}: {:.2} rad", self.object_name, self.angle));
    }

    fn name(&self) -> &str {
        "Turntable"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        self.angle = 0.0;
        self.apply(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{Camera, CameraManager, OrbitController};
    use crate::gfx::geometry::generate_cube;
    use cgmath::Zero;

    fn scene_with_dragon() -> Scene {
        let camera = Camera::new(Vector3::zero(), Vector3::zero(), 1.0);
        let controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        scene.add_geometry(generate_cube(), "dragon");
        scene
    }

    #[test]
    fn angle_grows_by_step_each_tick() {
        let mut scene = scene_with_dragon();
        let mut spin = Turntable::new("dragon", Vector3::new(0.8, 0.8, 3.5), 0.8);
        spin.initialize(&mut scene);

        for i in 1..=10 {
            let before = spin.angle();
            spin.tick(&mut scene);
            assert!(spin.angle() > before);
            assert!((spin.angle() - SPIN_STEP * i as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn tick_reapplies_placement_with_new_yaw() {
        let mut scene = scene_with_dragon();
        let mut spin = Turntable::new("dragon", Vector3::new(0.8, 0.8, 3.5), 0.8);
        spin.initialize(&mut scene);
        spin.tick(&mut scene);

        let object = scene.find_object("dragon").expect("dragon exists");
        let p = object.position();
        assert!((p.x - 0.8).abs() < 1e-6);
        assert!((p.y - 0.8).abs() < 1e-6);
        assert!((p.z - 3.5).abs() < 1e-6);

        // Rotation column encodes scale * cos(angle)
        let expected = 0.8 * SPIN_STEP.cos();
        assert!((object.transform.x.x - expected).abs() < 1e-6);
    }

    #[test]
    fn missing_object_is_tolerated() {
        let camera = Camera::new(Vector3::zero(), Vector3::zero(), 1.0);
        let controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut scene = Scene::new(CameraManager::new(camera, controller));

        let mut spin = Turntable::new("dragon", Vector3::zero(), 1.0);
        spin.initialize(&mut scene);
        spin.tick(&mut scene);
        assert!((spin.angle() - SPIN_STEP).abs() < 1e-6);
    }

    #[test]
    fn reset_returns_to_zero_yaw() {
        let mut scene = scene_with_dragon();
        let mut spin = Turntable::new("dragon", Vector3::zero(), 1.0);
        for _ in 0..42 {
            spin.tick(&mut scene);
        }
        spin.reset(&mut scene);
        assert_eq!(spin.angle(), 0.0);
    }
}
