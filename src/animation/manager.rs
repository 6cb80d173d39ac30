//! Animation manager
//!
//! Drives every attached animator from one scheduling primitive: a fixed
//! 60 Hz tick fed by an accumulator over wall-clock frame deltas. Frame
//! rate changes how often ticks fire, never how far a tick moves.

use imgui::Ui;

use super::traits::Animator;
use crate::gfx::scene::Scene;

/// Seconds per tick
pub const TICK_INTERVAL: f32 = 1.0 / 60.0;

/// Longest stretch of wall time converted into ticks in one update.
/// A stall (window drag, debugger) resumes smoothly instead of replaying
/// the lost time as a tick storm.
const MAX_FRAME_DELTA: f32 = 0.25;

pub struct AnimationManager {
    animators: Vec<Box<dyn Animator>>,
    is_paused: bool,
    accumulated_time: f32,
    ticks: u64,
    reset_requested: bool,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self {
            animators: Vec::new(),
            is_paused: false,
            accumulated_time: 0.0,
            ticks: 0,
            reset_requested: false,
        }
    }

    /// Attaches an animator, initializing it against the scene
    pub fn attach(&mut self, mut animator: Box<dyn Animator>, scene: &mut Scene) {
        animator.initialize(scene);
        self.animators.push(animator);
    }

    /// Advances animation time; called once per frame
    ///
    /// # Arguments
    /// * `delta_time` - Wall-clock seconds since the previous frame
    /// * `scene` - Scene the animators mutate
    pub fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        if self.reset_requested {
            self.reset_requested = false;
            self.accumulated_time = 0.0;
            for animator in &mut self.animators {
                animator.reset(scene);
            }
        }

        if self.is_paused {
            return;
        }

        self.accumulated_time += delta_time.min(MAX_FRAME_DELTA);

        while self.accumulated_time >= TICK_INTERVAL {
            for animator in &mut self.animators {
                if animator.is_running() {
                    animator.tick(scene);
                }
            }
            self.accumulated_time -= TICK_INTERVAL;
            self.ticks += 1;
        }
    }

    /// Renders the animation control window
    ///
    /// Reset is requested here and applied on the next [`update`] call,
    /// when the scene is mutably available again.
    ///
    /// [`update`]: AnimationManager::update
    pub fn render_ui(&mut self, ui: &Ui) {
        let display_size = ui.io().display_size;
        let panel_width = 300.0;
        let panel_x = display_size[0] - panel_width - 20.0;

        ui.window("Animation")
            .size([panel_width, 180.0], imgui::Condition::FirstUseEver)
            .position([panel_x, 20.0], imgui::Condition::FirstUseEver)
            .build(|| {
                if ui.button(if self.is_paused { "Play" } else { "Pause" }) {
                    self.is_paused = !self.is_paused;
                }
                ui.same_line();
                if ui.button("Reset") {
                    self.reset_requested = true;
                }
                ui.separator();

                for animator in &mut self.animators {
                    let mut running = animator.is_running();
                    if ui.checkbox(animator.name(), &mut running) {
                        animator.set_running(running);
                    }
                    animator.render_ui(ui);
                }
            });
    }

    /// Total ticks fired since startup
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Number of attached animators
    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{Camera, CameraManager, OrbitController};
    use cgmath::{Vector3, Zero};

    struct CountingAnimator {
        ticks: std::rc::Rc<std::cell::Cell<u32>>,
        running: bool,
    }

    impl Animator for CountingAnimator {
        fn initialize(&mut self, _scene: &mut Scene) {}
        fn tick(&mut self, _scene: &mut Scene) {
            self.ticks.set(self.ticks.get() + 1);
        }
        fn name(&self) -> &str {
            "counter"
        }
        fn is_running(&self) -> bool {
            self.running
        }
        fn set_running(&mut self, running: bool) {
            self.running = running;
        }
        fn reset(&mut self, _scene: &mut Scene) {
            self.ticks.set(0);
        }
    }

    fn empty_scene() -> Scene {
        let camera = Camera::new(Vector3::zero(), Vector3::zero(), 1.0);
        let controller = OrbitController::new(0.005, 0.1, 0.9);
        Scene::new(CameraManager::new(camera, controller))
    }

    fn counting_setup() -> (AnimationManager, Scene, std::rc::Rc<std::cell::Cell<u32>>) {
        let mut manager = AnimationManager::new();
        let mut scene = empty_scene();
        let ticks = std::rc::Rc::new(std::cell::Cell::new(0));
        manager.attach(
            Box::new(CountingAnimator {
                ticks: ticks.clone(),
                running: true,
            }),
            &mut scene,
        );
        (manager, scene, ticks)
    }

    #[test]
    fn accumulator_fires_fixed_rate_ticks() {
        let (mut manager, mut scene, ticks) = counting_setup();

        // Two tick intervals in one frame delta
        manager.update(TICK_INTERVAL * 2.0, &mut scene);
        assert_eq!(ticks.get(), 2);

        // Half an interval accumulates without firing
        manager.update(TICK_INTERVAL * 0.5, &mut scene);
        assert_eq!(ticks.get(), 2);
        manager.update(TICK_INTERVAL * 0.5, &mut scene);
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn pause_stops_ticks() {
        let (mut manager, mut scene, ticks) = counting_setup();

        manager.set_paused(true);
        manager.update(1.0, &mut scene);
        assert_eq!(ticks.get(), 0);

        manager.set_paused(false);
        manager.update(TICK_INTERVAL, &mut scene);
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn stalls_are_capped() {
        let (mut manager, mut scene, ticks) = counting_setup();

        // A 10 second stall must not replay 600 ticks
        manager.update(10.0, &mut scene);
        assert!(ticks.get() <= (MAX_FRAME_DELTA / TICK_INTERVAL) as u32 + 1);
    }

    #[test]
    fn stopped_animators_are_skipped() {
        let mut manager = AnimationManager::new();
        let mut scene = empty_scene();
        let ticks = std::rc::Rc::new(std::cell::Cell::new(0));
        manager.attach(
            Box::new(CountingAnimator {
                ticks: ticks.clone(),
                running: false,
            }),
            &mut scene,
        );

        manager.update(TICK_INTERVAL * 4.0, &mut scene);
        assert_eq!(ticks.get(), 0);
        assert_eq!(manager.tick_count(), 4);
    }
}
