//! Core animator trait
//!
//! Defines the interface animation streams implement to be driven by the
//! main loop.

use crate::gfx::scene::Scene;
use imgui::Ui;

/// A self-contained animation stream advanced at a fixed tick rate
pub trait Animator {
    /// Called once when the animator is attached
    ///
    /// # Arguments
    /// * `scene` - Mutable scene access for placing initial state
    fn initialize(&mut self, scene: &mut Scene);

    /// Advance by exactly one tick
    ///
    /// Tick length is fixed by the [`AnimationManager`], so implementors
    /// move by per-tick constants rather than scaling by wall time.
    ///
    /// [`AnimationManager`]: crate::animation::AnimationManager
    fn tick(&mut self, scene: &mut Scene);

    /// Render custom UI controls for this animator
    fn render_ui(&mut self, _ui: &Ui) {}

    /// Animator name for UI display
    fn name(&self) -> &str;

    /// Whether this animator is currently advancing
    fn is_running(&self) -> bool;

    /// Start/pause this animator
    fn set_running(&mut self, running: bool);

    /// Reset to initial state
    fn reset(&mut self, scene: &mut Scene);
}
