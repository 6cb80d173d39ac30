//! User interface overlay
//!
//! ImGui-based control panel drawn over the rendered scene: viewer
//! status on the left, animation controls on the right.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::scene_panel;
