//! # Croft Prelude
//!
//! Convenient imports for applications embedding the viewer.
//!
//! ```no_run
//! use croft::prelude::*;
//!
//! fn main() {
//!     let mut app = croft::default();
//!     app.request_model("assets/dragon.obj");
//!     app.run();
//! }
//! ```

// Re-export core application types
pub use crate::app::{CroftApp, ModelStatus};
pub use crate::default;

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, CameraManager, OrbitController};
pub use crate::gfx::geometry::{
    generate_box, generate_cone, generate_cube, generate_cylinder, generate_plane,
    generate_sphere, GeometryData,
};
pub use crate::gfx::scene::{LightRig, Object, Scene};

// Re-export the animation framework
pub use crate::animation::{AnimationManager, Animator, Flythrough, Turntable};

// Re-export the loader boundary
pub use crate::loader::{begin_load, LoadError, LoadedModel, PendingModel};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Rad, Vector3, Zero};
pub use imgui::Ui;
