// src/lib.rs
//! Croft
//!
//! A small 3D walkthrough viewer built on wgpu and winit: a fixed house
//! diorama, an asynchronously loaded model, an automatic camera
//! flythrough with damped orbit controls, and an imgui overlay.

pub mod animation;
pub mod app;
pub mod assembly;
pub mod gfx;
pub mod loader;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::CroftApp;

/// Creates the viewer with the diorama assembled and animators attached
pub fn default() -> CroftApp {
    pollster::block_on(CroftApp::new())
}
