//! # Graphics Module
//!
//! All graphics-related functionality for the viewer: the camera system,
//! procedural geometry, scene management, GPU resources and the wgpu
//! render engine.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - look-at camera plus damped orbit controls
//! - **Geometry** ([`geometry`]) - procedural primitives the diorama is built from
//! - **Scene Management** ([`scene`]) - objects, materials, lights
//! - **Resource Management** ([`resources`]) - materials, textures, global uniforms
//! - **Rendering** ([`rendering`]) - two-pass forward renderer with shadow mapping

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use rendering::render_engine::RenderEngine;
