//! Rendering pipeline
//!
//! Two-pass forward renderer: a depth-only shadow pass from the
//! directional light, then the main pass with shadow lookups.

pub mod render_engine;

pub use render_engine::RenderEngine;
