//! GPU resource management
//!
//! Materials, textures and the global uniform bindings shared by every
//! draw call.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use material::{Material, MaterialManager};
pub use texture_resource::TextureResource;
