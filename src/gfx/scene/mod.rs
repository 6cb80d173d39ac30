//! # Scene Management Module
//!
//! The scene owns every renderable thing in the application: objects with
//! their meshes and transforms, the material library, the camera and the
//! light rig. The invariant is deliberately simple: the scene contains
//! exactly the objects that were added to it.

pub mod lights;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use lights::{AmbientLight, DirectionalLight, LightRig};
pub use object::{DrawObject, Object, ObjectBuilder};
pub use scene::Scene;
pub use vertex::Vertex3D;
