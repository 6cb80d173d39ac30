//! # Procedural Geometry Generation
//!
//! Every shape in the diorama is generated procedurally, so no model files
//! are needed for the static scene.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with explicit width/height/depth
//! - **Plane**: flat rectangle in the XY plane facing +Z
//! - **Sphere**: UV sphere with configurable resolution
//! - **Cylinder**: Y-axis cylinder with independent top and bottom radii
//! - **Cone**: cylinder degenerated to a point at the top (pyramids at low
//!   segment counts)

pub mod primitives;

pub use primitives::*;

/// Generated geometry ready for mesh construction
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
