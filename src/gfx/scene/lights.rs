//! Scene lighting
//!
//! The diorama is lit by exactly one ambient and one directional light,
//! configured once at assembly time. The directional light doubles as the
//! shadow-map projector.

/// Uniform fill light with no direction
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Sun-style light defined by a position looking at the origin
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub cast_shadow: bool,
}

/// The scene's complete lighting state
#[derive(Debug, Clone, Copy)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
            },
            directional: DirectionalLight {
                position: [5.0, 10.0, 5.0],
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
                cast_shadow: false,
            },
        }
    }
}
