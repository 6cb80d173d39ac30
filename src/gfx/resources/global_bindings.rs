//! Global uniform bindings for camera and lighting
//!
//! One uniform buffer carries all per-frame global state: the camera
//! matrices, the ambient and directional light, and the light's
//! view-projection matrix for shadow mapping. Bound to slot 0 in both
//! render pipelines.

use crate::{
    gfx::camera::camera::OPENGL_TO_WGPU_MATRIX,
    gfx::camera::camera_utils::CameraUniform,
    gfx::scene::lights::LightRig,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content
///
/// MUST match the Globals struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    ambient_color: [f32; 3],
    ambient_intensity: f32,
    light_position: [f32; 3],
    light_intensity: f32,
    light_color: [f32; 3],
    _padding: f32,
    light_view_proj: [[f32; 4]; 4],
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// How far back along the light direction the shadow projector sits
const SHADOW_EYE_SCALE: f32 = 4.0;

/// Updates the global uniform buffer with camera and light data
///
/// Called once per frame. The directional light's shadow matrix is an
/// orthographic projection looking from the light toward the origin; the
/// projector eye is pushed back along the light direction so the whole
/// diorama fits in its frustum.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &LightRig,
) {
    let light = lights.directional;

    let light_eye = cgmath::Point3::new(
        light.position[0] * SHADOW_EYE_SCALE,
        light.position[1] * SHADOW_EYE_SCALE,
        light.position[2] * SHADOW_EYE_SCALE,
    );
    let light_view = cgmath::Matrix4::look_at_rh(
        light_eye,
        cgmath::Point3::new(0.0, 0.0, 0.0),
        cgmath::Vector3::unit_y(),
    );

    let light_proj = OPENGL_TO_WGPU_MATRIX * cgmath::ortho(-25.0, 25.0, -25.0, 25.0, 5.0, 50.0);
    let light_view_proj = light_proj * light_view;

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        ambient_color: lights.ambient.color,
        ambient_intensity: lights.ambient.intensity,
        light_position: light.position,
        light_intensity: light.intensity,
        light_color: light.color,
        _padding: 0.0,
        light_view_proj: light_view_proj.into(),
    };

    ubo.update_content(queue, content);
}

/// Manages the bind group layout and bind group for global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called before any rendering that needs global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_ubo_matches_shader_layout() {
        // vec4 + mat4 + 4 * vec4-sized light fields + mat4
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 192);
    }
}
