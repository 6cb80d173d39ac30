//! Material system
//!
//! Materials are stored centrally in [`MaterialManager`] and referenced by
//! objects through string IDs. Every material binds a base-color texture;
//! plain-colored materials get a shared-format 1x1 white texture so the
//! scene renders with a single pipeline.

use std::collections::HashMap;

use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

use super::texture_resource::TextureResource;

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    _padding0: [f32; 2],
    pub emissive: [f32; 3],
    _padding1: f32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// GPU half of a material, created once a device is available
struct MaterialGpu {
    ubo: MaterialUBO,
    _texture: TextureResource,
    bind_group: wgpu::BindGroup,
}

/// Material definition with basic PBR properties and an optional texture
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    texture_image: Option<image::RgbaImage>,
    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
            texture_image: None,
            gpu: None,
        }
    }
}

impl Material {
    /// Creates a new material
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            emissive: [0.0, 0.0, 0.0],
            texture_image: None,
            gpu: None,
        }
    }

    /// Builder pattern: set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Builder pattern: attach a decoded base-color image
    pub fn with_texture_image(mut self, img: image::RgbaImage) -> Self {
        self.texture_image = Some(img);
        self
    }

    pub fn has_texture(&self) -> bool {
        self.texture_image.is_some()
    }

    /// The bind group layout every material shares
    pub fn bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
        BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Material Bind Group Layout")
    }

    /// Creates or refreshes GPU resources for this material
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        if self.gpu.is_none() {
            let ubo = MaterialUBO::new(device);

            let texture = match &self.texture_image {
                Some(img) => TextureResource::create_from_rgba_data(
                    device,
                    queue,
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    &format!("{} Texture", self.name),
                ),
                None => TextureResource::create_white(device, queue),
            };

            let bind_group = BindGroupBuilder::new(layout)
                .resource(ubo.binding_resource())
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, "Material Bind Group");

            self.gpu = Some(MaterialGpu {
                ubo,
                _texture: texture,
                bind_group,
            });
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            _padding0: [0.0; 2],
            emissive: self.emissive,
            _padding1: 0.0,
        };

        if let Some(gpu) = &mut self.gpu {
            gpu.ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering, if GPU resources exist
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Centralized storage for all materials
///
/// Objects reference materials by ID rather than owning material data,
/// so GPU resources are shared between objects.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), Material::default());

        manager
    }

    /// Adds a material to the library, replacing any same-named entry
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    pub fn get_default_material(&self) -> &Material {
        self.materials
            .get(&self.default_material_id)
            .expect("default material always exists")
    }

    /// Material for an object, falling back to the default when the
    /// object has no material or references a missing one.
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Lists all material IDs
    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_uniform_is_tightly_padded() {
        // Must match the WGSL Material struct layout
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
    }

    #[test]
    fn unknown_material_falls_back_to_default() {
        let manager = MaterialManager::new();
        let id = "nonexistent".to_string();
        assert_eq!(manager.get_material_for_object(Some(&id)).name, "default");
        assert_eq!(manager.get_material_for_object(None).name, "default");
    }

    #[test]
    fn added_material_is_retrievable() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::new("walls", [1.0, 0.894, 0.710, 1.0], 0.0, 0.8));
        let id = "walls".to_string();
        let material = manager.get_material_for_object(Some(&id));
        assert_eq!(material.name, "walls");
        assert!(!material.has_texture());
    }
}
