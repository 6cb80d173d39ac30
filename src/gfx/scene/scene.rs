use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::GeometryData,
    resources::material::{Material, MaterialManager},
};
use crate::loader::LoadedModel;

use super::lights::LightRig;
use super::object::{Mesh, Object, ObjectBuilder};

/// Main scene containing objects, materials, lights and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub lights: LightRig,
}

impl Scene {
    /// Creates a new, empty scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lights: LightRig::default(),
        }
    }

    /// Updates per-frame camera state (orbit damping, view-projection)
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    /// Adds an object built from procedural geometry
    ///
    /// Returns a builder so the call site can chain material, placement
    /// and shadow configuration.
    pub fn add_geometry(&mut self, data: GeometryData, name: &str) -> ObjectBuilder<'_> {
        let name = self.ensure_unique_name(name);
        let object = Object::new(name, vec![Mesh::from_geometry(&data)]);
        self.objects.push(object);
        let object = self
            .objects
            .last_mut()
            .expect("object was just pushed");
        ObjectBuilder::new(object)
    }

    /// Attaches an externally loaded model as a single new object
    ///
    /// Registers the model's material (if it carried one) and returns a
    /// mutable reference so the caller can place and scale it.
    pub fn attach_model(&mut self, model: LoadedModel) -> &mut Object {
        let name = self.ensure_unique_name(&model.name);

        let material_id = model.material.as_ref().map(|mtl| {
            let material = Material::new(
                &mtl.name,
                [mtl.diffuse[0], mtl.diffuse[1], mtl.diffuse[2], mtl.alpha],
                0.0,
                mtl.roughness,
            );
            self.material_manager.add_material(material);
            mtl.name.clone()
        });

        let meshes = model
            .meshes
            .into_iter()
            .map(|m| Mesh::new(m.positions, m.normals, m.tex_coords, m.indices))
            .collect();

        let mut object = Object::new(name, meshes);
        if let Some(id) = &material_id {
            object.set_material(id);
        }

        self.objects.push(object);
        self.objects
            .last_mut()
            .expect("object was just pushed")
    }

    /// Creates a material and adds it to the material library
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        let material = Material::new(name, base_color, metallic, roughness);
        self.material_manager.add_material(material);
        self.material_manager
            .get_material_mut(&name.to_string())
            .expect("material was just added")
    }

    /// Convenience method for creating materials from RGB components
    pub fn add_material_rgb(
        &mut self,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0], metallic, roughness)
    }

    /// Looks up an object by name
    pub fn find_object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Looks up an object by name, mutably
    pub fn find_object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|obj| obj.name == name)
    }

    /// Total number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called once the GPU context exists and before rendering.
    /// Layouts come from the render engine so bind groups match its
    /// pipelines.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &wgpu::BindGroupLayout,
        material_layout: &crate::wgpu_utils::BindGroupLayoutWithDesc,
    ) {
        for object in self.objects.iter_mut() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device, transform_layout);
            }
        }

        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
    }

    /// Syncs every initialized object's transform to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Material used to render the given object (default as fallback)
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id.as_ref())
    }

    /// Scene summary for the UI panel
    pub fn statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count() / 3).sum::<u32>())
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count()).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles,
            total_vertices,
        }
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

/// Scene statistics for the UI overlay
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}
