//! Mesh and object types for the scene graph
//!
//! An [`Object`] pairs one or more meshes with a transform, a material
//! reference and a shadow-casting flag. GPU buffers are created lazily
//! once a device is available, so objects can be built and inspected
//! without any graphics context (the unit tests rely on this).

use std::ops::Range;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::Device;

use crate::gfx::geometry::GeometryData;

use super::vertex::Vertex3D;

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Builds a mesh from flat position/normal/uv/index arrays.
    ///
    /// Positions and normals are triples, UVs are pairs; a missing or
    /// mismatched UV array falls back to (0, 0) per vertex.
    pub fn new(
        positions: Vec<f32>,
        normals: Vec<f32>,
        tex_coords: Vec<f32>,
        indices: Vec<u32>,
    ) -> Self {
        let index_count = indices.len() as u32;
        let vertex_count = positions.len() / 3;
        let has_uvs = tex_coords.len() == vertex_count * 2;

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
                uv: if has_uvs {
                    [tex_coords[i * 2], tex_coords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                },
            });
        }

        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    /// Builds a mesh from procedurally generated geometry.
    pub fn from_geometry(data: &GeometryData) -> Self {
        let vertices: Vec<Vertex3D> = (0..data.vertices.len())
            .map(|i| Vertex3D {
                position: data.vertices[i],
                normal: data.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                uv: data.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect();

        Self {
            vertices,
            indices: data.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: data.indices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Averaged per-vertex normals for models that ship without them.
    pub fn calculate_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0f32; positions.len()];

        for triangle in indices.chunks(3) {
            let i0 = triangle[0] as usize;
            let i1 = triangle[1] as usize;
            let i2 = triangle[2] as usize;

            let v0 = Vector3::new(
                positions[i0 * 3],
                positions[i0 * 3 + 1],
                positions[i0 * 3 + 2],
            );
            let v1 = Vector3::new(
                positions[i1 * 3],
                positions[i1 * 3 + 1],
                positions[i1 * 3 + 2],
            );
            let v2 = Vector3::new(
                positions[i2 * 3],
                positions[i2 * 3 + 1],
                positions[i2 * 3 + 2],
            );

            let face_normal = (v1 - v0).cross(v2 - v0);

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx * 3] += face_normal.x;
                normals[vertex_idx * 3 + 1] += face_normal.y;
                normals[vertex_idx * 3 + 2] += face_normal.z;
            }
        }

        for i in 0..vertex_count {
            let length = (normals[i * 3].powi(2)
                + normals[i * 3 + 1].powi(2)
                + normals[i * 3 + 2].powi(2))
            .sqrt();
            if length > 0.0 {
                normals[i * 3] /= length;
                normals[i * 3 + 1] /= length;
                normals[i * 3 + 2] /= length;
            }
        }

        normals
    }

    fn init_gpu_buffers(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Per-object GPU resources, absent until a device exists
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Matrix4<f32>,
    pub material_id: Option<String>,
    pub visible: bool,
    pub cast_shadow: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Create a new object with identity transform and no material
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
            transform: Matrix4::identity(),
            material_id: None,
            visible: true,
            cast_shadow: false,
            gpu_resources: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    /// Set translation, replacing the current transform
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Apply rotation around X axis on top of the current transform
    pub fn rotate_x(&mut self, angle: Rad<f32>) {
        self.transform = self.transform * Matrix4::from_angle_x(angle);
    }

    /// Apply rotation around Y axis on top of the current transform
    pub fn rotate_y(&mut self, angle: Rad<f32>) {
        self.transform = self.transform * Matrix4::from_angle_y(angle);
    }

    /// Apply rotation around Z axis on top of the current transform
    pub fn rotate_z(&mut self, angle: Rad<f32>) {
        self.transform = self.transform * Matrix4::from_angle_z(angle);
    }

    /// Build a transform from translation, yaw and uniform scale.
    ///
    /// Order is T * R * S; this is what the turntable uses every tick.
    pub fn set_transform_trs(
        &mut self,
        translation: Vector3<f32>,
        rotation_y: Rad<f32>,
        scale: f32,
    ) {
        let t = Matrix4::from_translation(translation);
        let r = Matrix4::from_angle_y(rotation_y);
        let s = Matrix4::from_scale(scale);
        self.transform = t * r * s;
    }

    pub fn reset_transform(&mut self) {
        self.transform = Matrix4::identity();
    }

    /// World-space position encoded in the current transform
    pub fn position(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    /// Sync the transform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();

            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    /// Upload mesh buffers and the transform uniform.
    ///
    /// `transform_layout` comes from the render engine so every object's
    /// bind group matches the pipeline layout.
    pub fn init_gpu_resources(&mut self, device: &Device, transform_layout: &wgpu::BindGroupLayout) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_buffers(device);
        }

        let transform_data: &[f32; 16] = self.transform.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

/// Fluent configuration for a freshly added scene object
pub struct ObjectBuilder<'a> {
    object: &'a mut Object,
}

impl<'a> ObjectBuilder<'a> {
    pub(crate) fn new(object: &'a mut Object) -> Self {
        Self { object }
    }

    pub fn with_material(self, material_id: &str) -> Self {
        self.object.set_material(material_id);
        self
    }

    pub fn with_position(self, x: f32, y: f32, z: f32) -> Self {
        self.object.set_translation(Vector3::new(x, y, z));
        self
    }

    pub fn with_rotation_x(self, angle: Rad<f32>) -> Self {
        self.object.rotate_x(angle);
        self
    }

    pub fn with_rotation_y(self, angle: Rad<f32>) -> Self {
        self.object.rotate_y(angle);
        self
    }

    pub fn with_cast_shadow(self, cast_shadow: bool) -> Self {
        self.object.cast_shadow = cast_shadow;
        self
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
    fn draw_object_instanced(&mut self, object: &'a Object, instances: Range<u32>);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        self.draw_object_instanced(object, 0..1);
    }

    fn draw_object_instanced(&mut self, object: &'b Object, instances: Range<u32>) {
        for mesh in &object.meshes {
            self.draw_mesh_instanced(mesh, instances.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn mesh_from_geometry_preserves_counts() {
        let mesh = Mesh::from_geometry(&generate_cube());
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
    }

    #[test]
    fn trs_transform_encodes_position() {
        let mut object = Object::new("probe", vec![]);
        object.set_transform_trs(Vector3::new(0.8, 0.8, 3.5), Rad(0.5), 0.8);
        let p = object.position();
        assert!((p.x - 0.8).abs() < 1e-6);
        assert!((p.y - 0.8).abs() < 1e-6);
        assert!((p.z - 3.5).abs() < 1e-6);
    }

    #[test]
    fn vertex_normals_point_away_from_flat_triangle() {
        // Single CCW triangle in the XZ plane faces +Y
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0];
        let normals = Mesh::calculate_vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals.len(), 9);
        for v in normals.chunks(3) {
            assert!((v[1] - 1.0).abs() < 1e-6);
        }
    }
}
