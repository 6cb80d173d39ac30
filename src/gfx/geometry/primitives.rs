//! # Primitive Shape Generation
//!
//! Functions to generate the primitive shapes the diorama is assembled
//! from. All shapes are centered at the origin in a Y-up coordinate system
//! and carry outward normals and UV coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate an axis-aligned box with the given dimensions
///
/// The box is centered at the origin, extending half of each dimension in
/// both directions along its axis. Each face has four dedicated vertices
/// with a flat outward normal and UVs from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = [
        // Front face (+Z)
        [-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd],
        // Back face (-Z)
        [hw, -hh, -hd], [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd],
        // Left face (-X)
        [-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd],
        // Right face (+X)
        [hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd],
        // Top face (+Y)
        [-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd],
        // Bottom face (-Y)
        [-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = normals.to_vec();

    // Same UV quad on every face
    for _ in 0..6 {
        data.tex_coords.extend_from_slice(&[
            [0.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ]);
    }

    // Two counter-clockwise triangles per face
    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a unit cube centered at the origin
pub fn generate_cube() -> GeometryData {
    generate_box(1.0, 1.0, 1.0)
}

/// Generate a flat rectangle in the XY plane facing +Z
///
/// The caller rotates the plane into place (e.g. -90 degrees about X
/// for a ground plane).
pub fn generate_plane(width: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh) = (width * 0.5, height * 0.5);

    data.vertices = vec![
        [-hw, -hh, 0.0],
        [hw, -hh, 0.0],
        [hw, hh, 0.0],
        [-hw, hh, 0.0],
    ];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.tex_coords = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

/// Generate a UV sphere centered at the origin
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Spherical to Cartesian, Y-up
            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(first + 1);
            data.indices.push(second);

            data.indices.push(second);
            data.indices.push(first + 1);
            data.indices.push(second + 1);
        }
    }

    data
}

/// Generate a cylinder along the Y axis with independent end radii
///
/// The shape extends from -height/2 to height/2 in Y. A zero top radius
/// produces a cone; caps are emitted only for ends with nonzero radius.
/// Tree trunks use a larger bottom radius for a tapered look.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Slope of the side in the (radial, Y) plane, used for side normals
    let slope = (radius_bottom - radius_top) / height;

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let u = i as f32 / segs as f32;

        let normal = normalize([cos_a, slope, sin_a]);

        // Bottom ring vertex
        data.vertices
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 1.0]);

        // Top ring vertex
        data.vertices
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 0.0]);
    }

    // Side faces
    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        if radius_top > 0.0 {
            data.indices.push(top_current);
            data.indices.push(top_next);
            data.indices.push(bottom_next);
        }
    }

    // End caps
    if radius_bottom > 0.0 {
        add_cap(&mut data, radius_bottom, -half_height, segs, false);
    }
    if radius_top > 0.0 {
        add_cap(&mut data, radius_top, half_height, segs, true);
    }

    data
}

/// Generate a cone along the Y axis with its apex at +height/2
///
/// Four segments give the pyramid used for the house roof.
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    generate_cylinder(0.0, radius, height, segments)
}

fn add_cap(data: &mut GeometryData, radius: f32, y: f32, segments: u32, facing_up: bool) {
    let normal_y = if facing_up { 1.0 } else { -1.0 };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push([0.0, normal_y, 0.0]);
    data.tex_coords.push([0.5, 0.5]);

    let ring_start = data.vertices.len() as u32;
    for i in 0..=segments {
        let angle = i as f32 * 2.0 * PI / segments as f32;
        let (cos_a, sin_a) = (angle.cos(), angle.sin());
        data.vertices.push([radius * cos_a, y, radius * sin_a]);
        data.normals.push([0.0, normal_y, 0.0]);
        data.tex_coords
            .push([0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a]);
    }

    for i in 0..segments {
        let current = ring_start + i;
        let next = ring_start + i + 1;
        if facing_up {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_box_dimensions() {
        let wall = generate_box(5.0, 3.0, 0.2);
        let max_x = wall.vertices.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        let max_y = wall.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        let max_z = wall.vertices.iter().map(|v| v[2]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, 2.5);
        assert_eq!(max_y, 1.5);
        assert_eq!(max_z, 0.1);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(20.0, 20.0);
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.triangle_count(), 2);
        // Faces +Z before the caller rotates it into place
        assert!(plane.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.7, 8, 8);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.7).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let trunk = generate_cylinder(0.2, 0.5, 2.0, 8);
        assert_eq!(trunk.vertices.len() as u32, (8 + 1) * 2 + 2 * (1 + 8 + 1));
        // 8 side quads + two 8-triangle caps
        assert_eq!(trunk.triangle_count(), 16 + 16);
    }

    #[test]
    fn test_cone_generation() {
        let roof = generate_cone(3.6, 2.0, 4);
        // Degenerate top ring, one triangle per side segment, bottom cap only
        assert_eq!(roof.triangle_count(), 4 + 4);
        let apex_y = roof.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert_eq!(apex_y, 1.0);
    }

    #[test]
    fn test_normals_are_unit_length() {
        for data in [
            generate_box(1.0, 2.0, 3.0),
            generate_cylinder(0.2, 0.5, 2.0, 8),
            generate_cone(3.6, 2.0, 4),
        ] {
            for n in &data.normals {
                let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
                assert!((len - 1.0).abs() < 1e-5);
            }
        }
    }
}
