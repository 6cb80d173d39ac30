//! Scene assembly
//!
//! Builds the fixed diorama: a ground plane, a four-walled house with a
//! door and pyramid roof, a framed painting on the front wall, a row of
//! five trees, and the light rig. All dimensions, positions and colors
//! are fixed literals; construction cannot fail. Asset trouble (the
//! painting image) degrades to a plain surface and a log line.

use cgmath::Rad;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::gfx::geometry::{
    generate_box, generate_cone, generate_cylinder, generate_plane, generate_sphere,
};
use crate::gfx::resources::material::Material;
use crate::gfx::scene::{
    lights::{AmbientLight, DirectionalLight, LightRig},
    Scene,
};

/// Image shown in the frame on the front wall
pub const PAINTING_IMAGE_PATH: &str = "assets/painting.png";

const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.2;
const WALL_LENGTH: f32 = 5.0;

const GROUND_SIZE: f32 = 20.0;

const TREE_ROW_Z: f32 = -4.0;
const TRUNK_HEIGHT: f32 = 2.0;
const LEAVES_RADIUS: f32 = 0.7;
const LEAVES_HEIGHT: f32 = 2.2;

// 0xffe4b5
const WALL_COLOR: [f32; 3] = [1.0, 0.894, 0.710];
// 0x8b4513
const ROOF_COLOR: [f32; 3] = [0.545, 0.271, 0.075];
// 0x654321
const DOOR_COLOR: [f32; 3] = [0.396, 0.263, 0.129];
// 0x87ceeb
const GROUND_COLOR: [f32; 3] = [0.529, 0.808, 0.922];
// 0x228b22
const LEAVES_COLOR: [f32; 3] = [0.133, 0.545, 0.133];

/// Constructs every static object and the lights into the scene
///
/// Called once at startup, before any GPU resources exist. The scene
/// afterwards contains exactly seventeen objects: ground, four walls,
/// door, roof, painting, and five trunk/leaves pairs.
pub fn assemble(scene: &mut Scene) {
    register_materials(scene);

    scene.lights = LightRig {
        ambient: AmbientLight {
            color: [1.0, 1.0, 1.0],
            intensity: 0.5,
        },
        directional: DirectionalLight {
            position: [5.0, 5.0, 5.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            cast_shadow: true,
        },
    };

    // Ground plane, rotated flat, shadow receiver only
    scene
        .add_geometry(generate_plane(GROUND_SIZE, GROUND_SIZE), "ground")
        .with_material("ground")
        .with_position(0.0, 0.0, 0.0)
        .with_rotation_x(Rad(-FRAC_PI_2));

    // House walls as separate boxes resting on the ground
    scene
        .add_geometry(
            generate_box(WALL_LENGTH, WALL_HEIGHT, WALL_THICKNESS),
            "front wall",
        )
        .with_material("walls")
        .with_position(0.0, WALL_HEIGHT / 2.0, -2.5)
        .with_cast_shadow(true);

    scene
        .add_geometry(
            generate_box(WALL_LENGTH, WALL_HEIGHT, WALL_THICKNESS),
            "back wall",
        )
        .with_material("walls")
        .with_position(0.0, WALL_HEIGHT / 2.0, 2.5)
        .with_cast_shadow(true);

    scene
        .add_geometry(
            generate_box(WALL_THICKNESS, WALL_HEIGHT, WALL_LENGTH),
            "left wall",
        )
        .with_material("walls")
        .with_position(-2.5, WALL_HEIGHT / 2.0, 0.0)
        .with_cast_shadow(true);

    scene
        .add_geometry(
            generate_box(WALL_THICKNESS, WALL_HEIGHT, WALL_LENGTH),
            "right wall",
        )
        .with_material("walls")
        .with_position(2.5, WALL_HEIGHT / 2.0, 0.0)
        .with_cast_shadow(true);

    // Door on the back wall
    scene
        .add_geometry(generate_box(1.0, 2.0, 0.1), "door")
        .with_material("door")
        .with_position(0.0, 1.0, 2.6)
        .with_cast_shadow(true);

    // Pyramid roof above the walls, turned 45 degrees so its faces line
    // up with the walls
    scene
        .add_geometry(generate_cone(3.6, 2.0, 4), "roof")
        .with_material("roof")
        .with_position(0.0, WALL_HEIGHT + 1.0, 0.0)
        .with_rotation_y(Rad(FRAC_PI_4))
        .with_cast_shadow(true);

    // Framed painting on the front wall
    scene
        .add_geometry(generate_plane(1.0, 1.5), "painting")
        .with_material("painting")
        .with_position(-1.5, 1.5, -2.4);

    // Row of trees from a fixed arithmetic stride
    for i in -2i32..=2 {
        let x = (i * 2) as f32;

        scene
            .add_geometry(
                generate_cylinder(0.2, 0.5, TRUNK_HEIGHT, 8),
                &format!("tree trunk {}", i),
            )
            .with_material("trunk")
            .with_position(x, 1.0, TREE_ROW_Z)
            .with_cast_shadow(true);

        scene
            .add_geometry(
                generate_sphere(LEAVES_RADIUS, 8, 8),
                &format!("tree leaves {}", i),
            )
            .with_material("leaves")
            .with_position(x, LEAVES_HEIGHT, TREE_ROW_Z)
            .with_cast_shadow(true);
    }
}

fn register_materials(scene: &mut Scene) {
    scene.add_material_rgb("walls", WALL_COLOR[0], WALL_COLOR[1], WALL_COLOR[2], 0.0, 0.8);
    scene.add_material_rgb("roof", ROOF_COLOR[0], ROOF_COLOR[1], ROOF_COLOR[2], 0.0, 0.9);
    scene.add_material_rgb("door", DOOR_COLOR[0], DOOR_COLOR[1], DOOR_COLOR[2], 0.0, 0.7);
    scene.add_material_rgb(
        "ground",
        GROUND_COLOR[0],
        GROUND_COLOR[1],
        GROUND_COLOR[2],
        0.0,
        0.9,
    );
    scene.add_material_rgb("trunk", ROOF_COLOR[0], ROOF_COLOR[1], ROOF_COLOR[2], 0.0, 0.9);
    scene.add_material_rgb(
        "leaves",
        LEAVES_COLOR[0],
        LEAVES_COLOR[1],
        LEAVES_COLOR[2],
        0.0,
        0.9,
    );

    // The painting is a white surface carrying the image texture; if the
    // image cannot be decoded the frame stays plain white
    let mut painting = Material::new("painting", [1.0, 1.0, 1.0, 1.0], 0.0, 0.8);
    match image::open(PAINTING_IMAGE_PATH) {
        Ok(img) => painting = painting.with_texture_image(img.to_rgba8()),
        Err(e) => {
            log::warn!("Could not load painting image {PAINTING_IMAGE_PATH}: {e}");
        }
    }
    scene.material_manager.add_material(painting);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{Camera, CameraManager, OrbitController};
    use cgmath::Vector3;

    fn count_prefix(scene: &Scene, prefix: &str) -> usize {
        scene
            .objects
            .iter()
            .filter(|obj| obj.name.starts_with(prefix))
            .count()
    }

    fn assembled_scene() -> Scene {
        let camera = Camera::new(
            Vector3::new(10.0, 5.0, 10.0),
            Vector3::new(0.0, 1.5, 0.0),
            1.0,
        );
        let controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        assemble(&mut scene);
        scene
    }

    #[test]
    fn static_scene_has_exact_inventory() {
        let scene = assembled_scene();

        assert_eq!(scene.object_count(), 17);
        assert_eq!(count_prefix(&scene, "tree trunk"), 5);
        assert_eq!(count_prefix(&scene, "tree leaves"), 5);
        assert!(scene.find_object("ground").is_some());
        assert!(scene.find_object("front wall").is_some());
        assert!(scene.find_object("back wall").is_some());
        assert!(scene.find_object("left wall").is_some());
        assert!(scene.find_object("right wall").is_some());
        assert!(scene.find_object("door").is_some());
        assert!(scene.find_object("roof").is_some());
        assert!(scene.find_object("painting").is_some());
    }

    #[test]
    fn placement_matches_blueprint() {
        let scene = assembled_scene();

        let check = |name: &str, expected: [f32; 3]| {
            let p = scene.find_object(name).expect(name).position();
            assert!((p.x - expected[0]).abs() < 1e-6, "{name} x");
            assert!((p.y - expected[1]).abs() < 1e-6, "{name} y");
            assert!((p.z - expected[2]).abs() < 1e-6, "{name} z");
        };

        check("front wall", [0.0, 1.5, -2.5]);
        check("back wall", [0.0, 1.5, 2.5]);
        check("left wall", [-2.5, 1.5, 0.0]);
        check("right wall", [2.5, 1.5, 0.0]);
        check("door", [0.0, 1.0, 2.6]);
        check("roof", [0.0, 4.0, 0.0]);
        check("painting", [-1.5, 1.5, -2.4]);

        for i in -2i32..=2 {
            let x = (i * 2) as f32;
            check(&format!("tree trunk {}", i), [x, 1.0, -4.0]);
            check(&format!("tree leaves {}", i), [x, 2.2, -4.0]);
        }
    }

    #[test]
    fn shadow_flags_are_set_once_at_construction() {
        let scene = assembled_scene();

        assert!(!scene.find_object("ground").unwrap().cast_shadow);
        assert!(!scene.find_object("painting").unwrap().cast_shadow);

        for name in ["front wall", "back wall", "left wall", "right wall", "door", "roof"] {
            assert!(scene.find_object(name).unwrap().cast_shadow, "{name}");
        }
        for i in -2i32..=2 {
            assert!(scene
                .find_object(&format!("tree trunk {}", i))
                .unwrap()
                .cast_shadow);
            assert!(scene
                .find_object(&format!("tree leaves {}", i))
                .unwrap()
                .cast_shadow);
        }
    }

    #[test]
    fn lights_match_blueprint() {
        let scene = assembled_scene();

        assert_eq!(scene.lights.ambient.intensity, 0.5);
        assert_eq!(scene.lights.ambient.color, [1.0, 1.0, 1.0]);
        assert_eq!(scene.lights.directional.position, [5.0, 5.0, 5.0]);
        assert_eq!(scene.lights.directional.intensity, 1.0);
        assert!(scene.lights.directional.cast_shadow);
    }

    #[test]
    fn assembly_leaves_camera_untouched() {
        let scene = assembled_scene();
        assert_eq!(
            scene.camera_manager.camera.eye,
            Vector3::new(10.0, 5.0, 10.0)
        );
    }

    #[test]
    fn every_object_has_a_registered_material() {
        let scene = assembled_scene();
        for object in &scene.objects {
            let id = object.material_id.as_ref().expect("material assigned");
            assert!(
                scene.material_manager.get_material(id).is_some(),
                "missing material {id}"
            );
        }
    }
}
