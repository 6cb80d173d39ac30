//! Viewer status panel

use imgui::Ui;

use crate::gfx::scene::scene::SceneStatistics;

/// Draws the status window: scene inventory, camera pose, model load state
pub fn scene_panel(ui: &Ui, stats: &SceneStatistics, camera_eye: [f32; 3], model_status: &str) {
    ui.window("Croft")
        .size([280.0, 190.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("Objects: {}", stats.object_count));
            ui.text(format!("Materials: {}", stats.material_count));
            ui.text(format!(
                "Triangles: {} ({} vertices)",
                stats.total_triangles, stats.total_vertices
            ));
            ui.separator();

            ui.text(format!(
                "Camera: ({:.2}, {:.2}, {:.2})",
                camera_eye[0], camera_eye[1], camera_eye[2]
            ));
            ui.text(format!("Model: {}", model_status));
            ui.separator();

            ui.text("Drag to orbit, scroll to zoom");
            ui.text("Esc to quit");
        });
}
