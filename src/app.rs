//! Application context and event loop
//!
//! All viewer state lives in one explicit context: the scene, renderer,
//! UI and animation state belong to [`AppState`], created at startup and
//! dropped on exit, never to module-level globals. The
//! winit event loop drives a redraw per display refresh; each redraw
//! polls the pending model load, advances the animators, updates the
//! camera, and renders.

use cgmath::{Rad, Vector3};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::animation::{AnimationManager, Flythrough, Turntable};
use crate::assembly;
use crate::gfx::{
    camera::{camera::Camera, camera_controller::OrbitController, camera_utils::CameraManager},
    rendering::render_engine::RenderEngine,
    scene::Scene,
};
use crate::loader::{self, LoadError, LoadedModel, PendingModel};
use crate::ui::{panel, UiManager};

/// Where the loaded model stands, next to the front door
pub const MODEL_POSITION: [f32; 3] = [0.8, 0.8, 3.5];

/// Uniform scale applied to the loaded model
pub const MODEL_SCALE: f32 = 0.8;

const WINDOW_WIDTH: u32 = 1200;
const WINDOW_HEIGHT: u32 = 800;

/// Lifecycle of the one-shot model load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    NotRequested,
    Loading,
    Attached,
    Failed,
}

impl ModelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ModelStatus::NotRequested => "not requested",
            ModelStatus::Loading => "loading...",
            ModelStatus::Attached => "attached",
            ModelStatus::Failed => "failed (see log)",
        }
    }
}

pub struct CroftApp {
    event_loop: Option<EventLoop<()>>,
    pub app_state: AppState,
}

pub struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    pub scene: Scene,
    pub animations: AnimationManager,
    pending_model: Option<PendingModel>,
    model_status: ModelStatus,
    last_frame: Instant,
}

impl CroftApp {
    /// Creates the application with the diorama assembled and the camera
    /// flythrough attached
    pub async fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = Camera::new(
            Vector3::from(crate::animation::flythrough::START_EYE),
            Vector3::from(crate::animation::flythrough::LOOK_TARGET),
            WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32,
        );
        let controller = OrbitController::new(0.005, 0.1, 0.9);

        let mut scene = Scene::new(CameraManager::new(camera, controller));
        assembly::assemble(&mut scene);

        let mut animations = AnimationManager::new();
        animations.attach(Box::new(Flythrough::new()), &mut scene);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                animations,
                pending_model: None,
                model_status: ModelStatus::NotRequested,
                last_frame: Instant::now(),
            },
        }
    }

    /// Kicks off the asynchronous model load
    pub fn request_model(&mut self, path: &str) {
        self.app_state.pending_model = Some(loader::begin_load(path));
        self.app_state.model_status = ModelStatus::Loading;
    }

    /// Runs the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

/// Applies a finished load to the scene
///
/// On success the model becomes one new shadow-casting object placed by
/// the door, with a turntable animator spinning it. On failure the error
/// goes to the log and the scene stays exactly as it was.
pub fn handle_load_outcome(
    scene: &mut Scene,
    animations: &mut AnimationManager,
    result: Result<LoadedModel, LoadError>,
) -> ModelStatus {
    match result {
        Ok(model) => {
            let name = {
                let object = scene.attach_model(model);
                object.cast_shadow = true;
                object.set_transform_trs(MODEL_POSITION.into(), Rad(0.0), MODEL_SCALE);
                object.name.clone()
            };

            animations.attach(
                Box::new(Turntable::new(&name, MODEL_POSITION.into(), MODEL_SCALE)),
                scene,
            );

            log::info!("Attached model '{name}'");
            ModelStatus::Attached
        }
        Err(e) => {
            log::error!("Error loading the model: {e}");
            ModelStatus::Failed
        }
    }
}

impl AppState {
    /// Polls the pending load once; runs on the render thread at a frame
    /// boundary
    fn poll_model_load(&mut self) {
        let Some(pending) = self.pending_model.as_mut() else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        self.pending_model = None;

        self.model_status = handle_load_outcome(&mut self.scene, &mut self.animations, result);

        // The new object still needs GPU buffers; already-initialized
        // objects and materials are skipped
        if self.model_status == ModelStatus::Attached {
            if let Some(engine) = &self.render_engine {
                self.scene.init_gpu_resources(
                    engine.device(),
                    engine.queue(),
                    engine.transform_layout(),
                    engine.material_layout(),
                );
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("croft")
                .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            self.scene.camera_manager.camera.resize_projection(width, height);
            self.scene.init_gpu_resources(
                renderer.device(),
                renderer.queue(),
                renderer.transform_layout(),
                renderer.material_layout(),
            );

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
            self.last_frame = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI gets first refusal on input
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if self.render_engine.is_none() {
                    return;
                }

                let now = Instant::now();
                let delta_time = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                self.poll_model_load();

                self.animations.update(delta_time, &mut self.scene);
                self.scene.update();

                let Some(render_engine) = self.render_engine.as_mut() else {
                    return;
                };
                self.scene.update_all_transforms(render_engine.queue());

                render_engine.update(
                    self.scene.camera_manager.camera.uniform,
                    &self.scene.lights,
                );

                let stats = self.scene.statistics();
                let eye = self.scene.camera_manager.camera.eye;
                let model_status = self.model_status.label();

                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    let animations = &mut self.animations;
                    let window_clone = window.clone();
                    render_engine.render_frame(
                        &self.scene,
                        Some(
                            |device: &wgpu::Device,
                             queue: &wgpu::Queue,
                             encoder: &mut wgpu::CommandEncoder,
                             color_attachment: &wgpu::TextureView| {
                                ui_manager.draw(
                                    device,
                                    queue,
                                    encoder,
                                    &window_clone,
                                    color_attachment,
                                    |ui| {
                                        panel::scene_panel(
                                            ui,
                                            &stats,
                                            [eye.x, eye.y, eye.z],
                                            model_status,
                                        );
                                        animations.render_ui(ui);
                                    },
                                );
                            },
                        ),
                    );
                } else {
                    render_engine.render_frame_simple(&self.scene);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Don't orbit the camera while the UI owns the pointer
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadError;

    fn assembled() -> (Scene, AnimationManager) {
        let camera = Camera::new(
            Vector3::from(crate::animation::flythrough::START_EYE),
            Vector3::from(crate::animation::flythrough::LOOK_TARGET),
            1.5,
        );
        let controller = OrbitController::new(0.005, 0.1, 0.9);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        assembly::assemble(&mut scene);

        let mut animations = AnimationManager::new();
        animations.attach(Box::new(Flythrough::new()), &mut scene);
        (scene, animations)
    }

    fn fake_model() -> LoadedModel {
        LoadedModel {
            name: "dragon".to_string(),
            meshes: vec![crate::loader::MeshData {
                positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
                tex_coords: vec![],
                indices: vec![0, 1, 2],
            }],
            material: None,
        }
    }

    #[test]
    fn failed_load_leaves_scene_unchanged() {
        let (mut scene, mut animations) = assembled();
        let baseline = scene.object_count();
        let animators = animations.animator_count();

        let status =
            handle_load_outcome(&mut scene, &mut animations, Err(LoadError::EmptyModel));

        assert_eq!(status, ModelStatus::Failed);
        assert_eq!(scene.object_count(), baseline);
        assert_eq!(animations.animator_count(), animators);
    }

    #[test]
    fn successful_load_adds_exactly_one_object() {
        let (mut scene, mut animations) = assembled();
        let baseline = scene.object_count();

        let status = handle_load_outcome(&mut scene, &mut animations, Ok(fake_model()));

        assert_eq!(status, ModelStatus::Attached);
        assert_eq!(scene.object_count(), baseline + 1);

        let dragon = scene.find_object("dragon").expect("model attached");
        assert!(dragon.cast_shadow);
        let p = dragon.position();
        assert!((p.x - MODEL_POSITION[0]).abs() < 1e-6);
        assert!((p.y - MODEL_POSITION[1]).abs() < 1e-6);
        assert!((p.z - MODEL_POSITION[2]).abs() < 1e-6);

        // Flythrough plus the model's turntable
        assert_eq!(animations.animator_count(), 2);
    }

    #[test]
    fn attached_model_spins_with_the_ticks() {
        use crate::animation::manager::TICK_INTERVAL;

        let (mut scene, mut animations) = assembled();
        handle_load_outcome(&mut scene, &mut animations, Ok(fake_model()));

        let before = scene.find_object("dragon").unwrap().transform;
        animations.update(TICK_INTERVAL, &mut scene);
        let after = scene.find_object("dragon").unwrap().transform;

        assert!(before != after, "turntable must move the model each tick");
        // One tick of yaw, at the model's scale
        let expected = MODEL_SCALE * crate::animation::turntable::SPIN_STEP.cos();
        assert!((after.x.x - expected).abs() < 1e-6);
    }
}
