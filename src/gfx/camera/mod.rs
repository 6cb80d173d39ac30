pub mod camera;
pub mod camera_controller;
pub mod camera_utils;

// Re-export main types
pub use camera::Camera;
pub use camera_controller::OrbitController;
pub use camera_utils::{CameraManager, CameraUniform};
