//! Asynchronous model loading
//!
//! The model file is parsed off-thread and the outcome crosses back to
//! the render thread over a one-shot channel. The render loop polls the
//! pending handle once per frame: on success the model is attached to the
//! scene, on failure the error is logged and the scene is left unchanged.
//! There is no retry, timeout or cancellation; a handle that resolves
//! after nobody cares is harmless.

use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;
use thiserror::Error;

use crate::gfx::scene::object::Mesh;

/// Raw mesh arrays as parsed from the model file
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Surface properties carried by the model's MTL entry, if any
pub struct ModelMaterial {
    pub name: String,
    pub diffuse: [f32; 3],
    pub alpha: f32,
    pub roughness: f32,
}

/// A fully parsed model, ready to become a scene object
pub struct LoadedModel {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub material: Option<ModelMaterial>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("model file contained no geometry")]
    EmptyModel,
    #[error("model load worker dropped before finishing")]
    Canceled,
}

/// Handle to an in-flight model load
///
/// [`PendingModel::poll`] yields the result exactly once; afterwards the
/// handle is spent and keeps returning `None`.
pub struct PendingModel {
    path: PathBuf,
    receiver: Option<oneshot::Receiver<Result<LoadedModel, LoadError>>>,
}

/// Starts loading a model file on a worker thread
pub fn begin_load(path: impl Into<PathBuf>) -> PendingModel {
    let path = path.into();
    let (sender, receiver) = oneshot::channel();

    let worker_path = path.clone();
    thread::spawn(move || {
        let result = load_obj(&worker_path);
        // The receiver may already be gone if the app shut down
        let _ = sender.send(result);
    });

    PendingModel {
        path,
        receiver: Some(receiver),
    }
}

impl PendingModel {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks for completion without blocking
    ///
    /// Returns `Some` on the first call after the worker finishes, `None`
    /// while the load is still running or after the result was taken.
    pub fn poll(&mut self) -> Option<Result<LoadedModel, LoadError>> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(Some(result)) => {
                self.receiver = None;
                Some(result)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                self.receiver = None;
                Some(Err(LoadError::Canceled))
            }
        }
    }
}

/// Parses an OBJ file into mesh data, synchronously
fn load_obj(path: &Path) -> Result<LoadedModel, LoadError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    if models.is_empty() {
        return Err(LoadError::EmptyModel);
    }

    let materials = materials.unwrap_or_else(|e| {
        log::warn!("No usable MTL for {}: {e}", path.display());
        Vec::new()
    });

    let name = models
        .first()
        .filter(|m| !m.name.is_empty())
        .map(|m| m.name.clone())
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string())
        });

    let material = models
        .first()
        .and_then(|m| m.mesh.material_id)
        .and_then(|id| materials.get(id))
        .map(|mtl| ModelMaterial {
            name: if mtl.name.is_empty() {
                format!("{} material", name)
            } else {
                mtl.name.clone()
            },
            diffuse: mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]),
            alpha: mtl.dissolve.unwrap_or(1.0),
            roughness: 1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
        });

    let meshes = models
        .iter()
        .map(|m| {
            let mesh = &m.mesh;

            // Use normals from the OBJ when present, otherwise average
            // face normals per vertex
            let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len()
            {
                mesh.normals.clone()
            } else {
                Mesh::calculate_vertex_normals(&mesh.positions, &mesh.indices)
            };

            MeshData {
                positions: mesh.positions.clone(),
                normals,
                tex_coords: mesh.texcoords.clone(),
                indices: mesh.indices.clone(),
            }
        })
        .collect();

    Ok(LoadedModel {
        name,
        meshes,
        material,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn wait(mut pending: PendingModel) -> Result<LoadedModel, LoadError> {
        for _ in 0..1000 {
            if let Some(result) = pending.poll() {
                return result;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("model load did not finish in time");
    }

    fn write_triangle_obj() -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "croft-test-{}-{:?}.obj",
            std::process::id(),
            thread::current().id()
        ));
        let mut file = std::fs::File::create(&path).expect("temp obj");
        writeln!(file, "o wedge").unwrap();
        writeln!(file, "v 0.0 0.0 0.0").unwrap();
        writeln!(file, "v 1.0 0.0 0.0").unwrap();
        writeln!(file, "v 0.0 1.0 0.0").unwrap();
        writeln!(file, "f 1 2 3").unwrap();
        path
    }

    #[test]
    fn load_resolves_with_parsed_model() {
        let path = write_triangle_obj();
        let model = wait(begin_load(&path)).expect("load should succeed");
        std::fs::remove_file(&path).ok();

        assert_eq!(model.name, "wedge");
        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.meshes[0].positions.len(), 9);
        assert_eq!(model.meshes[0].indices, vec![0, 1, 2]);
        // Normals were synthesized for the bare triangle
        assert_eq!(model.meshes[0].normals.len(), 9);
    }

    #[test]
    fn missing_file_resolves_with_error() {
        let pending = begin_load("/definitely/not/here.obj");
        let result = wait(pending);
        assert!(result.is_err());
    }

    #[test]
    fn poll_yields_result_exactly_once() {
        let path = write_triangle_obj();
        let mut pending = begin_load(&path);

        let mut first = None;
        for _ in 0..1000 {
            if let Some(result) = pending.poll() {
                first = Some(result);
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        std::fs::remove_file(&path).ok();

        assert!(first.expect("load finished").is_ok());
        assert!(pending.poll().is_none());
        assert!(pending.poll().is_none());
    }
}
