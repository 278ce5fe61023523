//! Host scene-graph interface consumed by the text system

use crate::foundation::math::{Mat3, Rgba, Vec3};

slotmap::new_key_type! {
    /// Stable handle to an object living in the host scene
    pub struct ObjectHandle;

    /// Stable handle to a mesh owned by the host scene
    pub struct MeshHandle;
}

/// Result type for host scene operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors reported by the host scene
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The object handle does not refer to a live object
    #[error("Object {0:?} does not exist")]
    UnknownObject(ObjectHandle),

    /// The mesh handle does not refer to a live mesh
    #[error("Mesh {0:?} does not exist")]
    UnknownMesh(MeshHandle),

    /// No template with this name is registered in the scene
    #[error("Template '{0}' not found")]
    UnknownTemplate(String),

    /// The template exists but carries no mesh to clone
    #[error("Template '{0}' has no mesh")]
    TemplateWithoutMesh(String),

    /// A mesh with this name already exists
    #[error("Mesh name '{0}' already in use")]
    MeshNameTaken(String),

    /// The host rejected a UV transform on a mesh
    #[error("UV transform failed on mesh '{mesh}': {reason}")]
    UvTransform {
        /// Name of the mesh being transformed
        mesh: String,
        /// Host-provided reason
        reason: String,
    },
}

/// Operations the text system needs from the host scene graph
///
/// All calls are synchronous and run to completion within the tick that
/// issues them.
pub trait SceneHost {
    /// Spawn a new object from a named template
    fn create_object(&mut self, template: &str) -> HostResult<ObjectHandle>;

    /// Destroy an object and everything parented under it
    fn destroy_object(&mut self, object: ObjectHandle) -> HostResult<()>;

    /// Parent `object` under `parent`
    fn set_parent(&mut self, object: ObjectHandle, parent: ObjectHandle) -> HostResult<()>;

    /// Replace the mesh an object renders with
    fn replace_mesh(&mut self, object: ObjectHandle, mesh: MeshHandle) -> HostResult<()>;

    /// Set the object's tint color
    fn set_color(&mut self, object: ObjectHandle, color: Rgba) -> HostResult<()>;

    /// Show or hide the object
    fn set_visible(&mut self, object: ObjectHandle, visible: bool) -> HostResult<()>;

    /// Set the object's position relative to its parent
    fn set_local_position(&mut self, object: ObjectHandle, position: Vec3) -> HostResult<()>;

    /// Set the object's scale relative to its parent
    fn set_local_scale(&mut self, object: ObjectHandle, scale: Vec3) -> HostResult<()>;

    /// Mesh carried by a named template
    fn template_mesh(&mut self, template: &str) -> HostResult<MeshHandle>;

    /// Copy a mesh under a new unique name
    fn clone_mesh_with_new_name(&mut self, base: MeshHandle, name: &str) -> HostResult<MeshHandle>;

    /// Release a mesh that is no longer referenced
    fn free_mesh(&mut self, mesh: MeshHandle) -> HostResult<()>;

    /// Multiply every texture coordinate of a mesh by `matrix`
    fn transform_mesh_uv(&mut self, mesh: MeshHandle, matrix: &Mat3) -> HostResult<()>;
}
