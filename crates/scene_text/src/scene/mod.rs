//! Scene host seam
//!
//! The text system never owns scene objects directly. Everything it does to
//! the world (spawning glyph instances, swapping their meshes, moving and
//! tinting them, cloning atlas meshes) goes through the [`SceneHost`] trait,
//! so the same pipeline drives a real engine scene or the in-memory
//! [`MemoryScene`] used by tests and the demo.
//!
//! ```text
//! TextBoxController
//!      ↓
//! SceneHost (trait)
//!      ↓
//! Engine scene graph / MemoryScene
//! ```

mod host;
mod mesh;
mod memory_scene;

pub use host::{SceneHost, HostError, HostResult, ObjectHandle, MeshHandle};
pub use mesh::{Mesh, Vertex};
pub use memory_scene::{MemoryScene, SceneObject, HostStats};
