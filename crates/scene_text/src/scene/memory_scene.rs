//! In-memory scene host
//!
//! A small, complete implementation of [`SceneHost`] backed by slot maps.
//! It keeps real quad meshes and applies UV transforms to them, so the glyph
//! a rendered instance shows can be read back from its mesh. Used by the
//! demo binary and by the test suites.

use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;

use super::host::{HostError, HostResult, MeshHandle, ObjectHandle, SceneHost};
use super::mesh::Mesh;
use crate::core::AtlasConfig;
use crate::foundation::math::{Mat3, Rgba, Vec3, WHITE};

/// Object stored in a [`MemoryScene`]
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Template the object was spawned from
    pub template: String,
    /// Parent object, if any
    pub parent: Option<ObjectHandle>,
    /// Mesh currently rendered
    pub mesh: Option<MeshHandle>,
    /// Tint color
    pub color: Rgba,
    /// Visibility flag
    pub visible: bool,
    /// Position relative to the parent
    pub local_position: Vec3,
    /// Scale relative to the parent
    pub local_scale: Vec3,
}

/// Counters of mutating host calls, for asserting churn in tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Objects spawned
    pub objects_created: usize,
    /// Objects destroyed, including cascaded children
    pub objects_destroyed: usize,
    /// `replace_mesh` calls
    pub mesh_replacements: usize,
    /// Meshes cloned
    pub meshes_cloned: usize,
}

/// Slot-map backed scene graph
#[derive(Debug, Default)]
pub struct MemoryScene {
    objects: SlotMap<ObjectHandle, SceneObject>,
    meshes: SlotMap<MeshHandle, Mesh>,
    mesh_names: HashMap<String, MeshHandle>,
    templates: HashMap<String, Option<MeshHandle>>,
    failing_uv_meshes: HashSet<String>,
    stats: HostStats,
}

impl MemoryScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene with the glyph templates described by `atlas`
    ///
    /// Registers one quad template per style (1-5) and a mesh-less blank
    /// template for glyph instances.
    pub fn with_glyph_templates(atlas: &AtlasConfig) -> Self {
        let mut scene = Self::new();
        for style in 1..=5u8 {
            let name = atlas.glyph_template(style);
            scene.register_template(&name, Some(Mesh::quad(name.clone())));
        }
        scene.register_template(&atlas.blank_glyph_template, None);
        scene
    }

    /// Register an object template, optionally carrying a mesh
    pub fn register_template(&mut self, name: &str, mesh: Option<Mesh>) {
        let handle = mesh.map(|mesh| self.insert_mesh(mesh));
        self.templates.insert(name.to_string(), handle);
    }

    /// Make every future UV transform on the mesh called `name` fail
    pub fn fail_uv_transform_for(&mut self, name: impl Into<String>) {
        self.failing_uv_meshes.insert(name.into());
    }

    /// Stop injecting UV transform failures
    pub fn clear_uv_failures(&mut self) {
        self.failing_uv_meshes.clear();
    }

    /// Spawn a parentless object, e.g. the owner of a text box
    pub fn spawn_root(&mut self, template: &str) -> ObjectHandle {
        self.objects.insert(SceneObject::new(template, None))
    }

    /// Look up an object
    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle)
    }

    /// Look up a mesh
    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle)
    }

    /// Look up a mesh by name
    pub fn mesh_by_name(&self, name: &str) -> Option<&Mesh> {
        self.mesh_names.get(name).and_then(|&h| self.meshes.get(h))
    }

    /// Direct children of `parent`
    pub fn children_of(&self, parent: ObjectHandle) -> Vec<ObjectHandle> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.parent == Some(parent))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of live meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Host call counters
    pub fn stats(&self) -> HostStats {
        self.stats
    }

    fn insert_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        let name = mesh.name.clone();
        let handle = self.meshes.insert(mesh);
        self.mesh_names.insert(name, handle);
        handle
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> HostResult<&mut SceneObject> {
        self.objects.get_mut(handle).ok_or(HostError::UnknownObject(handle))
    }
}

impl SceneObject {
    fn new(template: &str, mesh: Option<MeshHandle>) -> Self {
        Self {
            template: template.to_string(),
            parent: None,
            mesh,
            color: Rgba::from(WHITE),
            visible: true,
            local_position: Vec3::zeros(),
            local_scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl SceneHost for MemoryScene {
    fn create_object(&mut self, template: &str) -> HostResult<ObjectHandle> {
        let mesh = *self
            .templates
            .get(template)
            .ok_or_else(|| HostError::UnknownTemplate(template.to_string()))?;
        self.stats.objects_created += 1;
        Ok(self.objects.insert(SceneObject::new(template, mesh)))
    }

    fn destroy_object(&mut self, object: ObjectHandle) -> HostResult<()> {
        if !self.objects.contains_key(object) {
            return Err(HostError::UnknownObject(object));
        }
        let mut pending = vec![object];
        while let Some(handle) = pending.pop() {
            pending.extend(self.children_of(handle));
            if self.objects.remove(handle).is_some() {
                self.stats.objects_destroyed += 1;
            }
        }
        Ok(())
    }

    fn set_parent(&mut self, object: ObjectHandle, parent: ObjectHandle) -> HostResult<()> {
        if !self.objects.contains_key(parent) {
            return Err(HostError::UnknownObject(parent));
        }
        self.object_mut(object)?.parent = Some(parent);
        Ok(())
    }

    fn replace_mesh(&mut self, object: ObjectHandle, mesh: MeshHandle) -> HostResult<()> {
        if !self.meshes.contains_key(mesh) {
            return Err(HostError::UnknownMesh(mesh));
        }
        self.object_mut(object)?.mesh = Some(mesh);
        self.stats.mesh_replacements += 1;
        Ok(())
    }

    fn set_color(&mut self, object: ObjectHandle, color: Rgba) -> HostResult<()> {
        self.object_mut(object)?.color = color;
        Ok(())
    }

    fn set_visible(&mut self, object: ObjectHandle, visible: bool) -> HostResult<()> {
        self.object_mut(object)?.visible = visible;
        Ok(())
    }

    fn set_local_position(&mut self, object: ObjectHandle, position: Vec3) -> HostResult<()> {
        self.object_mut(object)?.local_position = position;
        Ok(())
    }

    fn set_local_scale(&mut self, object: ObjectHandle, scale: Vec3) -> HostResult<()> {
        self.object_mut(object)?.local_scale = scale;
        Ok(())
    }

    fn template_mesh(&mut self, template: &str) -> HostResult<MeshHandle> {
        let mesh = *self
            .templates
            .get(template)
            .ok_or_else(|| HostError::UnknownTemplate(template.to_string()))?;
        mesh.ok_or_else(|| HostError::TemplateWithoutMesh(template.to_string()))
    }

    fn clone_mesh_with_new_name(&mut self, base: MeshHandle, name: &str) -> HostResult<MeshHandle> {
        if self.mesh_names.contains_key(name) {
            return Err(HostError::MeshNameTaken(name.to_string()));
        }
        let mut mesh = self.meshes.get(base).ok_or(HostError::UnknownMesh(base))?.clone();
        mesh.name = name.to_string();
        self.stats.meshes_cloned += 1;
        Ok(self.insert_mesh(mesh))
    }

    fn free_mesh(&mut self, mesh: MeshHandle) -> HostResult<()> {
        let removed = self.meshes.remove(mesh).ok_or(HostError::UnknownMesh(mesh))?;
        self.mesh_names.remove(&removed.name);
        for obj in self.objects.values_mut().filter(|obj| obj.mesh == Some(mesh)) {
            obj.mesh = None;
        }
        Ok(())
    }

    fn transform_mesh_uv(&mut self, mesh: MeshHandle, matrix: &Mat3) -> HostResult<()> {
        let target = self.meshes.get_mut(mesh).ok_or(HostError::UnknownMesh(mesh))?;
        if self.failing_uv_meshes.contains(&target.name) {
            return Err(HostError::UvTransform {
                mesh: target.name.clone(),
                reason: "injected failure".to_string(),
            });
        }
        target.transform_uv(matrix);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::uv;

    #[test]
    fn test_create_and_parent() {
        let mut scene = MemoryScene::with_glyph_templates(&AtlasConfig::default());
        let root = scene.spawn_root("TextBox");
        let child = scene.create_object("_TxtCharBlank").unwrap();
        scene.set_parent(child, root).unwrap();

        assert_eq!(scene.children_of(root), vec![child]);
        assert_eq!(scene.stats().objects_created, 1);
    }

    #[test]
    fn test_unknown_template() {
        let mut scene = MemoryScene::new();
        assert_eq!(
            scene.create_object("missing"),
            Err(HostError::UnknownTemplate("missing".to_string()))
        );
    }

    #[test]
    fn test_destroy_cascades_to_children() {
        let mut scene = MemoryScene::with_glyph_templates(&AtlasConfig::default());
        let root = scene.spawn_root("TextBox");
        for _ in 0..3 {
            let child = scene.create_object("_TxtCharBlank").unwrap();
            scene.set_parent(child, root).unwrap();
        }
        scene.destroy_object(root).unwrap();

        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.stats().objects_destroyed, 4);
        assert!(scene.destroy_object(root).is_err());
    }

    #[test]
    fn test_clone_mesh_rejects_duplicate_names() {
        let mut scene = MemoryScene::with_glyph_templates(&AtlasConfig::default());
        let base = scene.template_mesh("_TxtChar1").unwrap();
        scene.clone_mesh_with_new_name(base, "1-65").unwrap();
        assert_eq!(
            scene.clone_mesh_with_new_name(base, "1-65"),
            Err(HostError::MeshNameTaken("1-65".to_string()))
        );
    }

    #[test]
    fn test_blank_template_has_no_mesh() {
        let mut scene = MemoryScene::with_glyph_templates(&AtlasConfig::default());
        assert!(matches!(
            scene.template_mesh("_TxtCharBlank"),
            Err(HostError::TemplateWithoutMesh(_))
        ));
    }

    #[test]
    fn test_injected_uv_failure() {
        let mut scene = MemoryScene::with_glyph_templates(&AtlasConfig::default());
        let base = scene.template_mesh("_TxtChar1").unwrap();
        let copy = scene.clone_mesh_with_new_name(base, "broken").unwrap();
        scene.fail_uv_transform_for("broken");

        assert!(scene.transform_mesh_uv(copy, &uv::scale(0.5, 0.5)).is_err());
        assert!(scene.transform_mesh_uv(base, &uv::scale(0.5, 0.5)).is_ok());
    }

    #[test]
    fn test_free_mesh_releases_name() {
        let mut scene = MemoryScene::with_glyph_templates(&AtlasConfig::default());
        let base = scene.template_mesh("_TxtChar1").unwrap();
        let copy = scene.clone_mesh_with_new_name(base, "1-66").unwrap();
        scene.free_mesh(copy).unwrap();

        assert!(scene.mesh_by_name("1-66").is_none());
        assert!(scene.clone_mesh_with_new_name(base, "1-66").is_ok());
        assert_eq!(scene.free_mesh(copy), Err(HostError::UnknownMesh(copy)));
    }
}
