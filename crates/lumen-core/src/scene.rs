//! In-memory [`RenderSubstrate`] that records everything it is told.
//!
//! Used as the test double for every demo and as the backing store of the
//! wasm staging substrate, which copies dirty meshes out to JavaScript.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::color::Color;
use crate::config::BloomSettings;
use crate::ray::{intersect_shape, Ray};
use crate::shape::Shape;
use crate::substrate::{
    LightHandle, MaterialDesc, MeshHandle, PointLight, RenderSubstrate, Transform, UniformValue,
};

/// Everything known about one mesh.
#[derive(Clone, Debug)]
pub struct MeshRecord {
    pub shape: Shape,
    pub colors: Vec<Color>,
    pub material: MaterialDesc,
    pub transform: Transform,
    pub uniforms: BTreeMap<String, UniformValue>,
    pub in_scene: bool,
    /// Positions or normals changed since the last [`SceneRecorder::clear_dirty`].
    pub geometry_dirty: bool,
    pub colors_dirty: bool,
}

#[derive(Debug, Default)]
pub struct SceneRecorder {
    meshes: BTreeMap<MeshHandle, MeshRecord>,
    lights: Vec<PointLight>,
    bloom: Option<BloomSettings>,
    next_id: u32,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshRecord> {
        self.meshes.get(&handle)
    }

    /// Live meshes in creation order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshHandle, &MeshRecord)> {
        self.meshes.iter().map(|(h, m)| (*h, m))
    }

    /// Meshes currently added to the scene.
    pub fn visible(&self) -> impl Iterator<Item = (MeshHandle, &MeshRecord)> {
        self.meshes().filter(|(_, m)| m.in_scene)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn light(&self, handle: LightHandle) -> Option<&PointLight> {
        self.lights.get(handle.0 as usize)
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn bloom(&self) -> Option<BloomSettings> {
        self.bloom
    }

    pub fn uniform(&self, handle: MeshHandle, name: &str) -> Option<UniformValue> {
        self.mesh(handle)?.uniforms.get(name).copied()
    }

    pub fn clear_dirty(&mut self, handle: MeshHandle) {
        if let Some(m) = self.meshes.get_mut(&handle) {
            m.geometry_dirty = false;
            m.colors_dirty = false;
        }
    }

    fn with_mesh(&mut self, handle: MeshHandle, f: impl FnOnce(&mut MeshRecord)) {
        match self.meshes.get_mut(&handle) {
            Some(m) => f(m),
            None => log::warn!("ignoring update for unknown mesh {:?}", handle),
        }
    }
}

impl RenderSubstrate for SceneRecorder {
    fn create_mesh(&mut self, shape: &Shape, material: MaterialDesc) -> MeshHandle {
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        self.meshes.insert(
            handle,
            MeshRecord {
                shape: shape.clone(),
                colors: Vec::new(),
                material,
                transform: Transform::IDENTITY,
                uniforms: BTreeMap::new(),
                in_scene: false,
                geometry_dirty: true,
                colors_dirty: false,
            },
        );
        handle
    }

    fn dispose(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_none() {
            log::warn!("dispose of unknown mesh {:?}", handle);
        }
    }

    fn add_to_scene(&mut self, handle: MeshHandle) {
        self.with_mesh(handle, |m| m.in_scene = true);
    }

    fn remove_from_scene(&mut self, handle: MeshHandle) {
        self.with_mesh(handle, |m| m.in_scene = false);
    }

    fn update_geometry(&mut self, handle: MeshHandle, shape: &Shape) {
        self.with_mesh(handle, |m| {
            m.shape.positions.clone_from(&shape.positions);
            m.shape.normals.clone_from(&shape.normals);
            m.geometry_dirty = true;
        });
    }

    fn update_colors(&mut self, handle: MeshHandle, colors: &[Color]) {
        self.with_mesh(handle, |m| {
            m.colors.clear();
            m.colors.extend_from_slice(colors);
            m.colors_dirty = true;
        });
    }

    fn set_transform(&mut self, handle: MeshHandle, transform: Transform) {
        self.with_mesh(handle, |m| m.transform = transform);
    }

    fn set_uniform(&mut self, handle: MeshHandle, name: &str, value: UniformValue) {
        self.with_mesh(handle, |m| {
            m.uniforms.insert(name.to_owned(), value);
        });
    }

    fn create_light(&mut self, light: PointLight) -> LightHandle {
        self.lights.push(light);
        LightHandle((self.lights.len() - 1) as u32)
    }

    fn set_light_position(&mut self, handle: LightHandle, position: Vec3) {
        if let Some(light) = self.lights.get_mut(handle.0 as usize) {
            light.position = position;
        }
    }

    fn set_bloom(&mut self, bloom: BloomSettings) {
        self.bloom = Some(bloom);
    }

    fn intersect(&self, ray: &Ray, handle: MeshHandle) -> Option<Vec3> {
        let m = self.meshes.get(&handle)?;
        intersect_shape(ray, &m.shape, &m.transform)
    }

    fn transform(&self, handle: MeshHandle) -> Option<Transform> {
        self.meshes.get(&handle).map(|m| m.transform)
    }
}
