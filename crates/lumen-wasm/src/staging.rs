//! Substrate that stages scene state for the JavaScript renderer.
//!
//! All bookkeeping is delegated to [`SceneRecorder`]; this layer only packs
//! mesh data into flat GPU-ready buffers that JS reads straight out of wasm
//! memory.

use glam::{Mat4, Vec3};
use lumen_core::color::Color;
use lumen_core::config::BloomSettings;
use lumen_core::ray::Ray;
use lumen_core::scene::{MeshRecord, SceneRecorder};
use lumen_core::shape::Shape;
use lumen_core::substrate::{
    LightHandle, MaterialDesc, MeshHandle, PointLight, RenderSubstrate, Transform, UniformValue,
};
use serde_json::{json, Value};

/// Interleaved vertex: 40 bytes, matches the JS vertex layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3], // 12 bytes
    pub normal: [f32; 3],   // 12 bytes
    pub color: [f32; 4],    // 16 bytes
}

#[derive(Default)]
pub struct StagingSubstrate {
    scene: SceneRecorder,
    vertices: Vec<GpuVertex>,
    indices: Vec<u32>,
}

impl StagingSubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &SceneRecorder {
        &self.scene
    }

    /// Ids of meshes currently in the scene.
    pub fn visible_ids(&self) -> Vec<u32> {
        self.scene.visible().map(|(h, _)| h.0).collect()
    }

    /// Pack the mesh into the shared vertex and index buffers and clear its
    /// dirty flags. Returns the vertex count, or 0 for an unknown id.
    pub fn stage(&mut self, id: u32) -> usize {
        let handle = MeshHandle(id);
        let Some(mesh) = self.scene.mesh(handle) else {
            self.vertices.clear();
            self.indices.clear();
            return 0;
        };
        pack_vertices(mesh, &mut self.vertices);
        self.indices.clear();
        self.indices.extend_from_slice(&mesh.shape.indices);
        self.scene.clear_dirty(handle);
        self.vertices.len()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_dirty(&self, id: u32) -> bool {
        self.scene
            .mesh(MeshHandle(id))
            .is_some_and(|m| m.geometry_dirty || m.colors_dirty)
    }

    /// Column-major model matrix, identity for unknown ids.
    pub fn model_matrix(&self, id: u32) -> [f32; 16] {
        let t = self.scene.transform(MeshHandle(id)).unwrap_or_default();
        Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position).to_cols_array()
    }

    /// Material description and current uniforms, as JSON.
    pub fn material_json(&self, id: u32) -> Value {
        let Some(mesh) = self.scene.mesh(MeshHandle(id)) else {
            return Value::Null;
        };
        let uniforms: serde_json::Map<String, Value> = mesh
            .uniforms
            .iter()
            .map(|(k, v)| (k.clone(), uniform_json(v)))
            .collect();
        json!({
            "material": material_json(&mesh.material),
            "uniforms": uniforms,
        })
    }

    /// Light positions as `[x, y, z, ...]`.
    pub fn light_positions(&self) -> Vec<f32> {
        self.scene
            .lights()
            .iter()
            .flat_map(|l| l.position.to_array())
            .collect()
    }

    pub fn lights_json(&self) -> Value {
        Value::Array(
            self.scene
                .lights()
                .iter()
                .map(|l| {
                    json!({
                        "color": l.color.to_array(),
                        "intensity": l.intensity,
                        "distance": l.distance,
                        "position": l.position.to_array(),
                    })
                })
                .collect(),
        )
    }

    pub fn bloom_json(&self) -> Value {
        match self.scene.bloom() {
            Some(b) => json!({ "strength": b.strength, "radius": b.radius, "threshold": b.threshold }),
            None => Value::Null,
        }
    }
}

fn pack_vertices(mesh: &MeshRecord, out: &mut Vec<GpuVertex>) {
    let base = match mesh.material {
        MaterialDesc::Basic { color, opacity } => [color.r, color.g, color.b, opacity],
        _ => [1.0; 4],
    };
    out.clear();
    out.extend(mesh.shape.positions.iter().enumerate().map(|(i, p)| {
        let n = mesh.shape.normals.get(i).copied().unwrap_or(Vec3::ZERO);
        let color = mesh
            .colors
            .get(i)
            .map_or(base, |c| [c.r, c.g, c.b, 1.0]);
        GpuVertex {
            position: p.to_array(),
            normal: n.to_array(),
            color,
        }
    }));
}

fn color_json(c: Color) -> Value {
    json!(c.to_array())
}

fn uniform_json(v: &UniformValue) -> Value {
    match *v {
        UniformValue::Float(f) => json!(f),
        UniformValue::Vec3(v) => json!(v.to_array()),
        UniformValue::Color(c) => color_json(c),
    }
}

fn material_json(m: &MaterialDesc) -> Value {
    match m {
        MaterialDesc::Crystal(c) => json!({
            "kind": "crystal",
            "color": color_json(c.color),
            "metalness": c.metalness,
            "roughness": c.roughness,
            "transmission": c.transmission,
            "ior": c.ior,
            "thickness": c.thickness,
        }),
        MaterialDesc::Metal(p) => json!({
            "kind": "metal",
            "color": color_json(p.color),
            "emissive": color_json(p.emissive),
            "roughness": p.roughness,
            "metalness": p.metalness,
        }),
        MaterialDesc::NeonGradient { colors } => json!({
            "kind": "neonGradient",
            "colors": colors.iter().map(|c| c.to_array()).collect::<Vec<_>>(),
        }),
        MaterialDesc::VertexColors => json!({ "kind": "vertexColors" }),
        MaterialDesc::Basic { color, opacity } => json!({
            "kind": "basic",
            "color": color_json(*color),
            "opacity": opacity,
        }),
        MaterialDesc::Invisible => json!({ "kind": "invisible" }),
    }
}

impl RenderSubstrate for StagingSubstrate {
    fn create_mesh(&mut self, shape: &Shape, material: MaterialDesc) -> MeshHandle {
        self.scene.create_mesh(shape, material)
    }

    fn dispose(&mut self, handle: MeshHandle) {
        self.scene.dispose(handle)
    }

    fn add_to_scene(&mut self, handle: MeshHandle) {
        self.scene.add_to_scene(handle)
    }

    fn remove_from_scene(&mut self, handle: MeshHandle) {
        self.scene.remove_from_scene(handle)
    }

    fn update_geometry(&mut self, handle: MeshHandle, shape: &Shape) {
        self.scene.update_geometry(handle, shape)
    }

    fn update_colors(&mut self, handle: MeshHandle, colors: &[Color]) {
        self.scene.update_colors(handle, colors)
    }

    fn set_transform(&mut self, handle: MeshHandle, transform: Transform) {
        self.scene.set_transform(handle, transform)
    }

    fn set_uniform(&mut self, handle: MeshHandle, name: &str, value: UniformValue) {
        self.scene.set_uniform(handle, name, value)
    }

    fn create_light(&mut self, light: PointLight) -> LightHandle {
        self.scene.create_light(light)
    }

    fn set_light_position(&mut self, handle: LightHandle, position: Vec3) {
        self.scene.set_light_position(handle, position)
    }

    fn set_bloom(&mut self, bloom: BloomSettings) {
        self.scene.set_bloom(bloom)
    }

    fn intersect(&self, ray: &Ray, handle: MeshHandle) -> Option<Vec3> {
        self.scene.intersect(ray, handle)
    }

    fn transform(&self, handle: MeshHandle) -> Option<Transform> {
        self.scene.transform(handle)
    }
}
