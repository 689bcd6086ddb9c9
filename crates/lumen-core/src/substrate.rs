//! Boundary to the external renderer.
//!
//! Demos never talk to a scene graph directly: they create meshes and
//! lights, push geometry, colours, transforms and uniforms, and ask for ray
//! hits through [`RenderSubstrate`]. Shading, post-processing and
//! presentation are the implementor's business.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::BloomSettings;
use crate::materials::{CrystalMaterial, MetalPreset};
use crate::ray::Ray;
use crate::shape::Shape;

/// Opaque mesh id issued by a substrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque light id issued by a substrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightHandle(pub u32);

/// Placement of a mesh: scale, then rotate, then translate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotation from XYZ Euler angles in radians.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        Self {
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    /// Local point to world space.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.position + self.rotation * (p * self.scale)
    }

    /// `parent` applied after `self`, as for a child in a group.
    pub fn then(&self, parent: &Transform) -> Self {
        Self {
            position: parent.apply(self.position),
            rotation: parent.rotation * self.rotation,
            scale: parent.scale * self.scale,
        }
    }
}

/// Value of a named material parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Color(Color),
}

/// What a mesh should look like.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialDesc {
    /// Transmissive faceted glass.
    Crystal(CrystalMaterial),
    /// Reflective metal preset.
    Metal(MetalPreset),
    /// Three-colour gradient driven by the `time` and `pulse` uniforms.
    NeonGradient { colors: [Color; 3] },
    /// Unlit, coloured per vertex through [`RenderSubstrate::update_colors`].
    VertexColors,
    /// Flat unlit colour.
    Basic { color: Color, opacity: f32 },
    /// Pickable but never drawn.
    Invisible,
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub position: Vec3,
}

/// Operations the demos need from a renderer.
pub trait RenderSubstrate {
    fn create_mesh(&mut self, shape: &Shape, material: MaterialDesc) -> MeshHandle;

    /// Release a mesh. The handle is invalid afterwards.
    fn dispose(&mut self, handle: MeshHandle);

    fn add_to_scene(&mut self, handle: MeshHandle);

    fn remove_from_scene(&mut self, handle: MeshHandle);

    /// Replace vertex positions and normals. Topology is unchanged.
    fn update_geometry(&mut self, handle: MeshHandle, shape: &Shape);

    fn update_colors(&mut self, handle: MeshHandle, colors: &[Color]);

    fn set_transform(&mut self, handle: MeshHandle, transform: Transform);

    fn set_uniform(&mut self, handle: MeshHandle, name: &str, value: UniformValue);

    fn create_light(&mut self, light: PointLight) -> LightHandle;

    fn set_light_position(&mut self, handle: LightHandle, position: Vec3);

    fn set_bloom(&mut self, bloom: BloomSettings);

    /// Nearest world-space hit of `ray` on the mesh, if any.
    fn intersect(&self, ray: &Ray, handle: MeshHandle) -> Option<Vec3>;

    /// Current placement of a mesh.
    fn transform(&self, handle: MeshHandle) -> Option<Transform>;
}
