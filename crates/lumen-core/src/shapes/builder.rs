//! Shape dispatcher: builds any supported surface from a [`ShapeSpec`], or a
//! named morph-target kind from a single resolution value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, Result};
use crate::shape::Shape;
use crate::shapes::crystal::{crystal, CrystalShape};
use crate::shapes::organic::abstract_blob;
use crate::shapes::polyhedron::icosahedron;
use crate::shapes::primitives::{cone, cuboid, cylinder, plane, sphere, torus};

/// Named shape identifiers used by morph target sets and the shape picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Sphere,
    Torus,
    Cube,
    Cone,
    Abstract,
    Crystal,
}

impl ShapeKind {
    /// Kinds that make up the liquid-metal morph set, in rotation order.
    pub const MORPH_SET: [ShapeKind; 5] = [
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Cube,
        ShapeKind::Cone,
        ShapeKind::Abstract,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::Cube => "cube",
            Self::Cone => "cone",
            Self::Abstract => "abstract",
            Self::Crystal => "crystal",
        }
    }

    /// Full construction parameters for this kind at tessellation level
    /// `resolution`.
    pub fn spec(self, resolution: u32) -> ShapeSpec {
        match self {
            Self::Sphere => ShapeSpec::Sphere {
                radius: 1.0,
                width_segments: resolution,
                height_segments: resolution,
            },
            Self::Torus => ShapeSpec::Torus {
                radius: 0.7,
                tube: 0.3,
                radial_segments: resolution / 2,
                tubular_segments: resolution,
            },
            Self::Cube => ShapeSpec::Cuboid {
                width: 1.5,
                height: 1.5,
                depth: 1.5,
                segments: resolution / 8,
            },
            Self::Cone => ShapeSpec::Cone {
                radius: 1.0,
                height: 2.0,
                radial_segments: resolution / 2,
                height_segments: resolution / 4,
            },
            Self::Abstract => ShapeSpec::Abstract { radius: 1.0 },
            Self::Crystal => ShapeSpec::Crystal(CrystalShape::default()),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = LumenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sphere" => Ok(Self::Sphere),
            "torus" => Ok(Self::Torus),
            "cube" => Ok(Self::Cube),
            "cone" => Ok(Self::Cone),
            "abstract" => Ok(Self::Abstract),
            "crystal" => Ok(Self::Crystal),
            other => Err(LumenError::invalid("shape", format!("unknown shape `{other}`"))),
        }
    }
}

/// Every buildable surface with its full parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeSpec {
    #[serde(rename_all = "camelCase")]
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    #[serde(rename_all = "camelCase")]
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
        segments: u32,
    },
    #[serde(rename_all = "camelCase")]
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    },
    #[serde(rename_all = "camelCase")]
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    },
    #[serde(rename_all = "camelCase")]
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Icosahedron {
        radius: f32,
        detail: u32,
    },
    Abstract {
        radius: f32,
    },
    Crystal(CrystalShape),
}

impl ShapeSpec {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
            Self::Cuboid { .. } => "cuboid",
            Self::Cylinder { .. } => "cylinder",
            Self::Cone { .. } => "cone",
            Self::Plane { .. } => "plane",
            Self::Icosahedron { .. } => "icosahedron",
            Self::Abstract { .. } => "abstract",
            Self::Crystal(_) => "crystal",
        }
    }
}

/// Build a shape from explicit parameters.
pub fn build_shape(spec: &ShapeSpec) -> Result<Shape> {
    let shape = match *spec {
        ShapeSpec::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere(radius, width_segments, height_segments)?,
        ShapeSpec::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => torus(radius, tube, radial_segments, tubular_segments)?,
        ShapeSpec::Cuboid {
            width,
            height,
            depth,
            segments,
        } => cuboid(width, height, depth, segments)?,
        ShapeSpec::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments,
        } => cylinder(radius_top, radius_bottom, height, radial_segments, height_segments)?,
        ShapeSpec::Cone {
            radius,
            height,
            radial_segments,
            height_segments,
        } => cone(radius, height, radial_segments, height_segments)?,
        ShapeSpec::Plane {
            width,
            height,
            width_segments,
            height_segments,
        } => plane(width, height, width_segments, height_segments)?,
        ShapeSpec::Icosahedron { radius, detail } => icosahedron(radius, detail)?,
        ShapeSpec::Abstract { radius } => abstract_blob(radius)?,
        ShapeSpec::Crystal(ref params) => crystal(params)?,
    };
    log::debug!(
        "built {} shape: {} vertices, {} triangles",
        spec.label(),
        shape.vertex_count(),
        shape.triangle_count()
    );
    Ok(shape)
}

/// Build a named kind at `resolution`. A zero resolution, or one too coarse
/// to give every derived segment count at least one segment, is rejected.
pub fn build_kind(kind: ShapeKind, resolution: u32) -> Result<Shape> {
    if resolution == 0 {
        return Err(LumenError::invalid("resolution", "must be at least 1"));
    }
    build_shape(&kind.spec(resolution))
}
