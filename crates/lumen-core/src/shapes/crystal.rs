//! Faceted crystal: a tapered prism fused with a pyramid cap, bent by a
//! height-weighted distortion, plus loose shards scattered around it.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LumenError, Result};
use crate::shape::Shape;
use crate::shapes::primitives::{cone, cylinder};

/// Construction parameters for the main crystal body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrystalShape {
    pub radius: f32,
    pub height: f32,
    /// Radial segments; the number of visible facets.
    pub facets: u32,
    /// Height segments of the prism body.
    pub segments: u32,
    pub distortion: f32,
}

impl Default for CrystalShape {
    fn default() -> Self {
        Self {
            radius: 1.2,
            height: 4.0,
            facets: 8,
            segments: 32,
            distortion: 0.15,
        }
    }
}

/// Apply the crystal bend in place.
///
/// `x += sin(2z + x) * s * hf` and `z += cos(3x + y) * s * hf` with
/// `hf = y / height + 0.5`, so the displacement grows towards the tip.
pub fn distort(shape: &mut Shape, height: f32, strength: f32) {
    for p in &mut shape.positions {
        let (x, y, z) = (p.x, p.y, p.z);
        let height_factor = y / height + 0.5;
        p.x = x + (z * 2.0 + x).sin() * strength * height_factor;
        p.z = z + (x * 3.0 + y).cos() * strength * height_factor;
    }
    shape.compute_normals();
}

/// Build the main crystal body.
pub fn crystal(params: &CrystalShape) -> Result<Shape> {
    if !params.distortion.is_finite() {
        return Err(LumenError::invalid("distortion", "must be finite"));
    }
    let CrystalShape {
        radius,
        height,
        facets,
        segments,
        distortion,
    } = *params;
    if facets < 3 {
        return Err(LumenError::invalid("facets", format!("need at least 3, got {facets}")));
    }

    let mut body = cylinder(radius * 0.2, radius, height, facets, segments)?;
    let mut cap = cone(radius * 0.2, height * 0.5, facets, 1)?;
    cap.translate(Vec3::new(0.0, height * 0.75, 0.0));
    body.merge(&cap);

    distort(&mut body, height, distortion);
    Ok(body)
}

/// A loose shard placed around the main crystal.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Scatter `count` randomized shards on a ring around a crystal built with
/// `params`.
pub fn fragments<R: Rng + ?Sized>(
    params: &CrystalShape,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Fragment>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let size = rng.random::<f32>() * 0.5 + 0.3;
        let sides = rng.random_range(3..=5);
        let mut shape = cone(size * 0.2, size, sides, 1)?;
        for p in &mut shape.positions {
            p.x += (rng.random::<f32>() - 0.5) * 0.1;
            p.z += (rng.random::<f32>() - 0.5) * 0.1;
        }
        shape.compute_normals();

        let theta = rng.random::<f32>() * TAU;
        let ring = params.radius * 1.2;
        let y = (rng.random::<f32>() - 0.5) * params.height;
        let position = Vec3::new(theta.cos() * ring, y, theta.sin() * ring);

        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
        );

        out.push(Fragment {
            shape,
            position,
            rotation,
        });
    }
    Ok(out)
}
