use glam::Vec3;

use crate::error::Result;
use crate::math::{direction, trig_noise3};
use crate::shape::Shape;
use crate::shapes::polyhedron::icosahedron;

/// Lumpy blob: a detail-4 geodesic sphere pushed in and out along its radial
/// directions by two octaves of trigonometric noise.
pub fn abstract_blob(radius: f32) -> Result<Shape> {
    let mut shape = icosahedron(radius, 4)?;
    for p in &mut shape.positions {
        *p += blob_offset(*p);
    }
    shape.compute_normals();
    Ok(shape)
}

/// Radial displacement applied to one vertex of the blob.
pub fn blob_offset(p: Vec3) -> Vec3 {
    let noise = |q: Vec3| trig_noise3(q.x * 2.0, q.y * 2.0, q.z * 2.0);
    let octave1 = noise(p * 2.0) * 0.2;
    let octave2 = noise(p * 4.0 + Vec3::splat(100.0)) * 0.1;
    direction(p).map_or(Vec3::ZERO, |dir| dir * (octave1 + octave2))
}
