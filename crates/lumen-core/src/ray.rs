//! Ray casting against shapes, used for pointer picking.

use glam::{Quat, Vec2, Vec3};

use crate::shape::Shape;
use crate::substrate::Transform;

/// Half-line `origin + t * dir`, `t >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    /// `None` when `dir` has no usable direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        crate::math::direction(dir).map(|dir| Self { origin, dir })
    }

    /// Ray through normalized device coordinates `ndc` (both axes in
    /// `[-1, 1]`, +Y up) of a perspective camera at `eye` looking at
    /// `target`, with vertical field of view `fov_y` in radians.
    pub fn from_camera(ndc: Vec2, eye: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Option<Self> {
        let forward = crate::math::direction(target - eye)?;
        let right = crate::math::direction(forward.cross(Vec3::Y)).unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let half_h = (fov_y * 0.5).tan();
        let half_w = half_h * aspect;
        let dir = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Self::new(eye, dir)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Ray expressed in the local frame of an object placed by `xf`.
    pub fn to_local(&self, xf: &Transform) -> Option<Self> {
        let inv_rot = xf.rotation.inverse();
        let scale = xf.scale;
        if scale.cmpeq(Vec3::ZERO).any() {
            return None;
        }
        let origin = inv_rot * (self.origin - xf.position) / scale;
        let dir = inv_rot * self.dir / scale;
        Self::new(origin, dir)
    }
}

/// Möller–Trumbore. Returns the ray parameter of the hit, front or back face.
pub fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t >= 0.0).then_some(t)
}

/// Nearest hit of `ray` (world space) on `shape` placed by `xf`, returned
/// in world space.
pub fn intersect_shape(ray: &Ray, shape: &Shape, xf: &Transform) -> Option<Vec3> {
    let local = ray.to_local(xf)?;
    let p = &shape.positions;
    let t = shape
        .triangles()
        .filter_map(|[a, b, c]| intersect_triangle(&local, p[a], p[b], p[c]))
        .min_by(f32::total_cmp)?;
    Some(xf.apply(local.at(t)))
}

/// World-space `point` mapped into the local frame of `xf`.
pub fn world_to_local(point: Vec3, xf: &Transform) -> Vec3 {
    if xf.scale.cmpeq(Vec3::ZERO).any() {
        return Vec3::ZERO;
    }
    Quat::inverse(xf.rotation) * (point - xf.position) / xf.scale
}
