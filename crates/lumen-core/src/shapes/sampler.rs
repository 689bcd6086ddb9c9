//! Area-weighted surface sampling and vertex-count resampling.
//!
//! Morphing blends vertex `i` of one target toward vertex `i` of another, so
//! every target in a set must have the same vertex count. Shapes that do not
//! already match are replaced by a point set drawn uniformly over their
//! surface area. No semantic correspondence between targets is attempted.

use glam::Vec3;
use rand::Rng;

use crate::error::{LumenError, Result};
use crate::shape::{triangle_area, Shape};

/// Precomputed cumulative-area table over a shape's triangles.
pub struct SurfaceSampler<'a> {
    shape: &'a Shape,
    /// `cumulative[t]` = total area of triangles `0..=t`.
    cumulative: Vec<f32>,
}

impl<'a> SurfaceSampler<'a> {
    /// Build the distribution. Fails when the shape has no area to sample.
    pub fn new(shape: &'a Shape) -> Result<Self> {
        let mut cumulative = Vec::with_capacity(shape.triangle_count());
        let mut total = 0.0_f32;
        for [a, b, c] in shape.triangles() {
            total += triangle_area(shape.positions[a], shape.positions[b], shape.positions[c]);
            cumulative.push(total);
        }
        if !(total > 0.0 && total.is_finite()) {
            return Err(LumenError::invalid(
                "shape",
                format!("cannot sample a surface with total area {total}"),
            ));
        }
        Ok(Self { shape, cumulative })
    }

    pub fn total_area(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Index of the triangle owning the cumulative-area position `r`.
    fn pick_triangle(&self, r: f32) -> usize {
        let idx = self.cumulative.partition_point(|&c| c <= r);
        idx.min(self.cumulative.len() - 1)
    }

    /// Draw one point uniformly by area over the surface.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let r = rng.random::<f32>() * self.total_area();
        let [a, b, c] = self.shape.triangle(self.pick_triangle(r));

        let mut u = rng.random::<f32>();
        let mut v = rng.random::<f32>();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        let p = &self.shape.positions;
        p[a] * (1.0 - u - v) + p[b] * u + p[c] * v
    }
}

/// Return a shape with exactly `target` vertices approximating `shape`.
///
/// Identity (a clone) when the count already matches. Otherwise a
/// non-indexed point set sampled by area, with normals recomputed.
pub fn resample<R: Rng + ?Sized>(shape: &Shape, target: usize, rng: &mut R) -> Result<Shape> {
    if target == 0 {
        return Err(LumenError::invalid("target", "vertex count must be at least 1"));
    }
    if shape.vertex_count() == target {
        return Ok(shape.clone());
    }

    let sampler = SurfaceSampler::new(shape)?;
    let positions = (0..target).map(|_| sampler.sample(rng)).collect();
    log::debug!(
        "resampled {} vertices -> {} over area {:.3}",
        shape.vertex_count(),
        target,
        sampler.total_area()
    );
    Ok(Shape::soup(positions))
}
