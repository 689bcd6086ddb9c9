use glam::Vec3;

use crate::math::direction;

/// Renderable surface: ordered vertex positions plus per-vertex normals.
///
/// `indices` lists triangles as index triples. When it is empty the shape is
/// non-indexed and every consecutive triple of positions is one triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Shape {
    /// Build an indexed shape and compute its normals.
    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut shape = Self {
            normals: vec![Vec3::ZERO; positions.len()],
            positions,
            indices,
        };
        shape.compute_normals();
        shape
    }

    /// Build a non-indexed shape (triangle soup or point cloud) and compute
    /// its normals.
    pub fn soup(positions: Vec<Vec3>) -> Self {
        Self::indexed(positions, Vec::new())
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len() / 3
        } else {
            self.positions.len() / 3
        }
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        if self.is_indexed() {
            [
                self.indices[t * 3] as usize,
                self.indices[t * 3 + 1] as usize,
                self.indices[t * 3 + 2] as usize,
            ]
        } else {
            [t * 3, t * 3 + 1, t * 3 + 2]
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle(t))
    }

    /// Recompute normals from the current positions.
    ///
    /// Indexed shapes get smooth, area-weighted vertex normals. Non-indexed
    /// shapes get flat face normals. Vertices not covered by any triangle
    /// (the tail of a point cloud) fall back to their radial direction.
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vec3::ZERO);

        let mut covered = vec![false; n];
        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a >= n || b >= n || c >= n {
                continue;
            }
            let pa = self.positions[a];
            // Unnormalized cross product: magnitude is twice the area.
            let face = (self.positions[c] - self.positions[b]).cross(pa - self.positions[b]);
            if self.is_indexed() {
                self.normals[a] += face;
                self.normals[b] += face;
                self.normals[c] += face;
            } else {
                self.normals[a] = face;
                self.normals[b] = face;
                self.normals[c] = face;
            }
            covered[a] = true;
            covered[b] = true;
            covered[c] = true;
        }

        for i in 0..n {
            let fallback = if covered[i] { self.normals[i] } else { self.positions[i] };
            self.normals[i] = direction(fallback).unwrap_or(Vec3::ZERO);
        }
    }

    /// Translate every vertex. Normals are unaffected.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Append `other`, offsetting its indices. Both shapes must use the same
    /// indexing mode; a non-indexed shape merged into an indexed one is given
    /// sequential indices.
    pub fn merge(&mut self, other: &Shape) {
        let base = self.positions.len() as u32;
        if self.is_indexed() || other.is_indexed() {
            if !self.is_indexed() {
                self.indices = (0..base).collect();
            }
            if other.is_indexed() {
                self.indices.extend(other.indices.iter().map(|i| i + base));
            } else {
                self.indices
                    .extend((0..other.positions.len() as u32).map(|i| i + base));
            }
        }
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
    }

    /// Total surface area of all triangles.
    pub fn surface_area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| triangle_area(self.positions[a], self.positions[b], self.positions[c]))
            .sum()
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat `[x, y, z, ...]` slice.
    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }
}

#[inline]
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).length() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Shape {
        Shape::indexed(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_indexed_normals_face_plus_z() {
        let q = quad();
        for n in &q.normals {
            assert!((*n - Vec3::Z).length() < 1e-6, "expected +Z normal, got {n:?}");
        }
        assert!((q.surface_area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_cloud_tail_uses_radial_normal() {
        let s = Shape::soup(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ]);
        assert_eq!(s.triangle_count(), 1);
        assert_eq!(s.normals[3], Vec3::Z);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = quad();
        let b = quad();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.indices.len(), 12);
        assert_eq!(&a.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_position_floats_layout() {
        let q = quad();
        let f = q.position_floats();
        assert_eq!(f.len(), 12);
        assert_eq!(&f[3..6], &[1.0, 0.0, 0.0]);
    }
}
