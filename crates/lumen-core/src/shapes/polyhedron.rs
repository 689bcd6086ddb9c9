//! Subdivided icosahedron.

use glam::Vec3;

use crate::error::{LumenError, Result};
use crate::shape::Shape;

const GOLDEN: f32 = 1.618_034;

const ICOSA_VERTICES: [Vec3; 12] = [
    Vec3::new(-1.0, GOLDEN, 0.0),
    Vec3::new(1.0, GOLDEN, 0.0),
    Vec3::new(-1.0, -GOLDEN, 0.0),
    Vec3::new(1.0, -GOLDEN, 0.0),
    Vec3::new(0.0, -1.0, GOLDEN),
    Vec3::new(0.0, 1.0, GOLDEN),
    Vec3::new(0.0, -1.0, -GOLDEN),
    Vec3::new(0.0, 1.0, -GOLDEN),
    Vec3::new(GOLDEN, 0.0, -1.0),
    Vec3::new(GOLDEN, 0.0, 1.0),
    Vec3::new(-GOLDEN, 0.0, -1.0),
    Vec3::new(-GOLDEN, 0.0, 1.0),
];

const ICOSA_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Split triangle `(a, b, c)` into `(detail + 1)^2` triangles, appending
/// their corners to `out`.
fn subdivide_face(out: &mut Vec<Vec3>, a: Vec3, b: Vec3, c: Vec3, detail: usize) {
    let cols = detail + 1;
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);

    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;
        let mut line = Vec::with_capacity(rows + 1);
        for j in 0..=rows {
            if j == 0 && i == cols {
                line.push(aj);
            } else {
                line.push(aj.lerp(bj, j as f32 / rows as f32));
            }
        }
        grid.push(line);
    }

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

/// Geodesic sphere: an icosahedron whose faces are subdivided `detail` times
/// and projected onto a sphere of `radius`.
///
/// The result is non-indexed with `60 * (detail + 1)^2` vertices. Normals are
/// the radial directions, which is what a smooth geodesic sphere wants before
/// any displacement.
pub fn icosahedron(radius: f32, detail: u32) -> Result<Shape> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(LumenError::invalid("radius", format!("must be positive, got {radius}")));
    }
    if detail > 64 {
        return Err(LumenError::invalid("detail", format!("{detail} is unreasonably large")));
    }

    let detail = detail as usize;
    let mut positions = Vec::with_capacity(60 * (detail + 1) * (detail + 1));
    for [a, b, c] in ICOSA_FACES {
        subdivide_face(
            &mut positions,
            ICOSA_VERTICES[a],
            ICOSA_VERTICES[b],
            ICOSA_VERTICES[c],
            detail,
        );
    }
    for p in &mut positions {
        *p = p.normalize() * radius;
    }

    let normals = positions.iter().map(|p| p.normalize()).collect();
    Ok(Shape {
        positions,
        normals,
        indices: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        assert_eq!(icosahedron(1.0, 0).unwrap().vertex_count(), 60);
        assert_eq!(icosahedron(1.0, 4).unwrap().vertex_count(), 1500);
    }

    #[test]
    fn test_icosahedron_on_sphere() {
        let s = icosahedron(1.5, 3).unwrap();
        for p in &s.positions {
            assert!((p.length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_icosahedron_faces_outward() {
        let mut s = icosahedron(1.0, 2).unwrap();
        s.compute_normals();
        for (p, n) in s.positions.iter().zip(&s.normals) {
            assert!(p.dot(*n) > 0.0, "face normal {n:?} points inward at {p:?}");
        }
    }
}
