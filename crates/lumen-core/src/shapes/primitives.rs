//! Primitive parametric surface generators.
//!
//! Vertex order, seams and triangle winding follow the conventional
//! scene-graph layouts (sphere rings from the +Y pole down, torus tube rings,
//! six box planes, cylinder torso then caps), so vertex counts line up with
//! what a renderer fed the same parameters would produce.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::error::{LumenError, Result};
use crate::shape::Shape;

fn check_dim(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(LumenError::invalid(name, format!("must be a positive finite number, got {v}")))
    }
}

fn check_segments(name: &'static str, v: u32) -> Result<()> {
    if v == 0 {
        Err(LumenError::invalid(name, "segment count must be at least 1"))
    } else {
        Ok(())
    }
}

/// UV sphere centred at the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Result<Shape> {
    check_dim("radius", radius)?;
    check_segments("width_segments", width_segments)?;
    check_segments("height_segments", height_segments)?;
    if width_segments < 3 || height_segments < 2 {
        return Err(LumenError::invalid(
            "resolution",
            format!("sphere needs at least 3x2 segments, got {width_segments}x{height_segments}"),
        ));
    }

    let w = width_segments as usize;
    let h = height_segments as usize;
    let mut positions = Vec::with_capacity((w + 1) * (h + 1));
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            positions.push(Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }

    let row = w + 1;
    let mut indices = Vec::with_capacity(w * h * 6);
    for iy in 0..h {
        for ix in 0..w {
            let a = (iy * row + ix + 1) as u32;
            let b = (iy * row + ix) as u32;
            let c = ((iy + 1) * row + ix) as u32;
            let d = ((iy + 1) * row + ix + 1) as u32;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Ok(Shape::indexed(positions, indices))
}

/// Torus in the XY plane with major radius `radius` and tube radius `tube`.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Result<Shape> {
    check_dim("radius", radius)?;
    check_dim("tube", tube)?;
    check_segments("radial_segments", radial_segments)?;
    check_segments("tubular_segments", tubular_segments)?;

    let radial = radial_segments as usize;
    let tubular = tubular_segments as usize;
    let mut positions = Vec::with_capacity((radial + 1) * (tubular + 1));
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            positions.push(Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
        }
    }

    let row = tubular + 1;
    let mut indices = Vec::with_capacity(radial * tubular * 6);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = (row * j + i - 1) as u32;
            let b = (row * (j - 1) + i - 1) as u32;
            let c = (row * (j - 1) + i) as u32;
            let d = (row * j + i) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Ok(Shape::indexed(positions, indices))
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

fn set_axis(v: &mut Vec3, axis: Axis, value: f32) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
}

/// One face of a box: a `grid_x` by `grid_y` grid spanning `width` by
/// `height` on axes `(u, v)`, offset by `depth / 2` along `w`.
#[allow(clippy::too_many_arguments)]
fn box_plane(
    out: &mut Vec<Vec3>,
    indices: &mut Vec<u32>,
    (u, v, w): (Axis, Axis, Axis),
    udir: f32,
    vdir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: usize,
    grid_y: usize,
) {
    let seg_w = width / grid_x as f32;
    let seg_h = height / grid_y as f32;
    let base = out.len();
    let row = grid_x + 1;

    for iy in 0..=grid_y {
        let y = iy as f32 * seg_h - height / 2.0;
        for ix in 0..=grid_x {
            let x = ix as f32 * seg_w - width / 2.0;
            let mut p = Vec3::ZERO;
            set_axis(&mut p, u, x * udir);
            set_axis(&mut p, v, y * vdir);
            set_axis(&mut p, w, depth / 2.0);
            out.push(p);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = (base + ix + row * iy) as u32;
            let b = (base + ix + row * (iy + 1)) as u32;
            let c = (base + ix + 1 + row * (iy + 1)) as u32;
            let d = (base + ix + 1 + row * iy) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

/// Axis-aligned box centred at the origin with `segments` subdivisions per
/// axis on every face.
pub fn cuboid(width: f32, height: f32, depth: f32, segments: u32) -> Result<Shape> {
    check_dim("width", width)?;
    check_dim("height", height)?;
    check_dim("depth", depth)?;
    check_segments("segments", segments)?;

    let s = segments as usize;
    let mut positions = Vec::with_capacity(6 * (s + 1) * (s + 1));
    let mut indices = Vec::with_capacity(6 * s * s * 6);
    let (x, y, z) = (Axis::X, Axis::Y, Axis::Z);

    box_plane(&mut positions, &mut indices, (z, y, x), -1.0, -1.0, depth, height, width, s, s);
    box_plane(&mut positions, &mut indices, (z, y, x), 1.0, -1.0, depth, height, -width, s, s);
    box_plane(&mut positions, &mut indices, (x, z, y), 1.0, 1.0, width, depth, height, s, s);
    box_plane(&mut positions, &mut indices, (x, z, y), 1.0, -1.0, width, depth, -height, s, s);
    box_plane(&mut positions, &mut indices, (x, y, z), 1.0, -1.0, width, height, depth, s, s);
    box_plane(&mut positions, &mut indices, (x, y, z), -1.0, -1.0, width, height, -depth, s, s);

    Ok(Shape::indexed(positions, indices))
}

/// Open or capped frustum along Y, centred at the origin.
///
/// A cap is generated for each end whose radius is positive.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> Result<Shape> {
    if !(radius_top.is_finite() && radius_top >= 0.0) {
        return Err(LumenError::invalid("radius_top", format!("must be >= 0, got {radius_top}")));
    }
    check_dim("radius_bottom", radius_bottom)?;
    check_dim("height", height)?;
    check_segments("radial_segments", radial_segments)?;
    check_segments("height_segments", height_segments)?;

    let radial = radial_segments as usize;
    let rows = height_segments as usize;
    let half = height / 2.0;
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    // Torso
    let row = radial + 1;
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let r = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            positions.push(Vec3::new(r * theta.sin(), -v * height + half, r * theta.cos()));
        }
    }
    for x in 0..radial {
        for y in 0..rows {
            let a = (y * row + x) as u32;
            let b = ((y + 1) * row + x) as u32;
            let c = ((y + 1) * row + x + 1) as u32;
            let d = (y * row + x + 1) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    // Caps: one centre vertex per segment, then the rim.
    for (top, r) in [(true, radius_top), (false, radius_bottom)] {
        if r <= 0.0 {
            continue;
        }
        let sign = if top { 1.0 } else { -1.0 };
        let center_start = positions.len();
        for _ in 0..radial {
            positions.push(Vec3::new(0.0, half * sign, 0.0));
        }
        let rim_start = positions.len();
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            positions.push(Vec3::new(r * theta.sin(), half * sign, r * theta.cos()));
        }
        for x in 0..radial {
            let c = (center_start + x) as u32;
            let i = (rim_start + x) as u32;
            if top {
                indices.extend_from_slice(&[i, i + 1, c]);
            } else {
                indices.extend_from_slice(&[i + 1, i, c]);
            }
        }
    }

    Ok(Shape::indexed(positions, indices))
}

/// Cone along Y with its apex at `+height / 2`.
pub fn cone(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> Result<Shape> {
    cylinder(0.0, radius, height, radial_segments, height_segments)
}

/// Flat grid in the XY plane, centred at the origin, facing +Z.
pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Result<Shape> {
    check_dim("width", width)?;
    check_dim("height", height)?;
    check_segments("width_segments", width_segments)?;
    check_segments("height_segments", height_segments)?;

    let gx = width_segments as usize;
    let gy = height_segments as usize;
    let seg_w = width / gx as f32;
    let seg_h = height / gy as f32;
    let row = gx + 1;

    let mut positions = Vec::with_capacity((gx + 1) * (gy + 1));
    for iy in 0..=gy {
        let y = iy as f32 * seg_h - height / 2.0;
        for ix in 0..=gx {
            let x = ix as f32 * seg_w - width / 2.0;
            positions.push(Vec3::new(x, -y, 0.0));
        }
    }

    let mut indices = Vec::with_capacity(gx * gy * 6);
    for iy in 0..gy {
        for ix in 0..gx {
            let a = (ix + row * iy) as u32;
            let b = (ix + row * (iy + 1)) as u32;
            let c = (ix + 1 + row * (iy + 1)) as u32;
            let d = (ix + 1 + row * iy) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Ok(Shape::indexed(positions, indices))
}
