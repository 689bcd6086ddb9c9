use glam::{Vec3, Vec4};

/// Fractional part, GLSL `fract` (always in `[0, 1)`).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL-style `mix(a, b, t)` for scalars.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Smooth interpolation - port of GLSL smoothstep
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Cheap trigonometric lattice noise: `sin(x) * cos(y) * sin(z)`, in `[-1, 1]`.
///
/// Used where the demos want a smooth wobble rather than true gradient noise.
#[inline]
pub fn trig_noise3(x: f32, y: f32, z: f32) -> f32 {
    x.sin() * y.cos() * z.sin()
}

#[inline]
fn mod289(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + 1.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

#[inline]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// 3D simplex noise (Ashima Arts / Gustavson layout), roughly in `[-1, 1]`.
///
/// Bit-for-bit the same lattice and gradient selection as the common GLSL
/// `snoise(vec3)`, so CPU-displaced vertices match what a shader would do.
pub fn simplex3(v: Vec3) -> f32 {
    const C_X: f32 = 1.0 / 6.0;
    const C_Y: f32 = 1.0 / 3.0;

    // First corner
    let mut i = (v + Vec3::splat(v.dot(Vec3::splat(C_Y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C_X)));

    // Other corners
    let g = Vec3::new(step(x0.y, x0.x), step(x0.z, x0.y), step(x0.x, x0.z));
    let l = Vec3::ONE - g;
    let i1 = Vec3::new(g.x.min(l.z), g.y.min(l.x), g.z.min(l.y));
    let i2 = Vec3::new(g.x.max(l.z), g.y.max(l.x), g.z.max(l.y));

    let x1 = x0 - i1 + Vec3::splat(C_X);
    let x2 = x0 - i2 + Vec3::splat(C_Y);
    let x3 = x0 - Vec3::splat(0.5);

    // Permutations
    i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let n_ = 1.0 / 7.0;
    let ns = Vec3::new(2.0 * n_, 0.5 * n_ - 1.0, n_);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let corner = |k: usize| -> Vec3 {
        let sh = -step(h[k], 0.0);
        let gx = x[k] + (x[k].floor() * 2.0 + 1.0) * sh;
        let gy = y[k] + (y[k].floor() * 2.0 + 1.0) * sh;
        Vec3::new(gx, gy, h[k])
    };
    let mut p0 = corner(0);
    let mut p1 = corner(1);
    let mut p2 = corner(2);
    let mut p3 = corner(3);

    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    // Mix final noise value
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

/// Normalize `v`, or return `None` when it is too short to have a direction.
#[inline]
pub fn direction(v: Vec3) -> Option<Vec3> {
    let len = v.length();
    if len > 1e-6 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}
