//! Per-vertex noise displacement used by the frame updaters.
//!
//! All functions here are pure: they take a position (and time) and return
//! an offset. A vertex sitting at the origin has no outward direction and
//! gets a zero offset.

use glam::Vec3;

use crate::color::Color;
use crate::math::{direction, simplex3};

/// Two-octave liquid turbulence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Turbulence {
    /// Displacement amplitude; 0 disables the effect entirely.
    pub amplitude: f32,
    /// Spatial frequency of the first octave.
    pub scale: f32,
    /// Temporal frequency applied to elapsed time.
    pub speed: f32,
}

impl Turbulence {
    /// Scalar displacement at `p` and time `time`.
    pub fn sample(&self, p: Vec3, time: f32) -> f32 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        let t = time * self.speed;
        let s = self.scale;
        let octave1 = (p.x * s + t).sin() * (p.y * s + t).cos() * (p.z * s + t).sin();
        let t2 = t * 1.5;
        let octave2 =
            (p.x * s * 2.0 + t2).cos() * (p.y * s * 2.0 + t2).sin() * (p.z * s * 2.0 + t2).cos();
        (octave1 + octave2 * 0.5) * self.amplitude
    }

    /// Offset of `p` along its outward radial direction.
    pub fn offset(&self, p: Vec3, time: f32) -> Vec3 {
        if self.amplitude == 0.0 {
            return Vec3::ZERO;
        }
        direction(p).map_or(Vec3::ZERO, |dir| dir * self.sample(p, time))
    }
}

/// Scale, amplitude and per-axis time drift for one simplex octave.
struct Octave {
    scale: f32,
    amplitude: f32,
    drift: Vec3,
}

const NEON_OCTAVES: [Octave; 3] = [
    Octave {
        scale: 2.0,
        amplitude: 0.2,
        drift: Vec3::new(0.7, 0.8, 0.9),
    },
    Octave {
        scale: 4.0,
        amplitude: 0.1,
        drift: Vec3::new(1.1, 1.2, 1.3),
    },
    Octave {
        scale: 8.0,
        amplitude: 0.05,
        drift: Vec3::new(1.5, 1.6, 1.7),
    },
];

/// Three-octave simplex displacement of the neon blob, as a scalar distance
/// along the base normal.
pub fn neon_displacement(p: Vec3, time: f32) -> f32 {
    let tf = time * 0.3;
    NEON_OCTAVES
        .iter()
        .map(|o| simplex3(p * o.scale + o.drift * tf) * o.amplitude)
        .sum()
}

/// Displaced position of a blob vertex with rest position `p` and rest
/// normal `normal`.
pub fn neon_offset(p: Vec3, normal: Vec3, time: f32) -> Vec3 {
    p + normal * neon_displacement(p, time)
}

/// Position-dependent blend of the three neon colours at `time`.
pub fn neon_gradient(colors: &[Color; 3], p: Vec3, time: f32) -> Color {
    let t1 = (time * 0.3 + p.x * 2.0).sin() * 0.5 + 0.5;
    let t2 = (time * 0.4 + p.y * 2.0).cos() * 0.5 + 0.5;
    colors[0].lerp(colors[1], t1).lerp(colors[2], t2)
}

/// Slow rim-glow pulse in `[0, 1]`.
pub fn neon_pulse(time: f32) -> f32 {
    (time * 0.5).sin() * 0.5 + 0.5
}
