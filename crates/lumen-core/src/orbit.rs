//! Closed-form secondary motion for lights and particles.
//!
//! Every animated object owns a fixed [`Orbit`] sampled once at creation;
//! its position at any time is a pure function of that time, so objects
//! can be evaluated independently and in any order.

use std::f32::consts::{PI, TAU};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use glam::{Quat, Vec3};
use rand::Rng;

/// Rotation of a base offset about an axis, plus a wobble along the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub center: Vec3,
    /// Offset from `center` at angle zero.
    pub offset: Vec3,
    /// Unit rotation axis.
    pub axis: Vec3,
    /// Angular speed in radians per second.
    pub speed: f32,
    pub phase: f32,
    pub wobble_amplitude: f32,
    pub wobble_frequency: f32,
}

impl Orbit {
    /// Position at time `t` seconds.
    pub fn position(&self, t: f32) -> Vec3 {
        let angle = self.speed * t + self.phase;
        let rotated = Quat::from_axis_angle(self.axis, angle) * self.offset;
        let wobble = (self.wobble_frequency * t + self.phase).sin() * self.wobble_amplitude;
        self.center + rotated + self.axis * wobble
    }

    /// Uniform scale factor for a pulsing particle, in `[0.6, 1.0]`.
    pub fn pulse_scale(&self, t: f32) -> f32 {
        0.8 + (t * 3.0 + self.phase * 10.0).sin() * 0.2
    }

    /// Particle circling the origin on a random great circle.
    pub fn random_particle<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let radius = 2.0 + rng.random::<f32>() * 2.0;
        let speed = 0.2 + rng.random::<f32>() * 0.5;
        let phase = rng.random::<f32>() * TAU;
        let tilt = rng.random::<f32>() * TAU;
        let axis = Vec3::new(tilt.sin(), tilt.cos(), rng.random::<f32>() - 0.5).normalize_or(Vec3::Y);
        Self {
            center: Vec3::ZERO,
            offset: Vec3::new(radius, 0.0, 0.0),
            axis,
            speed,
            phase,
            wobble_amplitude: 0.05,
            wobble_frequency: 5.0,
        }
    }

    /// Small clockwise circle in the XY plane around `base`, the `index`-th
    /// light of a rig (faster and phase shifted by a quarter turn per index).
    pub fn drift(base: Vec3, index: usize) -> Self {
        let i = index as f32;
        Self {
            center: base,
            offset: Vec3::new(0.0, 0.5, 0.0),
            axis: Vec3::NEG_Z,
            speed: 0.5 + 0.2 * i,
            phase: i * PI / 2.0,
            wobble_amplitude: 0.0,
            wobble_frequency: 0.0,
        }
    }

    /// Horizontal circle of `radius` about the Y axis at the height of
    /// `base`, starting at the bearing of `base`.
    pub fn ring(base: Vec3, radius: f32, speed: f32) -> Self {
        Self {
            center: Vec3::new(0.0, base.y, 0.0),
            offset: Vec3::new(0.0, 0.0, radius),
            axis: Vec3::Y,
            speed,
            phase: base.x.atan2(base.z),
            wobble_amplitude: 0.0,
            wobble_frequency: 0.0,
        }
    }
}

/// Evaluate every orbit at `t` into `out` (resized to match).
pub fn animate_all(orbits: &[Orbit], t: f32, out: &mut Vec<Vec3>) {
    out.resize(orbits.len(), Vec3::ZERO);

    #[cfg(feature = "parallel")]
    out.par_iter_mut()
        .zip(orbits.par_iter())
        .for_each(|(p, o)| *p = o.position(t));

    #[cfg(not(feature = "parallel"))]
    out.iter_mut()
        .zip(orbits.iter())
        .for_each(|(p, o)| *p = o.position(t));
}
