//! Reactive height-field surface of the wave demo.
//!
//! A flat grid in the XY plane is lifted along Z every frame by simplex noise
//! plus the pointer and audio terms, then coloured from its own height.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{LumenError, Result};
use crate::math::{mix, simplex3};
use crate::reactive::audio::{audio_lift, AudioInput};
use crate::reactive::pointer::{pointer_lift, PointerInput};
use crate::shape::Shape;
use crate::shapes::primitives::plane;

/// Surface shape, motion and colour parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveParams {
    /// Half the side length of the square surface.
    pub size: f32,
    /// Segments per side.
    pub resolution: u32,
    pub amplitude: f32,
    pub frequency: f32,
    pub noise_scale: f32,
    pub color_speed: f32,
    pub hue_range: [f32; 2],
    pub saturation: f32,
    pub lightness: f32,
    /// Multiplier from wall-clock seconds to surface time.
    pub wave_speed: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            size: 2.5,
            resolution: 128,
            amplitude: 0.5,
            frequency: 0.5,
            noise_scale: 4.0,
            color_speed: 0.5,
            hue_range: [0.5, 0.85],
            saturation: 0.8,
            lightness: 0.5,
            wave_speed: 0.5,
        }
    }
}

impl WaveParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(LumenError::invalid("size", format!("must be positive, got {}", self.size)));
        }
        if self.resolution == 0 {
            return Err(LumenError::invalid("resolution", "must be at least 1"));
        }
        for (name, v) in [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("noiseScale", self.noise_scale),
            ("waveSpeed", self.wave_speed),
        ] {
            if !v.is_finite() {
                return Err(LumenError::invalid(name, "must be finite"));
            }
        }
        Ok(())
    }
}

/// Height, saturation and lightness rule for one point.
fn height_color(params: &WaveParams, z: f32, time: f32) -> Color {
    let [h0, h1] = params.hue_range;
    let hue = mix(h0, h1, 0.5 + 0.5 * (z * 2.0 + time * params.color_speed * 0.1).sin());
    let sat = params.saturation * (0.9 + 0.1 * (z * 5.0 + time).sin());
    let lit = params.lightness * (0.8 + 0.2 * (z * 3.0).cos());
    Color::from_hsl(hue, sat, lit)
}

/// The animated wave mesh plus its per-vertex colours.
#[derive(Clone, Debug)]
pub struct WaveSurface {
    pub params: WaveParams,
    base: Vec<Vec3>,
    shape: Shape,
    colors: Vec<Color>,
}

impl WaveSurface {
    pub fn new(params: WaveParams) -> Result<Self> {
        params.validate()?;
        let side = params.size * 2.0;
        let shape = plane(side, side, params.resolution, params.resolution)?;
        let base = shape.positions.clone();
        let colors = vec![Color::BLACK; base.len()];
        log::debug!("wave surface: {} vertices", base.len());
        Ok(Self {
            params,
            base,
            shape,
            colors,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Surface time for `elapsed` wall-clock seconds.
    pub fn surface_time(&self, elapsed: f32) -> f32 {
        elapsed * self.params.wave_speed
    }

    /// Height of the flat-grid point `p` at surface time `time`.
    pub fn height_at(&self, p: Vec2, time: f32, pointer: &PointerInput, audio: &AudioInput) -> f32 {
        let side = self.params.size * 2.0;
        let noise = simplex3(Vec3::new(
            p.x * self.params.noise_scale,
            p.y * self.params.noise_scale,
            time * self.params.frequency,
        )) * self.params.amplitude;
        let uv = Vec2::new(p.x / side + 0.5, p.y / side + 0.5);
        noise + pointer_lift(p, pointer) + audio_lift(uv, audio)
    }

    /// Recompute heights, colours and normals for surface time `time`.
    pub fn update(&mut self, time: f32, pointer: &PointerInput, audio: &AudioInput) {
        let this = &*self;
        let lift = |b: &Vec3| {
            let z = this.height_at(b.truncate(), time, pointer, audio);
            (Vec3::new(b.x, b.y, z), height_color(&this.params, z, time))
        };

        #[cfg(feature = "parallel")]
        let lifted: Vec<(Vec3, Color)> = self.base.par_iter().map(lift).collect();

        #[cfg(not(feature = "parallel"))]
        let lifted: Vec<(Vec3, Color)> = self.base.iter().map(lift).collect();

        for (i, (p, c)) in lifted.into_iter().enumerate() {
            self.shape.positions[i] = p;
            self.colors[i] = c;
        }
        self.shape.compute_normals();
    }
}
