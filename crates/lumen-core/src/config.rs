//! Per-demo configuration.
//!
//! Every struct deserializes from camelCase JSON with any field optional;
//! missing fields take the defaults below. Call `validate` (or use
//! `from_json`, which does) before building a scene.

use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{LumenError, Result};
use crate::materials::{CrystalMaterial, MetalPreset};
use crate::morph::PickMode;
use crate::shapes::crystal::CrystalShape;
use crate::substrate::PointLight;
use crate::wave::WaveParams;

/// Bloom post-processing pass settings, forwarded to the substrate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: 1.0,
            radius: 0.2,
            threshold: 0.7,
        }
    }
}

impl BloomSettings {
    pub const fn new(strength: f32, radius: f32, threshold: f32) -> Self {
        Self {
            strength,
            radius,
            threshold,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("bloom.strength", self.strength),
            ("bloom.radius", self.radius),
            ("bloom.threshold", self.threshold),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(LumenError::invalid(name, format!("must be non-negative, got {v}")));
            }
        }
        Ok(())
    }
}

/// A light placed at a fixed rest position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    /// `0xRRGGBB`.
    pub color: u32,
    pub position: Vec3,
    pub intensity: f32,
}

impl LightSpec {
    pub const fn new(color: u32, position: Vec3, intensity: f32) -> Self {
        Self {
            color,
            position,
            intensity,
        }
    }

    /// Point light with intensity scaled by `gain`, reaching `distance`.
    pub fn to_light(&self, gain: f32, distance: f32) -> PointLight {
        PointLight {
            color: Color::from_hex(self.color),
            intensity: self.intensity * gain,
            distance,
            position: self.position,
        }
    }
}

/// Parse and validate any demo config.
pub trait DemoConfig: DeserializeOwned + Default {
    fn validate(&self) -> Result<()>;

    fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_positive(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(LumenError::invalid(name, format!("must be positive, got {v}")))
    }
}

fn check_finite(name: &'static str, v: f32) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(LumenError::invalid(name, "must be finite"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrystalConfig {
    pub shape: CrystalShape,
    pub material: CrystalMaterial,
    pub fragment_count: usize,
    pub auto_rotate: bool,
    pub rotation_speed: f32,
    pub enable_rainbow: bool,
    pub rainbow_speed: f32,
    pub light_intensity: f32,
    pub lights: Vec<LightSpec>,
    pub bloom: BloomSettings,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            shape: CrystalShape::default(),
            material: CrystalMaterial::default(),
            fragment_count: 6,
            auto_rotate: true,
            rotation_speed: 0.15,
            enable_rainbow: true,
            rainbow_speed: 0.3,
            light_intensity: 1.5,
            lights: vec![
                LightSpec::new(0xff5555, Vec3::new(5.0, 3.0, 2.0), 2.0),
                LightSpec::new(0x55ff55, Vec3::new(-5.0, 2.0, 3.0), 2.0),
                LightSpec::new(0x5555ff, Vec3::new(0.0, 5.0, -3.0), 2.0),
                LightSpec::new(0xffff55, Vec3::new(0.0, -3.0, -5.0), 1.5),
            ],
            bloom: BloomSettings::new(0.8, 0.3, 0.2),
        }
    }
}

impl DemoConfig for CrystalConfig {
    fn validate(&self) -> Result<()> {
        check_positive("shape.radius", self.shape.radius)?;
        check_positive("shape.height", self.shape.height)?;
        check_finite("shape.distortion", self.shape.distortion)?;
        if self.shape.facets < 3 {
            return Err(LumenError::invalid("shape.facets", "need at least 3 facets"));
        }
        check_finite("rotationSpeed", self.rotation_speed)?;
        check_finite("rainbowSpeed", self.rainbow_speed)?;
        check_finite("lightIntensity", self.light_intensity)?;
        self.bloom.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LiquidMetalConfig {
    pub auto_morph: bool,
    pub morph_speed: f32,
    /// Seconds per transition at speed 1.
    pub morph_duration: f32,
    pub turbulence: f32,
    pub noise_scale: f32,
    pub noise_speed: f32,
    pub shape: PickMode,
    pub resolution: u32,
    pub metal: String,
    pub lights: Vec<LightSpec>,
    pub light_orbit_radius: f32,
    pub light_orbit_speed: f32,
    pub bloom: BloomSettings,
}

impl Default for LiquidMetalConfig {
    fn default() -> Self {
        Self {
            auto_morph: true,
            morph_speed: 0.5,
            morph_duration: 3.0,
            turbulence: 0.3,
            noise_scale: 0.8,
            noise_speed: 0.2,
            shape: PickMode::RandomDistinct,
            resolution: 64,
            metal: "mercury".to_owned(),
            lights: vec![
                LightSpec::new(0x3366ff, Vec3::new(-5.0, 2.0, -3.0), 1.0),
                LightSpec::new(0xff33cc, Vec3::new(5.0, -2.0, -3.0), 1.0),
            ],
            light_orbit_radius: 5.0,
            light_orbit_speed: 0.5,
            bloom: BloomSettings::new(0.2, 0.5, 0.85),
        }
    }
}

impl LiquidMetalConfig {
    pub fn metal_preset(&self) -> Result<MetalPreset> {
        MetalPreset::by_name(&self.metal)
    }
}

impl DemoConfig for LiquidMetalConfig {
    fn validate(&self) -> Result<()> {
        check_positive("morphDuration", self.morph_duration)?;
        check_finite("morphSpeed", self.morph_speed)?;
        check_finite("turbulence", self.turbulence)?;
        check_finite("noiseScale", self.noise_scale)?;
        check_finite("noiseSpeed", self.noise_speed)?;
        check_finite("lightOrbitRadius", self.light_orbit_radius)?;
        check_finite("lightOrbitSpeed", self.light_orbit_speed)?;
        if self.resolution == 0 {
            return Err(LumenError::invalid("resolution", "must be at least 1"));
        }
        self.metal_preset()?;
        self.bloom.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NeonBlobConfig {
    pub radius: f32,
    pub detail: u32,
    pub particle_count: usize,
    pub particle_size: f32,
    pub colors: [Color; 3],
    pub bloom: BloomSettings,
}

impl Default for NeonBlobConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            detail: 4,
            particle_count: 200,
            particle_size: 0.02,
            colors: [
                Color::new(0.8, 0.1, 0.9),
                Color::new(0.1, 0.8, 0.9),
                Color::new(0.9, 0.3, 0.7),
            ],
            bloom: BloomSettings::new(1.0, 0.2, 0.7),
        }
    }
}

impl DemoConfig for NeonBlobConfig {
    fn validate(&self) -> Result<()> {
        check_positive("radius", self.radius)?;
        check_positive("particleSize", self.particle_size)?;
        self.bloom.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveConfig {
    pub surface: WaveParams,
    pub enable_audio: bool,
    pub enable_mouse_reactivity: bool,
    pub pointer_falloff: f32,
    pub bloom: BloomSettings,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            surface: WaveParams::default(),
            enable_audio: false,
            enable_mouse_reactivity: true,
            pointer_falloff: 1.0,
            bloom: BloomSettings::new(0.5, 0.3, 0.2),
        }
    }
}

impl DemoConfig for WaveConfig {
    fn validate(&self) -> Result<()> {
        self.surface.validate()?;
        check_positive("pointerFalloff", self.pointer_falloff)?;
        self.bloom.validate()
    }
}
