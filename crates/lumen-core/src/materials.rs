use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{LumenError, Result};

/// Metal preset for the liquid-metal surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetalPreset {
    pub color: Color,
    pub emissive: Color,
    pub roughness: f32,
    pub metalness: f32,
    /// Colour is driven per frame by [`iridescent_update`].
    pub iridescent: bool,
}

impl MetalPreset {
    /// Mercury: bright, nearly mirror smooth.
    pub const MERCURY: Self = Self::solid(0xEEEEEE, 0x555555, 0.1, 0.9);

    /// Gold: warm, fully metallic.
    pub const GOLD: Self = Self::solid(0xFFD700, 0x442200, 0.2, 1.0);

    /// Copper: reddish, slightly rougher.
    pub const COPPER: Self = Self::solid(0xE7756F, 0x330000, 0.3, 0.8);

    /// Chrome: perfect mirror.
    pub const CHROME: Self = Self::solid(0xCCCCCC, 0x111111, 0.0, 1.0);

    /// Iridescent: hue follows time and view angle.
    pub const IRIDESCENT: Self = Self {
        iridescent: true,
        ..Self::solid(0xFFFFFF, 0x000000, 0.2, 0.8)
    };

    pub const NAMES: [&'static str; 5] = ["mercury", "gold", "copper", "chrome", "iridescent"];

    const fn solid(color: u32, emissive: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color: hex(color),
            emissive: hex(emissive),
            roughness,
            metalness,
            iridescent: false,
        }
    }

    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "mercury" => Ok(Self::MERCURY),
            "gold" => Ok(Self::GOLD),
            "copper" => Ok(Self::COPPER),
            "chrome" => Ok(Self::CHROME),
            "iridescent" => Ok(Self::IRIDESCENT),
            other => Err(LumenError::invalid("metal", format!("unknown preset `{other}`"))),
        }
    }
}

const fn hex(v: u32) -> Color {
    Color::new(
        ((v >> 16) & 0xff) as f32 / 255.0,
        ((v >> 8) & 0xff) as f32 / 255.0,
        (v & 0xff) as f32 / 255.0,
    )
}

/// Per-frame colour pair of the iridescent preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IridescentColors {
    pub color: Color,
    pub emissive: Color,
}

/// Iridescent colour for elapsed `time` and `view_dot`, the cosine between
/// the view direction and the mesh's facing direction.
pub fn iridescent_update(time: f32, view_dot: f32) -> IridescentColors {
    let hue = (time * 0.5).rem_euclid(1.0);
    let dot = 0.5 + 0.5 * view_dot.max(0.0);
    IridescentColors {
        color: Color::from_hsl((hue + dot).rem_euclid(1.0), 0.7, 0.5),
        emissive: Color::from_hsl((hue + dot + 0.5).rem_euclid(1.0), 0.5, 0.2),
    }
}

/// Transmissive crystal material and its rainbow animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrystalMaterial {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub transmission: f32,
    pub ior: f32,
    pub thickness: f32,
}

impl Default for CrystalMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.3,
            roughness: 0.1,
            transmission: 0.95,
            ior: 2.4,
            thickness: 0.5,
        }
    }
}

impl CrystalMaterial {
    /// Animated copy of `self` at `time`: hue cycles at `rainbow_speed`,
    /// IOR and transmission oscillate around their base values.
    pub fn rainbow(&self, time: f32, rainbow_speed: f32) -> Self {
        let hue = (time * rainbow_speed).rem_euclid(1.0);
        Self {
            color: Color::from_hsl(hue, 0.5, 0.7),
            ior: self.ior + time.sin() * 0.1,
            transmission: self.transmission + (time * 0.3).sin() * 0.05,
            ..*self
        }
    }
}
