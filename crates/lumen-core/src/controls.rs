//! UI control events.
//!
//! The page forwards every checkbox, slider and select change as a
//! `(name, value)` pair of strings; [`ControlEvent::parse`] turns it into a
//! typed event with the slider already mapped to its parameter range.

use crate::error::{LumenError, Result};
use crate::morph::PickMode;

#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent {
    AutoMorph(bool),
    AutoRotate(bool),
    EnableRainbow(bool),
    EnableAudio(bool),
    EnableMouseReactivity(bool),
    /// Morph clock multiplier in `[0, 2]`.
    MorphSpeed(f32),
    /// Turbulence amplitude in `[0, 2]`.
    Turbulence(f32),
    /// Wave amplitude in `[0, 2]`.
    WaveIntensity(f32),
    /// Wave time multiplier in `[0, 2]`.
    WaveSpeed(f32),
    ShapeSelect(PickMode),
    /// Metal preset name, checked by the demo that uses it.
    ColorSelect(String),
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        other => Err(LumenError::invalid(name, format!("expected a boolean, got `{other}`"))),
    }
}

/// Slider position in `[0, 100]` scaled to `[0, max]`.
fn parse_slider(name: &'static str, value: &str, max: f32) -> Result<f32> {
    let raw: f32 = value
        .trim()
        .parse()
        .map_err(|_| LumenError::invalid(name, format!("expected a number, got `{value}`")))?;
    if !(0.0..=100.0).contains(&raw) {
        return Err(LumenError::invalid(name, format!("{raw} outside 0..=100")));
    }
    Ok(raw / 100.0 * max)
}

impl ControlEvent {
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let event = match name {
            "autoMorph" => Self::AutoMorph(parse_bool("autoMorph", value)?),
            "autoRotate" => Self::AutoRotate(parse_bool("autoRotate", value)?),
            "enableRainbow" => Self::EnableRainbow(parse_bool("enableRainbow", value)?),
            "enableAudio" => Self::EnableAudio(parse_bool("enableAudio", value)?),
            "enableMouseReactivity" => {
                Self::EnableMouseReactivity(parse_bool("enableMouseReactivity", value)?)
            }
            "morphSpeed" => Self::MorphSpeed(parse_slider("morphSpeed", value, 2.0)?),
            "turbulence" => Self::Turbulence(parse_slider("turbulence", value, 2.0)?),
            "waveIntensity" => Self::WaveIntensity(parse_slider("waveIntensity", value, 2.0)?),
            "waveSpeed" => Self::WaveSpeed(parse_slider("waveSpeed", value, 2.0)?),
            "shapeSelect" => Self::ShapeSelect(value.parse()?),
            "colorSelect" => Self::ColorSelect(value.to_owned()),
            other => {
                return Err(LumenError::invalid("control", format!("unknown control `{other}`")))
            }
        };
        log::debug!("control {name} = {value}");
        Ok(event)
    }
}
