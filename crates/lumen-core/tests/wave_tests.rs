use glam::{Vec2, Vec3};
use lumen_core::math::simplex3;
use lumen_core::reactive::audio::{audio_lift, AudioInput};
use lumen_core::reactive::pointer::{pointer_lift, PointerInput};
use lumen_core::wave::{WaveParams, WaveSurface};

fn active_pointer(at: Vec2) -> PointerInput {
    PointerInput {
        enabled: true,
        position: Some(at),
        ..Default::default()
    }
}

fn loud_audio(bins: &[u8]) -> AudioInput {
    let mut audio = AudioInput::default();
    audio.track_loaded();
    audio.set_spectrum(bins);
    audio
}

#[test]
fn test_pointer_lift_max_at_pointer() {
    let pointer = active_pointer(Vec2::new(0.5, -0.25));
    let peak = pointer_lift(Vec2::new(0.5, -0.25), &pointer);
    assert!((peak - 2.0).abs() < 1e-6, "peak lift {}", peak);
    let near = pointer_lift(Vec2::new(0.7, -0.25), &pointer);
    assert!(near < peak && near > 0.0);
}

#[test]
fn test_pointer_lift_vanishes_past_falloff() {
    let pointer = active_pointer(Vec2::ZERO);
    for d in [1.0f32, 1.5, 3.0] {
        let lift = pointer_lift(Vec2::new(d, 0.0), &pointer);
        assert!(lift.abs() < 1e-6, "lift {} at distance {}", lift, d);
    }
}

#[test]
fn test_gated_inputs_contribute_exactly_zero() {
    let pointer = PointerInput {
        enabled: false,
        position: Some(Vec2::ZERO),
        strength: 1000.0,
        ..Default::default()
    };
    assert_eq!(pointer_lift(Vec2::ZERO, &pointer), 0.0);

    let mut audio = loud_audio(&[255; 128]);
    audio.set_enabled(false);
    assert_eq!(audio_lift(Vec2::splat(0.5), &audio), 0.0);
}

#[test]
fn test_audio_bucket_by_radial_distance() {
    let mut bins = [0u8; 128];
    bins[0] = 255;
    bins[127] = 51;
    let audio = loud_audio(&bins);
    // centre selects bucket 0
    assert!((audio_lift(Vec2::splat(0.5), &audio) - 1.0).abs() < 1e-6);
    // corners are beyond distance 1 and clamp to the last bucket
    assert!((audio_lift(Vec2::ZERO, &audio) - 0.2).abs() < 1e-6);
}

#[test]
fn test_empty_spectrum_is_inert() {
    let audio = loud_audio(&[]);
    assert_eq!(audio.influence(), 0.0);
    assert_eq!(audio_lift(Vec2::new(0.2, 0.3), &audio), 0.0);
}

#[test]
fn test_surface_without_inputs_is_pure_noise() {
    let params = WaveParams {
        resolution: 16,
        ..Default::default()
    };
    let mut surface = WaveSurface::new(params.clone()).unwrap();
    let t = 1.7;
    surface.update(t, &PointerInput::default(), &AudioInput::default());
    for p in &surface.shape().positions {
        let expected = simplex3(Vec3::new(
            p.x * params.noise_scale,
            p.y * params.noise_scale,
            t * params.frequency,
        )) * params.amplitude;
        assert!((p.z - expected).abs() < 1e-6, "height {} != noise {}", p.z, expected);
    }
}

#[test]
fn test_surface_rises_under_pointer() {
    let params = WaveParams {
        resolution: 16,
        amplitude: 0.0,
        ..Default::default()
    };
    let mut surface = WaveSurface::new(params).unwrap();
    surface.update(0.0, &active_pointer(Vec2::ZERO), &AudioInput::default());
    let centre = surface
        .shape()
        .positions
        .iter()
        .find(|p| p.truncate().length() < 1e-5)
        .copied()
        .unwrap();
    assert!((centre.z - 2.0).abs() < 1e-5);
    for n in &surface.shape().normals {
        assert!((n.length() - 1.0).abs() < 1e-3);
    }
}

#[test]
fn test_colors_follow_hue_range() {
    let params = WaveParams {
        resolution: 8,
        ..Default::default()
    };
    let mut surface = WaveSurface::new(params).unwrap();
    surface.update(3.0, &PointerInput::default(), &AudioInput::default());
    assert_eq!(surface.colors().len(), surface.shape().vertex_count());
    for c in surface.colors() {
        // hues between cyan and purple never push green above blue
        assert!(c.g <= c.b + 1e-5, "colour {:?} outside the hue range", c);
    }
}
