use glam::{Vec2, Vec3};
use lumen_core::config::{CrystalConfig, LiquidMetalConfig, NeonBlobConfig, WaveConfig};
use lumen_core::controls::ControlEvent;
use lumen_core::demos::{CrystalScene, LiquidMetalScene, NeonBlobScene, WaveScene};
use lumen_core::materials::MetalPreset;
use lumen_core::morph::PickMode;
use lumen_core::ray::Ray;
use lumen_core::reactive::audio::AudioEvent;
use lumen_core::runtime::FrameLoop;
use lumen_core::scene::SceneRecorder;
use lumen_core::shapes::builder::ShapeKind;
use lumen_core::substrate::{MaterialDesc, RenderSubstrate, UniformValue};
use lumen_core::wave::WaveParams;
use lumen_core::LumenError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_unit(normals: &[Vec3]) {
    for (i, n) in normals.iter().enumerate() {
        assert!((n.length() - 1.0).abs() < 1e-3, "normal {} has length {}", i, n.length());
    }
}

fn small_liquid_metal() -> FrameLoop<LiquidMetalScene<StdRng>, SceneRecorder> {
    let config = LiquidMetalConfig {
        resolution: 16,
        ..Default::default()
    };
    let scene = LiquidMetalScene::new(config, StdRng::seed_from_u64(17)).unwrap();
    FrameLoop::new(scene, SceneRecorder::new())
}

fn small_wave() -> WaveConfig {
    WaveConfig {
        surface: WaveParams {
            resolution: 16,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_crystal_mounts_and_animates() {
    let scene = CrystalScene::new(CrystalConfig::default(), &mut StdRng::seed_from_u64(1)).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());

    // body + 6 shards + 4 light markers
    assert_eq!(fl.substrate().mesh_count(), 11);
    assert_eq!(fl.substrate().lights().len(), 4);
    let bloom = fl.substrate().bloom().unwrap();
    assert_eq!((bloom.strength, bloom.radius, bloom.threshold), (0.8, 0.3, 0.2));

    assert!(fl.tick(100.0));
    assert!(fl.tick(102.0));

    let body = fl.demo().body_mesh().unwrap();
    let rotation = fl.substrate().transform(body).unwrap().rotation;
    let expected = glam::Quat::from_euler(glam::EulerRot::XYZ, 0.0, 2.0 * 0.15, 2.0 * 0.15 * 0.3);
    assert!(rotation.angle_between(expected) < 1e-4);

    for ((handle, orbit), spec) in fl.demo().lights().iter().zip(&CrystalConfig::default().lights) {
        let p = fl.substrate().light(*handle).unwrap().position;
        assert!((p.distance(spec.position) - 0.5).abs() < 1e-4, "light strayed to {:?}", p);
        assert_eq!(p, orbit.position(2.0));
    }

    match fl.substrate().uniform(body, "ior") {
        Some(UniformValue::Float(ior)) => assert!((ior - (2.4 + 2.0f32.sin() * 0.1)).abs() < 1e-5),
        other => panic!("ior uniform missing: {:?}", other),
    }
}

#[test]
fn test_crystal_rotation_toggle() {
    let scene = CrystalScene::new(CrystalConfig::default(), &mut StdRng::seed_from_u64(1)).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    fl.tick(0.0);
    fl.tick(1.0);
    fl.control(&ControlEvent::AutoRotate(false)).unwrap();
    let body = fl.demo().body_mesh().unwrap();
    let before = fl.substrate().transform(body).unwrap();
    fl.tick(5.0);
    assert_eq!(fl.substrate().transform(body).unwrap(), before, "rotation should hold");
}

#[test]
fn test_liquid_metal_frames_keep_unit_normals() {
    let mut fl = small_liquid_metal();
    let mesh = fl.demo().mesh().unwrap();
    for i in 0..30 {
        assert!(fl.tick(i as f64 * 0.25));
        let record = fl.substrate().mesh(mesh).unwrap();
        assert_eq!(record.shape.vertex_count(), 17 * 17);
        assert!(record.geometry_dirty);
        assert_unit(&record.shape.normals);
        let s = fl.demo().engine().state;
        assert!(s.elapsed < s.duration);
    }
}

#[test]
fn test_liquid_metal_color_swap_recreates_mesh() {
    let mut fl = small_liquid_metal();
    fl.tick(0.0);
    fl.tick(0.5);
    let old = fl.demo().mesh().unwrap();
    let live = fl.demo().live().positions.clone();

    fl.control(&ControlEvent::ColorSelect("iridescent".into())).unwrap();
    let new = fl.demo().mesh().unwrap();
    assert_ne!(old, new);
    assert!(fl.substrate().mesh(old).is_none(), "old mesh should be disposed");
    assert_eq!(fl.substrate().mesh_count(), 1);

    let record = fl.substrate().mesh(new).unwrap();
    assert!(record.in_scene);
    assert_eq!(record.material, MaterialDesc::Metal(MetalPreset::IRIDESCENT));
    assert_eq!(record.shape.positions, live, "geometry is kept across the swap");

    fl.tick(1.0);
    assert!(matches!(fl.substrate().uniform(new, "color"), Some(UniformValue::Color(_))));
    assert!(matches!(fl.substrate().uniform(new, "emissive"), Some(UniformValue::Color(_))));
}

#[test]
fn test_liquid_metal_controls() {
    let mut fl = small_liquid_metal();
    fl.control(&ControlEvent::parse("shapeSelect", "cube").unwrap()).unwrap();
    assert_eq!(fl.demo().engine().state.next, ShapeKind::Cube);
    assert_eq!(fl.demo().engine().mode, PickMode::Fixed(ShapeKind::Cube));

    fl.control(&ControlEvent::parse("turbulence", "0").unwrap()).unwrap();
    assert_eq!(fl.demo().engine().turbulence.amplitude, 0.0);

    fl.control(&ControlEvent::AutoMorph(false)).unwrap();
    fl.tick(0.0);
    fl.tick(10.0);
    assert_eq!(fl.demo().engine().state.elapsed, 0.0);

    let err = fl.control(&ControlEvent::ColorSelect("bronze".into())).unwrap_err();
    assert!(matches!(err, LumenError::InvalidParameter { name: "metal", .. }));
    // wave controls do not apply here
    fl.control(&ControlEvent::WaveSpeed(1.0)).unwrap();
}

#[test]
fn test_liquid_metal_lights_orbit_at_radius() {
    let mut fl = small_liquid_metal();
    fl.tick(0.0);
    fl.tick(3.0);
    for light in fl.substrate().lights() {
        let r = Vec2::new(light.position.x, light.position.z).length();
        assert!((r - 5.0).abs() < 1e-4, "light radius {}", r);
    }
}

#[test]
fn test_neon_blob_frame() {
    let config = NeonBlobConfig {
        particle_count: 20,
        ..Default::default()
    };
    let scene = NeonBlobScene::new(config, &mut StdRng::seed_from_u64(4)).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    assert_eq!(fl.substrate().mesh_count(), 21);

    fl.tick(0.0);
    fl.tick(1.5);
    let blob = fl.demo().blob_mesh().unwrap();
    let record = fl.substrate().mesh(blob).unwrap();
    assert_eq!(record.colors.len(), record.shape.vertex_count());
    assert_eq!(record.shape.vertex_count(), 20 * 25 * 3);
    assert_unit(&record.shape.normals);
    for p in &record.shape.positions {
        assert!((p.length() - 1.0).abs() < 0.4, "vertex {:?} drifted too far", p);
    }

    for h in fl.demo().particle_meshes() {
        let t = fl.substrate().transform(*h).unwrap();
        assert!((0.6 - 1e-5..=1.0 + 1e-5).contains(&t.scale.x));
        assert!(t.position.length() < 4.1);
    }
}

#[test]
fn test_neon_particles_follow_their_orbits() {
    let config = NeonBlobConfig {
        particle_count: 12,
        ..Default::default()
    };
    let scene = NeonBlobScene::new(config, &mut StdRng::seed_from_u64(8)).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    fl.tick(10.0);
    fl.tick(12.5);

    let demo = fl.demo();
    assert_eq!(demo.particle_positions().len(), 12);
    for ((h, orbit), p) in demo.particle_meshes().iter().zip(demo.orbits()).zip(demo.particle_positions()) {
        assert_eq!(*p, orbit.position(2.5), "particle position is the orbit at elapsed time");
        let t = fl.substrate().transform(*h).unwrap();
        assert_eq!(t.position, *p);
        assert_eq!(t.scale.x, orbit.pulse_scale(2.5));
    }
}

#[test]
fn test_wave_pointer_ray_maps_to_local_hit() {
    let scene = WaveScene::new(small_wave()).unwrap();
    let rays = scene.pointer_rays();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());

    let eye = Vec3::new(0.0, 0.0, 5.0);
    let target = Vec3::new(0.5, 0.25, 0.0);
    rays.publish(Ray::new(eye, target - eye).unwrap());
    fl.tick(0.0);

    let hit = fl.demo().pointer().position.unwrap();
    assert!(hit.distance(Vec2::new(0.5, 0.25)) < 1e-4, "pointer at {:?}", hit);
    assert_eq!(fl.demo().pointer().influence(), 1.0);
}

#[test]
fn test_wave_pointer_ignored_when_disabled() {
    let scene = WaveScene::new(small_wave()).unwrap();
    let rays = scene.pointer_rays();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    fl.control(&ControlEvent::EnableMouseReactivity(false)).unwrap();

    rays.publish(Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap());
    fl.tick(0.0);
    assert!(fl.demo().pointer().position.is_none());
    assert_eq!(fl.demo().pointer().influence(), 0.0);
}

#[test]
fn test_wave_audio_failure_disables_feature() {
    let scene = WaveScene::new(small_wave()).unwrap();
    let events = scene.audio_events();
    let spectra = scene.spectra();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());

    events.publish(AudioEvent::TrackLoaded);
    spectra.publish(vec![128; 64]);
    fl.tick(0.0);
    assert_eq!(fl.demo().audio().influence(), 1.0);

    events.publish(AudioEvent::Failed(LumenError::ExternalInputUnavailable("decode".into())));
    fl.tick(0.1);
    assert_eq!(fl.demo().audio().influence(), 0.0);

    // the frame loop carries on
    assert!(fl.tick(0.2));
    fl.control(&ControlEvent::EnableAudio(true)).unwrap();
    assert!(!fl.demo().audio().is_enabled());
}

#[test]
fn test_wave_controls_update_surface() {
    let scene = WaveScene::new(small_wave()).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    fl.control(&ControlEvent::parse("waveIntensity", "100").unwrap()).unwrap();
    fl.control(&ControlEvent::parse("waveSpeed", "50").unwrap()).unwrap();
    let params = &fl.demo().surface().params;
    assert_eq!(params.amplitude, 2.0);
    assert_eq!(params.wave_speed, 1.0);
}

#[test]
fn test_wave_frames_push_geometry_and_colours() {
    let scene = WaveScene::new(small_wave()).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    let plane = fl.demo().interaction_plane().unwrap();
    assert!(matches!(fl.substrate().mesh(plane).unwrap().material, MaterialDesc::Invisible));

    fl.tick(0.0);
    fl.tick(0.5);
    let mesh = fl.demo().wave_mesh().unwrap();
    let record = fl.substrate().mesh(mesh).unwrap();
    assert_eq!(record.colors.len(), 17 * 17);
    assert!(record.colors_dirty && record.geometry_dirty);
    assert_unit(&record.shape.normals);
}

#[test]
fn test_frame_loop_stops() {
    let scene = WaveScene::new(small_wave()).unwrap();
    let mut fl = FrameLoop::new(scene, SceneRecorder::new());
    assert!(fl.tick(0.0));
    fl.stop();
    assert!(!fl.tick(1.0));
    assert_eq!(fl.frames(), 1);
    assert!(!fl.is_running());
}

#[test]
fn test_bad_config_rejected() {
    use lumen_core::config::DemoConfig;
    let err = LiquidMetalConfig::from_json(r#"{"morphDuration": 0}"#).unwrap_err();
    assert!(matches!(err, LumenError::InvalidParameter { name: "morphDuration", .. }));
    let err = WaveConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, LumenError::Config(_)));
    let err = LiquidMetalConfig::from_json(r#"{"shape": "pyramid"}"#).unwrap_err();
    assert!(matches!(err, LumenError::Config(_)));
}
