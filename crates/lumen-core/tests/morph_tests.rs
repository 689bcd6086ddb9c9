use glam::Vec3;
use lumen_core::displace::Turbulence;
use lumen_core::morph::{pick_next, MorphEngine, MorphTargetSet, PickMode};
use lumen_core::shapes::builder::ShapeKind;
use lumen_core::Shape;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn target_set(resolution: u32) -> MorphTargetSet {
    MorphTargetSet::build(resolution, &mut StdRng::seed_from_u64(1)).unwrap()
}

fn still(engine: &mut MorphEngine) {
    engine.turbulence = Turbulence {
        amplitude: 0.0,
        ..engine.turbulence
    };
}

#[test]
fn test_target_set_shares_vertex_count() {
    let set = target_set(64);
    assert_eq!(set.len(), 5);
    assert_eq!(set.vertex_count(), 4225);
    for kind in set.ids() {
        let shape = set.get(kind).unwrap();
        assert_eq!(shape.vertex_count(), 4225, "{} has a different vertex count", kind);
    }
    let ids: Vec<ShapeKind> = set.ids().collect();
    assert_eq!(ids, ShapeKind::MORPH_SET.to_vec());
}

#[test]
fn test_random_pick_never_repeats_current() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let next = pick_next(&set, ShapeKind::Sphere, PickMode::RandomDistinct, &mut rng);
        assert_ne!(next, ShapeKind::Sphere);
        assert!(set.contains(next));
    }
}

#[test]
fn test_single_target_random_pick_returns_it() {
    let mut rng = StdRng::seed_from_u64(0);
    let sphere = lumen_core::shapes::build_kind(ShapeKind::Sphere, 8).unwrap();
    let set = MorphTargetSet::from_shapes(vec![(ShapeKind::Sphere, sphere)], &mut rng).unwrap();
    assert_eq!(
        pick_next(&set, ShapeKind::Sphere, PickMode::RandomDistinct, &mut rng),
        ShapeKind::Sphere
    );
}

#[test]
fn test_duplicate_targets_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let s = lumen_core::shapes::build_kind(ShapeKind::Sphere, 8).unwrap();
    let result = MorphTargetSet::from_shapes(
        vec![(ShapeKind::Sphere, s.clone()), (ShapeKind::Sphere, s)],
        &mut rng,
    );
    assert!(result.is_err());
}

#[test]
fn test_rollover_after_exact_duration() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(5);
    let mut engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 3.0, PickMode::RandomDistinct, &mut rng).unwrap();
    engine.speed = 0.5;
    let first_next = engine.state.next;

    // 0.5 * 5.0 = 2.5, then 0.5 * 1.0 = 0.5 reaches 3.0 exactly.
    assert!(!engine.advance(&set, 5.0, &mut rng));
    assert!((engine.state.elapsed - 2.5).abs() < 1e-6);
    assert!(engine.advance(&set, 1.0, &mut rng));

    assert_eq!(engine.state.elapsed, 0.0);
    assert_eq!(engine.state.current, first_next);
    assert_ne!(engine.state.next, engine.state.current);
}

#[test]
fn test_elapsed_stays_below_duration() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(8);
    let mut engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 3.0, PickMode::RandomDistinct, &mut rng).unwrap();
    for i in 0..2000 {
        let dt = 0.016 + (i % 7) as f32 * 0.01;
        engine.advance(&set, dt, &mut rng);
        let s = engine.state;
        assert!(s.elapsed >= 0.0 && s.elapsed < s.duration, "elapsed {} at step {}", s.elapsed, i);
        assert!((0.0..1.0).contains(&s.progress()));
    }
}

#[test]
fn test_idle_engine_does_not_advance() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(2);
    let mut engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 3.0, PickMode::RandomDistinct, &mut rng).unwrap();
    engine.auto_morph = false;
    let before = engine.state;
    assert!(!engine.advance(&set, 100.0, &mut rng));
    assert_eq!(engine.state, before);
}

#[test]
fn test_fixed_mode_keeps_picking_choice() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(2);
    let mut engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 1.0, PickMode::Fixed(ShapeKind::Cube), &mut rng)
            .unwrap();
    engine.speed = 1.0;
    assert_eq!(engine.state.next, ShapeKind::Cube);
    engine.advance(&set, 1.0, &mut rng);
    assert_eq!(engine.state.current, ShapeKind::Cube);
    assert_eq!(engine.state.next, ShapeKind::Cube);
}

#[test]
fn test_select_restarts_transition() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(4);
    let mut engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 3.0, PickMode::RandomDistinct, &mut rng).unwrap();
    engine.advance(&set, 2.0, &mut rng);
    let pending = engine.state.next;

    engine.select(&set, PickMode::Fixed(ShapeKind::Torus)).unwrap();
    assert_eq!(engine.state.elapsed, 0.0);
    assert_eq!(engine.state.current, pending);
    assert_eq!(engine.state.next, ShapeKind::Torus);

    assert!(engine.select(&set, PickMode::Fixed(ShapeKind::Crystal)).is_err());
}

#[test]
fn test_zero_turbulence_is_pure_lerp_and_idempotent() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(6);
    let mut engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 3.0, PickMode::Fixed(ShapeKind::Torus), &mut rng)
            .unwrap();
    still(&mut engine);
    engine.advance(&set, 2.4, &mut rng); // elapsed 1.2, t = 0.4

    let mut out: Shape = set.get(ShapeKind::Sphere).unwrap().clone();
    engine.apply(&set, 7.0, &mut out);
    let first = out.positions.clone();
    engine.apply(&set, 7.0, &mut out);
    assert_eq!(first, out.positions, "apply must be idempotent at fixed time");

    let from = &set.get(ShapeKind::Sphere).unwrap().positions;
    let to = &set.get(ShapeKind::Torus).unwrap().positions;
    for i in 0..from.len() {
        let expected = from[i].lerp(to[i], 0.4);
        assert!(out.positions[i].distance(expected) < 1e-5, "vertex {} off the lerp", i);
    }
}

#[test]
fn test_turbulence_moves_along_radial_direction() {
    let set = target_set(16);
    let mut rng = StdRng::seed_from_u64(6);
    let engine =
        MorphEngine::new(&set, ShapeKind::Sphere, 3.0, PickMode::Fixed(ShapeKind::Sphere), &mut rng)
            .unwrap();
    let mut out = set.get(ShapeKind::Sphere).unwrap().clone();
    engine.apply(&set, 3.3, &mut out);
    let base = &set.get(ShapeKind::Sphere).unwrap().positions;
    for (b, p) in base.iter().zip(&out.positions) {
        let offset = *p - *b;
        assert!(offset.cross(b.normalize()).length() < 1e-4, "offset {:?} not radial at {:?}", offset, b);
    }
    for n in &out.normals {
        assert!((n.length() - 1.0).abs() < 1e-3);
    }
}

#[test]
fn test_pick_mode_parses() {
    assert_eq!("random".parse::<PickMode>().unwrap(), PickMode::RandomDistinct);
    assert_eq!("cone".parse::<PickMode>().unwrap(), PickMode::Fixed(ShapeKind::Cone));
    assert!("pyramid".parse::<PickMode>().is_err());
    let json = serde_json::to_string(&PickMode::Fixed(ShapeKind::Torus)).unwrap();
    assert_eq!(json, "\"torus\"");
}

#[test]
fn test_origin_vertex_not_displaced() {
    let t = Turbulence {
        amplitude: 2.0,
        scale: 0.8,
        speed: 0.2,
    };
    assert_eq!(t.offset(Vec3::ZERO, 1.0), Vec3::ZERO);
}
