use glam::Vec3;
use lumen_core::shapes::builder::{build_kind, build_shape, ShapeKind, ShapeSpec};
use lumen_core::shapes::crystal::{crystal, fragments, CrystalShape};
use lumen_core::shapes::primitives::{cylinder, sphere};
use lumen_core::LumenError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_unit_normals(name: &str, normals: &[Vec3]) {
    for (i, n) in normals.iter().enumerate() {
        assert!(
            (n.length() - 1.0).abs() < 1e-3,
            "{} normal {} has length {} ({:?})",
            name,
            i,
            n.length(),
            n
        );
    }
}

#[test]
fn test_morph_kinds_build_with_unit_normals() {
    for kind in ShapeKind::MORPH_SET.into_iter().chain([ShapeKind::Crystal]) {
        let shape = build_kind(kind, 32).unwrap();
        assert!(shape.vertex_count() > 0, "{} is empty", kind);
        assert_eq!(shape.normals.len(), shape.vertex_count());
        assert_unit_normals(kind.name(), &shape.normals);
    }
}

#[test]
fn test_sphere_at_64_has_4225_vertices() {
    let s = build_kind(ShapeKind::Sphere, 64).unwrap();
    assert_eq!(s.vertex_count(), 4225);
}

#[test]
fn test_icosahedron_detail_counts() {
    for detail in [0u32, 1, 4] {
        let s = build_shape(&ShapeSpec::Icosahedron { radius: 1.0, detail }).unwrap();
        let faces = 20 * (detail as usize + 1).pow(2);
        assert_eq!(s.triangle_count(), faces, "detail {}", detail);
        assert_eq!(s.vertex_count(), faces * 3);
    }
}

#[test]
fn test_cylinder_caps_only_with_radius() {
    let both = cylinder(1.0, 1.0, 2.0, 8, 1).unwrap();
    let torso = 9 * 2;
    let cap = 8 + 9;
    assert_eq!(both.vertex_count(), torso + 2 * cap);
}

#[test]
fn test_invalid_parameters_rejected() {
    let bad = [
        ShapeSpec::Sphere {
            radius: 1.0,
            width_segments: 0,
            height_segments: 8,
        },
        ShapeSpec::Plane {
            width: f32::NAN,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        },
        ShapeSpec::Torus {
            radius: 0.0,
            tube: 0.3,
            radial_segments: 8,
            tubular_segments: 8,
        },
    ];
    for spec in &bad {
        assert!(
            matches!(build_shape(spec), Err(LumenError::InvalidParameter { .. })),
            "{} with bad parameters should be rejected",
            spec.label()
        );
    }
}

#[test]
fn test_crystal_distortion_deterministic() {
    let params = CrystalShape::default();
    let a = crystal(&params).unwrap();
    let b = crystal(&params).unwrap();
    assert_eq!(a.positions, b.positions);
}

#[test]
fn test_crystal_distortion_grows_towards_tip() {
    let plain = CrystalShape {
        distortion: 0.0,
        ..Default::default()
    };
    let bent = CrystalShape::default();
    let a = crystal(&plain).unwrap();
    let b = crystal(&bent).unwrap();

    // Bottom ring sits at hf = 0 and must not move.
    for (p, q) in a.positions.iter().zip(&b.positions) {
        if (p.y + 2.0).abs() < 1e-5 {
            assert!(p.distance(*q) < 1e-5, "bottom vertex {:?} moved to {:?}", p, q);
        }
    }
    let moved_top = a
        .positions
        .iter()
        .zip(&b.positions)
        .filter(|(p, _)| p.y > 1.9)
        .any(|(p, q)| p.distance(*q) > 0.01);
    assert!(moved_top, "upper vertices should be displaced");
}

#[test]
fn test_fragments_reproducible_for_seed() {
    let params = CrystalShape::default();
    let a = fragments(&params, 6, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = fragments(&params, 6, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a.len(), 6);
    for (fa, fb) in a.iter().zip(&b) {
        assert_eq!(fa.shape.positions, fb.shape.positions);
        assert_eq!(fa.position, fb.position);
        assert_eq!(fa.rotation, fb.rotation);
        let ring = (fa.position.x * fa.position.x + fa.position.z * fa.position.z).sqrt();
        assert!((ring - 1.44).abs() < 1e-4, "fragment ring radius {}", ring);
        assert!(fa.position.y.abs() <= 2.0);
    }
}

#[test]
fn test_sphere_positions_on_radius() {
    let s = sphere(1.5, 24, 16).unwrap();
    for p in &s.positions {
        assert!((p.length() - 1.5).abs() < 1e-4);
    }
}

#[test]
fn test_flat_float_views_match_vectors() {
    let s = sphere(1.0, 8, 6).unwrap();
    let floats = s.position_floats();
    assert_eq!(floats.len(), s.vertex_count() * 3);
    assert_eq!(&floats[3..6], &s.positions[1].to_array());
    assert_eq!(s.normal_floats().len(), floats.len());
}
