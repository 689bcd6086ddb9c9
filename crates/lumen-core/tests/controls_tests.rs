use lumen_core::controls::ControlEvent;
use lumen_core::morph::PickMode;
use lumen_core::shapes::builder::ShapeKind;
use lumen_core::LumenError;

#[test]
fn test_slider_end_points() {
    let cases = [
        ("morphSpeed", 2.0),
        ("turbulence", 2.0),
        ("waveIntensity", 2.0),
        ("waveSpeed", 2.0),
    ];
    for (name, max) in cases {
        let lo = ControlEvent::parse(name, "0").unwrap();
        let hi = ControlEvent::parse(name, "100").unwrap();
        let value = |e: &ControlEvent| match *e {
            ControlEvent::MorphSpeed(v)
            | ControlEvent::Turbulence(v)
            | ControlEvent::WaveIntensity(v)
            | ControlEvent::WaveSpeed(v) => v,
            _ => panic!("{} parsed to {:?}", name, e),
        };
        assert_eq!(value(&lo), 0.0, "{} at 0", name);
        assert!((value(&hi) - max).abs() < 1e-6, "{} at 100", name);
    }
}

#[test]
fn test_slider_midpoint() {
    assert_eq!(ControlEvent::parse("turbulence", "30").unwrap(), ControlEvent::Turbulence(0.6));
    assert_eq!(ControlEvent::parse("waveIntensity", "25").unwrap(), ControlEvent::WaveIntensity(0.5));
}

#[test]
fn test_slider_out_of_range_rejected() {
    for value in ["-1", "101", "NaN", "fast", ""] {
        assert!(
            matches!(
                ControlEvent::parse("morphSpeed", value),
                Err(LumenError::InvalidParameter { name: "morphSpeed", .. })
            ),
            "`{}` should be rejected",
            value
        );
    }
}

#[test]
fn test_shape_select() {
    assert_eq!(
        ControlEvent::parse("shapeSelect", "random").unwrap(),
        ControlEvent::ShapeSelect(PickMode::RandomDistinct)
    );
    assert_eq!(
        ControlEvent::parse("shapeSelect", "torus").unwrap(),
        ControlEvent::ShapeSelect(PickMode::Fixed(ShapeKind::Torus))
    );
    assert!(ControlEvent::parse("shapeSelect", "teapot").is_err());
}

#[test]
fn test_toggles() {
    for name in ["autoMorph", "autoRotate", "enableRainbow", "enableAudio", "enableMouseReactivity"] {
        assert!(ControlEvent::parse(name, "true").is_ok(), "{}", name);
        assert!(ControlEvent::parse(name, "false").is_ok(), "{}", name);
    }
}
