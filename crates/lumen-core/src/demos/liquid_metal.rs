use glam::Vec3;
use rand::Rng;

use crate::config::{DemoConfig, LiquidMetalConfig};
use crate::controls::ControlEvent;
use crate::displace::Turbulence;
use crate::error::Result;
use crate::materials::{iridescent_update, MetalPreset};
use crate::morph::{MorphEngine, MorphTargetSet};
use crate::orbit::Orbit;
use crate::runtime::{Demo, FrameTime};
use crate::shape::Shape;
use crate::shapes::builder::ShapeKind;
use crate::substrate::{LightHandle, MaterialDesc, MeshHandle, RenderSubstrate, UniformValue};

const LIGHT_DISTANCE: f32 = 20.0;

/// Liquid-metal blob morphing between the standard target set.
///
/// Owns its random source: random-mode rollovers draw from it every time a
/// transition completes.
pub struct LiquidMetalScene<R> {
    config: LiquidMetalConfig,
    targets: MorphTargetSet,
    engine: MorphEngine,
    live: Shape,
    metal: MetalPreset,
    camera: Vec3,
    mesh: Option<MeshHandle>,
    lights: Vec<(LightHandle, Orbit)>,
    rng: R,
}

impl<R: Rng> LiquidMetalScene<R> {
    pub fn new(config: LiquidMetalConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let metal = config.metal_preset()?;
        let targets = MorphTargetSet::build(config.resolution, &mut rng)?;
        let mut engine = MorphEngine::new(
            &targets,
            ShapeKind::Sphere,
            config.morph_duration,
            config.shape,
            &mut rng,
        )?;
        engine.auto_morph = config.auto_morph;
        engine.speed = config.morph_speed;
        engine.turbulence = Turbulence {
            amplitude: config.turbulence,
            scale: config.noise_scale,
            speed: config.noise_speed,
        };

        let live = build_live(&targets)?;
        log::info!(
            "liquid metal scene: {} targets, {} vertices, {} -> {}",
            targets.len(),
            targets.vertex_count(),
            engine.state.current,
            engine.state.next
        );
        Ok(Self {
            config,
            targets,
            engine,
            live,
            metal,
            camera: Vec3::new(0.0, 0.0, 4.0),
            mesh: None,
            lights: Vec::new(),
            rng,
        })
    }

    pub fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    pub fn targets(&self) -> &MorphTargetSet {
        &self.targets
    }

    pub fn live(&self) -> &Shape {
        &self.live
    }

    pub fn metal(&self) -> &MetalPreset {
        &self.metal
    }

    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    pub fn lights(&self) -> &[(LightHandle, Orbit)] {
        &self.lights
    }

    /// Camera position used by the iridescent view-angle term.
    pub fn set_camera(&mut self, position: Vec3) {
        self.camera = position;
    }

    fn swap_material(&mut self, preset: MetalPreset, substrate: &mut dyn RenderSubstrate) {
        self.metal = preset;
        if let Some(old) = self.mesh.take() {
            let transform = substrate.transform(old);
            substrate.remove_from_scene(old);
            substrate.dispose(old);
            let h = substrate.create_mesh(&self.live, MaterialDesc::Metal(preset));
            if let Some(transform) = transform {
                substrate.set_transform(h, transform);
            }
            substrate.add_to_scene(h);
            self.mesh = Some(h);
        }
    }

    /// Per-frame material step for presets whose colour is view dependent.
    fn update_material(&self, time: f32, substrate: &mut dyn RenderSubstrate) {
        let Some(h) = self.mesh else { return };
        if !self.metal.iridescent {
            return;
        }
        let transform = substrate.transform(h).unwrap_or_default();
        let facing = transform.rotation * Vec3::Z;
        let view = crate::math::direction(self.camera - transform.position).unwrap_or(Vec3::Z);
        let colors = iridescent_update(time, view.dot(facing));
        substrate.set_uniform(h, "color", UniformValue::Color(colors.color));
        substrate.set_uniform(h, "emissive", UniformValue::Color(colors.emissive));
    }
}

/// The live mesh starts as a copy of the sphere and keeps its topology.
fn build_live(targets: &MorphTargetSet) -> Result<Shape> {
    targets.get(ShapeKind::Sphere).cloned().ok_or_else(|| {
        crate::error::LumenError::invalid("targets", "morph set has no sphere")
    })
}

impl<R: Rng> Demo for LiquidMetalScene<R> {
    fn mount(&mut self, substrate: &mut dyn RenderSubstrate) {
        substrate.set_bloom(self.config.bloom);
        let h = substrate.create_mesh(&self.live, MaterialDesc::Metal(self.metal));
        substrate.add_to_scene(h);
        self.mesh = Some(h);

        for spec in &self.config.lights {
            let light = substrate.create_light(spec.to_light(1.0, LIGHT_DISTANCE));
            let orbit = Orbit::ring(
                spec.position,
                self.config.light_orbit_radius,
                self.config.light_orbit_speed,
            );
            self.lights.push((light, orbit));
        }
    }

    fn frame(&mut self, time: &FrameTime, substrate: &mut dyn RenderSubstrate) {
        self.engine.advance(&self.targets, time.delta, &mut self.rng);
        self.engine.apply(&self.targets, time.elapsed, &mut self.live);
        if let Some(h) = self.mesh {
            substrate.update_geometry(h, &self.live);
        }

        for (light, orbit) in &self.lights {
            substrate.set_light_position(*light, orbit.position(time.elapsed));
        }

        self.update_material(time.elapsed, substrate);
    }

    fn apply_control(&mut self, event: &ControlEvent, substrate: &mut dyn RenderSubstrate) -> Result<()> {
        match event {
            ControlEvent::AutoMorph(on) => self.engine.auto_morph = *on,
            ControlEvent::MorphSpeed(v) => self.engine.speed = *v,
            ControlEvent::Turbulence(v) => self.engine.turbulence.amplitude = *v,
            ControlEvent::ShapeSelect(mode) => self.engine.select(&self.targets, *mode)?,
            ControlEvent::ColorSelect(name) => {
                let preset = MetalPreset::by_name(name)?;
                self.config.metal = name.clone();
                self.swap_material(preset, substrate);
                log::info!("metal preset switched to {name}");
            }
            _ => super::ignore("liquid metal", event),
        }
        Ok(())
    }
}
