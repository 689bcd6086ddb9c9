use glam::{EulerRot, Quat};
use rand::Rng;

use crate::color::Color;
use crate::config::{CrystalConfig, DemoConfig};
use crate::controls::ControlEvent;
use crate::error::Result;
use crate::materials::CrystalMaterial;
use crate::orbit::Orbit;
use crate::runtime::{Demo, FrameTime};
use crate::shape::Shape;
use crate::shapes::crystal::{crystal, fragments, Fragment};
use crate::shapes::primitives::sphere;
use crate::substrate::{LightHandle, MaterialDesc, MeshHandle, RenderSubstrate, Transform, UniformValue};

const LIGHT_DISTANCE: f32 = 20.0;
const MARKER_RADIUS: f32 = 0.1;

/// Rotating rainbow crystal with shards and four drifting lights.
pub struct CrystalScene {
    config: CrystalConfig,
    body: Shape,
    fragments: Vec<Fragment>,
    group: Transform,
    material: CrystalMaterial,
    body_mesh: Option<MeshHandle>,
    fragment_meshes: Vec<MeshHandle>,
    lights: Vec<(LightHandle, Orbit)>,
}

impl CrystalScene {
    pub fn new<R: Rng + ?Sized>(config: CrystalConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let body = crystal(&config.shape)?;
        let fragments = fragments(&config.shape, config.fragment_count, rng)?;
        log::info!(
            "crystal scene: {} body vertices, {} fragments",
            body.vertex_count(),
            fragments.len()
        );
        Ok(Self {
            material: config.material,
            config,
            body,
            fragments,
            group: Transform::IDENTITY,
            body_mesh: None,
            fragment_meshes: Vec::new(),
            lights: Vec::new(),
        })
    }

    pub fn config(&self) -> &CrystalConfig {
        &self.config
    }

    pub fn body_mesh(&self) -> Option<MeshHandle> {
        self.body_mesh
    }

    pub fn fragment_meshes(&self) -> &[MeshHandle] {
        &self.fragment_meshes
    }

    pub fn lights(&self) -> &[(LightHandle, Orbit)] {
        &self.lights
    }

    /// Current group rotation applied to the body and every shard.
    pub fn group(&self) -> Transform {
        self.group
    }

    fn meshes(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        self.body_mesh.into_iter().chain(self.fragment_meshes.iter().copied())
    }

    fn place(&self, substrate: &mut dyn RenderSubstrate) {
        if let Some(h) = self.body_mesh {
            substrate.set_transform(h, self.group);
        }
        for (h, frag) in self.fragment_meshes.iter().zip(&self.fragments) {
            let local = Transform {
                position: frag.position,
                rotation: frag.rotation,
                ..Transform::IDENTITY
            };
            substrate.set_transform(*h, local.then(&self.group));
        }
    }
}

impl Demo for CrystalScene {
    fn mount(&mut self, substrate: &mut dyn RenderSubstrate) {
        substrate.set_bloom(self.config.bloom);

        let body = substrate.create_mesh(&self.body, MaterialDesc::Crystal(self.material));
        substrate.add_to_scene(body);
        self.body_mesh = Some(body);

        for frag in &self.fragments {
            let h = substrate.create_mesh(&frag.shape, MaterialDesc::Crystal(self.material));
            substrate.add_to_scene(h);
            self.fragment_meshes.push(h);
        }
        self.place(substrate);

        // Marker spheres stay at the rest positions while the lights drift.
        let marker = sphere(MARKER_RADIUS, 8, 8).ok();
        for (i, spec) in self.config.lights.iter().enumerate() {
            let light = substrate.create_light(spec.to_light(self.config.light_intensity, LIGHT_DISTANCE));
            self.lights.push((light, Orbit::drift(spec.position, i)));

            if let Some(marker) = &marker {
                let h = substrate.create_mesh(
                    marker,
                    MaterialDesc::Basic {
                        color: Color::from_hex(spec.color),
                        opacity: 1.0,
                    },
                );
                substrate.set_transform(h, Transform::from_position(spec.position));
                substrate.add_to_scene(h);
            }
        }
    }

    fn frame(&mut self, time: &FrameTime, substrate: &mut dyn RenderSubstrate) {
        let t = time.elapsed;

        if self.config.auto_rotate {
            let speed = self.config.rotation_speed;
            self.group.rotation = Quat::from_euler(EulerRot::XYZ, 0.0, t * speed, t * speed * 0.3);
            self.place(substrate);
        }

        if self.config.enable_rainbow {
            self.material = self.config.material.rainbow(t, self.config.rainbow_speed);
            let handles: Vec<MeshHandle> = self.meshes().collect();
            for h in handles {
                substrate.set_uniform(h, "color", UniformValue::Color(self.material.color));
                substrate.set_uniform(h, "ior", UniformValue::Float(self.material.ior));
                substrate.set_uniform(h, "transmission", UniformValue::Float(self.material.transmission));
            }
        }

        for (light, orbit) in &self.lights {
            substrate.set_light_position(*light, orbit.position(t));
        }
    }

    fn apply_control(&mut self, event: &ControlEvent, _substrate: &mut dyn RenderSubstrate) -> Result<()> {
        match *event {
            ControlEvent::AutoRotate(on) => self.config.auto_rotate = on,
            ControlEvent::EnableRainbow(on) => self.config.enable_rainbow = on,
            _ => super::ignore("crystal", event),
        }
        Ok(())
    }
}
