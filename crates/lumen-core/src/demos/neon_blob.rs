#[cfg(feature = "parallel")]
use rayon::prelude::*;

use glam::Vec3;
use rand::Rng;

use crate::color::Color;
use crate::config::{DemoConfig, NeonBlobConfig};
use crate::controls::ControlEvent;
use crate::displace::{neon_gradient, neon_offset, neon_pulse};
use crate::error::Result;
use crate::orbit::{animate_all, Orbit};
use crate::runtime::{Demo, FrameTime};
use crate::shape::Shape;
use crate::shapes::polyhedron::icosahedron;
use crate::shapes::primitives::sphere;
use crate::substrate::{MaterialDesc, MeshHandle, RenderSubstrate, Transform, UniformValue};

/// Noise-displaced icosphere with a neon gradient and a particle swarm.
pub struct NeonBlobScene {
    config: NeonBlobConfig,
    rest: Shape,
    live: Shape,
    colors: Vec<Color>,
    orbits: Vec<Orbit>,
    particle_colors: Vec<Color>,
    particle_positions: Vec<Vec3>,
    particle_shape: Shape,
    blob_mesh: Option<MeshHandle>,
    particle_meshes: Vec<MeshHandle>,
}

impl NeonBlobScene {
    pub fn new<R: Rng + ?Sized>(config: NeonBlobConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let rest = icosahedron(config.radius, config.detail)?;
        let (orbits, particle_colors): (Vec<Orbit>, Vec<Color>) = (0..config.particle_count)
            .map(|_| {
                let orbit = Orbit::random_particle(rng);
                (orbit, Color::from_hsl(rng.random::<f32>(), 0.8, 0.8))
            })
            .unzip();
        let particle_shape = sphere(config.particle_size, 8, 8)?;
        log::info!(
            "neon blob scene: {} vertices, {} particles",
            rest.vertex_count(),
            config.particle_count
        );
        Ok(Self {
            live: rest.clone(),
            colors: vec![Color::BLACK; rest.vertex_count()],
            rest,
            config,
            particle_positions: Vec::with_capacity(orbits.len()),
            orbits,
            particle_colors,
            particle_shape,
            blob_mesh: None,
            particle_meshes: Vec::new(),
        })
    }

    pub fn live(&self) -> &Shape {
        &self.live
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Particle centres from the last frame.
    pub fn particle_positions(&self) -> &[Vec3] {
        &self.particle_positions
    }

    pub fn blob_mesh(&self) -> Option<MeshHandle> {
        self.blob_mesh
    }

    pub fn particle_meshes(&self) -> &[MeshHandle] {
        &self.particle_meshes
    }

    /// Displace the rest surface and recolour it for time `t`.
    fn displace(&mut self, t: f32) {
        let colors = self.config.colors;
        let rest = &self.rest;
        let shade = |i: usize| {
            let p = neon_offset(rest.positions[i], rest.normals[i], t);
            (p, neon_gradient(&colors, p, t))
        };

        #[cfg(feature = "parallel")]
        let out: Vec<(Vec3, Color)> = (0..rest.vertex_count()).into_par_iter().map(shade).collect();

        #[cfg(not(feature = "parallel"))]
        let out: Vec<(Vec3, Color)> = (0..rest.vertex_count()).map(shade).collect();

        for (i, (p, c)) in out.into_iter().enumerate() {
            self.live.positions[i] = p;
            self.colors[i] = c;
        }
        self.live.compute_normals();
    }
}

impl Demo for NeonBlobScene {
    fn mount(&mut self, substrate: &mut dyn RenderSubstrate) {
        substrate.set_bloom(self.config.bloom);

        let blob = substrate.create_mesh(
            &self.live,
            MaterialDesc::NeonGradient {
                colors: self.config.colors,
            },
        );
        substrate.add_to_scene(blob);
        self.blob_mesh = Some(blob);

        for color in &self.particle_colors {
            let h = substrate.create_mesh(
                &self.particle_shape,
                MaterialDesc::Basic {
                    color: *color,
                    opacity: 0.8,
                },
            );
            substrate.add_to_scene(h);
            self.particle_meshes.push(h);
        }
    }

    fn frame(&mut self, time: &FrameTime, substrate: &mut dyn RenderSubstrate) {
        let t = time.elapsed;
        self.displace(t);

        if let Some(h) = self.blob_mesh {
            substrate.update_geometry(h, &self.live);
            substrate.update_colors(h, &self.colors);
            substrate.set_uniform(h, "time", UniformValue::Float(t));
            substrate.set_uniform(h, "pulse", UniformValue::Float(neon_pulse(t)));
            substrate.set_transform(h, Transform::from_euler(0.0, t * 0.1, t * 0.05));
        }

        animate_all(&self.orbits, t, &mut self.particle_positions);
        for ((h, orbit), position) in self
            .particle_meshes
            .iter()
            .zip(&self.orbits)
            .zip(&self.particle_positions)
        {
            let transform = Transform::from_position(*position).with_scale(orbit.pulse_scale(t));
            substrate.set_transform(*h, transform);
        }
    }

    fn apply_control(&mut self, event: &ControlEvent, _substrate: &mut dyn RenderSubstrate) -> Result<()> {
        super::ignore("neon blob", event);
        Ok(())
    }
}
