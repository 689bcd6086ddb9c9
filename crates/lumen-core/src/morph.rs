//! Morph targets and the morph state machine.
//!
//! A [`MorphTargetSet`] holds named shapes that all share one vertex count.
//! A [`MorphEngine`] walks through them: every tick it advances a clock
//! inside the current transition, rolls over to a new target pair when the
//! transition completes, and writes the blended, turbulence-displaced
//! positions into the live mesh.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::displace::Turbulence;
use crate::error::{LumenError, Result};
use crate::shape::Shape;
use crate::shapes::builder::{build_kind, ShapeKind};
use crate::shapes::sampler::resample;

/// Named shapes with identical vertex counts.
#[derive(Clone, Debug)]
pub struct MorphTargetSet {
    entries: Vec<(ShapeKind, Shape)>,
}

impl MorphTargetSet {
    /// Build the standard liquid-metal set at `resolution`: the sphere is the
    /// base, every other kind is resampled to the sphere's vertex count.
    pub fn build<R: Rng + ?Sized>(resolution: u32, rng: &mut R) -> Result<Self> {
        let mut shapes = Vec::with_capacity(ShapeKind::MORPH_SET.len());
        for kind in ShapeKind::MORPH_SET {
            shapes.push((kind, build_kind(kind, resolution)?));
        }
        Self::from_shapes(shapes, rng)
    }

    /// Equalize arbitrary shapes to the vertex count of the first one.
    pub fn from_shapes<R: Rng + ?Sized>(
        shapes: Vec<(ShapeKind, Shape)>,
        rng: &mut R,
    ) -> Result<Self> {
        let Some(base_count) = shapes.first().map(|(_, s)| s.vertex_count()) else {
            return Err(LumenError::invalid("shapes", "a morph set needs at least one shape"));
        };
        if base_count == 0 {
            return Err(LumenError::invalid("shapes", "base shape has no vertices"));
        }

        let mut entries: Vec<(ShapeKind, Shape)> = Vec::with_capacity(shapes.len());
        for (kind, shape) in shapes {
            if entries.iter().any(|(k, _)| *k == kind) {
                return Err(LumenError::invalid("shapes", format!("duplicate target `{kind}`")));
            }
            let shape = resample(&shape, base_count, rng)?;
            entries.push((kind, shape));
        }

        log::info!(
            "morph target set ready: {} targets x {} vertices",
            entries.len(),
            base_count
        );
        Ok(Self { entries })
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&Shape> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }

    pub fn contains(&self, kind: ShapeKind) -> bool {
        self.get(kind).is_some()
    }

    /// Target ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared vertex count of every target.
    pub fn vertex_count(&self) -> usize {
        self.entries.first().map_or(0, |(_, s)| s.vertex_count())
    }
}

/// How the next target is chosen at rollover.
///
/// Spelled `"random"` or a shape name in configs and control events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PickMode {
    /// Always morph toward this shape.
    Fixed(ShapeKind),
    /// Any target other than the current one, uniformly.
    RandomDistinct,
}

impl fmt::Display for PickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(kind) => write!(f, "{kind}"),
            Self::RandomDistinct => f.write_str("random"),
        }
    }
}

impl FromStr for PickMode {
    type Err = LumenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(Self::RandomDistinct),
            name => name.parse().map(Self::Fixed),
        }
    }
}

impl TryFrom<String> for PickMode {
    type Error = LumenError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PickMode> for String {
    fn from(mode: PickMode) -> Self {
        mode.to_string()
    }
}

/// Choose the target that follows `current`.
///
/// In random mode the result differs from `current` whenever the set has at
/// least two targets.
pub fn pick_next<R: Rng + ?Sized>(
    set: &MorphTargetSet,
    current: ShapeKind,
    mode: PickMode,
    rng: &mut R,
) -> ShapeKind {
    match mode {
        PickMode::Fixed(kind) => kind,
        PickMode::RandomDistinct => {
            let candidates: Vec<ShapeKind> = set.ids().filter(|k| *k != current).collect();
            if candidates.is_empty() {
                current
            } else {
                candidates[rng.random_range(0..candidates.len())]
            }
        }
    }
}

/// Position inside the current transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphState {
    pub current: ShapeKind,
    pub next: ShapeKind,
    /// Always in `[0, duration)`.
    pub elapsed: f32,
    pub duration: f32,
}

impl MorphState {
    /// Blend factor in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }
}

/// Morph state machine plus the per-vertex update.
///
/// With `auto_morph` off the engine is idle: the clock does not advance and
/// the mesh holds its current blend (turbulence still animates).
#[derive(Clone, Debug)]
pub struct MorphEngine {
    pub state: MorphState,
    pub mode: PickMode,
    pub auto_morph: bool,
    pub speed: f32,
    pub turbulence: Turbulence,
}

impl MorphEngine {
    pub fn new<R: Rng + ?Sized>(
        set: &MorphTargetSet,
        start: ShapeKind,
        duration: f32,
        mode: PickMode,
        rng: &mut R,
    ) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(LumenError::invalid("duration", format!("must be positive, got {duration}")));
        }
        if !set.contains(start) {
            return Err(LumenError::invalid("start", format!("`{start}` is not a morph target")));
        }
        if let PickMode::Fixed(kind) = mode {
            if !set.contains(kind) {
                return Err(LumenError::invalid("mode", format!("`{kind}` is not a morph target")));
            }
        }
        let next = pick_next(set, start, mode, rng);
        Ok(Self {
            state: MorphState {
                current: start,
                next,
                elapsed: 0.0,
                duration,
            },
            mode,
            auto_morph: true,
            speed: 0.5,
            turbulence: Turbulence {
                amplitude: 0.3,
                scale: 0.8,
                speed: 0.2,
            },
        })
    }

    /// Advance the transition clock by `dt` seconds.
    ///
    /// Returns `true` when the transition completed this tick; the clock is
    /// then back at zero and the targets have rotated once.
    pub fn advance<R: Rng + ?Sized>(&mut self, set: &MorphTargetSet, dt: f32, rng: &mut R) -> bool {
        if !self.auto_morph {
            return false;
        }
        let step = dt * self.speed;
        if step.is_finite() && step > 0.0 {
            self.state.elapsed += step;
        }
        if self.state.elapsed >= self.state.duration {
            self.state.elapsed = 0.0;
            self.state.current = self.state.next;
            self.state.next = pick_next(set, self.state.current, self.mode, rng);
            log::debug!(
                "morph rollover: {} -> {}",
                self.state.current,
                self.state.next
            );
            return true;
        }
        false
    }

    /// Change how targets are picked, as the shape selector does.
    ///
    /// Choosing a fixed shape restarts the transition immediately: the
    /// pending target becomes current and the chosen one becomes next.
    pub fn select(&mut self, set: &MorphTargetSet, mode: PickMode) -> Result<()> {
        if let PickMode::Fixed(kind) = mode {
            if !set.contains(kind) {
                return Err(LumenError::invalid("shape", format!("`{kind}` is not a morph target")));
            }
            self.state.elapsed = 0.0;
            self.state.current = self.state.next;
            self.state.next = kind;
        }
        // Random mode only takes effect at the next rollover.
        self.mode = mode;
        Ok(())
    }

    /// Write the blended and displaced positions for `time` into `out`, then
    /// recompute its normals. `out` keeps its own topology.
    pub fn apply(&self, set: &MorphTargetSet, time: f32, out: &mut Shape) {
        let (Some(from), Some(to)) = (set.get(self.state.current), set.get(self.state.next)) else {
            return;
        };
        let t = self.state.progress();
        let turbulence = self.turbulence;
        let n = out.positions.len().min(from.vertex_count()).min(to.vertex_count());
        let (from, to) = (&from.positions[..n], &to.positions[..n]);

        let blend = |(i, p): (usize, &mut glam::Vec3)| {
            let base = from[i].lerp(to[i], t);
            *p = base + turbulence.offset(base, time);
        };

        #[cfg(feature = "parallel")]
        out.positions[..n].par_iter_mut().enumerate().for_each(blend);

        #[cfg(not(feature = "parallel"))]
        out.positions[..n].iter_mut().enumerate().for_each(blend);

        out.compute_normals();
    }
}
