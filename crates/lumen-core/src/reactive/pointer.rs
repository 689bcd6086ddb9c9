use glam::Vec2;

use crate::math::smoothstep;

/// Pointer (cursor) interaction state in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Mouse reactivity toggle.
    pub enabled: bool,
    /// Last local-space hit on the interaction plane, if any.
    pub position: Option<Vec2>,
    /// Distance at which the lift fades to zero.
    pub falloff: f32,
    /// Peak lift directly under the pointer.
    pub strength: f32,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            enabled: true,
            position: None,
            falloff: 1.0,
            strength: 2.0,
        }
    }
}

impl PointerInput {
    /// 1 while reactivity is enabled and the pointer has hit the surface,
    /// 0 otherwise.
    pub fn influence(&self) -> f32 {
        if self.enabled && self.position.is_some() {
            1.0
        } else {
            0.0
        }
    }
}

/// Height added at `point` by the pointer.
///
/// `(1 - smoothstep(0, falloff, d)) * influence * strength`, where `d` is the
/// distance from the pointer. Maximal at the pointer, zero beyond `falloff`,
/// and exactly zero while the influence gate is closed.
pub fn pointer_lift(point: Vec2, input: &PointerInput) -> f32 {
    let influence = input.influence();
    if influence <= 0.01 {
        return 0.0;
    }
    let Some(center) = input.position else {
        return 0.0;
    };
    let dist = point.distance(center);
    let falloff = input.falloff.max(1e-4);
    (1.0 - smoothstep(0.0, falloff, dist)) * influence * input.strength
}
