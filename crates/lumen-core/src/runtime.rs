//! Frame clock and the per-demo animation loop.
//!
//! The host owns the display-refresh callback: it calls
//! [`FrameLoop::tick`] with the current timestamp and schedules the next
//! callback only while `tick` returns `true`.

use crate::controls::ControlEvent;
use crate::error::Result;
use crate::substrate::RenderSubstrate;

/// Wall-clock delta and total elapsed time, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub elapsed: f32,
}

/// Elapsed-time clock fed with explicit timestamps.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    last: Option<f64>,
    elapsed: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to timestamp `now` (seconds). The first call yields a zero
    /// delta; timestamps going backwards yield zero, never negative.
    pub fn tick(&mut self, now: f64) -> FrameTime {
        let delta = match self.last {
            Some(last) if now.is_finite() => (now - last).max(0.0),
            _ => 0.0,
        };
        if now.is_finite() {
            self.last = Some(self.last.map_or(now, |last| last.max(now)));
        }
        self.elapsed += delta;
        FrameTime {
            delta: delta as f32,
            elapsed: self.elapsed as f32,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

/// One animated demo.
pub trait Demo {
    /// Create meshes and lights. Called once before the first frame.
    fn mount(&mut self, substrate: &mut dyn RenderSubstrate);

    /// Advance the animation and push this frame's state to `substrate`.
    /// Never fails: degraded inputs fall back to their inert values.
    fn frame(&mut self, time: &FrameTime, substrate: &mut dyn RenderSubstrate);

    /// React to a UI control. Events that do not apply are ignored.
    fn apply_control(&mut self, event: &ControlEvent, substrate: &mut dyn RenderSubstrate)
        -> Result<()>;
}

/// Drives a [`Demo`] against a substrate, one frame per tick.
pub struct FrameLoop<D, S> {
    demo: D,
    substrate: S,
    clock: Clock,
    frames: u64,
    running: bool,
}

impl<D: Demo, S: RenderSubstrate> FrameLoop<D, S> {
    /// Mount `demo` on `substrate` and get ready for the first tick.
    pub fn new(mut demo: D, mut substrate: S) -> Self {
        demo.mount(&mut substrate);
        Self {
            demo,
            substrate,
            clock: Clock::new(),
            frames: 0,
            running: true,
        }
    }

    /// Run exactly one frame at timestamp `now` unless stopped. Returns
    /// whether another frame should be requested.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.running {
            return false;
        }
        let time = self.clock.tick(now);
        self.demo.frame(&time, &mut self.substrate);
        self.frames += 1;
        self.running
    }

    pub fn control(&mut self, event: &ControlEvent) -> Result<()> {
        self.demo.apply_control(event, &mut self.substrate)
    }

    /// Stop requesting frames. Later ticks are no-ops.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }

    pub fn demo_mut(&mut self) -> &mut D {
        &mut self.demo
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    pub fn substrate_mut(&mut self) -> &mut S {
        &mut self.substrate
    }
}
