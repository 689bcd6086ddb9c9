use glam::Vec2;

use crate::error::LumenError;

/// Whether an analyser feed exists at all.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioState {
    /// Nothing has been decoded yet, or decoding failed.
    Unavailable(String),
    /// Spectrum frames are arriving.
    Ready,
}

/// Outcome of an asynchronous audio load, delivered to the frame loop.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    TrackLoaded,
    Failed(LumenError),
}

/// Latest magnitude-per-bucket spectrum from an external analyser.
#[derive(Clone, Debug)]
pub struct AudioInput {
    spectrum: Vec<u8>,
    state: AudioState,
    enabled: bool,
}

impl Default for AudioInput {
    fn default() -> Self {
        Self {
            spectrum: Vec::new(),
            state: AudioState::Unavailable("no audio loaded".to_owned()),
            enabled: false,
        }
    }
}

impl AudioInput {
    pub fn state(&self) -> &AudioState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn spectrum(&self) -> &[u8] {
        &self.spectrum
    }

    /// Store the newest analyser frame. The first frame marks the feed ready.
    pub fn set_spectrum(&mut self, bins: &[u8]) {
        if self.state != AudioState::Ready {
            log::info!("audio spectrum available ({} buckets)", bins.len());
            self.state = AudioState::Ready;
        }
        self.spectrum.clear();
        self.spectrum.extend_from_slice(bins);
    }

    /// A freshly loaded track enables reactivity straight away.
    pub fn track_loaded(&mut self) {
        self.state = AudioState::Ready;
        self.enabled = true;
        log::info!("audio track loaded, reactivity on");
    }

    pub fn handle(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::TrackLoaded => self.track_loaded(),
            AudioEvent::Failed(err) => self.fail(&err),
        }
    }

    /// Record a decode/capture failure and switch the feature off.
    pub fn fail(&mut self, err: &LumenError) {
        log::warn!("audio disabled: {err}");
        self.state = AudioState::Unavailable(err.to_string());
        self.enabled = false;
        self.spectrum.clear();
    }

    /// Toggle reactivity. Enabling without a feed is refused and logged;
    /// returns the resulting state.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if enabled {
            if let AudioState::Unavailable(reason) = &self.state {
                log::warn!("audio reactivity requested but unavailable: {reason}");
                self.enabled = false;
                return false;
            }
        }
        self.enabled = enabled;
        enabled
    }

    /// 1 while enabled with a non-empty spectrum, 0 otherwise.
    pub fn influence(&self) -> f32 {
        if self.enabled && self.state == AudioState::Ready && !self.spectrum.is_empty() {
            1.0
        } else {
            0.0
        }
    }

    /// Normalized magnitude of the bucket at normalized position `t`
    /// (nearest bucket, clamped to the spectrum edges).
    pub fn magnitude_at(&self, t: f32) -> f32 {
        if self.spectrum.is_empty() {
            return 0.0;
        }
        let len = self.spectrum.len();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let idx = ((t * len as f32) as usize).min(len - 1);
        self.spectrum[idx] as f32 / 255.0
    }
}

/// Height added at texture coordinate `uv` by the audio spectrum.
///
/// Radial distance from the centre of the surface selects the bucket, so low
/// frequencies ring the middle and high frequencies the rim.
pub fn audio_lift(uv: Vec2, input: &AudioInput) -> f32 {
    let influence = input.influence();
    if influence < 0.01 {
        return 0.0;
    }
    let dist = (uv - Vec2::splat(0.5)).length() * 2.0;
    input.magnitude_at(dist) * influence
}
