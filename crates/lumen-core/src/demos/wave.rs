use crate::config::{DemoConfig, WaveConfig};
use crate::controls::ControlEvent;
use crate::error::Result;
use crate::ray::{world_to_local, Ray};
use crate::reactive::audio::{AudioEvent, AudioInput};
use crate::reactive::pointer::PointerInput;
use crate::reactive::slot::LatestInput;
use crate::runtime::{Demo, FrameTime};
use crate::shapes::primitives::plane;
use crate::substrate::{MaterialDesc, MeshHandle, RenderSubstrate};
use crate::wave::WaveSurface;

/// Pointer- and audio-reactive wave surface.
///
/// Input handlers publish into the slots returned by
/// [`pointer_rays`](Self::pointer_rays), [`spectra`](Self::spectra) and
/// [`audio_events`](Self::audio_events); each frame takes whatever is
/// pending before updating the surface.
pub struct WaveScene {
    config: WaveConfig,
    surface: WaveSurface,
    pointer: PointerInput,
    audio: AudioInput,
    rays: LatestInput<Ray>,
    spectrum: LatestInput<Vec<u8>>,
    audio_events: LatestInput<AudioEvent>,
    wave_mesh: Option<MeshHandle>,
    interaction_plane: Option<MeshHandle>,
}

impl WaveScene {
    pub fn new(config: WaveConfig) -> Result<Self> {
        config.validate()?;
        let surface = WaveSurface::new(config.surface.clone())?;
        let pointer = PointerInput {
            enabled: config.enable_mouse_reactivity,
            falloff: config.pointer_falloff,
            ..PointerInput::default()
        };
        let mut audio = AudioInput::default();
        audio.set_enabled(config.enable_audio);
        log::info!("wave scene: {} vertices", surface.shape().vertex_count());
        Ok(Self {
            config,
            surface,
            pointer,
            audio,
            rays: LatestInput::new(),
            spectrum: LatestInput::new(),
            audio_events: LatestInput::new(),
            wave_mesh: None,
            interaction_plane: None,
        })
    }

    pub fn surface(&self) -> &WaveSurface {
        &self.surface
    }

    pub fn pointer(&self) -> &PointerInput {
        &self.pointer
    }

    pub fn audio(&self) -> &AudioInput {
        &self.audio
    }

    pub fn wave_mesh(&self) -> Option<MeshHandle> {
        self.wave_mesh
    }

    pub fn interaction_plane(&self) -> Option<MeshHandle> {
        self.interaction_plane
    }

    /// World-space pointer rays from the page.
    pub fn pointer_rays(&self) -> LatestInput<Ray> {
        self.rays.clone()
    }

    /// Analyser frames from the page.
    pub fn spectra(&self) -> LatestInput<Vec<u8>> {
        self.spectrum.clone()
    }

    /// Audio load results from the page.
    pub fn audio_events(&self) -> LatestInput<AudioEvent> {
        self.audio_events.clone()
    }

    fn poll_inputs(&mut self, substrate: &dyn RenderSubstrate) {
        if let Some(event) = self.audio_events.take() {
            self.audio.handle(event);
        }
        if let Some(bins) = self.spectrum.take() {
            if self.audio.is_enabled() {
                self.audio.set_spectrum(&bins);
            }
        }

        let Some(ray) = self.rays.take() else { return };
        if !self.pointer.enabled {
            return;
        }
        let (Some(plane), Some(wave)) = (self.interaction_plane, self.wave_mesh) else {
            return;
        };
        if let Some(hit) = substrate.intersect(&ray, plane) {
            let local = world_to_local(hit, &substrate.transform(wave).unwrap_or_default());
            self.pointer.position = Some(local.truncate());
        }
    }
}

impl Demo for WaveScene {
    fn mount(&mut self, substrate: &mut dyn RenderSubstrate) {
        substrate.set_bloom(self.config.bloom);

        let wave = substrate.create_mesh(self.surface.shape(), MaterialDesc::VertexColors);
        substrate.add_to_scene(wave);
        self.wave_mesh = Some(wave);

        let side = self.config.surface.size * 4.0;
        match plane(side, side, 1, 1) {
            Ok(quad) => {
                let h = substrate.create_mesh(&quad, MaterialDesc::Invisible);
                substrate.add_to_scene(h);
                self.interaction_plane = Some(h);
            }
            Err(err) => log::warn!("pointer disabled, no interaction plane: {err}"),
        }
    }

    fn frame(&mut self, time: &FrameTime, substrate: &mut dyn RenderSubstrate) {
        self.poll_inputs(substrate);

        let t = self.surface.surface_time(time.elapsed);
        self.surface.update(t, &self.pointer, &self.audio);
        if let Some(h) = self.wave_mesh {
            substrate.update_geometry(h, self.surface.shape());
            substrate.update_colors(h, self.surface.colors());
        }
    }

    fn apply_control(&mut self, event: &ControlEvent, _substrate: &mut dyn RenderSubstrate) -> Result<()> {
        match *event {
            ControlEvent::EnableAudio(on) => {
                let active = self.audio.set_enabled(on);
                log::info!("audio reactivity: {active}");
            }
            ControlEvent::EnableMouseReactivity(on) => {
                self.pointer.enabled = on;
                log::info!("mouse reactivity: {on}");
            }
            ControlEvent::WaveIntensity(amplitude) => self.surface.params.amplitude = amplitude,
            ControlEvent::WaveSpeed(speed) => self.surface.params.wave_speed = speed,
            _ => super::ignore("wave", event),
        }
        Ok(())
    }
}
