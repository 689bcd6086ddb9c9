use glam::{Vec2, Vec3};
use lumen_core::config::{CrystalConfig, DemoConfig, LiquidMetalConfig, NeonBlobConfig, WaveConfig};
use lumen_core::controls::ControlEvent;
use lumen_core::demos::{CrystalScene, LiquidMetalScene, NeonBlobScene, WaveScene};
use lumen_core::ray::Ray;
use lumen_core::reactive::audio::AudioEvent;
use lumen_core::reactive::slot::LatestInput;
use lumen_core::runtime::FrameLoop;
use lumen_core::LumenError;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

mod staging;

pub use staging::{GpuVertex, StagingSubstrate};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
}

fn js_err(err: LumenError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn config_or_default<C: DemoConfig>(json: Option<String>) -> Result<C, JsValue> {
    match json {
        Some(json) if !json.trim().is_empty() => C::from_json(&json).map_err(js_err),
        _ => Ok(C::default()),
    }
}

/// Browsers have no stable seed to offer; draw one from `Math.random`.
fn browser_rng() -> SmallRng {
    SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

/// Frame loop, control and buffer accessors shared by every demo binding.
macro_rules! demo_bindings {
    ($name:ident) => {
        #[wasm_bindgen]
        impl $name {
            /// Run one frame at `now_ms` (a `requestAnimationFrame`
            /// timestamp). Returns whether to request another frame.
            pub fn tick(&mut self, now_ms: f64) -> bool {
                self.frame_loop.tick(now_ms / 1000.0)
            }

            pub fn stop(&mut self) {
                self.frame_loop.stop();
            }

            /// Forward a UI control change, e.g. `("turbulence", "40")`.
            pub fn control(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
                let event = ControlEvent::parse(name, value).map_err(js_err)?;
                self.frame_loop.control(&event).map_err(js_err)
            }

            pub fn mesh_ids(&self) -> Vec<u32> {
                self.frame_loop.substrate().visible_ids()
            }

            pub fn is_dirty(&self, id: u32) -> bool {
                self.frame_loop.substrate().is_dirty(id)
            }

            /// Pack mesh `id` into the staging buffers; returns its vertex count.
            pub fn stage(&mut self, id: u32) -> usize {
                self.frame_loop.substrate_mut().stage(id)
            }

            pub fn vertex_buffer_ptr(&self) -> *const u8 {
                self.frame_loop.substrate().vertex_bytes().as_ptr()
            }

            pub fn vertex_buffer_byte_length(&self) -> usize {
                self.frame_loop.substrate().vertex_bytes().len()
            }

            pub fn index_buffer_ptr(&self) -> *const u32 {
                self.frame_loop.substrate().indices().as_ptr()
            }

            pub fn index_count(&self) -> usize {
                self.frame_loop.substrate().indices().len()
            }

            pub fn model_matrix(&self, id: u32) -> Vec<f32> {
                self.frame_loop.substrate().model_matrix(id).to_vec()
            }

            pub fn material(&self, id: u32) -> String {
                self.frame_loop.substrate().material_json(id).to_string()
            }

            pub fn lights(&self) -> String {
                self.frame_loop.substrate().lights_json().to_string()
            }

            pub fn light_positions(&self) -> Vec<f32> {
                self.frame_loop.substrate().light_positions()
            }

            pub fn bloom(&self) -> String {
                self.frame_loop.substrate().bloom_json().to_string()
            }
        }
    };
}

#[wasm_bindgen]
pub struct CrystalDemo {
    frame_loop: FrameLoop<CrystalScene, StagingSubstrate>,
}

#[wasm_bindgen]
impl CrystalDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<CrystalDemo, JsValue> {
        let config: CrystalConfig = config_or_default(config_json)?;
        let scene = CrystalScene::new(config, &mut browser_rng()).map_err(js_err)?;
        web_sys::console::log_1(&"WASM crystal demo created".into());
        Ok(CrystalDemo {
            frame_loop: FrameLoop::new(scene, StagingSubstrate::new()),
        })
    }
}

demo_bindings!(CrystalDemo);

#[wasm_bindgen]
pub struct LiquidMetalDemo {
    frame_loop: FrameLoop<LiquidMetalScene<SmallRng>, StagingSubstrate>,
}

#[wasm_bindgen]
impl LiquidMetalDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<LiquidMetalDemo, JsValue> {
        let config: LiquidMetalConfig = config_or_default(config_json)?;
        let scene = LiquidMetalScene::new(config, browser_rng()).map_err(js_err)?;
        web_sys::console::log_1(
            &format!(
                "WASM liquid metal demo created: {} vertices",
                scene.targets().vertex_count()
            )
            .into(),
        );
        Ok(LiquidMetalDemo {
            frame_loop: FrameLoop::new(scene, StagingSubstrate::new()),
        })
    }

    pub fn set_camera(&mut self, x: f32, y: f32, z: f32) {
        self.frame_loop.demo_mut().set_camera(Vec3::new(x, y, z));
    }
}

demo_bindings!(LiquidMetalDemo);

#[wasm_bindgen]
pub struct NeonBlobDemo {
    frame_loop: FrameLoop<NeonBlobScene, StagingSubstrate>,
}

#[wasm_bindgen]
impl NeonBlobDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<NeonBlobDemo, JsValue> {
        let config: NeonBlobConfig = config_or_default(config_json)?;
        let scene = NeonBlobScene::new(config, &mut browser_rng()).map_err(js_err)?;
        web_sys::console::log_1(&"WASM neon blob demo created".into());
        Ok(NeonBlobDemo {
            frame_loop: FrameLoop::new(scene, StagingSubstrate::new()),
        })
    }
}

demo_bindings!(NeonBlobDemo);

#[wasm_bindgen]
pub struct WaveDemo {
    frame_loop: FrameLoop<WaveScene, StagingSubstrate>,
    rays: LatestInput<Ray>,
    spectra: LatestInput<Vec<u8>>,
    audio_events: LatestInput<AudioEvent>,
}

#[wasm_bindgen]
impl WaveDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WaveDemo, JsValue> {
        let config: WaveConfig = config_or_default(config_json)?;
        let scene = WaveScene::new(config).map_err(js_err)?;
        let (rays, spectra, audio_events) = (scene.pointer_rays(), scene.spectra(), scene.audio_events());
        web_sys::console::log_1(&"WASM wave demo created".into());
        Ok(WaveDemo {
            frame_loop: FrameLoop::new(scene, StagingSubstrate::new()),
            rays,
            spectra,
            audio_events,
        })
    }

    /// Pointer moved to normalized device coordinates `(x, y)` of a
    /// perspective camera at `eye` looking at the origin.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_move(
        &mut self,
        x: f32, y: f32,
        eye_x: f32, eye_y: f32, eye_z: f32,
        fov_y_degrees: f32,
        aspect: f32,
    ) {
        let eye = Vec3::new(eye_x, eye_y, eye_z);
        if let Some(ray) = Ray::from_camera(Vec2::new(x, y), eye, Vec3::ZERO, fov_y_degrees.to_radians(), aspect) {
            self.rays.publish(ray);
        }
    }

    /// Latest analyser frame (`getByteFrequencyData` output).
    pub fn set_spectrum(&mut self, bins: &[u8]) {
        self.spectra.publish(bins.to_vec());
    }

    pub fn audio_loaded(&mut self) {
        self.audio_events.publish(AudioEvent::TrackLoaded);
    }

    pub fn audio_failed(&mut self, message: String) {
        self.audio_events
            .publish(AudioEvent::Failed(LumenError::ExternalInputUnavailable(message)));
    }
}

demo_bindings!(WaveDemo);
