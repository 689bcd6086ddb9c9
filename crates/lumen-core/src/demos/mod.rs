//! The four demo contexts.
//!
//! Each owns all of its state (geometry, animators, inputs and the handles
//! it was given by the substrate) and implements [`crate::runtime::Demo`].

pub mod crystal;
pub mod liquid_metal;
pub mod neon_blob;
pub mod wave;

pub use crystal::CrystalScene;
pub use liquid_metal::LiquidMetalScene;
pub use neon_blob::NeonBlobScene;
pub use wave::WaveScene;

use crate::controls::ControlEvent;

/// Log and drop a control the demo has no use for.
pub(crate) fn ignore(demo: &str, event: &ControlEvent) {
    log::debug!("{demo}: ignoring {event:?}");
}
