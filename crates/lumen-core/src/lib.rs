//! Procedural geometry, morphing and reactive surface engine behind the
//! crystal, liquid-metal, neon-blob and wave demos.
//!
//! Rendering is not done here: every demo talks to a [`substrate::RenderSubstrate`]
//! and only produces vertex buffers, transforms and uniform values.

pub mod color;
pub mod config;
pub mod controls;
pub mod demos;
pub mod displace;
pub mod error;
pub mod materials;
pub mod math;
pub mod morph;
pub mod orbit;
pub mod ray;
pub mod reactive;
pub mod runtime;
pub mod scene;
pub mod shape;
pub mod shapes;
pub mod substrate;
pub mod wave;

pub use error::{LumenError, Result};
pub use shape::Shape;
