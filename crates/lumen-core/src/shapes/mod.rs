//! Shape generators.
//!
//! Parametric primitives, the geodesic icosahedron, the two procedural
//! composites (crystal and abstract blob), a dispatcher that builds any of
//! them from a spec, and the area-weighted resampler used to equalize
//! vertex counts across morph targets.

pub mod builder;
pub mod crystal;
pub mod organic;
pub mod polyhedron;
pub mod primitives;
pub mod sampler;

pub use builder::{build_kind, build_shape, ShapeKind, ShapeSpec};
pub use sampler::{resample, SurfaceSampler};
