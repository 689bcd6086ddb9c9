//! External reactive inputs.
//!
//! Each input is polled once per frame and gated by an influence scalar in
//! `[0, 1]`; a missing input simply leaves its influence at 0.

pub mod audio;
pub mod pointer;
pub mod slot;
