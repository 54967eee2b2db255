//! Camera system for the carousel viewport.
//!
//! A fixed perspective camera on the view axis, looking down `-z` at the
//! oncoming cards, plus the GPU uniform mirroring it.

/// Core camera struct and GPU uniform types.
pub mod core;

pub use self::core::{Camera, CameraUniform};
