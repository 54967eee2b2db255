//! Per-frame card motion.

pub mod depth;

pub use depth::DepthScheduler;
