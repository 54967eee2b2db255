//! Shared utilities for the carousel engine.

/// Smoothed frame-rate measurement.
pub mod frame_timing;
