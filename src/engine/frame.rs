//! The render loop driver: one scheduler pass plus one draw per frame.
//!
//! The host re-schedules the frame callback unconditionally (a redraw
//! request per frame); pausing is a flag polled at the top of each frame, so
//! resuming needs nothing more than clearing it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{Carousel, RenderBackend};

/// Shared, externally settable pause flag.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    /// A flag that starts unpaused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the flag.
    pub fn set(&self, paused: bool) {
        self.0.store(paused, Ordering::Relaxed);
    }

    /// Whether frames are currently skipped.
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Flip the flag, returning the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

/// What one frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Paused: no scheduling, no draw.
    Paused,
    /// Cards advanced and the frame was drawn.
    Drawn {
        /// Cards that passed the camera and were sent to the back.
        recycled: usize,
    },
}

impl<B: RenderBackend> Carousel<B> {
    /// Run one frame: advance every card, then draw.
    ///
    /// Depth always advances before the draw, so the displayed frame shows
    /// this tick's positions.
    ///
    /// # Errors
    ///
    /// Returns the backend's draw error. Card depths have already advanced
    /// by then; the next frame proceeds normally.
    pub fn frame(&mut self) -> Result<FrameOutcome, B::Error> {
        if self.pause.get() {
            return Ok(FrameOutcome::Paused);
        }
        let recycled = self.scheduler.tick(&mut self.cards);
        self.backend.draw(&self.camera, &self.cards)?;
        self.frame_timing.end_frame();
        Ok(FrameOutcome::Drawn { recycled })
    }

    /// Handle to the pause flag, for callers outside the frame loop.
    #[must_use]
    pub fn pause_handle(&self) -> PauseFlag {
        self.pause.clone()
    }

    /// Set or clear the pause flag.
    pub fn set_paused(&self, paused: bool) {
        self.pause.set(paused);
    }

    /// Whether frames are currently skipped.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause.get()
    }

    /// Flip the pause flag, returning the new value.
    pub fn toggle_pause(&self) -> bool {
        let paused = self.pause.toggle();
        log::info!("carousel {}", if paused { "paused" } else { "resumed" });
        paused
    }
}
