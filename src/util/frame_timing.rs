use web_time::{Duration, Instant};

/// Smoothed frame rate over drawn frames, with a periodic report.
#[derive(Debug)]
pub struct FrameTiming {
    /// Timestamp of the previous drawn frame.
    last_frame: Instant,
    /// Exponential moving average of instantaneous FPS.
    smoothed_fps: f32,
    /// Weight given to each new sample (0.0-1.0).
    smoothing: f32,
    /// Frames drawn since creation.
    frames: u64,
    /// When [`take_report`](Self::take_report) last fired.
    last_report: Instant,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start timing from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
            last_report: now,
        }
    }

    /// Record a drawn frame.
    ///
    /// Paused frames are not recorded, so the gap after a resume is folded
    /// into a single slow sample.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The smoothed FPS, at most once per `interval`.
    pub fn take_report(&mut self, interval: Duration) -> Option<f32> {
        let now = Instant::now();
        if now.duration_since(self.last_report) < interval {
            return None;
        }
        self.last_report = now;
        Some(self.smoothed_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames() {
        let mut timing = FrameTiming::new();
        for _ in 0..5 {
            timing.end_frame();
        }
        assert_eq!(timing.frames(), 5);
        assert!(timing.fps() > 0.0);
    }

    #[test]
    fn report_is_rate_limited() {
        let mut timing = FrameTiming::new();
        assert!(timing.take_report(Duration::ZERO).is_some());
        assert!(timing.take_report(Duration::from_secs(3600)).is_none());
    }
}
