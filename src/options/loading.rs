use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Loading", inline)]
#[serde(default)]
/// Image fetch and decode limits.
pub struct LoadingOptions {
    /// Seconds to wait for all images before giving up on the stragglers.
    #[schemars(title = "Timeout (s)", range(min = 1.0, max = 120.0), extend("step" = 1.0))]
    pub timeout_secs: f32,
    /// Upper bound on concurrent decode workers.
    #[schemars(title = "Decode Threads", range(min = 1, max = 64))]
    pub max_decode_threads: usize,
    /// Largest accepted remote payload in bytes.
    #[schemars(skip)]
    pub max_download_bytes: u64,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 15.0,
            max_decode_threads: 8,
            max_download_bytes: 32 * 1024 * 1024,
        }
    }
}

impl LoadingOptions {
    /// The load deadline as a [`Duration`]. Values are clamped to
    /// `[0, 3600]` seconds.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        let secs = if self.timeout_secs.is_nan() {
            0.0
        } else {
            self.timeout_secs.clamp(0.0, 3600.0)
        };
        Duration::from_secs_f32(secs)
    }

    /// Decode pool size for `sources` images: the machine's parallelism,
    /// capped by `max_decode_threads` and never more than there are images.
    #[must_use]
    pub fn decode_workers(&self, sources: usize) -> usize {
        let cores = std::thread::available_parallelism()
            .map_or(4, std::num::NonZeroUsize::get);
        cores.min(self.max_decode_threads).min(sources).max(1)
    }
}
