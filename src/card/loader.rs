//! Concurrent image loading with a deadline.
//!
//! Sources are decoded on a bounded rayon pool; results come back over a
//! channel in completion order and are slotted back into source order, so
//! card placement never depends on which download finished first.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;

use web_time::{Duration, Instant};

use super::builder::{self, DecodedImage, ImageSource};
use crate::error::{CarouselError, DecodeError};
use crate::options::LoadingOptions;

type DecodeResult = Result<DecodedImage, DecodeError>;

/// Result of loading one source.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Position of the source in the caller's list.
    pub index: usize,
    /// Source label, for logs and activation-target lookup.
    pub label: String,
    /// Decoded pixels or the reason there are none.
    pub result: DecodeResult,
}

/// Queues source decodes on a bounded worker pool.
pub struct ImageLoader;

impl ImageLoader {
    /// Start decoding every source with the default decoder.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ThreadSpawn`] if the decode pool cannot be
    /// started.
    pub fn spawn(
        sources: Vec<ImageSource>,
        loading: &LoadingOptions,
    ) -> Result<PendingImages, CarouselError> {
        let limits = loading.clone();
        let workers = loading.decode_workers(sources.len());
        Self::spawn_with(sources, loading.timeout(), workers, move |source| {
            builder::decode(source, &limits)
        })
    }

    /// Start decoding every source with a custom decoder on at most
    /// `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ThreadSpawn`] if the decode pool cannot be
    /// started.
    pub fn spawn_with<F>(
        sources: Vec<ImageSource>,
        timeout: Duration,
        workers: usize,
        decoder: F,
    ) -> Result<PendingImages, CarouselError>
    where
        F: Fn(&ImageSource) -> DecodeResult + Send + Sync + 'static,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|idx| format!("image-decode-{idx}"))
            .build()
            .map_err(CarouselError::ThreadSpawn)?;
        let (tx, rx) = mpsc::channel();
        let decoder = Arc::new(decoder);
        let labels: Vec<String> =
            sources.iter().map(ImageSource::label).collect();

        for (index, source) in sources.into_iter().enumerate() {
            let tx = tx.clone();
            let decoder = Arc::clone(&decoder);
            pool.spawn(move || {
                let result = decoder(&source);
                // The receiver is gone once the deadline passed.
                let _ = tx.send((index, result));
            });
        }

        log::debug!(
            "queued {} image decodes on {} workers",
            labels.len(),
            pool.current_num_threads()
        );
        let remaining = labels.len();
        Ok(PendingImages {
            rx,
            slots: labels.iter().map(|_| None).collect(),
            labels,
            remaining,
            deadline: Instant::now() + timeout,
            _pool: pool,
        })
    }
}

/// Decodes in flight. Collect with [`try_finish`](Self::try_finish) from a
/// frame callback, or block with [`wait`](Self::wait).
pub struct PendingImages {
    rx: Receiver<(usize, DecodeResult)>,
    labels: Vec<String>,
    slots: Vec<Option<DecodeResult>>,
    remaining: usize,
    deadline: Instant,
    /// Workers exit once the queued decodes drain after this is dropped.
    _pool: rayon::ThreadPool,
}

impl PendingImages {
    /// Number of sources still being decoded.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Total number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there were no sources at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Collect whatever has arrived without blocking.
    ///
    /// Returns the outcomes in source order once every load finished or the
    /// deadline passed; `None` while loads are still in flight.
    pub fn try_finish(&mut self) -> Option<Vec<LoadOutcome>> {
        while self.remaining > 0 {
            match self.rx.try_recv() {
                Ok((index, result)) => self.store(index, result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Some(self.take_outcomes());
                }
            }
        }
        if self.remaining == 0 || Instant::now() >= self.deadline {
            return Some(self.take_outcomes());
        }
        None
    }

    /// Block until every load finished or the deadline passed.
    #[must_use]
    pub fn wait(mut self) -> Vec<LoadOutcome> {
        while self.remaining > 0 {
            let left = self.deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok((index, result)) => self.store(index, result),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                    break
                }
            }
        }
        self.take_outcomes()
    }

    fn store(&mut self, index: usize, result: DecodeResult) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.is_none() {
                *slot = Some(result);
                self.remaining -= 1;
            }
        }
    }

    fn take_outcomes(&mut self) -> Vec<LoadOutcome> {
        let timed_out = Instant::now() >= self.deadline;
        let outcomes: Vec<LoadOutcome> = self
            .slots
            .iter_mut()
            .zip(&self.labels)
            .enumerate()
            .map(|(index, (slot, label))| {
                let result = slot.take().unwrap_or(Err(if timed_out {
                    DecodeError::Timeout
                } else {
                    DecodeError::WorkerLost
                }));
                LoadOutcome {
                    index,
                    label: label.clone(),
                    result,
                }
            })
            .collect();
        self.remaining = 0;
        outcomes
    }
}

/// Split outcomes into decoded images (source order kept) and logged
/// failures.
#[must_use]
pub fn successful(outcomes: Vec<LoadOutcome>) -> Vec<(usize, DecodedImage)> {
    let total = outcomes.len();
    let images: Vec<(usize, DecodedImage)> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome.result {
            Ok(image) => Some((outcome.index, image)),
            Err(e) => {
                log::warn!("skipping image {}: {e}", outcome.label);
                None
            }
        })
        .collect();
    if images.len() < total {
        log::warn!("{} of {total} images failed to load", total - images.len());
    }
    images
}
