//! Two-phase carousel construction.
//!
//! [`CarouselSetup::start`] does everything that can fail fast (options
//! validation, container lookup) synchronously and only then launches the
//! image decodes. The host polls the setup from its event loop and turns it
//! into a [`Carousel`] once a backend exists and the loads have settled.

use glam::Vec3;

use super::{Carousel, Host, PauseFlag, RenderBackend};
use crate::animation::DepthScheduler;
use crate::camera::Camera;
use crate::card::loader::successful;
use crate::card::{
    CardId, DecodedImage, ImageLoader, ImageSource, LayoutPlanner, LoadOutcome,
    PendingImages, VisualCard,
};
use crate::error::CarouselError;
use crate::input::PointerTracker;
use crate::options::Options;
use crate::picking::PointerPicker;
use crate::util::frame_timing::FrameTiming;

/// A carousel whose container is resolved and whose images are loading.
pub struct CarouselSetup {
    options: Options,
    container_id: String,
    viewport: (u32, u32),
    pending: PendingImages,
    outcomes: Option<Vec<LoadOutcome>>,
}

impl CarouselSetup {
    /// Validate `options`, resolve the container, then start decoding.
    ///
    /// # Errors
    ///
    /// - [`CarouselError::InvalidOptions`] if the carousel options are
    ///   inconsistent.
    /// - [`CarouselError::ContainerNotFound`] if the host has no container
    ///   named `container_id`. No decode is started in that case.
    /// - [`CarouselError::ThreadSpawn`] if the decode pool cannot start.
    pub fn start<H: Host + ?Sized>(
        sources: Vec<ImageSource>,
        container_id: &str,
        host: &H,
        options: Options,
    ) -> Result<Self, CarouselError> {
        options.carousel.validate()?;
        let viewport = host.container_size(container_id).ok_or_else(|| {
            CarouselError::ContainerNotFound(container_id.to_owned())
        })?;
        log::info!(
            "container {container_id} is {}x{}; loading {} images",
            viewport.0,
            viewport.1,
            sources.len()
        );
        let pending = ImageLoader::spawn(sources, &options.loading)?;
        Ok(Self {
            options,
            container_id: container_id.to_owned(),
            viewport,
            pending,
            outcomes: None,
        })
    }

    /// Container size at the time of the lookup.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Options the carousel will be built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Collect finished loads without blocking. Returns `true` once every
    /// load has settled (or the deadline passed).
    pub fn poll_ready(&mut self) -> bool {
        if self.outcomes.is_none() {
            self.outcomes = self.pending.try_finish();
        }
        self.outcomes.is_some()
    }

    /// Build the carousel, blocking until the loads settle if
    /// [`poll_ready`](Self::poll_ready) has not reported them yet.
    pub fn finish<B: RenderBackend>(self, backend: B) -> Carousel<B> {
        let outcomes = match self.outcomes {
            Some(outcomes) => outcomes,
            None => self.pending.wait(),
        };
        Carousel::assemble(
            self.options,
            &self.container_id,
            self.viewport,
            successful(outcomes),
            backend,
        )
    }

    /// Build the carousel like [`finish`](Self::finish), then re-read the
    /// container size through `host` so resizes during loading are not lost.
    pub fn finish_in<B: RenderBackend, H: Host + ?Sized>(
        self,
        backend: B,
        host: &H,
    ) -> Carousel<B> {
        let mut carousel = self.finish(backend);
        if let Err(e) = carousel.resize(host) {
            log::warn!("keeping load-time viewport: {e}");
        }
        carousel
    }
}

impl<B: RenderBackend> Carousel<B> {
    /// Build a carousel from already-decoded images.
    ///
    /// `images` pairs each image with its index in the caller's source list
    /// and must be in source order. Cards receive consecutive queue indices
    /// in that order; an image the backend cannot upload is skipped without
    /// leaving a gap in the depth queue.
    pub fn assemble(
        options: Options,
        container_id: &str,
        viewport: (u32, u32),
        images: Vec<(usize, DecodedImage)>,
        mut backend: B,
    ) -> Self {
        backend.set_lighting(&options.lighting);

        let carousel = &options.carousel;
        let mut planner = LayoutPlanner::new(carousel);
        let mut cards = Vec::with_capacity(images.len());
        for (source_index, image) in images {
            let size = image.card_size(carousel.card_width);
            let visual = match backend.create_card_visual(&image, size) {
                Ok(visual) => visual,
                Err(e) => {
                    log::warn!("skipping image {}: {e}", image.label);
                    continue;
                }
            };
            let index = cards.len();
            let position = planner.place(index);
            cards.push(VisualCard {
                id: CardId(index),
                source_index,
                visual,
                position,
                size,
                start_depth: position.z,
                activation_target: carousel.target_for(&image.label),
                scale: Vec3::ONE,
            });
        }

        let min_depth = planner.finish();
        let scheduler = DepthScheduler::new(carousel, min_depth);
        let camera = Camera::looking_down_depth(
            &options.camera,
            carousel.camera_depth,
            viewport,
        );
        log::info!(
            "carousel ready: {} cards, depth range [{min_depth}, {})",
            cards.len(),
            carousel.camera_depth
        );

        Self {
            picker: PointerPicker::new(carousel.hover_scale),
            container_id: container_id.to_owned(),
            viewport,
            camera,
            cards,
            scheduler,
            pointer: PointerTracker::new(),
            pause: PauseFlag::new(),
            frame_timing: FrameTiming::new(),
            backend,
            options,
        }
    }
}
