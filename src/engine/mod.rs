//! The carousel session: everything one running carousel owns.
//!
//! [`Carousel`] holds the options, the cards, the camera, the depth
//! scheduler, the pointer picker, the pause flag and the rendering backend in
//! one struct, so every operation (frame, pick, resize) reaches the renderer
//! through `self` rather than through state captured at setup time.

mod backend;
mod construction;
mod frame;
mod host;
mod input;

pub use backend::RenderBackend;
pub use construction::CarouselSetup;
pub use frame::{FrameOutcome, PauseFlag};
pub use host::{open_with_system, Host};

use crate::animation::DepthScheduler;
use crate::camera::Camera;
use crate::card::{CardId, VisualCard};
use crate::error::CarouselError;
use crate::input::PointerTracker;
use crate::options::Options;
use crate::picking::PointerPicker;
use crate::util::frame_timing::FrameTiming;

/// A running depth-scrolling image carousel.
///
/// # Construction
///
/// Start with [`CarouselSetup::start`], which resolves the container and
/// launches the image loads, then hand the setup a backend with
/// [`CarouselSetup::finish`]. [`Carousel::assemble`] builds directly from
/// already-decoded images.
///
/// # Frame loop
///
/// Call [`frame`](Self::frame) from the host's per-refresh callback and
/// re-schedule that callback every time, paused or not. Pointer input goes
/// through [`handle_input`](Self::handle_input) or
/// [`handle_pointer`](Self::handle_pointer).
pub struct Carousel<B: RenderBackend> {
    /// Options the carousel was built with.
    options: Options,
    /// Host container the viewport is sized from.
    container_id: String,
    /// Current viewport size in physical pixels.
    viewport: (u32, u32),
    /// Fixed camera on the view axis.
    camera: Camera,
    /// Cards in queue order; `cards[i].id == CardId(i)`.
    cards: Vec<VisualCard<B::Visual>>,
    /// Per-frame depth update.
    scheduler: DepthScheduler,
    /// Hover selection and activation.
    picker: PointerPicker,
    /// Cursor position and held buttons.
    pointer: PointerTracker,
    /// Polled at the top of every frame.
    pause: PauseFlag,
    /// Smoothed FPS over drawn frames.
    frame_timing: FrameTiming,
    /// Rendering collaborator.
    backend: B,
}

impl<B: RenderBackend> Carousel<B> {
    /// Re-apply the container's current pixel size to the renderer and
    /// camera.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::ContainerNotFound`] if the container has
    /// gone away.
    pub fn resize<H: Host + ?Sized>(
        &mut self,
        host: &H,
    ) -> Result<(), CarouselError> {
        let (width, height) = host
            .container_size(&self.container_id)
            .ok_or_else(|| {
                CarouselError::ContainerNotFound(self.container_id.clone())
            })?;
        self.resize_to(width, height);
        Ok(())
    }

    /// Resize to an explicit pixel size. Ignores zero-sized dimensions.
    pub fn resize_to(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.resize(width, height);
        self.backend.resize(width, height);
        log::debug!("viewport resized to {width}x{height}");
    }

    /// Cards in queue order.
    #[must_use]
    pub fn cards(&self) -> &[VisualCard<B::Visual>] {
        &self.cards
    }

    /// The card currently under the pointer.
    #[must_use]
    pub fn selected(&self) -> Option<CardId> {
        self.picker.selected()
    }

    /// Options the carousel was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The frozen farthest depth.
    #[must_use]
    pub fn min_depth(&self) -> f32 {
        self.scheduler.min_depth()
    }

    /// Current viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Identifier of the host container.
    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// The carousel camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Smoothed frames per second over drawn frames.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Smoothed FPS and drawn-frame count, at most once per `interval`.
    pub fn fps_report(
        &mut self,
        interval: web_time::Duration,
    ) -> Option<(f32, u64)> {
        let fps = self.frame_timing.take_report(interval)?;
        Some((fps, self.frame_timing.frames()))
    }

    /// The rendering backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the rendering backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{image, FakeBackend, FakeHost};
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn carousel(n: usize) -> Carousel<FakeBackend> {
        let images = (0..n)
            .map(|i| (i, image(&format!("img{i}"), 4, 3)))
            .collect();
        Carousel::assemble(
            Options::default(),
            "stage",
            (800, 600),
            images,
            FakeBackend::default(),
        )
    }

    #[test]
    fn frame_advances_before_drawing() {
        let mut c = carousel(3);
        assert_eq!(c.frame().unwrap(), FrameOutcome::Drawn { recycled: 0 });
        let drawn = &c.backend().draws[0];
        assert!(approx(drawn[0], -3.0 + 0.02));
        assert!(approx(drawn[2], -5.4 + 0.02));
    }

    #[test]
    fn paused_frames_do_nothing_and_resume_without_reentry() {
        let mut c = carousel(2);
        let handle = c.pause_handle();
        handle.set(true);
        for _ in 0..10 {
            assert_eq!(c.frame().unwrap(), FrameOutcome::Paused);
        }
        assert!(c.backend().draws.is_empty());
        assert!(approx(c.cards()[0].position.z, -3.0));

        handle.set(false);
        assert!(matches!(c.frame().unwrap(), FrameOutcome::Drawn { .. }));
        assert_eq!(c.backend().draws.len(), 1);
    }

    #[test]
    fn draw_failure_does_not_stop_later_frames() {
        let mut c = carousel(1);
        c.backend_mut().fail_draw = true;
        assert!(c.frame().is_err());
        assert!(approx(c.cards()[0].position.z, -2.98));
        c.backend_mut().fail_draw = false;
        assert!(c.frame().is_ok());
        assert!(approx(c.cards()[0].position.z, -2.96));
    }

    #[test]
    fn cards_recycle_over_time() {
        let mut c = carousel(3);
        let min_depth = c.min_depth();
        let mut total = 0;
        for _ in 0..400 {
            if let FrameOutcome::Drawn { recycled } = c.frame().unwrap() {
                total += recycled;
            }
        }
        assert!(total > 0);
        for card in c.cards() {
            assert!(card.position.z >= min_depth - 1e-4);
            assert!(card.position.z < 0.02 + 1e-4);
        }
    }

    #[test]
    fn lone_card_near_the_camera_stays_bounded() {
        let mut options = Options::default();
        options.carousel.start_depth = -1.3;
        options.carousel.validate().unwrap();
        let mut c = Carousel::assemble(
            options,
            "stage",
            (800, 600),
            vec![(0, image("only", 4, 3))],
            FakeBackend::default(),
        );
        let min_depth = c.min_depth();
        let mut total = 0;
        for _ in 0..1000 {
            if let FrameOutcome::Drawn { recycled } = c.frame().unwrap() {
                total += recycled;
            }
            let z = c.cards()[0].position.z;
            assert!(z >= min_depth - 1e-4 && z < 0.02 + 1e-4, "z={z}");
        }
        // Each recycle has to be followed by a real advance.
        assert!(total > 1 && total < 500, "recycled {total} times");
    }

    #[test]
    fn card_recycling_in_front_of_the_camera_is_rejected() {
        let host = FakeHost::with_container("stage", (800, 600));
        let mut options = Options::default();
        options.carousel.start_depth = -0.5;
        assert!(matches!(
            CarouselSetup::start(Vec::new(), "stage", &host, options),
            Err(CarouselError::InvalidOptions(_))
        ));
    }

    #[test]
    fn resize_reads_container_and_reaches_backend() {
        let mut c = carousel(1);
        let host = FakeHost::with_container("stage", (1024, 512));
        c.resize(&host).unwrap();
        assert_eq!(c.viewport(), (1024, 512));
        assert_eq!(c.backend().resizes, vec![(1024, 512)]);
        assert!(approx(c.camera().aspect, 2.0));
    }

    #[test]
    fn resize_without_container_fails() {
        let mut c = carousel(1);
        let host = FakeHost::default();
        assert!(matches!(
            c.resize(&host),
            Err(CarouselError::ContainerNotFound(id)) if id == "stage"
        ));
        assert!(c.backend().resizes.is_empty());
    }

    #[test]
    fn zero_size_resize_is_ignored() {
        let mut c = carousel(1);
        c.resize_to(0, 300);
        assert_eq!(c.viewport(), (800, 600));
        assert!(c.backend().resizes.is_empty());
    }
}
