//! The rendering collaborator seam.

use glam::Vec2;

use crate::camera::Camera;
use crate::card::{DecodedImage, VisualCard};
use crate::options::LightingOptions;

/// What the carousel needs from a 3D renderer.
///
/// [`CardRenderer`](crate::gpu::CardRenderer) is the wgpu implementation;
/// tests substitute a recording fake.
pub trait RenderBackend {
    /// Opaque handle to one textured rectangle.
    type Visual;
    /// Draw or upload failure.
    type Error: std::fmt::Display;

    /// Upload `image` as a textured rectangle of `size` world units.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the texture cannot be created.
    fn create_card_visual(
        &mut self,
        image: &DecodedImage,
        size: Vec2,
    ) -> Result<Self::Visual, Self::Error>;

    /// Apply ambient light and background color.
    fn set_lighting(&mut self, lighting: &LightingOptions);

    /// Resize the drawable surface to `width × height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of `cards` as seen from `camera`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the frame could not be acquired or
    /// presented.
    fn draw(
        &mut self,
        camera: &Camera,
        cards: &[VisualCard<Self::Visual>],
    ) -> Result<(), Self::Error>;
}
