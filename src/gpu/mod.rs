//! GPU rendering of the carousel.
//!
//! Provides wgpu device/surface initialization, texture upload, and the
//! card pipeline that implements [`RenderBackend`](crate::engine::RenderBackend).

/// The textured-quad card renderer.
pub mod card_renderer;
/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth buffer and card image textures.
pub mod texture;

pub use card_renderer::{CardRenderer, CardVisual};
pub use render_context::{RenderContext, RenderContextError};
