//! Image cards: the on-screen rectangles the carousel scrolls through.
//!
//! A card is built once per successfully decoded image, positioned by the
//! [`layout`] planner, and then recycled in place for the lifetime of the
//! carousel. The per-frame scheduler only ever writes `position.z` (and
//! `start_depth` on recycle); the picker only ever writes `scale`.

/// Decoding image sources and sizing card shells.
pub mod builder;
/// Concurrent image loading with a deadline.
pub mod loader;
/// Lane and initial-depth assignment.
pub mod layout;

use std::fmt;

use glam::{Mat4, Vec2, Vec3};

pub use builder::{card_size, DecodedImage, ImageSource};
pub use layout::{LayoutPlanner, LANE_PATTERN};
pub use loader::{ImageLoader, LoadOutcome, PendingImages};

use crate::picking::{Pickable, Ray};

/// Stable card identifier: its position in the depth queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// One image's rectangle in the scene.
///
/// `V` is the rendering backend's opaque visual handle.
#[derive(Debug, Clone)]
pub struct VisualCard<V> {
    /// Queue position, also the layout index.
    pub id: CardId,
    /// Index of the image in the caller's source list.
    pub source_index: usize,
    /// Backend handle for the textured rectangle.
    pub visual: V,
    /// Center of the rectangle; `x`/`y` never change after placement.
    pub position: Vec3,
    /// Unscaled width and height in world units.
    pub size: Vec2,
    /// Depth at placement, updated each time the card is recycled.
    pub start_depth: f32,
    /// URI opened when the card is activated.
    pub activation_target: Option<String>,
    /// Highlight transform; identity unless hovered with a non-unit
    /// hover scale.
    pub scale: Vec3,
}

impl<V> VisualCard<V> {
    /// Model matrix mapping the unit quad (`[-0.5, 0.5]²` in the XY plane)
    /// onto this card.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(self.scale)
            * Mat4::from_scale(self.size.extend(1.0))
    }

    /// Half extents of the rectangle after the highlight transform.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        self.size * self.scale.truncate() * 0.5
    }

    /// Reset the highlight transform.
    pub fn clear_highlight(&mut self) {
        self.scale = Vec3::ONE;
    }
}

impl<V> Pickable for VisualCard<V> {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_rect(self.position, self.half_extents())
    }

    fn card_id(&self) -> Option<CardId> {
        Some(self.id)
    }
}
