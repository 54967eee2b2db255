//! Pointer picking and card activation.
//!
//! The scene holds only a handful of axis-aligned rectangles, so picking is
//! a CPU ray cast: the pointer is mapped to normalized device coordinates,
//! unprojected through the camera into a [`Ray`], and tested against every
//! [`Pickable`] object. The nearest hit wins.

mod picker;
mod ray;

pub use picker::{
    pick_nearest, pointer_to_ndc, Activation, Hit, PickOutcome, PointerPicker,
};
pub use ray::Ray;

use crate::card::CardId;

/// Anything a pointer ray can hit.
///
/// The only capability the picker cares about beyond the hit distance is
/// whether the object is a card; non-card objects still occlude what lies
/// behind them.
pub trait Pickable {
    /// Distance along `ray` to the object's surface, if the ray hits it.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// The card this object is, if it is one.
    fn card_id(&self) -> Option<CardId> {
        None
    }
}
