//! Input handling: platform-agnostic events, pointer tracking, and the
//! bindable key actions.

/// Platform-agnostic input and pointer events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Cursor position and button-mask tracking.
pub mod pointer;

pub use event::{InputEvent, MouseButton, PointerEvent, PointerKind};
pub use keyboard::KeyAction;
pub use pointer::PointerTracker;
