use super::event::{InputEvent, PointerEvent};

/// Tracks cursor position and held buttons, producing [`PointerEvent`]s.
///
/// Releases only update the mask; the picker never sees them.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: (f32, f32),
    buttons: u8,
}

impl PointerTracker {
    /// Create a tracker at the origin with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Currently held button mask.
    #[must_use]
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    /// Fold a raw input event into the tracker.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<PointerEvent> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.position = (x, y);
                Some(PointerEvent::moved(x, y, self.buttons))
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.buttons |= button.mask();
                    let (x, y) = self.position;
                    Some(PointerEvent::down(x, y, self.buttons))
                } else {
                    self.buttons &= !button.mask();
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::{MouseButton, PointerKind};

    #[test]
    fn press_reports_last_cursor_position() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        let ev = tracker
            .handle_event(InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            })
            .unwrap();
        assert_eq!(ev.kind, PointerKind::Down);
        assert_eq!((ev.x, ev.y), (10.0, 20.0));
        assert_eq!(ev.buttons, 1);
        assert!(ev.is_activating());
    }

    #[test]
    fn drag_motion_carries_buttons_but_never_activates() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let ev = tracker
            .handle_event(InputEvent::CursorMoved { x: 5.0, y: 5.0 })
            .unwrap();
        assert_eq!(ev.buttons, 1);
        assert!(!ev.is_activating());
    }

    #[test]
    fn release_clears_mask_without_event() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        let released = tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: false,
        });
        assert!(released.is_none());
        assert_eq!(tracker.buttons(), 0);
    }
}
