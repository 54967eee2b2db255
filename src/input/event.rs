/// Platform-agnostic input events.
///
/// These are fed into a [`PointerTracker`](super::PointerTracker) which
/// turns them into the [`PointerEvent`]s the picker consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute viewport position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Bit this button occupies in a [`PointerEvent::buttons`] mask.
    #[must_use]
    pub fn mask(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Middle => 4,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Whether a pointer event came from motion or a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// The pointer moved. Never activates a card.
    Move,
    /// A button went down.
    Down,
}

/// A pointer sample in viewport pixels, with the buttons held at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Motion or press.
    pub kind: PointerKind,
    /// Horizontal position in physical pixels from the viewport's left edge.
    pub x: f32,
    /// Vertical position in physical pixels from the viewport's top edge.
    pub y: f32,
    /// Bitmask of held buttons (1 = left, 2 = right, 4 = middle).
    pub buttons: u8,
}

impl PointerEvent {
    /// A motion sample.
    #[must_use]
    pub fn moved(x: f32, y: f32, buttons: u8) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
            buttons,
        }
    }

    /// A button-press sample.
    #[must_use]
    pub fn down(x: f32, y: f32, buttons: u8) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
            buttons,
        }
    }

    /// True for a press with at least one button held.
    #[must_use]
    pub fn is_activating(&self) -> bool {
        self.kind == PointerKind::Down && self.buttons != 0
    }
}
