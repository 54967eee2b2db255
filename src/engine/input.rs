//! Routing raw input into the picker and key actions.

use super::{Carousel, Host, RenderBackend};
use crate::input::{InputEvent, KeyAction, PointerEvent};
use crate::picking::PickOutcome;

impl<B: RenderBackend> Carousel<B> {
    /// Feed a raw cursor or button event through the pointer tracker.
    ///
    /// Returns `None` for events the picker never sees (button releases).
    pub fn handle_input<H: Host + ?Sized>(
        &mut self,
        event: InputEvent,
        host: &mut H,
    ) -> Option<PickOutcome> {
        let pointer = self.pointer.handle_event(event)?;
        Some(self.handle_pointer(&pointer, host))
    }

    /// Resolve one pointer-move or pointer-down event.
    pub fn handle_pointer<H: Host + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
    ) -> PickOutcome {
        self.picker.handle_event(
            event,
            self.viewport,
            &self.camera,
            &mut self.cards,
            &[],
            host,
        )
    }

    /// Run the action bound to `key`, if any.
    ///
    /// Pause and resize are handled here; [`KeyAction::Quit`] is returned
    /// for the host to act on.
    pub fn handle_key<H: Host + ?Sized>(
        &mut self,
        key: &str,
        host: &H,
    ) -> Option<KeyAction> {
        let action = self.options.keybindings.lookup(key)?;
        match action {
            KeyAction::TogglePause => {
                let _ = self.toggle_pause();
            }
            KeyAction::Resize => {
                if let Err(e) = self.resize(host) {
                    log::warn!("resize failed: {e}");
                }
            }
            KeyAction::Quit => {}
        }
        Some(action)
    }
}
