use serde::{Deserialize, Serialize};

/// Carousel actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_pause = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Flip the render loop's pause flag.
    TogglePause,
    /// Re-apply the container's current size to the renderer.
    Resize,
    /// Close the viewer.
    Quit,
}
