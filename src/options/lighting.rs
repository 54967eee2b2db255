use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient light and background color.
pub struct LightingOptions {
    /// Ambient light color (linear RGB).
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub ambient: f32,
    /// Clear color behind the cards.
    #[schemars(skip)]
    pub background: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient: 0.8,
            background: [0.0, 0.0, 0.0],
        }
    }
}

impl LightingOptions {
    /// Ambient color pre-multiplied by intensity.
    #[must_use]
    pub fn ambient_rgb(&self) -> [f32; 3] {
        self.ambient_color.map(|c| c * self.ambient)
    }
}
