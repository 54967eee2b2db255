use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Default URI opened when a card is activated.
pub const DEFAULT_ACTIVATION_TARGET: &str = "https://www.bilibili.com/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Carousel", inline)]
#[serde(default)]
/// Depth layout and scroll parameters.
pub struct CarouselOptions {
    /// Depth coordinate of the camera plane. Cards recycle once they reach it.
    #[schemars(skip)]
    pub camera_depth: f32,
    /// Initial depth of the first card.
    #[schemars(title = "Start Depth", range(min = -20.0, max = -0.5), extend("step" = 0.1))]
    pub start_depth: f32,
    /// Depth distance between consecutive cards.
    #[schemars(title = "Lane Spacing", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub lane_spacing: f32,
    /// Depth units advanced per rendered frame.
    #[schemars(title = "Speed", range(min = 0.001, max = 0.2), extend("step" = 0.001))]
    pub depth_speed: f32,
    /// World-space card width; height follows the image aspect ratio.
    #[schemars(title = "Card Width", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub card_width: f32,
    /// Uniform scale applied to the card under the pointer (1.0 = no highlight).
    #[schemars(title = "Hover Scale", range(min = 1.0, max = 1.5), extend("step" = 0.01))]
    pub hover_scale: f32,
    /// URI opened when a card without an override is activated. Empty disables
    /// activation.
    #[schemars(skip)]
    pub activation_target: String,
    /// Per-source activation targets, keyed by the source string as given on
    /// the command line.
    #[schemars(skip)]
    pub activation_overrides: HashMap<String, String>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            camera_depth: 0.0,
            start_depth: -3.0,
            lane_spacing: 1.2,
            depth_speed: 0.02,
            card_width: 1.0,
            hover_scale: 1.0,
            activation_target: DEFAULT_ACTIVATION_TARGET.to_owned(),
            activation_overrides: HashMap::new(),
        }
    }
}

impl CarouselOptions {
    /// Check the numeric invariants the depth scheduler relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidOptions`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), CarouselError> {
        let positive = [
            ("lane_spacing", self.lane_spacing),
            ("depth_speed", self.depth_speed),
            ("card_width", self.card_width),
            ("hover_scale", self.hover_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CarouselError::InvalidOptions(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.start_depth.is_finite()
            || self.start_depth >= self.camera_depth
        {
            return Err(CarouselError::InvalidOptions(format!(
                "start_depth ({}) must lie behind camera_depth ({})",
                self.start_depth, self.camera_depth
            )));
        }
        // Recycled cards land at min_depth + lane_spacing, min_depth <= start_depth.
        let landing = self.start_depth + self.lane_spacing + self.depth_speed;
        if landing >= self.camera_depth {
            return Err(CarouselError::InvalidOptions(format!(
                "start_depth + lane_spacing + depth_speed ({landing}) must lie \
                 behind camera_depth ({})",
                self.camera_depth
            )));
        }
        if self.depth_speed >= self.lane_spacing {
            return Err(CarouselError::InvalidOptions(format!(
                "depth_speed ({}) must be smaller than lane_spacing ({})",
                self.depth_speed, self.lane_spacing
            )));
        }
        Ok(())
    }

    /// Activation target for the given source string, if any.
    #[must_use]
    pub fn target_for(&self, source: &str) -> Option<String> {
        let target = self
            .activation_overrides
            .get(source)
            .unwrap_or(&self.activation_target);
        (!target.is_empty()).then(|| target.clone())
    }
}
