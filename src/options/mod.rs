//! Centralized carousel options with TOML file support.
//!
//! All tweakable settings (depth layout and speed, camera, lighting, image
//! loading, keybindings) are consolidated here. Options serialize to/from
//! TOML so a viewer session can be configured from a file.

mod camera;
mod carousel;
mod keybindings;
mod lighting;
mod loading;

use std::path::Path;

pub use camera::CameraOptions;
pub use carousel::{CarouselOptions, DEFAULT_ACTIVATION_TARGET};
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use loading::LoadingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[carousel]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Depth layout and scroll parameters.
    pub carousel: CarouselOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Ambient light and background.
    pub lighting: LightingOptions,
    /// Image fetch and decode limits.
    pub loading: LoadingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::OptionsParse`] on malformed TOML and
    /// [`CarouselError::InvalidOptions`] if the carousel section fails
    /// validation.
    pub fn from_toml(content: &str) -> Result<Self, CarouselError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| CarouselError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        opts.carousel.validate()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise the errors
    /// of [`Options::from_toml`].
    pub fn load(path: &Path) -> Result<Self, CarouselError> {
        let content =
            std::fs::read_to_string(path).map_err(CarouselError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), CarouselError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CarouselError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(CarouselError::Io)?;
            }
        }
        std::fs::write(path, content).map_err(CarouselError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[carousel]
depth_speed = 0.05
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.carousel.depth_speed, 0.05);
        // Everything else should be default
        assert_eq!(opts.carousel.lane_spacing, 1.2);
        assert_eq!(opts.carousel.start_depth, -3.0);
        assert_eq!(opts.lighting.ambient, 0.8);
        assert_eq!(opts.camera.fovy, 45.0);
    }

    #[test]
    fn invalid_carousel_section_is_rejected() {
        let toml_str = r"
[carousel]
lane_spacing = -1.0
";
        assert!(matches!(
            Options::from_toml(toml_str),
            Err(CarouselError::InvalidOptions(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Options::from_toml("[carousel"),
            Err(CarouselError::OptionsParse(_))
        ));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn loaded_keybindings_rebuild_reverse_map() {
        let toml_str = r#"
[keybindings.bindings]
toggle_pause = "KeyP"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyP"),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(opts.keybindings.lookup("Space"), None);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("carousel"));
        assert!(props.contains_key("lighting"));
        assert!(!props.contains_key("keybindings"));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "depthreel-options-{}",
            std::process::id()
        ));
        let path = dir.join("carousel.toml");
        let mut opts = Options::default();
        opts.carousel.hover_scale = 1.05;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded.carousel.hover_scale, 1.05);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
