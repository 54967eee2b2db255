//! Decoding image sources and sizing card shells.

use std::fmt;
use std::path::PathBuf;

use glam::Vec2;
use image::RgbaImage;

use crate::error::DecodeError;
use crate::options::LoadingOptions;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk.
    Path(PathBuf),
    /// An `http` or `https` URL.
    Url(String),
    /// Encoded image bytes already in memory.
    Bytes {
        /// Name used in logs and for activation-target overrides.
        label: String,
        /// Encoded (PNG, JPEG, ...) image data.
        data: Vec<u8>,
    },
}

impl ImageSource {
    /// Classify a command-line style source string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_owned())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    /// The string this source is known by.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
            Self::Bytes { label, .. } => label.clone(),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// RGBA8 pixels ready for texture upload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Label of the source the pixels came from.
    pub label: String,
    /// Decoded pixels, top row first.
    pub pixels: RgbaImage,
}

impl DecodedImage {
    /// Pixel width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Pixel height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Card size for this image at the given world width.
    #[must_use]
    pub fn card_size(&self, card_width: f32) -> Vec2 {
        card_size(card_width, self.width(), self.height())
    }
}

/// `card_width × (card_width × height / width)`: the aspect-preserving size
/// of a card for an image of `width × height` pixels.
#[must_use]
pub fn card_size(card_width: f32, width: u32, height: u32) -> Vec2 {
    let height = card_width * height as f32 / width.max(1) as f32;
    Vec2::new(card_width, height)
}

/// Fetch (if needed) and decode one source.
///
/// # Errors
///
/// Returns a [`DecodeError`] scoped to this source.
pub fn decode(
    source: &ImageSource,
    loading: &LoadingOptions,
) -> Result<DecodedImage, DecodeError> {
    let bytes = match source {
        ImageSource::Path(path) => std::fs::read(path)?,
        ImageSource::Url(url) => fetch(url, loading)?,
        ImageSource::Bytes { data, .. } => data.clone(),
    };
    decode_bytes(source.label(), &bytes)
}

/// Decode encoded bytes into RGBA8.
///
/// # Errors
///
/// Returns [`DecodeError::Image`] for unrecognized or corrupt data and
/// [`DecodeError::EmptyImage`] for zero-sized images.
pub fn decode_bytes(
    label: String,
    bytes: &[u8],
) -> Result<DecodedImage, DecodeError> {
    let pixels = image::load_from_memory(bytes)?.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    log::debug!(
        "decoded {label}: {}x{}",
        pixels.width(),
        pixels.height()
    );
    Ok(DecodedImage { label, pixels })
}

#[cfg(feature = "remote")]
fn fetch(url: &str, loading: &LoadingOptions) -> Result<Vec<u8>, DecodeError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(loading.timeout()))
        .build()
        .into();
    log::info!("downloading {url}");
    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| DecodeError::Fetch(format!("{url}: {e}")))?;
    response
        .body_mut()
        .with_config()
        .limit(loading.max_download_bytes)
        .read_to_vec()
        .map_err(|e| DecodeError::Fetch(format!("{url}: {e}")))
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str, _loading: &LoadingOptions) -> Result<Vec<u8>, DecodeError> {
    Err(DecodeError::Unsupported(format!(
        "{url} (built without the `remote` feature)"
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::*;

    /// Encode a solid-color PNG of the given size.
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn parse_classifies_urls_and_paths() {
        assert_eq!(
            ImageSource::parse("https://example.com/a.png"),
            ImageSource::Url("https://example.com/a.png".into())
        );
        assert_eq!(
            ImageSource::parse("photos/a.png"),
            ImageSource::Path(PathBuf::from("photos/a.png"))
        );
    }

    #[test]
    fn card_height_follows_aspect_ratio() {
        let size = card_size(1.0, 400, 300);
        assert_eq!(size, Vec2::new(1.0, 0.75));
        let tall = card_size(2.0, 100, 300);
        assert_eq!(tall, Vec2::new(2.0, 6.0));
    }

    #[test]
    fn decodes_png_bytes() {
        let source = ImageSource::Bytes {
            label: "red".into(),
            data: png_bytes(4, 2),
        };
        let img = decode(&source, &LoadingOptions::default()).unwrap();
        assert_eq!((img.width(), img.height()), (4, 2));
        assert_eq!(img.card_size(1.0), Vec2::new(1.0, 0.5));
        assert_eq!(img.label, "red");
    }

    #[test]
    fn garbage_bytes_fail_for_that_source_only() {
        let source = ImageSource::Bytes {
            label: "junk".into(),
            data: b"not an image".to_vec(),
        };
        assert!(matches!(
            decode(&source, &LoadingOptions::default()),
            Err(DecodeError::Image(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = ImageSource::Path(PathBuf::from(
            "/definitely/not/here/depthreel.png",
        ));
        assert!(matches!(
            decode(&source, &LoadingOptions::default()),
            Err(DecodeError::Io(_))
        ));
    }
}
