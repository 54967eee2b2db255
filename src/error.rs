//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the depthreel crate.
#[derive(Debug)]
pub enum CarouselError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The host has no container with the requested identifier.
    ContainerNotFound(String),
    /// An image source could not be turned into a texture.
    Decode(DecodeError),
    /// Options failed validation (e.g. non-positive lane spacing).
    InvalidOptions(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to start the image decode pool.
    ThreadSpawn(rayon::ThreadPoolBuildError),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ContainerNotFound(id) => {
                write!(f, "container not found: {id}")
            }
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to start decode pool: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for CarouselError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CarouselError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<DecodeError> for CarouselError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<std::io::Error> for CarouselError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failure to turn one image source into pixels.
///
/// Always scoped to a single source; the loader keeps going with the rest.
#[derive(Debug)]
pub enum DecodeError {
    /// Reading the source bytes failed.
    Io(std::io::Error),
    /// Fetching a remote source failed.
    Fetch(String),
    /// The bytes are not a supported image.
    Image(image::ImageError),
    /// The image has a zero width or height.
    EmptyImage,
    /// The source kind is not available in this build.
    Unsupported(String),
    /// The load did not finish before the deadline.
    Timeout,
    /// The worker thread went away without reporting.
    WorkerLost,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read failed: {e}"),
            Self::Fetch(msg) => write!(f, "fetch failed: {msg}"),
            Self::Image(e) => write!(f, "{e}"),
            Self::EmptyImage => write!(f, "image has zero width or height"),
            Self::Unsupported(msg) => write!(f, "unsupported source: {msg}"),
            Self::Timeout => write!(f, "timed out"),
            Self::WorkerLost => write!(f, "decode worker exited early"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

/// The host refused to open an activation target (e.g. no URI handler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationError {
    /// The target that could not be opened.
    pub target: String,
    /// Host-provided reason.
    pub reason: String,
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not open {}: {}", self.target, self.reason)
    }
}

impl std::error::Error for ActivationError {}
