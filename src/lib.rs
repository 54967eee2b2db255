// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! A looping, depth-scrolling image carousel rendered with wgpu.
//!
//! Images are laid out on an 8-lane grid at increasing depth and drift
//! toward the camera one step per frame; a card that passes the camera is
//! sent to the back of the queue. The card under the pointer is found by
//! casting a ray from the camera, and pressing a button over it opens the
//! card's activation target.
//!
//! # Key entry points
//!
//! - [`CarouselSetup`] / [`Carousel`] - two-phase construction and the
//!   running session
//! - [`RenderBackend`] / [`Host`] - the renderer and host seams
//! - [`options::Options`] - runtime configuration (carousel, camera,
//!   lighting, loading, keybindings)
//! - [`Viewer`] - a ready-made winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Image decoding fans out over a bounded worker pool and is collected in
//! source order. Everything else runs on the host's event-loop thread:
//! each frame runs the [`animation::DepthScheduler`] over all cards and then
//! hands them to the backend, and pointer events go through the
//! [`picking::PointerPicker`].

pub mod animation;
pub mod camera;
pub mod card;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod picking;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use card::{DecodedImage, ImageSource, VisualCard};
pub use engine::{
    Carousel, CarouselSetup, FrameOutcome, Host, PauseFlag, RenderBackend,
};
pub use error::{ActivationError, CarouselError, DecodeError};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder, DEFAULT_CONTAINER};
