//! The host environment seam: containers and the "open URI" action.

use crate::error::ActivationError;

/// Environment the carousel is embedded in.
pub trait Host {
    /// Current pixel size of the container named `id`, or `None` if there
    /// is no such container.
    fn container_size(&self, id: &str) -> Option<(u32, u32)>;

    /// Open an activation target (typically a URL in the user's browser).
    ///
    /// # Errors
    ///
    /// Returns [`ActivationError`] if the host refuses or cannot open it.
    fn open_uri(&mut self, uri: &str) -> Result<(), ActivationError>;
}

/// Hand `uri` to the platform's default opener without waiting for it.
///
/// # Errors
///
/// Returns [`ActivationError`] if no opener could be launched.
pub fn open_with_system(uri: &str) -> Result<(), ActivationError> {
    open::that_detached(uri).map_err(|e| opener_failed(uri, &e))
}

fn opener_failed(uri: &str, error: &std::io::Error) -> ActivationError {
    ActivationError {
        target: uri.to_owned(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn opener_failure_names_the_target() {
        let error = io::Error::new(io::ErrorKind::NotFound, "no opener");
        let activation = opener_failed("https://example.com/a", &error);
        assert_eq!(activation.target, "https://example.com/a");
        assert_eq!(
            activation.to_string(),
            "could not open https://example.com/a: no opener"
        );
    }
}
