//! Common error types.

use std::{error, fmt};

/// An error reported by the platform's intersection facility.
///
/// The watcher does not interpret platform failures. Whatever the platform throws while
/// constructing or registering a notifier (an unparsable root margin, a missing
/// `IntersectionObserver`, ...) is carried through verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct PlatformError {
    message: String,
}

impl PlatformError {
    /// Create a new [`PlatformError`] from the platform's own message.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The message as reported by the platform.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlatformError").field(&self.message).finish()
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.message)
    }
}

impl error::Error for PlatformError {}

/// The error type for a root margin that isn't a single `<n>px` length.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseRootMarginError {
    input: String,
}

impl ParseRootMarginError {
    pub(crate) fn new(input: &str) -> Self {
        Self { input: input.to_owned() }
    }
}

impl fmt::Debug for ParseRootMarginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseRootMarginError").field("input", &self.input).finish()
    }
}

impl fmt::Display for ParseRootMarginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a root margin in pixels", self.input)
    }
}

impl error::Error for ParseRootMarginError {}
