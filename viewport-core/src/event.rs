//! The events a watcher dispatches on its target.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the event dispatched when the target starts intersecting the viewport.
pub const ENTER_VIEWPORT: &str = "enterViewport";

/// Name of the event dispatched when the target stops intersecting the viewport.
pub const EXIT_VIEWPORT: &str = "exitViewport";

/// A viewport transition of the watched target.
///
/// Both events are empty signals: they carry no payload and do not bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewportEvent {
    /// Some fraction of the target became visible (`enterViewport`).
    Enter,
    /// No part of the target is visible any more (`exitViewport`).
    Exit,
}

impl ViewportEvent {
    /// Translate the intersection state of a notification entry.
    #[inline]
    pub fn from_intersecting(is_intersecting: bool) -> Self {
        if is_intersecting {
            Self::Enter
        } else {
            Self::Exit
        }
    }

    /// The DOM event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enter => ENTER_VIEWPORT,
            Self::Exit => EXIT_VIEWPORT,
        }
    }
}

impl fmt::Display for ViewportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
