//! The intersection notifier abstraction.
//!
//! A notifier is whatever reports, asynchronously, when a target starts or stops intersecting the
//! viewport. On the Web it is backed by `IntersectionObserver`; [`HeadlessNotifier`] computes the
//! same notifications from plain geometry.
//!
//! [`HeadlessNotifier`]: crate::headless::HeadlessNotifier

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::event::ViewportEvent;
use crate::geometry::RootMargin;

/// Something a viewport event can be dispatched on.
///
/// Equality must be identity: two values compare equal only when they refer to the same element.
pub trait ViewportTarget: Clone + PartialEq + 'static {
    /// Dispatch `event` on the target, without bubbling and without a payload.
    fn dispatch_viewport_event(&self, event: ViewportEvent) -> Result<(), PlatformError>;
}

/// How a notifier tests targets against the viewport.
///
/// The root is always the browsing viewport.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotifierConfig {
    /// Margin applied to the viewport before testing.
    pub root_margin: RootMargin,
    /// Visible ratio at which a notification is triggered. `0.0` fires as soon as any fraction
    /// of the target is visible.
    pub threshold: f64,
}

/// A single notification: the target and whether it currently intersects the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<T> {
    pub target: T,
    pub is_intersecting: bool,
}

/// Receives every batch of entries addressed to one registration.
pub type IntersectionCallback<T> = Box<dyn FnMut(&[IntersectionEntry<T>])>;

/// A platform facility reporting intersection changes of registered targets.
pub trait IntersectionNotifier {
    type Target: ViewportTarget;

    /// Start reporting intersection changes of `target` to `callback`.
    ///
    /// Registration returns immediately, notifications are delivered later. Dropping or
    /// [unregistering](Registration::unregister) the returned [`Registration`] stops them.
    fn register(
        &self,
        target: &Self::Target,
        config: &NotifierConfig,
        callback: IntersectionCallback<Self::Target>,
    ) -> Result<Registration, PlatformError>;
}

impl<N: IntersectionNotifier + ?Sized> IntersectionNotifier for &N {
    type Target = N::Target;

    fn register(
        &self,
        target: &Self::Target,
        config: &NotifierConfig,
        callback: IntersectionCallback<Self::Target>,
    ) -> Result<Registration, PlatformError> {
        (**self).register(target, config, callback)
    }
}

/// The capability to unregister a target from its notifier.
///
/// Unregisters on drop.
#[must_use = "dropping a `Registration` unregisters the target immediately"]
pub struct Registration {
    unregister: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn new<F>(unregister: F) -> Self
    where
        F: 'static + FnOnce(),
    {
        Self { unregister: Some(Box::new(unregister)) }
    }

    /// Stop receiving notifications.
    pub fn unregister(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("active", &self.unregister.is_some()).finish()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.run();
    }
}
