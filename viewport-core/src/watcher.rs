//! The viewport watcher.

use crate::error::PlatformError;
use crate::event::ViewportEvent;
use crate::geometry::RootMargin;
use crate::notifier::{
    IntersectionCallback, IntersectionEntry, IntersectionNotifier, NotifierConfig, Registration,
    ViewportTarget,
};

/// Attributes used when creating a watcher.
///
/// ```
/// # use viewport_core::watcher::WatcherAttributes;
/// // Fire `enterViewport` 100 pixels before the target scrolls into view.
/// let attributes = WatcherAttributes::default().with_threshold(100.0);
/// assert_eq!(attributes.root_margin().to_string(), "100px");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WatcherAttributes {
    root_margin: RootMargin,
}

impl WatcherAttributes {
    /// Expand (or, when negative, contract) the viewport by `px` pixels on every side.
    ///
    /// The default is `0`.
    #[inline]
    pub fn with_threshold(self, px: f64) -> Self {
        self.with_root_margin(RootMargin::from_px(px))
    }

    #[inline]
    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    pub fn root_margin(&self) -> RootMargin {
        self.root_margin
    }

    /// The notifier configuration: the margin-adjusted viewport as root, triggering as soon as
    /// any fraction of the target is visible.
    pub fn notifier_config(&self) -> NotifierConfig {
        NotifierConfig { root_margin: self.root_margin, threshold: 0.0 }
    }
}

/// Watch `target`, dispatching [`ViewportEvent::Enter`] on it whenever it starts intersecting
/// the viewport and [`ViewportEvent::Exit`] whenever it stops.
///
/// Notifications are delivered by `notifier` on its own schedule, never from within this call.
/// Failures are the notifier's own: nothing is validated or translated here.
pub fn create_viewport_watcher<N>(
    notifier: &N,
    target: &N::Target,
    attributes: WatcherAttributes,
) -> Result<WatcherHandle, PlatformError>
where
    N: IntersectionNotifier + ?Sized,
{
    let registration = notifier.register(
        target,
        &attributes.notifier_config(),
        dispatch_viewport_events::<N::Target>(),
    )?;

    Ok(WatcherHandle { registration })
}

fn dispatch_viewport_events<T: ViewportTarget>() -> IntersectionCallback<T> {
    Box::new(|entries: &[IntersectionEntry<T>]| {
        for entry in entries {
            let event = ViewportEvent::from_intersecting(entry.is_intersecting);
            if let Err(error) = entry.target.dispatch_viewport_event(event) {
                tracing::error!("failed to dispatch `{event}`: {error}");
            }
        }
    })
}

/// A registered watcher. Its only capability is [`destroy()`](Self::destroy).
///
/// Dropping the handle destroys the watcher as well.
#[derive(Debug)]
#[must_use = "dropping a `WatcherHandle` stops watching the target"]
pub struct WatcherHandle {
    registration: Registration,
}

impl WatcherHandle {
    /// Stop watching. No event is dispatched for notifications delivered afterwards.
    pub fn destroy(self) {
        self.registration.unregister();
    }
}
