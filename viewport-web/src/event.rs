use std::fmt;

use wasm_bindgen::prelude::Closure;
use web_sys::{CustomEvent, Element};

use viewport_core::error::PlatformError;
use viewport_core::event::ViewportEvent;
use viewport_core::notifier::ViewportTarget;

use crate::backend::{self, EventListenerHandle};

/// An element registered with a [`WebNotifier`](crate::WebNotifier).
///
/// Holding one keeps the JS object alive, so the element can only be garbage-collected once its
/// watcher is destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedElement(Element);

impl ObservedElement {
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl From<Element> for ObservedElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl AsRef<Element> for ObservedElement {
    fn as_ref(&self) -> &Element {
        &self.0
    }
}

impl ViewportTarget for ObservedElement {
    fn dispatch_viewport_event(&self, event: ViewportEvent) -> Result<(), PlatformError> {
        backend::dispatch_custom_event(&self.0, event.name())
    }
}

/// A listener for one viewport event on one element. Removed on drop.
#[must_use = "dropping a `ViewportListener` removes the listener"]
pub struct ViewportListener {
    event: ViewportEvent,
    _handle: EventListenerHandle<dyn FnMut(CustomEvent)>,
}

impl ViewportListener {
    pub fn event(&self) -> ViewportEvent {
        self.event
    }
}

impl fmt::Debug for ViewportListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportListener").field("event", &self.event).finish_non_exhaustive()
    }
}

/// Call `handler` every time `event` is dispatched on `element`.
pub fn on_viewport_event<F>(
    element: &Element,
    event: ViewportEvent,
    handler: F,
) -> Result<ViewportListener, PlatformError>
where
    F: 'static + FnMut(CustomEvent),
{
    let closure = Closure::new(handler);
    let handle = EventListenerHandle::new(element.clone(), event.name(), closure)?;
    Ok(ViewportListener { event, _handle: handle })
}
