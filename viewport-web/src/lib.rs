//! # Web
//!
//! Viewport watching for elements in a browser, compiled to WebAssembly with
//! [`wasm-bindgen`][wasm_bindgen].
//!
//! Watching is backed by [`IntersectionObserver`][observer]: the watcher registers the element,
//! and translates every notification into an [`enterViewport`][ENTER_VIEWPORT] or
//! [`exitViewport`][EXIT_VIEWPORT] [`CustomEvent`][custom_event] dispatched on the element
//! itself. The events carry no payload and don't bubble.
//!
//! ```no_run
//! # fn example(element: &web_sys::Element) -> Result<(), viewport_core::error::PlatformError> {
//! use viewport_core::event::ViewportEvent;
//!
//! let watcher = viewport_web::create_viewport_watcher(element, 100.0)?;
//! let listener = viewport_web::on_viewport_event(element, ViewportEvent::Enter, |_| {
//!     tracing::info!("entered the viewport");
//! })?;
//!
//! // Later.
//! watcher.destroy();
//! drop(listener);
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform behavior
//!
//! Nothing is validated or emulated. Elements that aren't attached to a document never fire,
//! an unparsable margin (e.g. a non-finite threshold) fails with the browser's `SyntaxError`,
//! and a missing `IntersectionObserver` fails the same way it would in JavaScript.
//!
//! The first notification for a newly observed element reports its current state, so an element
//! that starts outside the viewport receives an `exitViewport` right away.
//!
//! [wasm_bindgen]: https://docs.rs/wasm-bindgen
//! [observer]: https://developer.mozilla.org/en-US/docs/Web/API/IntersectionObserver
//! [custom_event]: https://developer.mozilla.org/en-US/docs/Web/API/CustomEvent
//! [ENTER_VIEWPORT]: viewport_core::event::ENTER_VIEWPORT
//! [EXIT_VIEWPORT]: viewport_core::event::EXIT_VIEWPORT

// The bindings to the browser are kept in `web_sys`: the thinnest layer over the APIs in use,
// handles that release what they register on drop. Everything else is written against
// `viewport-core` and only talks to the browser through them.

mod event;
mod notifier;
mod web_sys;

use ::web_sys::Element;
use viewport_core::error::PlatformError;
use viewport_core::watcher::{self, WatcherAttributes, WatcherHandle};

pub use self::event::{on_viewport_event, ObservedElement, ViewportListener};
pub use self::notifier::WebNotifier;
use self::web_sys as backend;

/// Watch `element`, dispatching `enterViewport` / `exitViewport` on it as it crosses the
/// viewport expanded by `threshold_px` pixels on every side.
///
/// Watchers of distinct elements on the same thread share one `IntersectionObserver` per
/// threshold. Every watcher, including a second one on the same element, first receives the
/// element's current state.
pub fn create_viewport_watcher(
    element: &Element,
    threshold_px: f64,
) -> Result<WatcherHandle, PlatformError> {
    let attributes = WatcherAttributes::default().with_threshold(threshold_px);
    WebNotifier::with_thread_local(|notifier| {
        watcher::create_viewport_watcher(
            notifier,
            &ObservedElement::from(element.clone()),
            attributes,
        )
    })
}

/// [`create_viewport_watcher()`] without a threshold.
pub fn viewport(element: &Element) -> Result<WatcherHandle, PlatformError> {
    create_viewport_watcher(element, 0.0)
}
