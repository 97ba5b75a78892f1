//! Viewport-visibility events for DOM elements.
//!
//! Attach a watcher to an element and it dispatches `enterViewport` when any part of the element
//! becomes visible, and `exitViewport` when none of it is visible any more:
//!
//! ```no_run
//! # #[cfg(target_family = "wasm")]
//! # fn example(element: &web_sys::Element) -> Result<(), viewport_watcher::error::PlatformError> {
//! // Start firing 100 pixels before the element scrolls into view.
//! let watcher = viewport_watcher::create_viewport_watcher(element, 100.0)?;
//!
//! // ...
//!
//! watcher.destroy();
//! # Ok(())
//! # }
//! ```
//!
//! The watcher is a thin adapter over the platform's intersection notifier. Delivery timing and
//! failure behavior are the platform's: nothing is batched, debounced or retried.
//!
//! # Testing without a browser
//!
//! The watcher is written against the [`IntersectionNotifier`] trait. [`HeadlessNotifier`]
//! implements it from plain geometry, which makes it possible to drive watchers from ordinary
//! `#[test]`s:
//!
//! ```
//! use viewport_watcher::dpi::{LogicalPosition, LogicalSize};
//! use viewport_watcher::event::ViewportEvent;
//! use viewport_watcher::geometry::Rect;
//! use viewport_watcher::headless::{HeadlessNotifier, HeadlessTarget};
//! use viewport_watcher::watcher::{create_viewport_watcher, WatcherAttributes};
//!
//! let notifier = HeadlessNotifier::new(LogicalSize::new(800.0, 600.0));
//! let target = HeadlessTarget::new(Rect::from_xywh(0.0, 1000.0, 100.0, 100.0));
//! let watcher = create_viewport_watcher(&notifier, &target, WatcherAttributes::default())?;
//!
//! notifier.scroll_to(LogicalPosition::new(0.0, 800.0));
//! notifier.flush();
//! assert_eq!(target.events(), [ViewportEvent::Enter]);
//!
//! watcher.destroy();
//! # Ok::<(), viewport_watcher::error::PlatformError>(())
//! ```
//!
//! # Cargo Features
//!
//! * `serde`: Enables serialization/deserialization of the event, geometry and configuration
//!   types with [Serde](https://crates.io/crates/serde).
//!
//! [`IntersectionNotifier`]: notifier::IntersectionNotifier
//! [`HeadlessNotifier`]: headless::HeadlessNotifier

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use viewport_core::{dpi, error, event, geometry, headless, notifier, registry, watcher};
#[cfg(web_platform)]
pub use viewport_web as web;
#[cfg(web_platform)]
pub use viewport_web::{create_viewport_watcher, on_viewport_event, viewport};
