//! # Core types for viewport-watcher
//!
//! Platform-independent parts of the viewport watcher: the events it dispatches, the notifier
//! abstraction it is built on, the bookkeeping shared by notifier backends, and a headless
//! notifier to drive all of it from plain geometry.
//!
//! Backends implement [`IntersectionNotifier`] for their targets; the Web backend lives in
//! `viewport-web`.
//!
//! [`IntersectionNotifier`]: notifier::IntersectionNotifier

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
pub mod event;
pub mod geometry;
pub mod headless;
pub mod notifier;
pub mod registry;
pub mod watcher;

pub use dpi;
