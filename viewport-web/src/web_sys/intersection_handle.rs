use js_sys::Array;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use viewport_core::error::PlatformError;
use viewport_core::notifier::{IntersectionEntry, NotifierConfig};

use super::platform_error;
use crate::ObservedElement;

pub(crate) struct IntersectionObserverHandle {
    observer: IntersectionObserver,
    _closure: Closure<dyn FnMut(Array)>,
}

impl IntersectionObserverHandle {
    pub fn new<F>(config: &NotifierConfig, mut callback: F) -> Result<Self, PlatformError>
    where
        F: 'static + FnMut(&[IntersectionEntry<ObservedElement>]),
    {
        let closure = Closure::new(move |entries: Array| {
            let entries: Vec<_> = entries
                .iter()
                .map(|entry| {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    IntersectionEntry {
                        target: ObservedElement::from(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                    }
                })
                .collect();
            callback(&entries);
        });

        // `root` stays `null`: the browsing viewport.
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&config.root_margin.to_string());
        options.set_threshold(&JsValue::from_f64(config.threshold));

        let observer = IntersectionObserver::new_with_options(
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(platform_error)?;

        Ok(Self { observer, _closure: closure })
    }

    pub fn observe(&self, element: &ObservedElement) {
        self.observer.observe(element.as_ref());
    }

    pub fn unobserve(&self, element: &ObservedElement) {
        self.observer.unobserve(element.as_ref());
    }
}

impl Drop for IntersectionObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect()
    }
}
