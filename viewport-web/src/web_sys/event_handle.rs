use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

use viewport_core::error::PlatformError;

use super::platform_error;

pub(crate) struct EventListenerHandle<T: ?Sized> {
    target: EventTarget,
    event_type: &'static str,
    listener: Closure<T>,
}

impl<T: ?Sized> EventListenerHandle<T> {
    pub fn new<U>(
        target: U,
        event_type: &'static str,
        listener: Closure<T>,
    ) -> Result<Self, PlatformError>
    where
        U: Into<EventTarget>,
    {
        let target = target.into();
        target
            .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
            .map_err(platform_error)?;
        Ok(EventListenerHandle { target, event_type, listener })
    }
}

impl<T: ?Sized> Drop for EventListenerHandle<T> {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(
                self.event_type,
                self.listener.as_ref().unchecked_ref(),
            )
            .unwrap_or_else(|error| {
                tracing::error!(
                    "error removing `{}` listener: {}",
                    self.event_type,
                    platform_error(error)
                )
            });
    }
}
