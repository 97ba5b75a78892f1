mod event_handle;
mod intersection_handle;

pub(crate) use self::event_handle::EventListenerHandle;
pub(crate) use self::intersection_handle::IntersectionObserverHandle;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Element};

use viewport_core::error::PlatformError;

/// Carry whatever the platform threw through as a [`PlatformError`].
pub(crate) fn platform_error(value: JsValue) -> PlatformError {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        let name = String::from(error.name());
        let message = String::from(error.message());
        PlatformError::new(format!("{name}: {message}"))
    } else if let Some(message) = value.as_string() {
        PlatformError::new(message)
    } else {
        PlatformError::new(format!("{value:?}"))
    }
}

/// Dispatch a payload-less, non-bubbling custom event named `name` on `element`.
pub(crate) fn dispatch_custom_event(element: &Element, name: &str) -> Result<(), PlatformError> {
    let init = CustomEventInit::new();
    init.set_bubbles(false);

    let event = CustomEvent::new_with_event_init_dict(name, &init).map_err(platform_error)?;
    element.dispatch_event(&event).map_err(platform_error)?;

    Ok(())
}
