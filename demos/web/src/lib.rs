//! A tall page of boxes that turn green while they are in the viewport.
//!
//! From demos/web: wasm-pack build --target web, then serve `index.html`.

#[cfg(target_family = "wasm")]
mod tracing_init {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    pub fn init() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .without_time()
                    .with_writer(tracing_web::MakeWebConsoleWriter::new()),
            )
            .init();
    }
}

#[cfg(target_family = "wasm")]
mod wasm {
    use std::cell::RefCell;

    use viewport_watcher::event::ViewportEvent;
    use viewport_watcher::watcher::WatcherHandle;
    use viewport_watcher::web::ViewportListener;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement};

    // Threshold of every other box, in pixels.
    const EARLY: f64 = 150.0;

    thread_local! {
        // Watchers and listeners live as long as the page.
        static WATCHERS: RefCell<Vec<(WatcherHandle, [ViewportListener; 2])>> =
            const { RefCell::new(Vec::new()) };
    }

    #[wasm_bindgen(start)]
    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        super::tracing_init::init();

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

        for index in 0..20 {
            let block = create_block(&document, index)?;
            body.append_child(&block)?;

            let threshold = if index % 2 == 0 { 0.0 } else { EARLY };
            let watcher = viewport_watcher::create_viewport_watcher(&block, threshold)
                .map_err(|error| JsValue::from_str(error.message()))?;
            let listeners = [
                toggle_on(&block, index, ViewportEvent::Enter)?,
                toggle_on(&block, index, ViewportEvent::Exit)?,
            ];

            WATCHERS.with(|watchers| watchers.borrow_mut().push((watcher, listeners)));
        }

        Ok(())
    }

    fn create_block(document: &Document, index: usize) -> Result<HtmlElement, JsValue> {
        let block: HtmlElement = document.create_element("div")?.unchecked_into();
        block.set_text_content(Some(&format!("#{index}")));

        let style = block.style();
        style.set_property("height", "200px")?;
        style.set_property("margin", "400px auto")?;
        style.set_property("width", "200px")?;
        style.set_property("background", "lightgray")?;

        Ok(block)
    }

    fn toggle_on(
        block: &HtmlElement,
        index: usize,
        event: ViewportEvent,
    ) -> Result<ViewportListener, JsValue> {
        let target = block.clone();
        viewport_watcher::on_viewport_event(block, event, move |_| {
            tracing::info!("#{index}: {event}");
            let color = match event {
                ViewportEvent::Enter => "lightgreen",
                ViewportEvent::Exit => "lightgray",
            };
            if let Err(error) = target.style().set_property("background", color) {
                tracing::warn!("failed to recolor #{index}: {error:?}");
            }
        })
        .map_err(|error| JsValue::from_str(error.message()))
    }
}
