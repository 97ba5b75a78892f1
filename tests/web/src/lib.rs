// From tests/web: wasm-pack test --firefox --headless

#![cfg(target_family = "wasm")]

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Promise;
use viewport_watcher::event::ViewportEvent;
use viewport_watcher::watcher::{self, WatcherAttributes};
use viewport_watcher::web::{ObservedElement, ViewportListener, WebNotifier};
use viewport_watcher::{create_viewport_watcher, on_viewport_event, viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{AddEventListenerOptions, CustomEvent, Document, Element, HtmlElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn viewport_height() -> f64 {
    window().inner_height().unwrap().as_f64().unwrap()
}

/// A 100x100 box `top` pixels below the top of a tall document. Removed on drop.
struct Block(HtmlElement);

impl Block {
    fn at(top: f64) -> Self {
        console_error_panic_hook::set_once();
        window().scroll_to_with_x_and_y(0.0, 0.0);

        let document = document();
        let body = document.body().unwrap();
        body.style().set_property("height", "10000px").unwrap();

        let element: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        let style = element.style();
        style.set_property("position", "absolute").unwrap();
        style.set_property("left", "0px").unwrap();
        style.set_property("top", &format!("{top}px")).unwrap();
        style.set_property("width", "100px").unwrap();
        style.set_property("height", "100px").unwrap();
        body.append_child(&element).unwrap();

        Self(element)
    }

    fn element(&self) -> &Element {
        &self.0
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.0.remove();
        window().scroll_to_with_x_and_y(0.0, 0.0);
    }
}

async fn next_event(element: &Element, event: ViewportEvent) -> CustomEvent {
    let promise = Promise::new(&mut |resolve, _| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        element
            .add_event_listener_with_callback_and_add_event_listener_options(
                event.name(),
                &resolve,
                &options,
            )
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap().unchecked_into()
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        window().set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms).unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn count(element: &Element, event: ViewportEvent) -> (Rc<Cell<u32>>, ViewportListener) {
    let counter = Rc::new(Cell::new(0));
    let listener = on_viewport_event(element, event, {
        let counter = counter.clone();
        move |_| counter.set(counter.get() + 1)
    })
    .unwrap();
    (counter, listener)
}

#[wasm_bindgen_test]
async fn visible_element_enters_without_payload() {
    let block = Block::at(0.0);
    let watcher = viewport(block.element()).unwrap();

    let event = next_event(block.element(), ViewportEvent::Enter).await;
    assert!(event.detail().is_null());
    assert!(!event.bubbles());

    watcher.destroy();
}

#[wasm_bindgen_test]
async fn threshold_enters_early() {
    let block = Block::at(viewport_height() + 50.0);
    let watcher = create_viewport_watcher(block.element(), 100.0).unwrap();

    next_event(block.element(), ViewportEvent::Enter).await;
    watcher.destroy();
}

#[wasm_bindgen_test]
async fn without_threshold_the_same_element_is_outside() {
    let block = Block::at(viewport_height() + 50.0);
    let watcher = create_viewport_watcher(block.element(), 0.0).unwrap();

    next_event(block.element(), ViewportEvent::Exit).await;
    watcher.destroy();
}

#[wasm_bindgen_test]
async fn scroll_in_scroll_out_then_destroy() {
    let top = viewport_height() + 1000.0;
    let block = Block::at(top);
    let watcher = viewport(block.element()).unwrap();
    next_event(block.element(), ViewportEvent::Exit).await;

    let (enters, _enter_listener) = count(block.element(), ViewportEvent::Enter);
    let (exits, _exit_listener) = count(block.element(), ViewportEvent::Exit);

    // Notifications arrive with the next rendering, after the listener is in place.
    window().scroll_to_with_x_and_y(0.0, top);
    next_event(block.element(), ViewportEvent::Enter).await;

    window().scroll_to_with_x_and_y(0.0, 0.0);
    next_event(block.element(), ViewportEvent::Exit).await;

    assert_eq!((enters.get(), exits.get()), (1, 1));

    watcher.destroy();
    for y in [top, 0.0, top] {
        window().scroll_to_with_x_and_y(0.0, y);
        sleep(100).await;
    }

    assert_eq!((enters.get(), exits.get()), (1, 1));
}

#[wasm_bindgen_test]
async fn second_watcher_on_a_visible_element_enters_too() {
    let block = Block::at(0.0);
    let first = viewport(block.element()).unwrap();
    next_event(block.element(), ViewportEvent::Enter).await;

    let (enters, _listener) = count(block.element(), ViewportEvent::Enter);
    let second = viewport(block.element()).unwrap();
    next_event(block.element(), ViewportEvent::Enter).await;
    sleep(100).await;
    assert_eq!(enters.get(), 1);

    first.destroy();
    second.destroy();
}

#[wasm_bindgen_test]
fn non_finite_threshold_is_rejected_by_the_platform() {
    let block = Block::at(0.0);
    let error = create_viewport_watcher(block.element(), f64::NAN).unwrap_err();
    assert!(error.message().contains("SyntaxError"), "{error}");
}

#[wasm_bindgen_test]
fn shared_observer_is_disconnected_with_its_last_watcher() {
    let first = Block::at(0.0);
    let second = Block::at(200.0);
    let notifier = WebNotifier::new();
    let attributes = WatcherAttributes::default();

    let a = watcher::create_viewport_watcher(
        &notifier,
        &ObservedElement::from(first.element().clone()),
        attributes,
    )
    .unwrap();
    let b = watcher::create_viewport_watcher(
        &notifier,
        &ObservedElement::from(second.element().clone()),
        attributes,
    )
    .unwrap();
    let c = watcher::create_viewport_watcher(
        &notifier,
        &ObservedElement::from(second.element().clone()),
        attributes.with_threshold(10.0),
    )
    .unwrap();
    assert_eq!(notifier.observer_count(), 2);

    a.destroy();
    assert_eq!(notifier.observer_count(), 2);
    b.destroy();
    assert_eq!(notifier.observer_count(), 1);
    drop(c);
    assert_eq!(notifier.observer_count(), 0);
}
