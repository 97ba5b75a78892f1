use viewport_watcher::dpi::{LogicalPosition, LogicalSize};
use viewport_watcher::event::ViewportEvent;
use viewport_watcher::geometry::Rect;
use viewport_watcher::headless::{HeadlessNotifier, HeadlessTarget};
use viewport_watcher::watcher::{create_viewport_watcher, WatcherAttributes};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// 800x600 viewport scrolled to the top, 100x100 element starting at `y`.
fn setup(y: f64) -> (HeadlessNotifier, HeadlessTarget) {
    init_tracing();
    let notifier = HeadlessNotifier::new(LogicalSize::new(800.0, 600.0));
    let target = HeadlessTarget::new(Rect::from_xywh(0.0, y, 100.0, 100.0));
    (notifier, target)
}

#[test]
fn enter_exit_then_destroy() {
    let (notifier, target) = setup(1500.0);
    let watcher =
        create_viewport_watcher(&notifier, &target, WatcherAttributes::default()).unwrap();

    // The first notification reports the initial, off-screen state.
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Exit]);

    notifier.scroll_to(LogicalPosition::new(0.0, 1200.0));
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Enter]);

    notifier.scroll_to(LogicalPosition::new(0.0, 0.0));
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Exit]);

    watcher.destroy();
    for y in [1200.0, 0.0, 1300.0] {
        notifier.scroll_to(LogicalPosition::new(0.0, y));
        notifier.flush();
    }
    assert!(target.events().is_empty());
    assert_eq!(notifier.observer_count(), 0);
}

#[test]
fn visible_element_enters_exactly_once() {
    let (notifier, target) = setup(100.0);
    let _watcher =
        create_viewport_watcher(&notifier, &target, WatcherAttributes::default()).unwrap();

    for _ in 0..3 {
        notifier.scroll_by(0.0, 10.0);
        notifier.flush();
    }

    assert_eq!(target.events(), [ViewportEvent::Enter]);
}

#[test]
fn threshold_enters_early() {
    // 50 pixels below the lower edge of the viewport.
    let (notifier, early) = setup(650.0);
    let plain = HeadlessTarget::new(early.rect());

    let _early = create_viewport_watcher(
        &notifier,
        &early,
        WatcherAttributes::default().with_threshold(100.0),
    )
    .unwrap();
    let _plain =
        create_viewport_watcher(&notifier, &plain, WatcherAttributes::default()).unwrap();
    notifier.flush();

    assert_eq!(early.events(), [ViewportEvent::Enter]);
    assert_eq!(plain.events(), [ViewportEvent::Exit]);
}

#[test]
fn negative_threshold_enters_late() {
    let (notifier, target) = setup(560.0);
    let _watcher = create_viewport_watcher(
        &notifier,
        &target,
        WatcherAttributes::default().with_threshold(-50.0),
    )
    .unwrap();

    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Exit]);

    // The contracted viewport ends at 555, the element starts at 560.
    notifier.scroll_by(0.0, 5.0);
    notifier.flush();
    assert!(target.events().is_empty());

    notifier.scroll_by(0.0, 50.0);
    notifier.flush();
    assert_eq!(target.events(), [ViewportEvent::Enter]);
}

#[test]
fn dropping_the_handle_destroys_the_watcher() {
    let (notifier, target) = setup(0.0);
    drop(create_viewport_watcher(&notifier, &target, WatcherAttributes::default()).unwrap());

    notifier.flush();
    assert!(target.events().is_empty());
    assert_eq!(notifier.observer_count(), 0);
}

#[test]
fn destroying_one_watcher_keeps_the_shared_notifier_alive() {
    let (notifier, first) = setup(0.0);
    let second = HeadlessTarget::new(Rect::from_xywh(0.0, 2000.0, 100.0, 100.0));

    let first_watcher =
        create_viewport_watcher(&notifier, &first, WatcherAttributes::default()).unwrap();
    let _second_watcher =
        create_viewport_watcher(&notifier, &second, WatcherAttributes::default()).unwrap();
    assert_eq!(notifier.observer_count(), 1);

    first_watcher.destroy();
    assert_eq!(notifier.observer_count(), 1);

    notifier.scroll_to(LogicalPosition::new(0.0, 1800.0));
    notifier.flush();
    assert!(first.events().is_empty());
    assert_eq!(second.events(), [ViewportEvent::Enter]);
}

#[test]
fn every_watcher_reports_the_current_state_of_its_element() {
    let (notifier, target) = setup(100.0);

    let first = create_viewport_watcher(&notifier, &target, WatcherAttributes::default()).unwrap();
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Enter]);

    // Already visible: the second watcher doesn't wait for the next transition.
    let _second =
        create_viewport_watcher(&notifier, &target, WatcherAttributes::default()).unwrap();
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Enter]);

    notifier.scroll_by(0.0, 1000.0);
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Exit, ViewportEvent::Exit]);

    first.destroy();
    assert_eq!(notifier.observer_count(), 1);
    notifier.scroll_to(LogicalPosition::new(0.0, 0.0));
    notifier.flush();
    assert_eq!(target.take_events(), [ViewportEvent::Enter]);
}

#[test]
fn detached_elements_never_fire() {
    let (notifier, _) = setup(0.0);
    let target = HeadlessTarget::detached(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
    let _watcher =
        create_viewport_watcher(&notifier, &target, WatcherAttributes::default()).unwrap();

    notifier.flush();
    notifier.scroll_by(0.0, 1000.0);
    notifier.flush();

    assert!(target.events().is_empty());
}

#[test]
fn platform_failures_are_passed_through() {
    let (notifier, target) = setup(0.0);
    let error = create_viewport_watcher(
        &notifier,
        &target,
        WatcherAttributes::default().with_threshold(f64::INFINITY),
    )
    .unwrap_err();

    assert!(error.message().starts_with("SyntaxError"), "{error}");
    assert_eq!(notifier.observer_count(), 0);
}
