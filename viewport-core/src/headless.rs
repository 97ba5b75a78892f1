//! A notifier computing intersections from plain geometry, without a rendering environment.
//!
//! [`HeadlessNotifier`] models one document: a scrollable viewport and a set of
//! [`HeadlessTarget`]s laid out in document coordinates. It follows the platform's delivery
//! model:
//!
//! - Intersection state is sampled on [`update_rendering()`], which queues a record for every
//!   newly observed target and for every target whose state changed since the last sample.
//! - Queued records are handed to callbacks on [`flush()`], never during registration.
//! - Targets that are not attached to the document are never reported.
//! - Registrations sharing a configuration share one observer, which is disconnected once its
//!   last registration is gone. A target is observed at most once per observer, so registering
//!   an already observed target again connects another observer and the new registration
//!   receives its own initial record.
//!
//! [`update_rendering()`]: HeadlessNotifier::update_rendering
//! [`flush()`]: HeadlessNotifier::flush

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use dpi::{LogicalPosition, LogicalSize};

use crate::error::PlatformError;
use crate::event::ViewportEvent;
use crate::geometry::Rect;
use crate::notifier::{
    IntersectionCallback, IntersectionEntry, IntersectionNotifier, NotifierConfig, Registration,
    ViewportTarget,
};
use crate::registry::{RegistrationId, Registry};

type Listener = Rc<RefCell<dyn FnMut(ViewportEvent)>>;

struct TargetState {
    rect: Cell<Rect>,
    attached: Cell<bool>,
    events: RefCell<Vec<ViewportEvent>>,
    listeners: RefCell<Vec<Listener>>,
}

/// An element stand-in: a rectangle in document coordinates that records the events dispatched
/// on it.
///
/// Clones refer to the same element; equality is identity.
#[derive(Clone)]
pub struct HeadlessTarget {
    state: Rc<TargetState>,
}

impl HeadlessTarget {
    /// Create a target attached to the document.
    pub fn new(rect: Rect) -> Self {
        Self {
            state: Rc::new(TargetState {
                rect: Cell::new(rect),
                attached: Cell::new(true),
                events: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Create a target that isn't attached to the document yet.
    pub fn detached(rect: Rect) -> Self {
        let target = Self::new(rect);
        target.detach();
        target
    }

    pub fn rect(&self) -> Rect {
        self.state.rect.get()
    }

    pub fn set_rect(&self, rect: Rect) {
        self.state.rect.set(rect);
    }

    pub fn is_attached(&self) -> bool {
        self.state.attached.get()
    }

    pub fn attach(&self) {
        self.state.attached.set(true);
    }

    pub fn detach(&self) {
        self.state.attached.set(false);
    }

    /// Every event dispatched on this target so far, oldest first.
    pub fn events(&self) -> Vec<ViewportEvent> {
        self.state.events.borrow().clone()
    }

    /// Like [`events()`](Self::events), but clears the log.
    pub fn take_events(&self) -> Vec<ViewportEvent> {
        self.state.events.take()
    }

    /// Call `listener` for every event dispatched on this target from now on.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: 'static + FnMut(ViewportEvent),
    {
        self.state.listeners.borrow_mut().push(Rc::new(RefCell::new(listener)));
    }
}

impl PartialEq for HeadlessTarget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for HeadlessTarget {}

impl fmt::Debug for HeadlessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessTarget")
            .field("rect", &self.rect())
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

impl ViewportTarget for HeadlessTarget {
    fn dispatch_viewport_event(&self, event: ViewportEvent) -> Result<(), PlatformError> {
        self.state.events.borrow_mut().push(event);

        let listeners = self.state.listeners.borrow().clone();
        for listener in listeners {
            (&mut *listener.borrow_mut())(event);
        }

        Ok(())
    }
}

struct Observation {
    target: HeadlessTarget,
    // `(is_intersecting, threshold crossed)` at the last sample, `None` before the first one.
    last: Option<(bool, bool)>,
}

struct Observer {
    id: u64,
    config: NotifierConfig,
    registry: Registry<HeadlessTarget>,
    observations: Vec<Observation>,
    records: Vec<IntersectionEntry<HeadlessTarget>>,
}

impl Observer {
    fn sample(&mut self, viewport: Rect) {
        let root = self.config.root_margin.apply(viewport);

        for observation in &mut self.observations {
            if !observation.target.is_attached() {
                continue;
            }

            let rect = observation.target.rect();
            let state = match root.intersection(&rect) {
                Some(overlap) => {
                    let ratio = if rect.area() > 0.0 { overlap.area() / rect.area() } else { 1.0 };
                    (true, ratio >= self.config.threshold)
                },
                None => (false, false),
            };

            if observation.last != Some(state) {
                observation.last = Some(state);
                self.records.push(IntersectionEntry {
                    target: observation.target.clone(),
                    is_intersecting: state.0,
                });
            }
        }
    }
}

struct Document {
    viewport: Rect,
    next_observer: u64,
    observers: Vec<Observer>,
}

/// A notifier for a simulated document. See the [module documentation](self).
///
/// Clones refer to the same document.
#[derive(Clone)]
pub struct HeadlessNotifier {
    document: Rc<RefCell<Document>>,
}

impl HeadlessNotifier {
    /// Create a document whose viewport has the given size and is scrolled to the top.
    pub fn new(viewport_size: LogicalSize<f64>) -> Self {
        Self {
            document: Rc::new(RefCell::new(Document {
                viewport: Rect::new(LogicalPosition::new(0.0, 0.0), viewport_size),
                next_observer: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// The viewport in document coordinates.
    pub fn viewport(&self) -> Rect {
        self.document.borrow().viewport
    }

    pub fn scroll_to(&self, position: LogicalPosition<f64>) {
        self.document.borrow_mut().viewport.position = position;
    }

    pub fn scroll_by(&self, dx: f64, dy: f64) {
        let mut document = self.document.borrow_mut();
        document.viewport = document.viewport.translate(dx, dy);
    }

    pub fn resize_viewport(&self, size: LogicalSize<f64>) {
        self.document.borrow_mut().viewport.size = size;
    }

    /// Number of connected observers. Registrations of distinct targets with the same
    /// configuration share one.
    pub fn observer_count(&self) -> usize {
        self.document.borrow().observers.len()
    }

    /// Sample the intersection state of every observed target and queue records for changes.
    pub fn update_rendering(&self) {
        let mut document = self.document.borrow_mut();
        let viewport = document.viewport;
        for observer in &mut document.observers {
            observer.sample(viewport);
        }
    }

    /// Take the queued records without delivering them.
    pub fn take_records(&self) -> Vec<IntersectionEntry<HeadlessTarget>> {
        self.document
            .borrow_mut()
            .observers
            .iter_mut()
            .flat_map(|observer| observer.records.drain(..))
            .collect()
    }

    /// Sample, then deliver every queued record to its callbacks.
    pub fn flush(&self) {
        self.update_rendering();

        let batches: Vec<_> = self
            .document
            .borrow_mut()
            .observers
            .iter_mut()
            .filter(|observer| !observer.records.is_empty())
            .map(|observer| (observer.registry.clone(), std::mem::take(&mut observer.records)))
            .collect();

        // Callbacks may unregister, so the document must not be borrowed while delivering.
        for (registry, records) in batches {
            registry.deliver(&records);
        }
    }

    fn unregister(&self, observer_id: u64, id: RegistrationId) {
        let mut document = self.document.borrow_mut();
        let Some(index) = document.observers.iter().position(|observer| observer.id == observer_id)
        else {
            tracing::warn!(observer_id, "unregistered from a disconnected observer");
            return;
        };

        let observer = &mut document.observers[index];
        let Some(removal) = observer.registry.remove(id) else {
            return;
        };

        if removal.last_for_target {
            observer.observations.retain(|observation| observation.target != removal.target);
        }

        if removal.now_empty {
            tracing::debug!(observer_id, "disconnecting observer");
            document.observers.remove(index);
        }
    }
}

impl Default for HeadlessNotifier {
    fn default() -> Self {
        Self::new(LogicalSize::new(800.0, 600.0))
    }
}

impl fmt::Debug for HeadlessNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessNotifier")
            .field("viewport", &self.viewport())
            .field("observers", &self.observer_count())
            .finish()
    }
}

fn validate(config: &NotifierConfig) -> Result<(), PlatformError> {
    if !config.root_margin.px().is_finite() {
        return Err(PlatformError::new(format!(
            "SyntaxError: Failed to parse '{}' as a root margin",
            config.root_margin
        )));
    }

    if !(0.0..=1.0).contains(&config.threshold) {
        return Err(PlatformError::new("RangeError: Threshold values must be between 0 and 1"));
    }

    Ok(())
}

impl IntersectionNotifier for HeadlessNotifier {
    type Target = HeadlessTarget;

    fn register(
        &self,
        target: &HeadlessTarget,
        config: &NotifierConfig,
        callback: IntersectionCallback<HeadlessTarget>,
    ) -> Result<Registration, PlatformError> {
        validate(config)?;

        let mut document = self.document.borrow_mut();
        let index = match document.observers.iter().position(|observer| {
            observer.config == *config && !observer.registry.contains_target(target)
        }) {
            Some(index) => index,
            None => {
                let id = document.next_observer;
                document.next_observer += 1;
                tracing::debug!(observer_id = id, root_margin = %config.root_margin, "connecting observer");
                document.observers.push(Observer {
                    id,
                    config: *config,
                    registry: Registry::new(),
                    observations: Vec::new(),
                    records: Vec::new(),
                });
                document.observers.len() - 1
            },
        };

        let observer = &mut document.observers[index];
        let (id, already_observed) = observer.registry.insert(target.clone(), callback);
        if !already_observed {
            observer.observations.push(Observation { target: target.clone(), last: None });
        }

        let observer_id = observer.id;
        let notifier = self.clone();
        Ok(Registration::new(move || notifier.unregister(observer_id, id)))
    }
}
