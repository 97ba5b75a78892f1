use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use viewport_core::error::PlatformError;
use viewport_core::notifier::{
    IntersectionCallback, IntersectionNotifier, NotifierConfig, Registration,
};
use viewport_core::registry::{RegistrationId, Registry};

use crate::backend::IntersectionObserverHandle;
use crate::ObservedElement;

thread_local! {
    static NOTIFIER: WebNotifier = WebNotifier::new();
}

struct SharedObserver {
    id: u64,
    key: String,
    registry: Registry<ObservedElement>,
    handle: IntersectionObserverHandle,
}

/// An [`IntersectionNotifier`] backed by `IntersectionObserver`.
///
/// Registrations of distinct elements with the same configuration share one observer. An element
/// is observed at most once per observer: registering it again connects another observer, so
/// every registration receives a notification for the element's current state. Each observer
/// keeps an explicit count of the elements registered against it and is disconnected when the
/// last one goes.
///
/// [`create_viewport_watcher()`](crate::create_viewport_watcher) uses one notifier per thread.
/// Creating a separate `WebNotifier` per watcher gives every watcher its own observer.
#[derive(Clone, Default)]
pub struct WebNotifier {
    observers: Rc<RefCell<Observers>>,
}

#[derive(Default)]
struct Observers {
    next_id: u64,
    connected: Vec<SharedObserver>,
}

impl WebNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with this thread's shared notifier.
    pub fn with_thread_local<R>(f: impl FnOnce(&WebNotifier) -> R) -> R {
        NOTIFIER.with(f)
    }

    /// Number of connected `IntersectionObserver`s.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().connected.len()
    }

    fn unregister(&self, observer_id: u64, id: RegistrationId) {
        let mut observers = self.observers.borrow_mut();
        let Some(index) =
            observers.connected.iter().position(|observer| observer.id == observer_id)
        else {
            tracing::warn!(observer_id, "unregistered from a disconnected observer");
            return;
        };

        let observer = &observers.connected[index];
        let Some(removal) = observer.registry.remove(id) else {
            return;
        };

        if removal.last_for_target {
            observer.handle.unobserve(&removal.target);
        }

        if removal.now_empty {
            tracing::debug!(
                observer_id,
                key = %observer.key,
                "disconnecting `IntersectionObserver`"
            );
            let observer = observers.connected.swap_remove(index);
            drop(observers);
            drop(observer);
        }
    }
}

impl fmt::Debug for WebNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebNotifier").field("observers", &self.observer_count()).finish()
    }
}

impl IntersectionNotifier for WebNotifier {
    type Target = ObservedElement;

    fn register(
        &self,
        target: &ObservedElement,
        config: &NotifierConfig,
        callback: IntersectionCallback<ObservedElement>,
    ) -> Result<Registration, PlatformError> {
        let key = format!("{} {}", config.root_margin, config.threshold);

        let mut observers = self.observers.borrow_mut();
        let index = match observers.connected.iter().position(|observer| {
            observer.key == key && !observer.registry.contains_target(target)
        }) {
            Some(index) => index,
            None => {
                let registry = Registry::new();
                let handle = IntersectionObserverHandle::new(config, {
                    let registry = registry.clone();
                    move |entries| registry.deliver(entries)
                })?;
                let id = observers.next_id;
                observers.next_id += 1;
                tracing::debug!(observer_id = id, key = %key, "connected `IntersectionObserver`");

                observers.connected.push(SharedObserver { id, key, registry, handle });
                observers.connected.len() - 1
            },
        };

        let observer = &observers.connected[index];
        let (id, already_observed) = observer.registry.insert(target.clone(), callback);
        if !already_observed {
            observer.handle.observe(target);
        }

        let observer_id = observer.id;
        let notifier = self.clone();
        Ok(Registration::new(move || notifier.unregister(observer_id, id)))
    }
}
