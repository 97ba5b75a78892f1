//! Bookkeeping for a notifier shared by several registrations.
//!
//! The platform notifier can't tell whether other targets are still observed: an empty record
//! queue doesn't mean an empty target list. So every registration is tracked here, and the
//! notifier is only torn down once the registry reports itself empty.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::notifier::{IntersectionCallback, IntersectionEntry, ViewportTarget};

/// Identifies one registration in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

/// What removing a registration left behind.
#[derive(Debug)]
pub struct Removal<T> {
    /// The target of the removed registration.
    pub target: T,
    /// No other registration observes this target, so it can be unobserved.
    pub last_for_target: bool,
    /// No registration is left, so the notifier can be disconnected.
    pub now_empty: bool,
}

type SharedCallback<T> = Rc<RefCell<IntersectionCallback<T>>>;

struct Slot<T> {
    id: RegistrationId,
    target: T,
    callback: SharedCallback<T>,
}

struct Inner<T> {
    next_id: u64,
    slots: Vec<Slot<T>>,
}

/// The registrations of one notifier, and the routing of its entries to their callbacks.
///
/// Cloning yields another handle to the same registry.
pub struct Registry<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: ViewportTarget> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ViewportTarget> Registry<T> {
    pub fn new() -> Self {
        Self { inner: Rc::new(RefCell::new(Inner { next_id: 0, slots: Vec::new() })) }
    }

    /// Add a registration. Returns its id, and whether `target` was already observed by an
    /// earlier registration.
    pub fn insert(
        &self,
        target: T,
        callback: IntersectionCallback<T>,
    ) -> (RegistrationId, bool) {
        let mut inner = self.inner.borrow_mut();
        let already_observed = inner.slots.iter().any(|slot| slot.target == target);

        let id = RegistrationId(inner.next_id);
        inner.next_id += 1;
        inner.slots.push(Slot { id, target, callback: Rc::new(RefCell::new(callback)) });
        tracing::trace!(?id, count = inner.slots.len(), "registered target");

        (id, already_observed)
    }

    /// Remove a registration. Returns `None` if it was already removed.
    pub fn remove(&self, id: RegistrationId) -> Option<Removal<T>> {
        let mut inner = self.inner.borrow_mut();
        let index = inner.slots.iter().position(|slot| slot.id == id)?;
        let slot = inner.slots.remove(index);

        let last_for_target = !inner.slots.iter().any(|other| other.target == slot.target);
        let now_empty = inner.slots.is_empty();
        tracing::trace!(?id, count = inner.slots.len(), "unregistered target");

        Some(Removal { target: slot.target, last_for_target, now_empty })
    }

    pub fn contains(&self, id: RegistrationId) -> bool {
        self.inner.borrow().slots.iter().any(|slot| slot.id == id)
    }

    pub fn contains_target(&self, target: &T) -> bool {
        self.inner.borrow().slots.iter().any(|slot| slot.target == *target)
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hand every entry to the callbacks registered for its target, preserving entry order.
    ///
    /// Callbacks may register or unregister while being called. A registration removed during
    /// delivery receives nothing more, not even the remaining entries of this batch.
    pub fn deliver(&self, entries: &[IntersectionEntry<T>]) {
        let snapshot: Vec<(RegistrationId, T, SharedCallback<T>)> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|slot| (slot.id, slot.target.clone(), slot.callback.clone()))
            .collect();

        for (id, target, callback) in snapshot {
            let addressed: Vec<IntersectionEntry<T>> =
                entries.iter().filter(|entry| entry.target == target).cloned().collect();
            if addressed.is_empty() || !self.contains(id) {
                continue;
            }

            match callback.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(&addressed),
                Err(_) => {
                    tracing::warn!(?id, "dropped intersection entries delivered re-entrantly");
                },
            }
        }
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f.debug_struct("Registry").field("len", &inner.slots.len()).finish(),
            Err(_) => f.debug_struct("Registry").finish_non_exhaustive(),
        }
    }
}
