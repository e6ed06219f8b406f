use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Notify callback invoked with each newly committed value.
pub(crate) type Callback<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

pub(crate) struct Subscriber<T> {
    pub(crate) active: Arc<AtomicBool>,
    pub(crate) callback: Callback<T>,
    id: u64,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            active: Arc::clone(&self.active),
            callback: Arc::clone(&self.callback),
            id: self.id,
        }
    }
}

impl<T> Subscriber<T> {
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Ordered subscriber registry. Duplicates are allowed.
pub(crate) struct SubscriberList<T> {
    next_id: u64,
    entries: Vec<Subscriber<T>>,
}

impl<T> SubscriberList<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, callback: Callback<T>) -> (u64, Arc<AtomicBool>) {
        let id = self.next_id;
        self.next_id += 1;
        let active = Arc::new(AtomicBool::new(true));
        self.entries.push(Subscriber {
            active: Arc::clone(&active),
            callback,
            id,
        });
        (id, active)
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        self.entries.len() != before
    }

    /// Copy of the current list, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<Subscriber<T>> {
        self.entries.clone()
    }

    /// Deactivate and drop every subscriber. Returns how many were removed.
    pub(crate) fn clear(&mut self) -> usize {
        for entry in &self.entries {
            entry.active.store(false, Ordering::Release);
        }
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cell side of a subscription, type-erased so handles need no `T`.
pub(crate) trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

/// Handle returned by [`StateCell::subscribe`](super::StateCell::subscribe).
///
/// Dropping the handle does not unsubscribe; call [`unsubscribe`](Self::unsubscribe).
/// The handle does not keep the cell alive.
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    cell: Weak<dyn Detach>,
}

impl Subscription {
    pub(crate) fn new(id: u64, active: Arc<AtomicBool>, cell: Weak<dyn Detach>) -> Self {
        Self { id, active, cell }
    }

    /// Remove the callback from its cell.
    ///
    /// Takes effect immediately, including for a notification pass that is
    /// already running. Returns `false` if it was already removed.
    pub fn unsubscribe(&self) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }
        if let Some(cell) = self.cell.upgrade() {
            cell.detach(self.id);
        }
        tracing::trace!(subscription = self.id, "Unsubscribed");
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
