//! Reactive state container.
//!
//! A [`StateCell`] holds exactly one value per logical component instance.
//! Updates are queued and applied one at a time in submission order; after
//! each applied update every live subscriber is notified with the new value.
//!
//! ```text
//!            request_update            queue empty
//!   Idle ───────────────────→ Applying ────────────→ Idle
//!                               │  ↑
//!                               └──┘ request_update (appended to queue)
//! ```
//!
//! The held value is stored behind an `Arc` and replaced wholesale on every
//! commit, so a value obtained from [`StateCell::read`] never changes after
//! the fact.

mod error;
mod history;
mod merge;
mod subscription;
mod update;

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::config::{CellConfig, DrainMode};

pub use error::{BoxError, StateError};
pub use history::CommitRecord;
pub use subscription::Subscription;
pub use update::{TransformFn, UpdateKind, UpdateRequest};

use history::CommitLog;
use subscription::{Callback, Detach, SubscriberList};

/// Drain state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No drain in progress.
    Idle,
    /// A caller is applying queued requests.
    Applying,
}

struct Pending<T> {
    request: UpdateRequest<T>,
    kind: UpdateKind,
}

struct Core<T> {
    current: Arc<T>,
    revision: u64,
    queue: VecDeque<Pending<T>>,
    phase: Phase,
    drain: DrainMode,
    history: CommitLog,
}

struct Inner<T> {
    core: Mutex<Core<T>>,
    subscribers: Mutex<SubscriberList<T>>,
    changed: Notify,
}

impl<T: Send + Sync + 'static> Detach for Inner<T> {
    fn detach(&self, id: u64) {
        self.subscribers.lock().remove(id);
    }
}

/// Thread-safe reactive value container.
///
/// Cloning is cheap; clones share the same value, queue and subscribers.
pub struct StateCell<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> StateCell<T> {
    /// Create a cell with default configuration (eager draining, history on).
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, &CellConfig::default())
    }

    pub fn with_config(initial: T, config: &CellConfig) -> Self {
        let core = Core {
            current: Arc::new(initial),
            revision: 0,
            queue: VecDeque::new(),
            phase: Phase::Idle,
            drain: config.drain,
            history: CommitLog::new(config.history_limit),
        };
        Self {
            inner: Arc::new(Inner {
                core: Mutex::new(core),
                subscribers: Mutex::new(SubscriberList::new()),
                changed: Notify::new(),
            }),
        }
    }

    /// Latest committed value.
    ///
    /// Safe to call from subscribers and transforms. Reflects every update
    /// that has finished applying.
    pub fn read(&self) -> Arc<T> {
        Arc::clone(&self.inner.core.lock().current)
    }

    /// Clone of the latest committed value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        (*self.read()).clone()
    }

    /// Number of commits applied so far. A fresh cell is at revision 0.
    pub fn revision(&self) -> u64 {
        self.inner.core.lock().revision
    }

    pub fn phase(&self) -> Phase {
        self.inner.core.lock().phase
    }

    /// Requests waiting to be applied.
    pub fn pending(&self) -> usize {
        self.inner.core.lock().queue.len()
    }

    pub fn drain_mode(&self) -> DrainMode {
        self.inner.core.lock().drain
    }

    /// Recent commits, oldest first.
    pub fn history(&self) -> Vec<CommitRecord> {
        self.inner.core.lock().history.snapshot()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Submit an update.
    ///
    /// With [`DrainMode::Eager`] the queue is drained before this returns,
    /// unless another call is already draining it, in which case the request
    /// is appended and applied by that call. With [`DrainMode::Deferred`]
    /// the request is only queued until [`flush`](Self::flush).
    ///
    /// # Errors
    /// Returns [`StateError::TransformFailure`] if a transform applied by
    /// this call fails. The failed request is discarded and the cell keeps
    /// its previous value. The rest of the queue is still applied, and the
    /// first failure is the one returned.
    pub fn request_update(&self, request: UpdateRequest<T>) -> Result<(), StateError> {
        let kind = request.kind();
        self.enqueue(request, kind)
    }

    pub fn replace(&self, value: T) -> Result<(), StateError> {
        self.request_update(UpdateRequest::replace(value))
    }

    pub fn update<F>(&self, f: F) -> Result<(), StateError>
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        self.request_update(UpdateRequest::transform(f))
    }

    pub fn try_update<F, E>(&self, f: F) -> Result<(), StateError>
    where
        F: FnOnce(&T) -> Result<T, E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.request_update(UpdateRequest::try_transform(f))
    }

    /// Apply every pending request.
    ///
    /// Returns immediately if a drain is already running; that drain picks
    /// up anything queued in the meantime. In [`DrainMode::Deferred`] a
    /// failed transform stops the flush and leaves later requests pending.
    pub fn flush(&self) -> Result<(), StateError> {
        {
            let mut core = self.inner.core.lock();
            if core.phase == Phase::Applying || core.queue.is_empty() {
                return Ok(());
            }
            core.phase = Phase::Applying;
        }
        self.drain()
    }

    /// Register a notify callback.
    ///
    /// The callback runs after every applied update with the new value, with
    /// no lock held. Registering the same callback twice delivers twice.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, active) = self.inner.subscribers.lock().insert(callback);
        tracing::trace!(subscription = id, "Subscribed");

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let cell: Weak<dyn Detach> = weak;
        Subscription::new(id, active, cell)
    }

    /// Tear down the cell: drop every subscriber and discard pending requests.
    ///
    /// The committed value stays readable. Returns the number of discarded
    /// requests.
    pub fn teardown(&self) -> usize {
        let removed = self.inner.subscribers.lock().clear();
        let discarded = {
            let mut core = self.inner.core.lock();
            let discarded = core.queue.len();
            core.queue.clear();
            discarded
        };
        tracing::debug!(subscribers = removed, discarded, "State cell torn down");
        discarded
    }

    /// Wait until the revision exceeds `since` and return it.
    pub async fn changed(&self, since: u64) -> u64 {
        loop {
            // Register with Notify before checking the revision so a commit
            // between the check and the await still wakes us.
            let notified = self.inner.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let revision = self.revision();
            if revision > since {
                return revision;
            }
            notified.await;
        }
    }

    pub(crate) fn enqueue(&self, request: UpdateRequest<T>, kind: UpdateKind) -> Result<(), StateError> {
        let start = {
            let mut core = self.inner.core.lock();
            core.queue.push_back(Pending { request, kind });
            match (core.phase, core.drain) {
                (Phase::Applying, _) => {
                    tracing::trace!(pending = core.queue.len(), %kind, "Update queued behind active drain");
                    false
                }
                (Phase::Idle, DrainMode::Deferred) => false,
                (Phase::Idle, DrainMode::Eager) => {
                    core.phase = Phase::Applying;
                    true
                }
            }
        };

        if start {
            self.drain()
        } else {
            Ok(())
        }
    }

    /// Apply queued requests until the queue is empty.
    ///
    /// The caller must have moved the phase to `Applying`; this call owns the
    /// drain until it returns.
    fn drain(&self) -> Result<(), StateError> {
        let inner = &self.inner;
        let _reset = scopeguard::guard_on_unwind((), |()| {
            inner.core.lock().phase = Phase::Idle;
        });

        // Eager drains finish the queue past a failed request, since callers
        // who enqueued behind it were already told their update was accepted.
        let mut first_error: Option<StateError> = None;

        loop {
            let (pending, prev, base) = {
                let mut core = inner.core.lock();
                match core.queue.pop_front() {
                    Some(pending) => (pending, Arc::clone(&core.current), core.revision),
                    None => {
                        core.phase = Phase::Idle;
                        return first_error.map_or(Ok(()), Err);
                    }
                }
            };

            let kind = pending.kind;
            let next = match pending.request.apply(&prev) {
                Ok(next) => Arc::new(next),
                Err(source) => {
                    tracing::warn!(
                        revision = base,
                        %kind,
                        error = %source,
                        "Transform failed, update discarded"
                    );
                    let error = StateError::TransformFailure {
                        revision: base,
                        source,
                    };

                    let mut core = inner.core.lock();
                    if core.drain == DrainMode::Deferred {
                        core.phase = Phase::Idle;
                        return Err(first_error.unwrap_or(error));
                    }
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                    continue;
                }
            };

            let revision = {
                let mut core = inner.core.lock();
                core.current = Arc::clone(&next);
                core.revision += 1;
                let revision = core.revision;
                core.history.record(revision, kind);
                revision
            };
            inner.changed.notify_waiters();

            let delivered = self.notify(&next);
            tracing::debug!(revision, %kind, subscribers = delivered, "Update applied");
        }
    }

    fn notify(&self, value: &T) -> usize {
        let subscribers = self.inner.subscribers.lock().snapshot();
        let mut delivered = 0;
        for subscriber in subscribers {
            // Skip entries unsubscribed earlier in this pass.
            if subscriber.is_active() {
                (subscriber.callback)(value);
                delivered += 1;
            }
        }
        delivered
    }
}

impl<T: std::fmt::Debug + Send + Sync + 'static> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.inner.core.lock();
        f.debug_struct("StateCell")
            .field("current", &core.current)
            .field("revision", &core.revision)
            .field("phase", &core.phase)
            .field("pending", &core.queue.len())
            .finish()
    }
}
