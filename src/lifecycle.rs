//! Mount / update / unmount for a component instance.
//!
//! A [`Mount`] owns the subscriptions registered for one instance of a
//! component. Mounting is creating the `Mount`, every update hook is a
//! subscriber, and unmounting unsubscribes them all and tears the cell down.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::cell::{StateCell, Subscription};

pub struct Mount<T: Send + Sync + 'static> {
    cell: StateCell<T>,
    hooks: Mutex<Vec<Subscription>>,
    mounted: AtomicBool,
}

impl<T: Send + Sync + 'static> Mount<T> {
    pub fn new(cell: StateCell<T>) -> Self {
        tracing::debug!("Component mounted");
        Self {
            cell,
            hooks: Mutex::new(Vec::new()),
            mounted: AtomicBool::new(true),
        }
    }

    /// Mount a fresh cell holding `initial`.
    pub fn with_initial(initial: T) -> Self {
        Self::new(StateCell::new(initial))
    }

    pub fn cell(&self) -> &StateCell<T> {
        &self.cell
    }

    /// Run `hook` after every applied update while mounted.
    ///
    /// Returns `false` without registering if already unmounted. The flag is
    /// checked under the hook list lock so a concurrent `unmount` either sees
    /// the new hook or prevents it from registering.
    pub fn on_update<F>(&self, hook: F) -> bool
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut hooks = self.hooks.lock();
        if !self.is_mounted() {
            return false;
        }
        hooks.push(self.cell.subscribe(hook));
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Unsubscribe every hook and tear down the cell. Idempotent.
    pub fn unmount(&self) {
        if !self.mounted.swap(false, Ordering::AcqRel) {
            return;
        }

        let hooks = std::mem::take(&mut *self.hooks.lock());
        let count = hooks.len();
        for hook in hooks {
            hook.unsubscribe();
        }
        self.cell.teardown();
        tracing::debug!(hooks = count, "Component unmounted");
    }
}

impl<T: Send + Sync + 'static> Drop for Mount<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn hooks_run_until_unmount() {
        let mount = Mount::with_initial(0);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        assert!(mount.on_update(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        mount.cell().replace(1).unwrap();
        mount.unmount();
        mount.cell().replace(2).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!mount.is_mounted());
        assert!(!mount.on_update(|_| {}));
    }

    #[test]
    fn drop_unmounts() {
        let cell = StateCell::new(0);
        {
            let mount = Mount::new(cell.clone());
            mount.on_update(|_| {});
            assert_eq!(cell.subscriber_count(), 1);
        }
        assert_eq!(cell.subscriber_count(), 0);
    }
}
