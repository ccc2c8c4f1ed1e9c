use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use common::logger::{child_span, warn_if_slow};
use parking_lot::{Mutex, RwLock};
use tracing::trace;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Listeners slower than one frame get reported.
const SLOW_NOTIFY: Duration = Duration::from_millis(16);

struct Shared<T> {
    value: RwLock<T>,
    /// Snapshot restored by [`Observable::reset`].
    initial: T,
    version: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_listener_id: AtomicU64,
    dispatch: Mutex<Dispatch<T>>,
}

/// Snapshots waiting to be delivered, in write order.
///
/// While one caller is delivering (`running`), writes made from inside a
/// listener only enqueue; the delivering caller drains them after its pass so
/// every listener sees every snapshot in version order.
struct Dispatch<T> {
    queue: VecDeque<T>,
    running: bool,
}

/// Marks the dispatcher idle when a listener panics mid-drain, so later
/// writes are still delivered.
struct DrainGuard<'a, T>(&'a Mutex<Dispatch<T>>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut dispatch = self.0.lock();
            dispatch.queue.clear();
            dispatch.running = false;
        }
    }
}

/// Shared, version-tracked value with change notification.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cell holding `initial`; `initial` is also the reset target.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(initial.clone()),
                initial,
                version: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                dispatch: Mutex::new(Dispatch {
                    queue: VecDeque::new(),
                    running: false,
                }),
            }),
        }
    }

    /// Clone of the current value.
    pub fn read(&self) -> T {
        self.shared.value.read().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.read())
    }

    /// Number of writes applied since creation.
    pub fn version(&self) -> u64 {
        self.shared.version.load(Ordering::Acquire)
    }

    /// Replace the value.
    pub fn write(&self, value: T) {
        self.update(move |v| *v = value);
    }

    /// Mutate the value in place and notify listeners once.
    ///
    /// `f` runs under the write lock and must not touch this cell. A write
    /// made from inside a listener returns before its own notification is
    /// delivered; the outer write delivers it once the current pass is done.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (out, version, deliver) = {
            let mut guard = self.shared.value.write();
            let out = f(&mut guard);
            let version = self.shared.version.fetch_add(1, Ordering::AcqRel) + 1;

            // Enqueue under the value lock so queue order is version order.
            let mut dispatch = self.shared.dispatch.lock();
            dispatch.queue.push_back(guard.clone());
            let deliver = !dispatch.running;
            dispatch.running = true;
            (out, version, deliver)
        };

        trace!(version, deliver, "observable updated");
        if deliver {
            self.drain();
        }
        out
    }

    /// Restore the value the cell was created with.
    pub fn reset(&self) {
        self.write(self.shared.initial.clone());
    }

    /// Register `listener`; it is called with the new value after every write.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.shared.listeners.lock().push((id, Arc::new(listener)));

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.listeners.lock().retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.lock().len()
    }

    fn drain(&self) {
        let _unwind = DrainGuard(&self.shared.dispatch);
        loop {
            let snapshot = {
                let mut dispatch = self.shared.dispatch.lock();
                match dispatch.queue.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        // Idle under the same lock as the empty pop, so a
                        // concurrent write either lands here or drains itself.
                        dispatch.running = false;
                        return;
                    }
                }
            };
            self.notify(&snapshot);
        }
    }

    fn notify(&self, snapshot: &T) {
        // Copy out so listeners can (un)subscribe or write while being called.
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        if listeners.is_empty() {
            return;
        }

        let _span = child_span("observable_notify").entered();
        warn_if_slow("observable_notify", SLOW_NOTIFY, || {
            for listener in &listeners {
                listener(snapshot);
            }
        });
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now. Same as dropping the guard.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn write_bumps_version_and_notifies() {
        let cell = Observable::new(1u32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _sub = cell.subscribe(move |v| sink.lock().push(*v));

        cell.write(2);
        cell.update(|v| *v += 3);

        assert_eq!(cell.read(), 5);
        assert_eq!(cell.version(), 2);
        assert_eq!(*seen.lock(), vec![2, 5]);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let cell = Observable::new(0u32);
        let calls = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&calls);
        let sub = cell.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        cell.write(1);
        drop(sub);
        cell.write(2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cell.listener_count(), 0);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let cell = Observable::new(0u8);
        let order = Arc::new(Mutex::new(Vec::new()));

        let a = Arc::clone(&order);
        let _s1 = cell.subscribe(move |_| a.lock().push("first"));
        let b = Arc::clone(&order);
        let _s2 = cell.subscribe(move |_| b.lock().push("second"));

        cell.write(1);

        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn listener_may_read_the_cell_it_observes() {
        let cell = Observable::new(String::from("a"));
        let observed = Arc::new(Mutex::new(String::new()));

        let reader = cell.clone();
        let sink = Arc::clone(&observed);
        let _sub = cell.subscribe(move |_| *sink.lock() = reader.read());

        cell.write("b".to_string());

        assert_eq!(*observed.lock(), "b");
    }

    #[test]
    fn nested_write_is_delivered_after_current_pass() {
        let cell = Observable::new(0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let writer = cell.clone();
        let a = Arc::clone(&seen);
        let _s1 = cell.subscribe(move |v| {
            a.lock().push(("writer", *v));
            if *v == 1 {
                writer.write(2);
            }
        });
        let b = Arc::clone(&seen);
        let _s2 = cell.subscribe(move |v| b.lock().push(("reader", *v)));

        cell.write(1);

        assert_eq!(
            *seen.lock(),
            vec![("writer", 1), ("reader", 1), ("writer", 2), ("reader", 2)]
        );
    }

    #[test]
    fn panicking_listener_does_not_stall_later_writes() {
        let cell = Observable::new(0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        let _sub = cell.subscribe(move |v| {
            if *v == 1 {
                panic!("listener failed");
            }
            s.lock().push(*v);
        });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cell.write(1)));
        assert!(outcome.is_err());

        cell.write(2);
        assert_eq!(*seen.lock(), vec![2]);
    }

    #[test]
    fn reset_restores_initial_value() {
        let cell = Observable::new(vec![1, 2]);
        cell.update(|v| v.push(3));
        cell.reset();

        assert_eq!(cell.read(), vec![1, 2]);
        assert_eq!(cell.version(), 2);
    }

    #[test]
    fn subscription_outliving_cell_is_harmless() {
        let cell = Observable::new(0u8);
        let sub = cell.subscribe(|_| {});
        drop(cell);
        sub.unsubscribe();
    }
}
