//! Single-threaded reactive value containers.
//!
//! A [`Store<T>`] holds a value and a registry of subscriber callbacks.
//! Every write replaces the value and then calls each subscriber once with
//! the new value, in the order they subscribed. Writes made from inside a
//! callback are queued and delivered after the current round, so all
//! subscribers observe writes in the order they happened.
//!
//! Handles are `Rc` based: cloning a `Store` gives another handle to the
//! same value. No borrow is held while a callback runs, so callbacks may
//! read, write, subscribe and unsubscribe freely.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct StoreInner<T> {
    name: &'static str,
    value: Rc<T>,
    version: u64,
    next_subscriber_id: u64,
    // ordered by id, which is the registration order
    subscribers: BTreeMap<u64, Callback<T>>,
    // written values waiting for delivery, with the first subscriber id
    // that must not see them
    pending: VecDeque<(Rc<T>, u64)>,
    notifying: bool,
}

pub struct Store<T> {
    inner: Rc<RefCell<StoreInner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("name", &inner.name)
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Returned by `subscribe`. The callback stays registered until
/// [`unsubscribe`](Subscription::unsubscribe) is called or the handle is
/// dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }

    /// Keeps the callback registered for as long as the store lives.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

// Resets the delivery state if a callback panics so the store stays usable.
struct NotifyingGuard<'a, T> {
    inner: &'a RefCell<StoreInner<T>>,
}

impl<T> Drop for NotifyingGuard<'_, T> {
    fn drop(&mut self) {
        let undelivered = {
            let mut inner = self.inner.borrow_mut();
            inner.notifying = false;
            std::mem::take(&mut inner.pending)
        };
        // queued values may own subscriptions to this store
        drop(undelivered);
    }
}

impl<T: 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self::named("store", value)
    }

    /// Like `new`, with a name used in log messages.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                name,
                value: Rc::new(value),
                version: 0,
                next_subscriber_id: 0,
                subscribers: BTreeMap::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.borrow().name
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.inner.borrow().value)
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = Rc::clone(&self.inner.borrow().value);
        f(value.as_ref())
    }

    pub fn set(&self, value: T) {
        let (previous, should_deliver) = {
            let mut inner = self.inner.borrow_mut();
            let previous = std::mem::replace(&mut inner.value, Rc::new(value));
            inner.version = inner.version.wrapping_add(1);
            trace!(
                "[{}] write, version={}, subscribers={}",
                inner.name,
                inner.version,
                inner.subscribers.len()
            );
            let value = Rc::clone(&inner.value);
            let limit = inner.next_subscriber_id;
            inner.pending.push_back((value, limit));
            // a write from inside a callback is delivered by the outer `set`
            let should_deliver = !inner.notifying;
            inner.notifying = true;
            (previous, should_deliver)
        };
        // the old value may own subscriptions to this store
        drop(previous);
        if should_deliver {
            self.deliver_pending();
        }
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let current = Rc::clone(&self.inner.borrow().value);
        let next = f(current.as_ref());
        drop(current);
        self.set(next);
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.register(Rc::new(callback))
    }

    /// Like `subscribe`, but also calls `callback` with the current value
    /// right away, so an observer can render the initial state.
    pub fn subscribe_with_current(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        let subscription = self.register(Rc::clone(&callback));
        let current = Rc::clone(&self.inner.borrow().value);
        callback(current.as_ref());
        subscription
    }

    fn register(&self, callback: Callback<T>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_subscriber_id;
            inner.next_subscriber_id += 1;
            inner.subscribers.insert(id, callback);
            debug!("[{}] subscriber {} added", inner.name, id);
            id
        };

        let weak: Weak<RefCell<StoreInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let removed = {
                        let mut inner = inner.borrow_mut();
                        let removed = inner.subscribers.remove(&id);
                        if removed.is_some() {
                            debug!("[{}] subscriber {} removed", inner.name, id);
                        }
                        removed
                    };
                    // the callback may own other subscriptions to this store
                    drop(removed);
                }
            })),
        }
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn deliver_pending(&self) {
        let _guard = NotifyingGuard { inner: &self.inner };
        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            let Some((value, limit)) = next else {
                break;
            };

            let ids: Vec<u64> = self
                .inner
                .borrow()
                .subscribers
                .range(..limit)
                .map(|(id, _)| *id)
                .collect();
            for id in ids {
                // skip subscribers removed earlier in this round
                let callback = self.inner.borrow().subscribers.get(&id).cloned();
                if let Some(callback) = callback {
                    callback(value.as_ref());
                }
            }
        }
    }
}

/// Read side of a store, for collaborators that only observe.
pub trait Readable<T> {
    fn get(&self) -> T;

    fn subscribe(&self, callback: Box<dyn Fn(&T)>) -> Subscription;

    fn subscribe_with_current(&self, callback: Box<dyn Fn(&T)>) -> Subscription;
}

/// Write side of a store.
pub trait Writable<T>: Readable<T> {
    fn set(&self, value: T);

    fn update(&self, f: &dyn Fn(&T) -> T) {
        let next = f(&self.get());
        self.set(next);
    }
}

impl<T: Clone + 'static> Readable<T> for Store<T> {
    fn get(&self) -> T {
        Store::get(self)
    }

    fn subscribe(&self, callback: Box<dyn Fn(&T)>) -> Subscription {
        Store::subscribe(self, callback)
    }

    fn subscribe_with_current(&self, callback: Box<dyn Fn(&T)>) -> Subscription {
        Store::subscribe_with_current(self, callback)
    }
}

impl<T: Clone + 'static> Writable<T> for Store<T> {
    fn set(&self, value: T) {
        Store::set(self, value)
    }

    fn update(&self, f: &dyn Fn(&T) -> T) {
        Store::update(self, f)
    }
}
