use std::cell::RefCell;
use std::rc::Rc;

use track_store::{Store, Subscription, TrackPoint};

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

pub fn points(raw: &[(f64, f64)]) -> Vec<TrackPoint> {
    raw.iter()
        .map(|(lat, lng)| TrackPoint::new(*lat, *lng))
        .collect()
}

/// Collects every value a store delivers to it.
pub struct Recorder<T> {
    seen: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn attach(&self, store: &Store<T>) -> Subscription {
        let seen = self.seen.clone();
        store.subscribe(move |v: &T| seen.borrow_mut().push(v.clone()))
    }

    pub fn attach_with_current(&self, store: &Store<T>) -> Subscription {
        let seen = self.seen.clone();
        store.subscribe_with_current(move |v: &T| seen.borrow_mut().push(v.clone()))
    }

    pub fn seen(&self) -> Vec<T> {
        self.seen.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}
