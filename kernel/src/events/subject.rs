// SPDX-License-Identifier: MPL-2.0

use super::{Events, Observer};
use crate::prelude::*;

/// A subject that event observers subscribe to.
///
/// Observers are held weakly so that a subject never keeps its observers
/// alive; dead observers are pruned on the next notification.
pub struct Subject<E: Events> {
    observers: Mutex<Vec<Weak<dyn Observer<E>>>>,
}

impl<E: Events> Subject<E> {
    pub const fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Registers an observer which watches events of this subject.
    pub fn register_observer(&self, observer: Weak<dyn Observer<E>>) {
        self.observers.lock().push(observer);
    }

    /// Unregisters a previously registered observer.
    pub fn unregister_observer(&self, observer: &Weak<dyn Observer<E>>) {
        self.observers
            .lock()
            .retain(|other| !Weak::ptr_eq(other, observer));
    }

    /// Notifies all live observers of some events.
    pub fn notify_observers(&self, events: &E) {
        let mut observers = self.observers.lock();
        observers.retain(|observer| match observer.upgrade() {
            Some(observer) => {
                observer.on_events(events);
                true
            }
            None => false,
        });
    }
}

impl<E: Events> Default for Subject<E> {
    fn default() -> Self {
        Self::new()
    }
}
