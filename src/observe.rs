//! Explicit change notification for the layer that owns the containers.
//!
//! Containers never notify anyone on their own. A UI adapter that wants to
//! react to writes keeps a [`Watchers`] next to the container and calls
//! [`Watchers::notify`] after it writes, typically with the fresh projection.
//! There is no dependency tracking here: one list of callbacks, called in
//! registration order.

use std::fmt;

/// Handle returned by [`Watchers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub struct Watchers<T> {
    next_id: u64,
    callbacks: Vec<(Subscription, Box<dyn Fn(&T)>)>,
}

impl<T> Watchers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
    pub fn subscribe(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        self.callbacks.push((subscription, Box::new(callback)));
        subscription
    }
    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(s, _)| *s != subscription);
        self.callbacks.len() != before
    }
    pub fn notify(&self, state: &T) {
        for (_, callback) in &self.callbacks {
            callback(state);
        }
    }
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T> Default for Watchers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Watchers<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Watchers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
