//! Listener registry for session state changes

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::state::AuthState;

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Registered listeners, called in subscription order
#[derive(Default, Clone)]
pub(crate) struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub(crate) fn add(&self, listener: Listener) -> Subscription {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    /// Call every listener with `state`.
    ///
    /// The registry lock is released before the calls, so a listener may
    /// subscribe, unsubscribe or read the manager state.
    pub(crate) fn notify(&self, state: &AuthState) {
        let listeners: Vec<Listener> =
            self.registry.lock().listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in listeners {
            listener(state);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

/// Handle of a registered listener
///
/// The listener stays registered while this handle lives; dropping it or
/// calling [`Subscription::unsubscribe`] removes it.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keep the listener registered for the lifetime of the manager.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
