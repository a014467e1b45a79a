//! Stateful wrapper around the reducer with change listeners.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::reducer::{cache_aged, reachability_ok, reduce};
use super::state::{ConnectivityEvent, ConnectivityState};
use crate::cache::CacheStore;

/// Handle returned by [`ConnectivityMachine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ConnectivityState) + Send + Sync>;

/// States waiting to be delivered, in the order they were reached.
#[derive(Default)]
struct Outbox {
    pending: VecDeque<ConnectivityState>,
    /// Set while some thread is delivering `pending`.
    draining: bool,
}

/// Owns the current connectivity state and notifies listeners on change.
///
/// Listeners run after the state lock has been released, so a listener may
/// call back into the machine. Notifications are delivered in the order the
/// states were reached: a dispatch made while another thread (or the same
/// listener) is still delivering is queued and delivered by that thread once
/// the current listeners return. The last state a listener sees is always the
/// machine's current state.
pub struct ConnectivityMachine {
    state: Mutex<ConnectivityState>,
    outbox: Mutex<Outbox>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl ConnectivityMachine {
    pub fn new() -> Self {
        Self::with_state(ConnectivityState::default())
    }

    /// Start from a known state instead of `Checking`.
    pub fn with_state(state: ConnectivityState) -> Self {
        Self {
            state: Mutex::new(state),
            outbox: Mutex::new(Outbox::default()),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The current state.
    pub fn state(&self) -> ConnectivityState {
        *self.state.lock()
    }

    /// Apply `event` and return the resulting state.
    pub fn dispatch(&self, event: ConnectivityEvent) -> ConnectivityState {
        let (previous, next) = {
            let mut state = self.state.lock();
            let previous = *state;
            let next = reduce(&previous, &event);
            *state = next;
            if previous != next {
                // Queued under the state lock so queue order matches state order.
                self.outbox.lock().pending.push_back(next);
            }
            (previous, next)
        };

        if previous == next {
            debug!(event = %event, status = %next.status, "Connectivity event caused no change");
            return next;
        }

        if previous.status != next.status {
            info!(
                from = %previous.status,
                to = %next.status,
                event = %event,
                "Connectivity status changed"
            );
        } else {
            debug!(event = %event, refreshing = next.is_refreshing, "Connectivity state updated");
        }

        self.deliver();
        next
    }

    /// Reclassify `key` in `store` and dispatch the result.
    pub fn observe_cache(&self, store: &CacheStore, key: &str) -> ConnectivityState {
        self.dispatch(cache_aged(store, key))
    }

    /// Report that the backend is reachable, classifying `key` as of now.
    pub fn restore(&self, store: &CacheStore, key: &str) -> ConnectivityState {
        self.dispatch(reachability_ok(store, key))
    }

    /// Register a listener called with the new state after each change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ConnectivityState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Drain the outbox unless another call is already draining it.
    fn deliver(&self) {
        {
            let mut outbox = self.outbox.lock();
            if outbox.draining {
                return;
            }
            outbox.draining = true;
        }

        loop {
            let state = {
                let mut outbox = self.outbox.lock();
                match outbox.pending.pop_front() {
                    Some(state) => state,
                    None => {
                        outbox.draining = false;
                        return;
                    }
                }
            };

            let listeners: Vec<Listener> = self
                .listeners
                .lock()
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            for listener in listeners {
                listener(&state);
            }
        }
    }
}

impl Default for ConnectivityMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectivityMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityMachine")
            .field("state", &self.state())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}
