//! Pure connectivity reducer.
//!
//! # Transitions
//!
//! ```text
//! Checking ──ReachabilityOk(verdict)──▶ Online | OnlineStale
//! Offline  ──ReachabilityOk(verdict)──▶ Online | OnlineStale
//! any      ──ReachabilityLost─▶ Offline
//! Online   ──CacheAged(stale|outdated)──▶ OnlineStale
//! OnlineStale ──RefreshSucceeded──▶ Online
//! ```
//!
//! `ReachabilityOk` carries the cache's classification at the moment the
//! check succeeded, so a reconnect never reuses a verdict from before the
//! outage. Refresh events toggle `is_refreshing` and never move `status` on
//! their own, except that a successful refresh clears `OnlineStale`.

use super::state::{ConnectivityEvent, ConnectivityState, ConnectivityStatus};
use crate::cache::CacheStore;
use crate::staleness::Staleness;

/// Apply one event to a state.
pub fn reduce(state: &ConnectivityState, event: &ConnectivityEvent) -> ConnectivityState {
    let mut next = *state;

    match *event {
        ConnectivityEvent::ReachabilityOk {
            age_minutes,
            staleness,
        } => {
            next.data_age_minutes = age_minutes;
            next.freshness = Some(staleness);
            next.status = ConnectivityStatus::online_for(staleness);
        }
        ConnectivityEvent::ReachabilityLost => {
            next.status = ConnectivityStatus::Offline;
        }
        ConnectivityEvent::RefreshStarted => {
            next.is_refreshing = true;
        }
        ConnectivityEvent::RefreshSucceeded => {
            next.is_refreshing = false;
            next.data_age_minutes = Some(0);
            next.freshness = Some(Staleness::Fresh);
            if state.status == ConnectivityStatus::OnlineStale {
                next.status = ConnectivityStatus::Online;
            }
        }
        ConnectivityEvent::RefreshFailed => {
            next.is_refreshing = false;
        }
        ConnectivityEvent::CacheAged {
            age_minutes,
            staleness,
        } => {
            next.data_age_minutes = age_minutes;
            next.freshness = Some(staleness);
            if state.status.is_online() {
                next.status = ConnectivityStatus::online_for(staleness);
            }
        }
    }

    next
}

/// Apply a sequence of events, starting from the initial state.
pub fn replay<'a>(events: impl IntoIterator<Item = &'a ConnectivityEvent>) -> ConnectivityState {
    events
        .into_iter()
        .fold(ConnectivityState::default(), |state, event| reduce(&state, event))
}

/// Build a [`ConnectivityEvent::CacheAged`] from the store's view of `key`.
pub fn cache_aged(store: &CacheStore, key: &str) -> ConnectivityEvent {
    let status = store.status(key);
    ConnectivityEvent::CacheAged {
        age_minutes: status.age_minutes,
        staleness: status.staleness,
    }
}

/// Build a [`ConnectivityEvent::ReachabilityOk`] from the store's view of `key`.
pub fn reachability_ok(store: &CacheStore, key: &str) -> ConnectivityEvent {
    let status = store.status(key);
    ConnectivityEvent::ReachabilityOk {
        age_minutes: status.age_minutes,
        staleness: status.staleness,
    }
}
