//! Connectivity state and events.

use crate::staleness::Staleness;

/// Top-level connectivity status shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectivityStatus {
    /// No reachability result yet.
    #[default]
    Checking,
    /// Reachable and the cached data is fresh.
    Online,
    /// Unreachable; the app is running on cached data.
    Offline,
    /// Reachable, but the cached data has aged past its stale threshold.
    OnlineStale,
}

impl ConnectivityStatus {
    /// Whether the backend is currently reachable.
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityStatus::Online | ConnectivityStatus::OnlineStale)
    }

    /// Online status matching a freshness verdict.
    pub(crate) fn online_for(freshness: Staleness) -> Self {
        match freshness {
            Staleness::Fresh => ConnectivityStatus::Online,
            Staleness::Stale | Staleness::Outdated => ConnectivityStatus::OnlineStale,
        }
    }
}

impl std::fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectivityStatus::Checking => write!(f, "checking"),
            ConnectivityStatus::Online => write!(f, "online"),
            ConnectivityStatus::Offline => write!(f, "offline"),
            ConnectivityStatus::OnlineStale => write!(f, "online (stale)"),
        }
    }
}

/// Full connectivity state.
///
/// `is_refreshing` is independent of `status`: a refresh can be in flight
/// while offline (it will fail) or while online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectivityState {
    pub status: ConnectivityStatus,
    /// Age of the tracked dataset, `None` when nothing is cached.
    pub data_age_minutes: Option<u64>,
    pub is_refreshing: bool,
    /// Last freshness verdict seen, `None` until the first one arrives.
    pub freshness: Option<Staleness>,
}

/// Inputs to the connectivity reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// A reachability check succeeded. Carries the cache's classification at
    /// that moment, since time may have passed while offline.
    ReachabilityOk {
        age_minutes: Option<u64>,
        staleness: Staleness,
    },
    /// A reachability check failed or the network went away.
    ReachabilityLost,
    /// A fetch was started.
    RefreshStarted,
    /// A fetch completed and the cache was written.
    RefreshSucceeded,
    /// A fetch failed; the cache is unchanged.
    RefreshFailed,
    /// The cache was reclassified, typically because time passed.
    CacheAged {
        age_minutes: Option<u64>,
        staleness: Staleness,
    },
}

impl std::fmt::Display for ConnectivityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectivityEvent::ReachabilityOk {
                age_minutes: Some(age),
                staleness,
            } => write!(f, "reachability ok ({}m, {})", age, staleness),
            ConnectivityEvent::ReachabilityOk {
                age_minutes: None,
                staleness,
            } => write!(f, "reachability ok (empty, {})", staleness),
            ConnectivityEvent::ReachabilityLost => write!(f, "reachability lost"),
            ConnectivityEvent::RefreshStarted => write!(f, "refresh started"),
            ConnectivityEvent::RefreshSucceeded => write!(f, "refresh succeeded"),
            ConnectivityEvent::RefreshFailed => write!(f, "refresh failed"),
            ConnectivityEvent::CacheAged {
                age_minutes: Some(age),
                staleness,
            } => write!(f, "cache aged ({}m, {})", age, staleness),
            ConnectivityEvent::CacheAged {
                age_minutes: None,
                staleness,
            } => write!(f, "cache aged (empty, {})", staleness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ConnectivityState::default();
        assert_eq!(state.status, ConnectivityStatus::Checking);
        assert!(!state.is_refreshing);
        assert_eq!(state.data_age_minutes, None);
        assert_eq!(state.freshness, None);
    }

    #[test]
    fn test_is_online() {
        assert!(ConnectivityStatus::Online.is_online());
        assert!(ConnectivityStatus::OnlineStale.is_online());
        assert!(!ConnectivityStatus::Offline.is_online());
        assert!(!ConnectivityStatus::Checking.is_online());
    }

    #[test]
    fn test_online_for() {
        assert_eq!(
            ConnectivityStatus::online_for(Staleness::Fresh),
            ConnectivityStatus::Online
        );
        assert_eq!(
            ConnectivityStatus::online_for(Staleness::Stale),
            ConnectivityStatus::OnlineStale
        );
        assert_eq!(
            ConnectivityStatus::online_for(Staleness::Outdated),
            ConnectivityStatus::OnlineStale
        );
    }

    #[test]
    fn test_event_display() {
        let event = ConnectivityEvent::CacheAged {
            age_minutes: Some(7),
            staleness: Staleness::Stale,
        };
        assert_eq!(event.to_string(), "cache aged (7m, stale)");

        let event = ConnectivityEvent::ReachabilityOk {
            age_minutes: None,
            staleness: Staleness::Outdated,
        };
        assert_eq!(event.to_string(), "reachability ok (empty, outdated)");
    }
}
