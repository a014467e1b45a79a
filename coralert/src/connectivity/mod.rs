//! Connectivity state machine.
//!
//! Tracks whether the backend is reachable and whether the cached data the
//! app is showing is still fresh. The logic is a pure [`reduce`] function;
//! [`ConnectivityMachine`] wraps it with interior state and listeners for
//! hosts that want push notifications.
//!
//! ```
//! use coralert::connectivity::{replay, ConnectivityEvent, ConnectivityStatus};
//! use coralert::staleness::Staleness;
//!
//! let state = replay(&[
//!     ConnectivityEvent::ReachabilityOk { age_minutes: None, staleness: Staleness::Outdated },
//!     ConnectivityEvent::RefreshSucceeded,
//! ]);
//! assert_eq!(state.status, ConnectivityStatus::Online);
//! ```

mod machine;
mod reducer;
mod state;

pub use machine::{ConnectivityMachine, SubscriptionId};
pub use reducer::{cache_aged, reachability_ok, reduce, replay};
pub use state::{ConnectivityEvent, ConnectivityState, ConnectivityStatus};
