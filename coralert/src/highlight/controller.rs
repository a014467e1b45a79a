//! Single-slot highlight controller.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use super::target::{HighlightConfig, HighlightGeometry, HighlightTarget};
use crate::clock::SharedClock;
use crate::geo::{BoundingBox, LatLng};
use crate::palette::ColorKey;

/// Observable controller state.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightState {
    Idle,
    Active {
        target: HighlightTarget,
        expires_at: DateTime<Utc>,
    },
}

impl HighlightState {
    pub fn is_active(&self) -> bool {
        matches!(self, HighlightState::Active { .. })
    }
}

/// Holds at most one highlight target.
///
/// A new focus request replaces the current target. There is no timer:
/// expiry is evaluated whenever the target is read, and an expired target
/// reads exactly like no target.
pub struct HighlightController {
    clock: SharedClock,
    config: HighlightConfig,
    slot: Mutex<Option<HighlightTarget>>,
}

impl HighlightController {
    pub fn new(clock: SharedClock, config: HighlightConfig) -> Self {
        Self {
            clock,
            config,
            slot: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Focus on a point. `ttl` defaults to the configured point TTL.
    pub fn focus_on_point(
        &self,
        point: LatLng,
        ttl: Option<Duration>,
        color_key: Option<ColorKey>,
    ) -> bool {
        self.focus(HighlightGeometry::Point(point), ttl, color_key)
    }

    /// Focus on a polygon. `ttl` defaults to the configured polygon TTL.
    pub fn focus_on_polygon(
        &self,
        points: Vec<LatLng>,
        ttl: Option<Duration>,
        color_key: Option<ColorKey>,
    ) -> bool {
        self.focus(HighlightGeometry::Polygon(points), ttl, color_key)
    }

    /// Focus on a bounding box. `ttl` defaults to the configured bounds TTL.
    pub fn focus_on_bounds(
        &self,
        bounds: BoundingBox,
        ttl: Option<Duration>,
        color_key: Option<ColorKey>,
    ) -> bool {
        self.focus(HighlightGeometry::Bounds(bounds), ttl, color_key)
    }

    /// Replace the current target. Returns `false` (and changes nothing) if
    /// the geometry is invalid.
    pub fn focus(
        &self,
        geometry: HighlightGeometry,
        ttl: Option<Duration>,
        color_key: Option<ColorKey>,
    ) -> bool {
        if !geometry.is_valid() {
            debug!(kind = geometry.kind(), "Ignoring highlight with invalid geometry");
            return false;
        }

        let target = HighlightTarget {
            ttl: ttl.unwrap_or_else(|| self.config.ttl_for(&geometry)),
            geometry,
            color_key: color_key.unwrap_or_default(),
            created_at: self.clock.now(),
        };
        debug!(
            kind = target.geometry.kind(),
            ttl_ms = target.ttl.as_millis() as u64,
            color = %target.color_key,
            "Highlight set"
        );
        *self.slot.lock() = Some(target);
        true
    }

    /// Drop the current target.
    pub fn clear(&self) {
        if self.slot.lock().take().is_some() {
            debug!("Highlight cleared");
        }
    }

    /// Whether there is no live target at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.slot
            .lock()
            .as_ref()
            .map_or(true, |target| target.is_expired(now))
    }

    /// The live target, if any.
    pub fn current(&self) -> Option<HighlightTarget> {
        let now = self.clock.now();
        self.slot
            .lock()
            .as_ref()
            .filter(|target| !target.is_expired(now))
            .cloned()
    }

    pub fn state(&self) -> HighlightState {
        match self.current() {
            Some(target) => HighlightState::Active {
                expires_at: target.expires_at(),
                target,
            },
            None => HighlightState::Idle,
        }
    }
}

impl std::fmt::Debug for HighlightController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightController")
            .field("config", &self.config)
            .field("slot", &*self.slot.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeDelta, TimeZone};
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn controller() -> (HighlightController, ManualClock) {
        let clock = ManualClock::new(t0());
        let controller = HighlightController::new(Arc::new(clock.clone()), HighlightConfig::default());
        (controller, clock)
    }

    #[test]
    fn test_starts_idle() {
        let (controller, _) = controller();
        assert_eq!(controller.state(), HighlightState::Idle);
        assert!(controller.is_expired(t0()));
    }

    #[test]
    fn test_point_default_ttl() {
        let (controller, _) = controller();
        assert!(controller.focus_on_point(LatLng::new(-22.9, -43.2), None, None));

        assert!(!controller.is_expired(t0() + TimeDelta::milliseconds(14_900)));
        assert!(controller.is_expired(t0() + TimeDelta::milliseconds(15_100)));
    }

    #[test]
    fn test_polygon_and_bounds_default_ttl() {
        let (controller, _) = controller();
        controller.focus_on_polygon(vec![LatLng::new(-22.9, -43.2)], None, None);
        assert_eq!(controller.current().unwrap().ttl, Duration::from_secs(20));

        controller.focus_on_bounds(BoundingBox::new(-22.8, -23.0, -43.1, -43.3), None, None);
        let target = controller.current().unwrap();
        assert_eq!(target.ttl, Duration::from_secs(20));
        assert_eq!(target.created_at, t0());
    }

    #[test]
    fn test_ttl_and_color_override() {
        let (controller, _) = controller();
        controller.focus_on_point(
            LatLng::new(0.0, 0.0),
            Some(Duration::from_secs(3)),
            Some(ColorKey::Emergency),
        );
        let target = controller.current().unwrap();
        assert_eq!(target.ttl, Duration::from_secs(3));
        assert_eq!(target.color_key, ColorKey::Emergency);
    }

    #[test]
    fn test_new_focus_replaces_old() {
        let (controller, clock) = controller();
        controller.focus_on_point(LatLng::new(1.0, 1.0), None, None);
        clock.advance(Duration::from_secs(10));
        controller.focus_on_point(LatLng::new(2.0, 2.0), None, None);

        let target = controller.current().unwrap();
        assert_eq!(target.geometry, HighlightGeometry::Point(LatLng::new(2.0, 2.0)));
        assert_eq!(target.expires_at(), t0() + TimeDelta::seconds(25));
    }

    #[test]
    fn test_invalid_geometry_is_noop() {
        let (controller, _) = controller();
        controller.focus_on_point(LatLng::new(1.0, 1.0), None, None);

        assert!(!controller.focus_on_polygon(vec![], None, None));
        assert!(!controller.focus_on_point(LatLng::new(f64::NAN, 0.0), None, None));
        assert!(!controller.focus_on_bounds(BoundingBox::new(-30.0, -20.0, 0.0, 0.0), None, None));

        let target = controller.current().unwrap();
        assert_eq!(target.geometry, HighlightGeometry::Point(LatLng::new(1.0, 1.0)));
    }

    #[test]
    fn test_expired_reads_as_idle() {
        let (controller, clock) = controller();
        controller.focus_on_point(LatLng::new(0.0, 0.0), None, None);
        assert!(controller.state().is_active());

        clock.advance(Duration::from_secs(15));
        assert_eq!(controller.current(), None);
        assert_eq!(controller.state(), HighlightState::Idle);
    }

    #[test]
    fn test_clear() {
        let (controller, _) = controller();
        controller.focus_on_point(LatLng::new(0.0, 0.0), None, None);
        controller.clear();
        assert_eq!(controller.state(), HighlightState::Idle);
        controller.clear();
    }

    #[test]
    fn test_active_state_carries_expiry() {
        let (controller, _) = controller();
        controller.focus_on_point(LatLng::new(0.0, 0.0), None, Some(ColorKey::Critical));
        match controller.state() {
            HighlightState::Active { expires_at, target } => {
                assert_eq!(expires_at, t0() + TimeDelta::seconds(15));
                assert_eq!(target.color_key, ColorKey::Critical);
            }
            HighlightState::Idle => panic!("expected an active highlight"),
        }
    }
}
