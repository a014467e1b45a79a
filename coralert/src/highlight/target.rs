//! Highlight target model.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::to_delta;
use crate::geo::{BoundingBox, LatLng};
use crate::palette::ColorKey;

/// Default lifetime of a point highlight.
pub const DEFAULT_POINT_TTL: Duration = Duration::from_secs(15);

/// Default lifetime of a polygon highlight.
pub const DEFAULT_POLYGON_TTL: Duration = Duration::from_secs(20);

/// Default lifetime of a bounds highlight.
pub const DEFAULT_BOUNDS_TTL: Duration = Duration::from_secs(20);

/// What the map should focus on.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightGeometry {
    Point(LatLng),
    Polygon(Vec<LatLng>),
    Bounds(BoundingBox),
}

impl HighlightGeometry {
    /// Non-empty and every coordinate finite and in range.
    pub fn is_valid(&self) -> bool {
        match self {
            HighlightGeometry::Point(p) => p.is_valid(),
            HighlightGeometry::Polygon(points) => {
                !points.is_empty() && points.iter().all(LatLng::is_valid)
            }
            HighlightGeometry::Bounds(b) => b.is_valid(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HighlightGeometry::Point(_) => "point",
            HighlightGeometry::Polygon(_) => "polygon",
            HighlightGeometry::Bounds(_) => "bounds",
        }
    }

    /// Box the camera should fit. A point yields a zero-size box.
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            HighlightGeometry::Point(p) => Some(BoundingBox::new(p.lat, p.lat, p.lng, p.lng)),
            HighlightGeometry::Polygon(points) => BoundingBox::enclosing(points),
            HighlightGeometry::Bounds(b) => Some(*b),
        }
    }
}

/// A time-bounded focus request.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightTarget {
    pub geometry: HighlightGeometry,
    pub color_key: ColorKey,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl HighlightTarget {
    /// Instant after which the target no longer applies.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at
            .checked_add_signed(to_delta(self.ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// `now >= expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Default TTL per geometry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightConfig {
    pub point_ttl: Duration,
    pub polygon_ttl: Duration,
    pub bounds_ttl: Duration,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            point_ttl: DEFAULT_POINT_TTL,
            polygon_ttl: DEFAULT_POLYGON_TTL,
            bounds_ttl: DEFAULT_BOUNDS_TTL,
        }
    }
}

impl HighlightConfig {
    pub(crate) fn ttl_for(&self, geometry: &HighlightGeometry) -> Duration {
        match geometry {
            HighlightGeometry::Point(_) => self.point_ttl,
            HighlightGeometry::Polygon(_) => self.polygon_ttl,
            HighlightGeometry::Bounds(_) => self.bounds_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_geometry_validity() {
        assert!(HighlightGeometry::Point(LatLng::new(-22.9, -43.2)).is_valid());
        assert!(!HighlightGeometry::Point(LatLng::new(f64::NAN, 0.0)).is_valid());
        assert!(!HighlightGeometry::Point(LatLng::new(91.0, 0.0)).is_valid());
        assert!(!HighlightGeometry::Polygon(vec![]).is_valid());
        assert!(!HighlightGeometry::Polygon(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, f64::INFINITY)
        ])
        .is_valid());
        assert!(!HighlightGeometry::Bounds(BoundingBox::new(-23.0, -22.0, -43.0, -44.0)).is_valid());
    }

    #[test]
    fn test_geometry_bounds() {
        let polygon = HighlightGeometry::Polygon(vec![
            LatLng::new(-22.9, -43.3),
            LatLng::new(-23.0, -43.1),
        ]);
        assert_eq!(
            polygon.bounds(),
            Some(BoundingBox::new(-22.9, -23.0, -43.1, -43.3))
        );
    }

    #[test]
    fn test_expiry() {
        let target = HighlightTarget {
            geometry: HighlightGeometry::Point(LatLng::new(0.0, 0.0)),
            color_key: ColorKey::Focus,
            created_at: t0(),
            ttl: Duration::from_secs(15),
        };
        assert_eq!(target.expires_at(), t0() + TimeDelta::seconds(15));
        assert!(!target.is_expired(t0() + TimeDelta::milliseconds(14_999)));
        assert!(target.is_expired(t0() + TimeDelta::seconds(15)));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let target = HighlightTarget {
            geometry: HighlightGeometry::Point(LatLng::new(0.0, 0.0)),
            color_key: ColorKey::Focus,
            created_at: t0(),
            ttl: Duration::MAX,
        };
        assert_eq!(target.expires_at(), DateTime::<Utc>::MAX_UTC);
        assert!(!target.is_expired(t0() + TimeDelta::days(365 * 100)));
    }
}
