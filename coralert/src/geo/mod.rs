//! Geographic primitives shared by the cache, advisory and highlight modules.
//!
//! Only the small amount of geometry the core needs lives here: a WGS84
//! point and an axis-aligned bounding box. Drawing and projection are the
//! UI layer's concern.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude, -90 (south) to 90 (north)
    pub lat: f64,
    /// Longitude, -180 (west) to 180 (east)
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a GeoJSON position (`[lon, lat]` order).
    pub fn from_geojson(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => {
                let point = Self::new(*lat, *lng);
                point.is_valid().then_some(point)
            }
            _ => None,
        }
    }

    /// Whether both components are finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Geographic bounding box.
///
/// Field names match the persisted cache-entry format
/// (`{"north":..,"south":..,"east":..,"west":..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northernmost latitude
    pub north: f64,
    /// Southernmost latitude
    pub south: f64,
    /// Easternmost longitude
    pub east: f64,
    /// Westernmost longitude
    pub west: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.lat, first.lat, first.lng, first.lng);
        for p in &points[1..] {
            bounds.north = bounds.north.max(p.lat);
            bounds.south = bounds.south.min(p.lat);
            bounds.east = bounds.east.max(p.lng);
            bounds.west = bounds.west.min(p.lng);
        }
        Some(bounds)
    }

    /// Whether the corners are valid coordinates and north is not below south.
    ///
    /// Boxes crossing the antimeridian (`west > east`) are accepted.
    pub fn is_valid(&self) -> bool {
        LatLng::new(self.north, self.east).is_valid()
            && LatLng::new(self.south, self.west).is_valid()
            && self.north >= self.south
    }

    /// Center point of the box.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    /// Whether `point` lies inside the box (edges inclusive).
    pub fn contains(&self, point: LatLng) -> bool {
        let in_lat = point.lat >= self.south && point.lat <= self.north;
        let in_lng = if self.west <= self.east {
            point.lng >= self.west && point.lng <= self.east
        } else {
            point.lng >= self.west || point.lng <= self.east
        };
        in_lat && in_lng
    }

    /// Parse the `north,south,east,west` form used on the command line.
    pub fn parse_csv(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        match parts.as_slice() {
            [north, south, east, west] => {
                let bounds = Self::new(*north, *south, *east, *west);
                bounds.is_valid().then_some(bounds)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "N{:.4} S{:.4} E{:.4} W{:.4}",
            self.north, self.south, self.east, self.west
        )
    }
}
