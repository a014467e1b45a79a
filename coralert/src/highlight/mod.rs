//! Time-bounded map highlight.
//!
//! Other screens (an advisory card, an alert) ask the map to focus on a
//! location for a few seconds. [`HighlightController`] holds that request and
//! lets it lapse on its own once its TTL has passed.

mod controller;
mod target;

pub use controller::{HighlightController, HighlightState};
pub use target::{
    HighlightConfig, HighlightGeometry, HighlightTarget, DEFAULT_BOUNDS_TTL, DEFAULT_POINT_TTL,
    DEFAULT_POLYGON_TTL,
};
