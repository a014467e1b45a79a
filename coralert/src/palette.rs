//! Semantic colour tags.
//!
//! The core only says *what kind* of emphasis something deserves. Mapping a
//! tag to an actual colour (and icon) is done by the UI layer.

use serde::{Deserialize, Serialize};

/// Semantic colour key attached to advisory cards and highlight targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorKey {
    Critical,
    High,
    VeryStrongRain,
    StrongRain,
    ModerateRain,
    Emergency,
    Alert,
    Info,
    /// Neutral emphasis used for plain "show me this" map focus
    #[default]
    Focus,
}

impl ColorKey {
    /// Stable identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::VeryStrongRain => "very_strong_rain",
            Self::StrongRain => "strong_rain",
            Self::ModerateRain => "moderate_rain",
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Info => "info",
            Self::Focus => "focus",
        }
    }
}

impl std::fmt::Display for ColorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
