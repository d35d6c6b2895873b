//! Shared types for the urban heat island site
//!
//! This crate contains all types that are shared between the config-system,
//! system-integration and wasm-bridge crates. Everything here is plain data
//! and builds for both native and wasm32 targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "typescript")]
use tsify::Tsify;

pub mod chart_config;
pub mod data_types;
pub mod errors;
pub mod events;
pub mod tooltip;

pub use chart_config::*;
pub use data_types::*;
pub use errors::{SiteError, SiteResult};
pub use events::*;
pub use tooltip::*;

/// One of the four seasonal scenarios studied by the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(Tsify))]
pub enum Season {
    #[default]
    #[serde(rename = "SD")]
    SummerDay,
    #[serde(rename = "SN")]
    SummerNight,
    #[serde(rename = "WD")]
    WinterDay,
    #[serde(rename = "WN")]
    WinterNight,
}

impl Season {
    /// All seasons in selector order
    pub const ALL: [Season; 4] = [
        Season::SummerDay,
        Season::SummerNight,
        Season::WinterDay,
        Season::WinterNight,
    ];

    /// Two-letter code used by the season selector and export file names
    pub fn code(&self) -> &'static str {
        match self {
            Season::SummerDay => "SD",
            Season::SummerNight => "SN",
            Season::WinterDay => "WD",
            Season::WinterNight => "WN",
        }
    }

    /// Name written into every season-info slot
    pub fn display_name(&self) -> &'static str {
        match self {
            Season::SummerDay => "Summer Day",
            Season::SummerNight => "Summer Night",
            Season::WinterDay => "Winter Day",
            Season::WinterNight => "Winter Night",
        }
    }

    /// Scenario name used on chart axes and legends
    pub fn scenario_name(&self) -> &'static str {
        match self {
            Season::SummerDay => "Summer Daytime",
            Season::SummerNight => "Summer Nighttime",
            Season::WinterDay => "Winter Daytime",
            Season::WinterNight => "Winter Nighttime",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Season {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.code() == s)
            .ok_or_else(|| SiteError::UnknownSeason {
                code: s.to_string(),
            })
    }
}

/// A single (x, y) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// CSS color with 8-bit channels and a fractional alpha.
///
/// Serializes as the `rgba(r, g, b, a)` string the rendering engine expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same channels, different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> SiteResult<Self> {
        let invalid = || SiteError::InvalidColor {
            value: hex.to_string(),
        };
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parse the `rgba(r, g, b, a)` form produced by `Display`
    fn from_css(css: &str) -> SiteResult<Self> {
        let invalid = || SiteError::InvalidColor {
            value: css.to_string(),
        };
        let inner = css
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(invalid());
        }
        let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
        let alpha = parts[3].parse::<f32>().map_err(|_| invalid())?;
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgba {
    type Error = SiteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.starts_with('#') {
            Rgba::from_hex(&value)
        } else {
            Rgba::from_css(&value)
        }
    }
}
