//! Configuration system for the urban heat island site
//! Holds the site settings, the chart presets and the placeholder data generators

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub mod generators;
pub mod parser;
pub mod presets;
pub mod validation;

pub use generators::{HeatmapGenerator, InterventionProfile, INTERVENTION_PROFILES};
pub use parser::{ConfigFormat, ConfigParser};
pub use presets::{ChartSlot, Driver};
pub use validation::ConfigValidator;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Site-wide settings. Defaults reproduce the shipped page behavior.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub timing: TimingConfig,
    pub reveal: RevealConfig,
    pub navbar: NavbarConfig,
    pub logging: LoggingConfig,
}

impl SiteConfig {
    /// Parse and validate in one step
    pub fn load(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = ConfigParser::parse_string(content, format)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

/// Timer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before the research charts are built
    pub chart_init_delay_ms: u32,
    /// Quiet period after the last resize event
    pub resize_debounce_ms: u32,
    /// Lifetime of a transient notification
    pub notification_dismiss_ms: u32,
}

impl TimingConfig {
    pub fn chart_init_delay(&self) -> Duration {
        Duration::from_millis(self.chart_init_delay_ms.into())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms.into())
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms.into())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chart_init_delay_ms: 100,
            resize_debounce_ms: 250,
            notification_dismiss_ms: 5000,
        }
    }
}

/// Scroll-reveal animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction that counts as "entered the viewport"
    pub threshold: f64,
    pub root_margin: String,
    pub selectors: Vec<String>,
    pub revealed_class: String,
}

impl RevealConfig {
    /// Selectors joined into one query
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            selectors: [
                ".research-card",
                ".methodology-step",
                ".results-card",
                ".conclusion-card",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            revealed_class: "fade-in-up".to_string(),
        }
    }
}

/// Navigation bar scroll styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    pub scrolled_class: String,
    pub scroll_threshold_px: f64,
}

impl NavbarConfig {
    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.scroll_threshold_px
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar".to_string(),
            scrolled_class: "navbar-scrolled".to_string(),
            scroll_threshold_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn level(&self) -> Result<log::Level> {
        self.level
            .parse()
            .map_err(|_| ConfigError::Validation(format!("Invalid log level: {}", self.level)))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
