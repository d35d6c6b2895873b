//! Site integration layer
//!
//! Drives the page behind three seams: a `RenderEngine` that draws charts, a
//! `PageSurface` that owns the DOM and a `TimerHost` that runs delayed work.
//! The browser implementations live in the wasm bridge; `testing` (behind
//! the `testing` feature) has in-memory ones so everything here runs natively.

pub mod app;
pub mod bridge;
pub mod chart_registry;
pub mod engine;
pub mod error_recovery;
pub mod format;
pub mod page;
pub mod scheduler;
pub mod site_controller;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use app::SiteApp;
pub use chart_registry::{ChartRegistry, SlotBinding};
pub use engine::{ChartHandle, LiveCharts, RenderEngine};
pub use page::{ElementLookup, NotificationId, PageSurface};
pub use scheduler::{Debouncer, ScheduledTask, TimerHost, TimerId};
pub use site_controller::{SiteController, SiteState};

use thiserror::Error;
use uhi_site_config::ConfigError;
use uhi_site_shared::SiteError;

/// Start-up errors
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Site error: {0}")]
    Site(#[from] SiteError),
}

pub type Result<T> = std::result::Result<T, IntegrationError>;
