//! Placeholder data for the research charts
//!
//! Neither generator models the study's results. The heatmap filler is
//! uniform noise over the published UHI range and the intervention curves are
//! a plain power law; both exist so the charts have the right shape.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uhi_site_shared::{Point, STUDY_AREA_COUNT};

/// Points in the heatmap filler, one per dissemination area
pub const HEATMAP_POINT_COUNT: usize = STUDY_AREA_COUNT as usize;
/// Lowest UHI value in the study (°C)
pub const UHI_MIN: f64 = -10.28;
/// Highest UHI value in the study (°C)
pub const UHI_MAX: f64 = 4.96;
const UHI_SPAN: f64 = 15.24;
/// Width of the simulated longitude axis
pub const LONGITUDE_SPAN: f64 = 100.0;

/// Number of samples on each intervention curve
pub const INTERVENTION_SAMPLES: usize = 41;
/// Distance between consecutive intervention scale factors
pub const SCALE_STEP: f64 = 0.05;

/// Uniform scatter filler for the UHI heatmap
pub struct HeatmapGenerator {
    rng: StdRng,
}

impl HeatmapGenerator {
    /// Reproducible generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the platform entropy source
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate `HEATMAP_POINT_COUNT` points with x in [0, 100) and y in
    /// [UHI_MIN, UHI_MAX]
    pub fn generate(&mut self) -> Vec<Point> {
        (0..HEATMAP_POINT_COUNT)
            .map(|_| {
                let x = self.rng.gen::<f64>() * LONGITUDE_SPAN;
                let y = (UHI_MIN + self.rng.gen::<f64>() * UHI_SPAN).min(UHI_MAX);
                Point::new(x, y)
            })
            .collect()
    }
}

/// The scale factors 0.00, 0.05, ..., 2.00
pub fn scale_values() -> Vec<f64> {
    (0..INTERVENTION_SAMPLES)
        .map(|i| i as f64 * SCALE_STEP)
        .collect()
}

/// Scale factors formatted with two decimals
pub fn scale_labels() -> Vec<String> {
    scale_values().iter().map(|s| format!("{s:.2}")).collect()
}

/// Cooling effect `max_effect * s^curve` at every scale factor
pub fn intervention_curve(max_effect: f64, curve: f64) -> Vec<f64> {
    scale_values()
        .into_iter()
        .map(|scale| max_effect * scale.powf(curve))
        .collect()
}

/// A named intervention strategy and its effect curve parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterventionProfile {
    pub name: &'static str,
    pub max_effect: f64,
    pub curve: f64,
}

impl InterventionProfile {
    pub fn samples(&self) -> Vec<f64> {
        intervention_curve(self.max_effect, self.curve)
    }
}

/// Strategies plotted on the intervention effect chart, in legend order
pub const INTERVENTION_PROFILES: [InterventionProfile; 4] = [
    InterventionProfile {
        name: "NDVI Enhancement",
        max_effect: 2.95,
        curve: 0.8,
    },
    InterventionProfile {
        name: "Water Proximity",
        max_effect: 1.46,
        curve: 0.6,
    },
    InterventionProfile {
        name: "Building Coverage Adjustment",
        max_effect: 1.04,
        curve: 0.7,
    },
    InterventionProfile {
        name: "Road Density Adjustment",
        max_effect: 1.03,
        curve: 0.5,
    },
];
