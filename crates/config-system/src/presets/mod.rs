//! Preset descriptors for every chart slot on the page

pub mod overview_presets;
pub mod research_presets;

pub use overview_presets::*;
pub use research_presets::*;

use crate::HeatmapGenerator;
use uhi_site_shared::ChartDescriptor;

/// Which page driver owns a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// Research figures, built after the start-up delay
    Research,
    /// Overview figures, built by the site controller at load
    Overview,
}

/// A chart container the page may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    UhiHeatmap,
    SeasonalComparison,
    ModelPerformance,
    FeatureImportance,
    InterventionEffect,
    SocialEquity,
    FairnessRanking,
    UhiDistribution,
    SeasonalPattern,
}

impl ChartSlot {
    /// Slots built by the research chart registry, in build order
    pub const RESEARCH: [ChartSlot; 7] = [
        ChartSlot::UhiHeatmap,
        ChartSlot::SeasonalComparison,
        ChartSlot::ModelPerformance,
        ChartSlot::FeatureImportance,
        ChartSlot::InterventionEffect,
        ChartSlot::SocialEquity,
        ChartSlot::FairnessRanking,
    ];

    /// Slots built by the site controller, in build order
    pub const OVERVIEW: [ChartSlot; 2] = [ChartSlot::UhiDistribution, ChartSlot::SeasonalPattern];

    pub fn for_driver(driver: Driver) -> &'static [ChartSlot] {
        match driver {
            Driver::Research => &Self::RESEARCH,
            Driver::Overview => &Self::OVERVIEW,
        }
    }

    /// Id of the element the chart mounts on
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartSlot::UhiHeatmap => "uhiHeatmapChart",
            ChartSlot::SeasonalComparison => "seasonalComparisonChart",
            ChartSlot::ModelPerformance => "modelPerformanceChart",
            ChartSlot::FeatureImportance => "featureImportanceChart",
            ChartSlot::InterventionEffect => "interventionEffectChart",
            ChartSlot::SocialEquity => "socialEquityChart",
            ChartSlot::FairnessRanking => "fairnessRankingChart",
            ChartSlot::UhiDistribution => "uhi-distribution-chart",
            ChartSlot::SeasonalPattern => "seasonal-pattern-chart",
        }
    }

    pub fn driver(&self) -> Driver {
        match self {
            ChartSlot::UhiDistribution | ChartSlot::SeasonalPattern => Driver::Overview,
            _ => Driver::Research,
        }
    }

    /// Build the descriptor for this slot. Only the heatmap draws from the
    /// generator.
    pub fn build(&self, heatmap: &mut HeatmapGenerator) -> ChartDescriptor {
        match self {
            ChartSlot::UhiHeatmap => uhi_heatmap_chart(heatmap.generate()),
            ChartSlot::SeasonalComparison => seasonal_comparison_chart(),
            ChartSlot::ModelPerformance => model_performance_chart(),
            ChartSlot::FeatureImportance => feature_importance_chart(),
            ChartSlot::InterventionEffect => intervention_effect_chart(),
            ChartSlot::SocialEquity => social_equity_chart(),
            ChartSlot::FairnessRanking => fairness_ranking_chart(),
            ChartSlot::UhiDistribution => uhi_distribution_chart(),
            ChartSlot::SeasonalPattern => seasonal_pattern_chart(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_slots() -> Vec<ChartSlot> {
        ChartSlot::RESEARCH
            .iter()
            .chain(ChartSlot::OVERVIEW.iter())
            .copied()
            .collect()
    }

    #[test]
    fn test_every_slot_builds_a_valid_descriptor() {
        let mut heatmap = HeatmapGenerator::new(1);
        for slot in all_slots() {
            let descriptor = slot.build(&mut heatmap);
            assert_eq!(descriptor.target_element_id, slot.element_id());
            descriptor
                .validate()
                .unwrap_or_else(|e| panic!("{:?} failed validation: {e}", slot));
        }
    }

    #[test]
    fn test_element_ids_are_unique() {
        let ids: HashSet<_> = all_slots().iter().map(|s| s.element_id()).collect();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_driver_partition() {
        assert!(ChartSlot::RESEARCH
            .iter()
            .all(|s| s.driver() == Driver::Research));
        assert!(ChartSlot::OVERVIEW
            .iter()
            .all(|s| s.driver() == Driver::Overview));
        assert_eq!(ChartSlot::for_driver(Driver::Research).len(), 7);
        assert_eq!(ChartSlot::for_driver(Driver::Overview).len(), 2);
    }
}
