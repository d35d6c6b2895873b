//! Research figure presets
//!
//! The seven charts of the results section. Values are the published
//! figures except for the heatmap and intervention curves, which come from
//! the placeholder generators.

use crate::generators::{scale_labels, INTERVENTION_PROFILES};
use uhi_site_shared::{
    AxisOptions, ChartDescriptor, ChartKind, ColorScale, IndexAxis, InteractionMode,
    LegendOptions, LegendPosition, Point, RenderOptions, Rgba, Season, Series, SeriesStyle,
    TitleOptions, TooltipFormat, ValueAxis,
};

/// Grayscale ramp shared by the research figures, darkest first
pub const GRAYS: [Rgba; 5] = [
    Rgba::opaque(26, 26, 26),
    Rgba::opaque(102, 102, 102),
    Rgba::opaque(153, 153, 153),
    Rgba::opaque(204, 204, 204),
    Rgba::opaque(230, 230, 230),
];

/// Doughnut slice colors, darkest first
const SLICE_COLORS: [Rgba; 7] = [
    Rgba::opaque(26, 26, 26),
    Rgba::opaque(51, 51, 51),
    Rgba::opaque(102, 102, 102),
    Rgba::opaque(153, 153, 153),
    Rgba::opaque(204, 204, 204),
    Rgba::opaque(230, 230, 230),
    Rgba::opaque(245, 245, 245),
];

const UHI_AXIS_TITLE: &str = "UHI Value (°C)";

fn bottom_legend() -> LegendOptions {
    LegendOptions::point_style(LegendPosition::Bottom, 15, 12)
}

fn season_labels() -> Vec<&'static str> {
    Season::ALL.iter().map(|s| s.scenario_name()).collect()
}

/// Bar fills at 0.8 alpha with opaque borders, one per category
fn per_bar_style(count: usize) -> SeriesStyle {
    let grays = &GRAYS[..count];
    SeriesStyle::rounded_bars_per_point(
        grays.iter().map(|c| c.with_alpha(0.8)).collect(),
        grays.to_vec(),
    )
}

/// Scatter of UHI values colored by temperature band
pub fn uhi_heatmap_chart(points: Vec<Point>) -> ChartDescriptor {
    let style = SeriesStyle {
        border_color: Some(Rgba::new(255, 255, 255, 0.8)),
        border_width: 1.0,
        point_radius: Some(4.0),
        point_hover_radius: Some(6.0),
        ..Default::default()
    };

    ChartDescriptor::new("uhiHeatmapChart", ChartKind::Scatter)
        .with_series(Series::xy("UHI Value Distribution", points, style))
        .with_options(RenderOptions {
            title: Some(TitleOptions::new(
                "UHI Distribution Heatmap (-10.28°C to +4.96°C)",
                16,
            )),
            legend: LegendOptions::hidden(),
            x_axis: Some(AxisOptions::titled("Longitude")),
            y_axis: Some(AxisOptions::titled(UHI_AXIS_TITLE)),
            interaction: Some(InteractionMode::Nearest),
            color_scale: Some(ColorScale::UhiThresholds),
            ..Default::default()
        })
}

/// UHI percentiles for the four seasonal scenarios
pub fn seasonal_comparison_chart() -> ChartDescriptor {
    let percentiles: [[f64; 6]; 4] = [
        [-10.28, -8.5, -5.2, -1.8, 2.1, 4.96],
        [-1.24, -0.8, -0.2, 0.3, 1.1, 1.92],
        [-2.72, -2.1, -1.2, -0.3, 0.8, 1.71],
        [-1.71, -1.2, -0.5, 0.2, 1.1, 2.31],
    ];

    let mut chart = ChartDescriptor::new("seasonalComparisonChart", ChartKind::Line)
        .with_labels(["0%", "20%", "40%", "60%", "80%", "100%"]);

    for ((season, values), color) in Season::ALL.iter().zip(percentiles).zip(GRAYS) {
        chart = chart.with_series(Series::values(
            format!("{} ({})", season.scenario_name(), season.code()),
            values.to_vec(),
            SeriesStyle::filled_line(color, color.with_alpha(0.1)),
        ));
    }

    chart.with_options(RenderOptions {
        title: Some(TitleOptions::new(
            "UHI Distribution Comparison for Four Seasonal Scenarios",
            14,
        )),
        legend: bottom_legend(),
        x_axis: Some(AxisOptions::titled("Percentile")),
        y_axis: Some(AxisOptions::titled(UHI_AXIS_TITLE)),
        interaction: Some(InteractionMode::Index),
        ..Default::default()
    })
}

/// Test R² per seasonal model
pub fn model_performance_chart() -> ChartDescriptor {
    ChartDescriptor::new("modelPerformanceChart", ChartKind::Bar)
        .with_labels(season_labels())
        .with_series(Series::values(
            "Test R²",
            vec![0.7873, 0.5348, 0.6060, 0.6748],
            per_bar_style(4),
        ))
        .with_options(RenderOptions {
            title: Some(TitleOptions::new(
                "Model Performance for Different Seasonal Scenarios (R²)",
                14,
            )),
            legend: LegendOptions::hidden(),
            x_axis: Some(AxisOptions::titled("Seasonal Scenarios").without_grid()),
            y_axis: Some(AxisOptions::titled("R² Value").zero_to(1.0)),
            interaction: Some(InteractionMode::Index),
            tooltip: TooltipFormat::fixed("R² Value: ", 4, ValueAxis::Y),
            ..Default::default()
        })
}

/// Relative importance of the environmental features
pub fn feature_importance_chart() -> ChartDescriptor {
    let style = SeriesStyle {
        point_colors: Some(SLICE_COLORS.to_vec()),
        border_color: Some(Rgba::WHITE),
        border_width: 3.0,
        hover_offset: Some(10.0),
        ..Default::default()
    };

    ChartDescriptor::new("featureImportanceChart", ChartKind::Doughnut)
        .with_labels([
            "NDVI (Vegetation Index)",
            "BCR (Building Coverage Rate)",
            "Water Distance",
            "Building Height",
            "POI Density",
            "Road Density",
            "Waterway Distance",
        ])
        .with_series(Series::unlabelled(
            vec![25.0, 20.0, 18.0, 15.0, 12.0, 8.0, 2.0],
            style,
        ))
        .with_options(RenderOptions {
            title: Some(TitleOptions::new(
                "Environmental Feature Importance Distribution",
                16,
            )),
            legend: LegendOptions {
                font_size: Some(11),
                ..LegendOptions::point_style(LegendPosition::Right, 15, 15)
            },
            cutout_percent: Some(60),
            layout_padding: Some(10),
            tooltip: TooltipFormat::ShareOfTotal { decimals: 1 },
            ..Default::default()
        })
}

/// Cooling effect of each strategy over 0.0x to 2.0x intervention scaling
pub fn intervention_effect_chart() -> ChartDescriptor {
    let mut chart = ChartDescriptor::new("interventionEffectChart", ChartKind::Line)
        .with_labels(scale_labels());

    for (profile, color) in INTERVENTION_PROFILES.iter().zip(GRAYS) {
        chart = chart.with_series(Series::values(
            profile.name,
            profile.samples(),
            SeriesStyle::filled_line(color, color.with_alpha(0.1)),
        ));
    }

    chart.with_options(RenderOptions {
        title: Some(TitleOptions::new(
            "Intervention Strategy Effect Analysis (0.0x - 2.0x Scaling)",
            16,
        )),
        legend: bottom_legend(),
        x_axis: Some(AxisOptions::titled("Scaling Factor").with_tick_stride(5)),
        y_axis: Some(AxisOptions::titled("Cooling Effect (°C)")),
        interaction: Some(InteractionMode::Index),
        ..Default::default()
    })
}

/// Correlation of UHI exposure with sociodemographic indicators
pub fn social_equity_chart() -> ChartDescriptor {
    let correlations: [[f64; 4]; 4] = [
        [0.42, 0.41, -0.15, 0.11],
        [0.08, 0.005, 0.23, 0.001],
        [0.28, 0.34, 0.01, 0.10],
        [0.17, -0.03, 0.32, 0.05],
    ];

    let mut chart = ChartDescriptor::new("socialEquityChart", ChartKind::Bar).with_labels([
        "Visible Minorities",
        "No Educational Certificate",
        "Low Income Population",
        "Unemployment Rate",
    ]);

    for ((season, values), color) in Season::ALL.iter().zip(correlations).zip(GRAYS) {
        chart = chart.with_series(Series::values(
            season.scenario_name(),
            values.to_vec(),
            SeriesStyle::rounded_bars(color.with_alpha(0.8), color),
        ));
    }

    chart.with_options(RenderOptions {
        title: Some(TitleOptions::new("Social Group UHI Exposure Correlation", 14)),
        legend: bottom_legend(),
        x_axis: Some(AxisOptions::titled("Sociodemographic Indicators").without_grid()),
        y_axis: Some(AxisOptions::titled("Correlation Coefficient")),
        interaction: Some(InteractionMode::Index),
        ..Default::default()
    })
}

/// Strategies ranked by mean group disparity, lower is fairer
pub fn fairness_ranking_chart() -> ChartDescriptor {
    ChartDescriptor::new("fairnessRankingChart", ChartKind::Bar)
        .with_labels([
            "NDVI Enhancement",
            "Water Proximity",
            "Road Density Adjustment",
            "Building Coverage Adjustment",
            "Building Height Increase",
        ])
        .with_series(Series::values(
            "Fairness Score (MGD)",
            vec![0.15, 0.22, 0.45, 0.52, 0.78],
            per_bar_style(5),
        ))
        .with_options(RenderOptions {
            title: Some(TitleOptions::new(
                "Intervention Strategy Fairness Ranking (Lower MGD Values = More Fair)",
                14,
            )),
            legend: LegendOptions::hidden(),
            x_axis: Some(AxisOptions::titled("MGD Value").zero_to(1.0)),
            y_axis: Some(AxisOptions::titled("Intervention Strategies").without_grid()),
            interaction: Some(InteractionMode::Nearest),
            index_axis: IndexAxis::Y,
            tooltip: TooltipFormat::fixed("MGD Value: ", 2, ValueAxis::X),
            ..Default::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeatmapGenerator;
    use uhi_site_shared::DataPoints;

    #[test]
    fn test_heatmap_structure() {
        let chart = uhi_heatmap_chart(HeatmapGenerator::new(3).generate());
        assert_eq!(chart.kind, ChartKind::Scatter);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points.len(), 1660);
        assert_eq!(chart.options.color_scale, Some(ColorScale::UhiThresholds));
        assert_eq!(chart.options.legend.position, LegendPosition::Hidden);
    }

    #[test]
    fn test_seasonal_series_order() {
        let chart = seasonal_comparison_chart();
        let labels: Vec<_> = chart
            .series
            .iter()
            .map(|s| s.label.clone().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Summer Daytime (SD)",
                "Summer Nighttime (SN)",
                "Winter Daytime (WD)",
                "Winter Nighttime (WN)"
            ]
        );
        assert_eq!(
            chart.series[0].points,
            DataPoints::Values(vec![-10.28, -8.5, -5.2, -1.8, 2.1, 4.96])
        );
    }

    #[test]
    fn test_intervention_chart_keeps_all_samples() {
        let chart = intervention_effect_chart();
        assert_eq!(chart.labels.len(), 41);
        assert_eq!(chart.series.len(), 4);
        for series in &chart.series {
            assert_eq!(series.points.len(), 41);
        }
        let x_axis = chart.options.x_axis.as_ref().unwrap();
        assert_eq!(x_axis.tick_stride, Some(5));
    }

    #[test]
    fn test_equity_grid_is_four_by_four() {
        let chart = social_equity_chart();
        assert_eq!(chart.labels.len(), 4);
        assert_eq!(chart.series.len(), 4);
        assert!(chart.series.iter().all(|s| s.points.len() == 4));
    }

    #[test]
    fn test_fairness_is_horizontal() {
        let chart = fairness_ranking_chart();
        assert_eq!(chart.options.index_axis, IndexAxis::Y);
        assert_eq!(chart.options.tooltip.axis(), Some(ValueAxis::X));
        let colors = chart.series[0].style.point_colors.as_ref().unwrap();
        assert_eq!(colors[4], Rgba::new(230, 230, 230, 0.8));
    }

    #[test]
    fn test_model_performance_tooltip() {
        let chart = model_performance_chart();
        assert_eq!(
            chart.options.tooltip.format("", 0.5348, &[]).as_deref(),
            Some("R² Value: 0.5348")
        );
        assert_eq!(chart.labels[0], "Summer Daytime");
    }
}
