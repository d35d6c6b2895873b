//! Overview presets
//!
//! The two colored charts in the page overview, owned by the site controller.

use uhi_site_shared::{
    AxisOptions, ChartDescriptor, ChartKind, InteractionMode, LegendOptions, LegendPosition,
    RenderOptions, Rgba, Season, Series, SeriesStyle, TooltipAppearance,
};

/// Blue, green, amber, orange, red
const BAND_COLORS: [Rgba; 5] = [
    Rgba::opaque(0, 123, 255),
    Rgba::opaque(40, 167, 69),
    Rgba::opaque(255, 193, 7),
    Rgba::opaque(255, 108, 0),
    Rgba::opaque(220, 53, 69),
];

const TICK_COLOR: Rgba = Rgba::opaque(108, 117, 125);

fn overview_axis(show_grid: bool, tick_font_size: u32) -> AxisOptions {
    let axis = AxisOptions {
        tick_color: Some(TICK_COLOR),
        tick_font_size: Some(tick_font_size),
        ..Default::default()
    };
    if show_grid {
        AxisOptions {
            grid_color: Some(Rgba::new(0, 0, 0, 0.1)),
            draw_border: Some(false),
            ..axis
        }
    } else {
        axis.without_grid()
    }
}

/// Number of dissemination areas per UHI band
pub fn uhi_distribution_chart() -> ChartDescriptor {
    let style = SeriesStyle {
        border_skipped: Some(false),
        ..SeriesStyle::rounded_bars_per_point(
            BAND_COLORS.iter().map(|c| c.with_alpha(0.8)).collect(),
            BAND_COLORS.to_vec(),
        )
    };

    ChartDescriptor::new("uhi-distribution-chart", ChartKind::Bar)
        .with_labels([
            "-10°C ~ -5°C",
            "-5°C ~ 0°C",
            "0°C ~ 2°C",
            "2°C ~ 5°C",
            "5°C ~ 10°C",
        ])
        .with_series(Series::values(
            "Number of Areas",
            vec![150.0, 280.0, 420.0, 320.0, 180.0],
            style,
        ))
        .with_options(RenderOptions {
            legend: LegendOptions::hidden(),
            x_axis: Some(overview_axis(false, 11)),
            y_axis: Some(AxisOptions {
                begin_at_zero: true,
                ..overview_axis(true, 12)
            }),
            tooltip_appearance: Some(TooltipAppearance {
                display_colors: false,
                ..Default::default()
            }),
            ..Default::default()
        })
}

/// Monthly UHI intensity for each season
pub fn seasonal_pattern_chart() -> ChartDescriptor {
    let monthly: [[f64; 12]; 4] = [
        [3.2, 3.4, 3.6, 3.8, 4.0, 4.2, 4.4, 4.2, 4.0, 3.8, 3.6, 3.4],
        [2.0, 2.1, 2.2, 2.3, 2.4, 2.5, 2.6, 2.5, 2.4, 2.3, 2.2, 2.1],
        [1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.7, 1.6, 1.5, 1.4, 1.3],
        [0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.3, 1.2, 1.1, 1.0, 0.9],
    ];
    // Summer day red, summer night orange, winter day blue, winter night green
    let colors = [BAND_COLORS[4], BAND_COLORS[3], BAND_COLORS[0], BAND_COLORS[1]];

    let mut chart = ChartDescriptor::new("seasonal-pattern-chart", ChartKind::Line).with_labels([
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ]);

    for ((season, values), color) in Season::ALL.iter().zip(monthly).zip(colors) {
        chart = chart.with_series(Series::values(
            season.display_name(),
            values.to_vec(),
            SeriesStyle::filled_line(color, color.with_alpha(0.1)),
        ));
    }

    chart.with_options(RenderOptions {
        legend: LegendOptions {
            position: LegendPosition::Top,
            use_point_style: true,
            padding: Some(20),
            box_width: None,
            font_size: Some(12),
        },
        x_axis: Some(overview_axis(true, 11)),
        y_axis: Some(AxisOptions {
            begin_at_zero: true,
            ..overview_axis(true, 12)
        }),
        interaction: Some(InteractionMode::Index),
        tooltip_appearance: Some(TooltipAppearance::default()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_bins() {
        let chart = uhi_distribution_chart();
        assert_eq!(chart.labels.len(), 5);
        assert_eq!(chart.series[0].points.len(), 5);
        assert_eq!(chart.series[0].style.border_skipped, Some(false));
        assert!(chart.options.title.is_none());
        assert!(!chart.options.tooltip_appearance.as_ref().unwrap().display_colors);
    }

    #[test]
    fn test_seasonal_pattern_series() {
        let chart = seasonal_pattern_chart();
        assert_eq!(chart.labels.len(), 12);
        let names: Vec<_> = chart
            .series
            .iter()
            .map(|s| s.label.as_deref().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Summer Day", "Summer Night", "Winter Day", "Winter Night"]
        );
        assert_eq!(
            chart.series[0].style.border_color,
            Some(Rgba::opaque(220, 53, 69))
        );
    }

    #[test]
    fn test_overview_axes_hide_border() {
        let chart = seasonal_pattern_chart();
        let y = chart.options.y_axis.as_ref().unwrap();
        assert!(y.begin_at_zero);
        assert_eq!(y.draw_border, Some(false));
        assert_eq!(y.tick_color, Some(Rgba::opaque(108, 117, 125)));
    }
}
