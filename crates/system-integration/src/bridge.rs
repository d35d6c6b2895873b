//! Translation of chart descriptors into the rendering engine's config shape
//!
//! The output is the `{type, data, options}` object the engine's chart
//! constructor takes. Everything expressible as data is produced here;
//! the browser layer only attaches the tooltip and tick callbacks.

use serde_json::{json, Map, Value};
use uhi_site_shared::{
    AxisOptions, ChartDescriptor, ChartKind, ColorScale, DataPoints, IndexAxis, LegendOptions,
    RenderOptions, Rgba, Series, TooltipAppearance,
};

/// Build the engine config for a descriptor
pub fn engine_config(descriptor: &ChartDescriptor) -> Value {
    let datasets: Vec<Value> = descriptor
        .series
        .iter()
        .map(|series| dataset(series, descriptor.options.color_scale))
        .collect();

    let mut data = Map::new();
    if descriptor.kind.uses_categories() {
        data.insert("labels".into(), json!(descriptor.labels));
    }
    data.insert("datasets".into(), Value::Array(datasets));

    json!({
        "type": descriptor.kind.as_str(),
        "data": data,
        "options": options(descriptor.kind, &descriptor.options),
    })
}

/// Category label shown at `index` when only every `stride`-th one is drawn
pub fn tick_label(labels: &[String], stride: usize, index: usize) -> Option<&str> {
    if stride == 0 || index % stride != 0 {
        return None;
    }
    labels.get(index).map(String::as_str)
}

fn css(color: &Rgba) -> Value {
    Value::String(color.to_string())
}

fn css_list(colors: &[Rgba]) -> Value {
    Value::Array(colors.iter().map(css).collect())
}

fn dataset(series: &Series, color_scale: Option<ColorScale>) -> Value {
    let style = &series.style;
    let mut out = Map::new();

    if let Some(label) = &series.label {
        out.insert("label".into(), json!(label));
    }

    match &series.points {
        DataPoints::Values(values) => {
            out.insert("data".into(), json!(values));
        }
        DataPoints::Xy(points) => {
            out.insert("data".into(), json!(points));
        }
    }

    // A color scale colors each point by its y-value
    let scaled = match (&series.points, color_scale) {
        (DataPoints::Xy(points), Some(scale)) => Some(
            points
                .iter()
                .map(|p| css(&scale.color_for(p.y)))
                .collect::<Vec<_>>(),
        ),
        (DataPoints::Values(values), Some(scale)) => Some(
            values
                .iter()
                .map(|v| css(&scale.color_for(*v)))
                .collect::<Vec<_>>(),
        ),
        _ => None,
    };

    if let Some(colors) = scaled {
        out.insert("backgroundColor".into(), Value::Array(colors));
    } else if let Some(colors) = &style.point_colors {
        out.insert("backgroundColor".into(), css_list(colors));
    } else if let Some(fill) = &style.fill_color {
        out.insert("backgroundColor".into(), css(fill));
    }

    if let Some(borders) = &style.point_border_colors {
        out.insert("borderColor".into(), css_list(borders));
    } else if let Some(border) = &style.border_color {
        out.insert("borderColor".into(), css(border));
    }

    if style.border_width > 0.0 {
        out.insert("borderWidth".into(), json!(style.border_width));
    }
    if let Some(radius) = style.border_radius {
        out.insert("borderRadius".into(), json!(radius));
    }
    if let Some(skipped) = style.border_skipped {
        out.insert("borderSkipped".into(), json!(skipped));
    }
    if style.fill {
        out.insert("fill".into(), Value::Bool(true));
    }
    if let Some(tension) = style.tension {
        out.insert("tension".into(), json!(tension));
    }
    if let Some(radius) = style.point_radius {
        out.insert("pointRadius".into(), json!(radius));
    }
    if let Some(radius) = style.point_hover_radius {
        out.insert("pointHoverRadius".into(), json!(radius));
    }
    if let Some(offset) = style.hover_offset {
        out.insert("hoverOffset".into(), json!(offset));
    }

    Value::Object(out)
}

fn options(kind: ChartKind, options: &RenderOptions) -> Value {
    let mut out = Map::new();
    out.insert("responsive".into(), Value::Bool(true));
    out.insert("maintainAspectRatio".into(), Value::Bool(false));

    if options.index_axis == IndexAxis::Y {
        out.insert("indexAxis".into(), json!("y"));
    }

    if let Some(mode) = options.interaction {
        out.insert(
            "interaction".into(),
            json!({ "intersect": false, "mode": mode.as_str() }),
        );
    }

    let mut plugins = Map::new();
    if let Some(title) = &options.title {
        plugins.insert(
            "title".into(),
            json!({
                "display": true,
                "text": title.text,
                "font": { "size": title.font_size, "weight": "bold" },
                "padding": title.padding,
            }),
        );
    }
    plugins.insert("legend".into(), legend(&options.legend));
    if let Some(appearance) = &options.tooltip_appearance {
        plugins.insert("tooltip".into(), tooltip(appearance));
    }
    out.insert("plugins".into(), Value::Object(plugins));

    if kind != ChartKind::Doughnut {
        let mut scales = Map::new();
        if let Some(x) = &options.x_axis {
            scales.insert("x".into(), axis(x));
        }
        if let Some(y) = &options.y_axis {
            scales.insert("y".into(), axis(y));
        }
        if !scales.is_empty() {
            out.insert("scales".into(), Value::Object(scales));
        }
    }

    if let Some(cutout) = options.cutout_percent {
        out.insert("cutout".into(), json!(format!("{cutout}%")));
    }
    if let Some(padding) = options.layout_padding {
        out.insert("layout".into(), json!({ "padding": padding }));
    }

    Value::Object(out)
}

fn legend(legend: &LegendOptions) -> Value {
    let Some(position) = legend.position.as_str() else {
        return json!({ "display": false });
    };

    let mut labels = Map::new();
    if legend.use_point_style {
        labels.insert("usePointStyle".into(), Value::Bool(true));
    }
    if let Some(padding) = legend.padding {
        labels.insert("padding".into(), json!(padding));
    }
    if let Some(width) = legend.box_width {
        labels.insert("boxWidth".into(), json!(width));
    }
    if let Some(size) = legend.font_size {
        labels.insert("font".into(), json!({ "size": size }));
    }

    json!({ "position": position, "labels": labels })
}

fn tooltip(appearance: &TooltipAppearance) -> Value {
    json!({
        "backgroundColor": css(&appearance.background_color),
        "titleColor": css(&appearance.title_color),
        "bodyColor": css(&appearance.body_color),
        "borderColor": css(&appearance.border_color),
        "borderWidth": appearance.border_width,
        "cornerRadius": appearance.corner_radius,
        "displayColors": appearance.display_colors,
    })
}

fn axis(axis: &AxisOptions) -> Value {
    let mut out = Map::new();

    if let Some(title) = &axis.title {
        out.insert("title".into(), json!({ "display": true, "text": title }));
    }

    let mut grid = Map::new();
    if !axis.show_grid {
        grid.insert("display".into(), Value::Bool(false));
    }
    if let Some(color) = &axis.grid_color {
        grid.insert("color".into(), css(color));
    }
    if let Some(draw) = axis.draw_border {
        grid.insert("drawBorder".into(), Value::Bool(draw));
    }
    if !grid.is_empty() {
        out.insert("grid".into(), Value::Object(grid));
    }

    if axis.begin_at_zero {
        out.insert("beginAtZero".into(), Value::Bool(true));
    }
    if let Some(max) = axis.max {
        out.insert("max".into(), json!(max));
    }

    let mut ticks = Map::new();
    if let Some(color) = &axis.tick_color {
        ticks.insert("color".into(), css(color));
    }
    if let Some(size) = axis.tick_font_size {
        ticks.insert("font".into(), json!({ "size": size }));
    }
    if axis.tick_stride.is_some() {
        // Every label is kept so the stride callback sees stable indices
        ticks.insert("autoSkip".into(), Value::Bool(false));
    }
    if !ticks.is_empty() {
        out.insert("ticks".into(), Value::Object(ticks));
    }

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uhi_site_config::{ChartSlot, HeatmapGenerator};

    fn config_for(slot: ChartSlot) -> Value {
        let mut heatmap = HeatmapGenerator::new(3);
        engine_config(&slot.build(&mut heatmap))
    }

    #[test]
    fn test_common_options() {
        for slot in ChartSlot::RESEARCH.iter().chain(ChartSlot::OVERVIEW.iter()) {
            let config = config_for(*slot);
            assert_eq!(config["options"]["responsive"], json!(true));
            assert_eq!(config["options"]["maintainAspectRatio"], json!(false));
            assert!(config["data"]["datasets"].as_array().is_some());
        }
    }

    #[test]
    fn test_heatmap_points_colored_by_band() {
        let config = config_for(ChartSlot::UhiHeatmap);
        assert_eq!(config["type"], json!("scatter"));
        assert!(config["data"].get("labels").is_none());

        let dataset = &config["data"]["datasets"][0];
        let points = dataset["data"].as_array().unwrap();
        let colors = dataset["backgroundColor"].as_array().unwrap();
        assert_eq!(points.len(), 1660);
        assert_eq!(colors.len(), 1660);

        for (point, color) in points.iter().zip(colors) {
            let y = point["y"].as_f64().unwrap();
            let expected = uhi_site_shared::uhi_color_for(y).to_string();
            assert_eq!(color.as_str().unwrap(), expected);
        }
        assert_eq!(config["options"]["plugins"]["legend"]["display"], json!(false));
    }

    #[test]
    fn test_doughnut_has_no_scales() {
        let config = config_for(ChartSlot::FeatureImportance);
        let options = &config["options"];
        assert!(options.get("scales").is_none());
        assert_eq!(options["cutout"], json!("60%"));
        assert_eq!(options["layout"]["padding"], json!(10));
        assert_eq!(options["plugins"]["legend"]["position"], json!("right"));
    }

    #[test]
    fn test_horizontal_bars() {
        let config = config_for(ChartSlot::FairnessRanking);
        let options = &config["options"];
        assert_eq!(options["indexAxis"], json!("y"));
        assert_eq!(options["scales"]["x"]["beginAtZero"], json!(true));
        assert_eq!(options["scales"]["x"]["max"], json!(1.0));
        assert_eq!(options["scales"]["y"]["grid"]["display"], json!(false));
    }

    #[test]
    fn test_intervention_keeps_every_label() {
        let config = config_for(ChartSlot::InterventionEffect);
        assert_eq!(config["data"]["labels"].as_array().unwrap().len(), 41);
        assert_eq!(
            config["options"]["scales"]["x"]["ticks"]["autoSkip"],
            json!(false)
        );
        for dataset in config["data"]["datasets"].as_array().unwrap() {
            assert_eq!(dataset["data"].as_array().unwrap().len(), 41);
        }
    }

    #[test]
    fn test_tooltip_box() {
        let config = config_for(ChartSlot::UhiDistribution);
        let tooltip = &config["options"]["plugins"]["tooltip"];
        assert_eq!(tooltip["backgroundColor"], json!("rgba(0, 0, 0, 0.8)"));
        assert_eq!(tooltip["cornerRadius"], json!(8.0));
    }

    #[test]
    fn test_tick_label_stride() {
        let labels = uhi_site_config::generators::scale_labels();
        assert_eq!(tick_label(&labels, 5, 0), Some("0.00"));
        assert_eq!(tick_label(&labels, 5, 3), None);
        assert_eq!(tick_label(&labels, 5, 5), Some("0.25"));
        assert_eq!(tick_label(&labels, 5, 40), Some("2.00"));
        assert_eq!(tick_label(&labels, 5, 45), None);
        assert_eq!(tick_label(&labels, 0, 0), None);
    }
}
