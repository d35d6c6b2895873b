//! Chart descriptors handed to the rendering engine
//!
//! A `ChartDescriptor` is everything needed to draw one visual: the target
//! element, the chart kind, the category labels, the ordered series and the
//! render options. Series order is significant: it is the legend order and
//! the z-order of overlapping lines.

use crate::{Point, Rgba, SiteError, SiteResult, TooltipAppearance, TooltipFormat};
use serde::{Deserialize, Serialize};

/// Chart kinds supported by the rendering engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Line,
    Bar,
    Doughnut,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Doughnut => "doughnut",
        }
    }

    /// Whether the kind plots against shared category labels
    pub fn uses_categories(&self) -> bool {
        !matches!(self, ChartKind::Scatter)
    }
}

/// Samples of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoints {
    /// One value per category label
    Values(Vec<f64>),
    /// Free (x, y) samples
    Xy(Vec<Point>),
}

impl DataPoints {
    pub fn len(&self) -> usize {
        match self {
            DataPoints::Values(values) => values.len(),
            DataPoints::Xy(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of a category series, `None` for xy samples
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            DataPoints::Values(values) => Some(values),
            DataPoints::Xy(_) => None,
        }
    }
}

/// Visual style of one series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub border_color: Option<Rgba>,
    pub fill_color: Option<Rgba>,
    /// One fill per point (bars, doughnut slices)
    pub point_colors: Option<Vec<Rgba>>,
    /// One border per point
    pub point_border_colors: Option<Vec<Rgba>>,
    pub border_width: f32,
    pub border_radius: Option<f32>,
    pub border_skipped: Option<bool>,
    pub fill: bool,
    pub tension: Option<f32>,
    pub point_radius: Option<f32>,
    pub point_hover_radius: Option<f32>,
    pub hover_offset: Option<f32>,
}

impl SeriesStyle {
    /// Smoothed, filled line with a 3px stroke
    pub fn filled_line(border: Rgba, fill: Rgba) -> Self {
        Self {
            border_color: Some(border),
            fill_color: Some(fill),
            border_width: 3.0,
            fill: true,
            tension: Some(0.4),
            ..Default::default()
        }
    }

    /// Rounded bars in a single color
    pub fn rounded_bars(fill: Rgba, border: Rgba) -> Self {
        Self {
            border_color: Some(border),
            fill_color: Some(fill),
            border_width: 2.0,
            border_radius: Some(8.0),
            ..Default::default()
        }
    }

    /// Rounded bars colored per category
    pub fn rounded_bars_per_point(fills: Vec<Rgba>, borders: Vec<Rgba>) -> Self {
        Self {
            point_colors: Some(fills),
            point_border_colors: Some(borders),
            border_width: 2.0,
            border_radius: Some(8.0),
            ..Default::default()
        }
    }
}

/// One labelled, styled sequence of samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: Option<String>,
    pub points: DataPoints,
    pub style: SeriesStyle,
}

impl Series {
    pub fn values(label: impl Into<String>, values: Vec<f64>, style: SeriesStyle) -> Self {
        Self {
            label: Some(label.into()),
            points: DataPoints::Values(values),
            style,
        }
    }

    pub fn xy(label: impl Into<String>, points: Vec<Point>, style: SeriesStyle) -> Self {
        Self {
            label: Some(label.into()),
            points: DataPoints::Xy(points),
            style,
        }
    }

    /// Series without a legend label (doughnut slices are labelled by category)
    pub fn unlabelled(values: Vec<f64>, style: SeriesStyle) -> Self {
        Self {
            label: None,
            points: DataPoints::Values(values),
            style,
        }
    }
}

/// Chart title; always rendered bold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOptions {
    pub text: String,
    pub font_size: u32,
    pub padding: u32,
}

impl TitleOptions {
    pub fn new(text: impl Into<String>, font_size: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            padding: 20,
        }
    }
}

/// Legend placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Hidden,
    Top,
    Bottom,
    Right,
}

impl LegendPosition {
    /// Engine name of the position, `None` when hidden
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            LegendPosition::Hidden => None,
            LegendPosition::Top => Some("top"),
            LegendPosition::Bottom => Some("bottom"),
            LegendPosition::Right => Some("right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub position: LegendPosition,
    pub use_point_style: bool,
    pub padding: Option<u32>,
    pub box_width: Option<u32>,
    pub font_size: Option<u32>,
}

impl LegendOptions {
    pub fn hidden() -> Self {
        Self {
            position: LegendPosition::Hidden,
            use_point_style: false,
            padding: None,
            box_width: None,
            font_size: None,
        }
    }

    /// Point-style legend as used by the multi-series research charts
    pub fn point_style(position: LegendPosition, padding: u32, box_width: u32) -> Self {
        Self {
            position,
            use_point_style: true,
            padding: Some(padding),
            box_width: Some(box_width),
            font_size: None,
        }
    }
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self::hidden()
    }
}

/// One cartesian axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub title: Option<String>,
    pub show_grid: bool,
    pub grid_color: Option<Rgba>,
    pub draw_border: Option<bool>,
    pub begin_at_zero: bool,
    pub max: Option<f64>,
    pub tick_color: Option<Rgba>,
    pub tick_font_size: Option<u32>,
    /// Show only every n-th category label; all samples are still plotted
    pub tick_stride: Option<usize>,
}

impl AxisOptions {
    /// Titled axis over a light grid
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            grid_color: Some(Rgba::new(0, 0, 0, 0.1)),
            ..Default::default()
        }
    }

    pub fn without_grid(mut self) -> Self {
        self.show_grid = false;
        self.grid_color = None;
        self
    }

    pub fn zero_to(mut self, max: f64) -> Self {
        self.begin_at_zero = true;
        self.max = Some(max);
        self
    }

    pub fn with_tick_stride(mut self, stride: usize) -> Self {
        self.tick_stride = Some(stride);
        self
    }
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            title: None,
            show_grid: true,
            grid_color: None,
            draw_border: None,
            begin_at_zero: false,
            max: None,
            tick_color: None,
            tick_font_size: None,
            tick_stride: None,
        }
    }
}

/// Hover hit-testing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Index,
    Nearest,
}

impl InteractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Index => "index",
            InteractionMode::Nearest => "nearest",
        }
    }
}

/// Axis along which bars extend from their category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    #[default]
    X,
    Y,
}

/// Point color as a function of the point's y-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Four UHI bands split at -5, 0 and 2 °C
    UhiThresholds,
}

impl ColorScale {
    pub fn color_for(&self, value: f64) -> Rgba {
        match self {
            ColorScale::UhiThresholds => uhi_color_for(value),
        }
    }
}

/// Classify a UHI value (°C) into its display band
pub fn uhi_color_for(value: f64) -> Rgba {
    if value < -5.0 {
        Rgba::new(0, 100, 255, 0.8)
    } else if value < 0.0 {
        Rgba::new(0, 150, 255, 0.8)
    } else if value < 2.0 {
        Rgba::new(255, 200, 0, 0.8)
    } else {
        Rgba::new(255, 100, 0, 0.8)
    }
}

/// Everything besides the data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub title: Option<TitleOptions>,
    pub legend: LegendOptions,
    pub x_axis: Option<AxisOptions>,
    pub y_axis: Option<AxisOptions>,
    pub interaction: Option<InteractionMode>,
    pub index_axis: IndexAxis,
    /// Doughnut hole as a percentage of the radius
    pub cutout_percent: Option<u8>,
    pub layout_padding: Option<u32>,
    pub tooltip: TooltipFormat,
    pub tooltip_appearance: Option<TooltipAppearance>,
    pub color_scale: Option<ColorScale>,
}

/// Complete description of one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub target_element_id: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub options: RenderOptions,
}

impl ChartDescriptor {
    pub fn new(target_element_id: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            target_element_id: target_element_id.into(),
            kind,
            labels: Vec::new(),
            series: Vec::new(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Total number of samples across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Check that every series fits the declared categories
    pub fn validate(&self) -> SiteResult<()> {
        let invalid = |message: String| SiteError::InvalidDescriptor {
            chart: self.target_element_id.clone(),
            message,
        };

        if self.series.is_empty() {
            return Err(invalid("chart has no series".to_string()));
        }

        if self.kind.uses_categories() && self.labels.is_empty() {
            return Err(invalid(format!(
                "{} chart requires category labels",
                self.kind.as_str()
            )));
        }

        for (index, series) in self.series.iter().enumerate() {
            let name = series
                .label
                .clone()
                .unwrap_or_else(|| format!("series {index}"));

            match &series.points {
                DataPoints::Xy(_) if self.kind != ChartKind::Scatter => {
                    return Err(invalid(format!(
                        "{name}: xy samples are only valid on scatter charts"
                    )));
                }
                DataPoints::Values(values) if self.kind.uses_categories() => {
                    if values.len() != self.labels.len() {
                        return Err(invalid(format!(
                            "{name}: {} values for {} labels",
                            values.len(),
                            self.labels.len()
                        )));
                    }
                }
                _ => {}
            }

            let per_point = [
                ("point colors", series.style.point_colors.as_ref()),
                ("point border colors", series.style.point_border_colors.as_ref()),
            ];
            for (what, colors) in per_point {
                if let Some(colors) = colors {
                    if colors.len() != series.points.len() {
                        return Err(invalid(format!(
                            "{name}: {} {what} for {} points",
                            colors.len(),
                            series.points.len()
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
