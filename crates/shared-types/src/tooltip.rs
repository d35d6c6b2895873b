//! Tooltip label formatting and appearance

use crate::Rgba;
use serde::{Deserialize, Serialize};

/// Which parsed value the tooltip reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueAxis {
    X,
    Y,
}

/// How a tooltip label is built from the hovered value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TooltipFormat {
    /// Let the rendering engine build the label
    #[default]
    Default,
    /// `<prefix><value with fixed decimals>`, e.g. `R² Value: 0.7873`
    Fixed {
        prefix: String,
        decimals: usize,
        axis: ValueAxis,
    },
    /// `<label>: <share of dataset total>%`
    ShareOfTotal { decimals: usize },
}

impl TooltipFormat {
    pub fn fixed(prefix: impl Into<String>, decimals: usize, axis: ValueAxis) -> Self {
        TooltipFormat::Fixed {
            prefix: prefix.into(),
            decimals,
            axis,
        }
    }

    /// Format a tooltip label. `None` means the engine default applies.
    ///
    /// `dataset` is the full value list of the hovered series; it is only
    /// read by `ShareOfTotal`.
    pub fn format(&self, label: &str, value: f64, dataset: &[f64]) -> Option<String> {
        match self {
            TooltipFormat::Default => None,
            TooltipFormat::Fixed {
                prefix, decimals, ..
            } => {
                let decimals = *decimals;
                Some(format!("{prefix}{value:.decimals$}"))
            }
            TooltipFormat::ShareOfTotal { decimals } => {
                let decimals = *decimals;
                let total: f64 = dataset.iter().sum();
                let share = if total == 0.0 {
                    0.0
                } else {
                    value / total * 100.0
                };
                Some(format!("{label}: {share:.decimals$}%"))
            }
        }
    }

    /// Axis read by `Fixed`
    pub fn axis(&self) -> Option<ValueAxis> {
        match self {
            TooltipFormat::Fixed { axis, .. } => Some(*axis),
            _ => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, TooltipFormat::Default)
    }
}

/// Dark tooltip box used by the overview charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipAppearance {
    pub background_color: Rgba,
    pub title_color: Rgba,
    pub body_color: Rgba,
    pub border_color: Rgba,
    pub border_width: f32,
    pub corner_radius: f32,
    pub display_colors: bool,
}

impl Default for TooltipAppearance {
    fn default() -> Self {
        Self {
            background_color: Rgba::new(0, 0, 0, 0.8),
            title_color: Rgba::WHITE,
            body_color: Rgba::WHITE,
            border_color: Rgba::new(255, 255, 255, 0.2),
            border_width: 1.0,
            corner_radius: 8.0,
            display_colors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_format() {
        let format = TooltipFormat::fixed("R² Value: ", 4, ValueAxis::Y);
        assert_eq!(
            format.format("Summer Daytime", 0.7873, &[]).as_deref(),
            Some("R² Value: 0.7873")
        );

        let mgd = TooltipFormat::fixed("MGD Value: ", 2, ValueAxis::X);
        assert_eq!(mgd.format("", 0.15, &[]).as_deref(), Some("MGD Value: 0.15"));
        assert_eq!(mgd.axis(), Some(ValueAxis::X));
    }

    #[test]
    fn test_share_of_total() {
        let format = TooltipFormat::ShareOfTotal { decimals: 1 };
        let dataset = [25.0, 20.0, 18.0, 15.0, 12.0, 8.0, 2.0];
        assert_eq!(
            format.format("NDVI (Vegetation Index)", 25.0, &dataset).as_deref(),
            Some("NDVI (Vegetation Index): 25.0%")
        );
        assert_eq!(
            format.format("Water Distance", 18.0, &dataset).as_deref(),
            Some("Water Distance: 18.0%")
        );
    }

    #[test]
    fn test_share_of_empty_total() {
        let format = TooltipFormat::ShareOfTotal { decimals: 1 };
        assert_eq!(format.format("x", 0.0, &[0.0]).as_deref(), Some("x: 0.0%"));
    }

    #[test]
    fn test_default_defers_to_engine() {
        assert!(TooltipFormat::Default.format("a", 1.0, &[1.0]).is_none());
        assert!(TooltipFormat::default().is_default());
    }
}
