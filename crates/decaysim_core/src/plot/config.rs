//! Plot configuration shared by the interactive and static outputs.

use plotters::style::RGBColor;

/// Line colour of the static decay curve.
pub const CURVE_GREEN: RGBColor = RGBColor(0, 128, 0);

/// Presentation settings for decay plots.
///
/// Titles and axis labels are used by both outputs; pixel sizes, colours
/// and the legend only affect the static image, `div_id` only the
/// interactive fragment.
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 600)
    pub width: u32,
    /// Image height in pixels (default: 400)
    pub height: u32,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    /// Trace name in the interactive chart.
    pub trace_name: String,
    /// Legend entry of the static image.
    pub legend_label: String,
    pub line_color: RGBColor,
    /// Line width in pixels (default: 2)
    pub line_width: u32,
    pub show_grid: bool,
    /// Element id of the interactive chart container.
    pub div_id: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            title: "Radioactive Decay".to_string(),
            xlabel: "Time (t)".to_string(),
            ylabel: "Quantity (N)".to_string(),
            trace_name: "N(t)".to_string(),
            legend_label: "N(t) = N₀·e^(−λt)".to_string(),
            line_color: CURVE_GREEN,
            line_width: 2,
            show_grid: true,
            div_id: "decay-plot".to_string(),
        }
    }
}

impl PlotConfig {
    /// Default configuration with a custom chart title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotConfig, CURVE_GREEN};

    #[test]
    fn default_matches_report_layout() {
        let config = PlotConfig::default();
        assert_eq!((config.width, config.height), (600, 400));
        assert_eq!(config.line_color, CURVE_GREEN);
        assert!(config.show_grid);
    }

    #[test]
    fn titled_keeps_other_defaults() {
        let config = PlotConfig::titled("Iodine-131");
        assert_eq!(config.title, "Iodine-131");
        assert_eq!(config.xlabel, "Time (t)");
    }
}
