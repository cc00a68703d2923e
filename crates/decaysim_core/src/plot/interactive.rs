//! Embeddable interactive chart rendered with `plotly`.

use super::config::PlotConfig;
use super::curve::DecayCurve;
use plotly::common::{Mode, Title};
use plotly::layout::{Axis, Margin};
use plotly::{Layout, Plot, Scatter};

/// Tooltip shown for each sampled point, two decimals for both values.
pub const HOVER_TEMPLATE: &str = "Time: %{x:.2f}<br>Remaining: %{y:.2f}<extra></extra>";

const MARGIN_PX: usize = 40;

/// Renders `curve` as a `<div>` + script fragment without a document wrapper.
///
/// The host page is expected to load plotly.js.
pub(crate) fn inline_html(curve: &DecayCurve, config: &PlotConfig) -> String {
    let trace = Scatter::new(curve.times.clone(), curve.values.clone())
        .mode(Mode::Lines)
        .name(config.trace_name.as_str())
        .hover_template(HOVER_TEMPLATE);

    let (x_min, x_max) = curve.x_range();
    let (y_min, y_max) = curve.y_range();
    let layout = Layout::new()
        .title(Title::new(config.title.as_str()))
        .x_axis(
            Axis::new()
                .title(Title::new(config.xlabel.as_str()))
                .range(vec![x_min, x_max]),
        )
        .y_axis(
            Axis::new()
                .title(Title::new(config.ylabel.as_str()))
                .range(vec![y_min, y_max]),
        )
        .margin(
            Margin::new()
                .left(MARGIN_PX)
                .right(MARGIN_PX)
                .top(MARGIN_PX)
                .bottom(MARGIN_PX),
        );

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot.to_inline_html(Some(config.div_id.as_str()))
}
