use decaysim_core::decay::{decay_constant, plot_window};
use decaysim_core::plot::HOVER_TEMPLATE;
use decaysim_core::{DecayCurve, PlotConfig, PlotError, PlotRenderer};
use std::fs;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[test]
fn static_plot_creates_missing_directories_and_returns_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("plots").join("carbon.png");
    let lambda = decay_constant(5730.0).unwrap();

    let written = PlotRenderer::default()
        .render_static(100.0, lambda, plot_window(5730.0), &target)
        .unwrap();

    assert!(written.is_absolute());
    assert_eq!(written, fs::canonicalize(&target).unwrap());
    let bytes = fs::read(&written).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
}

#[test]
fn static_plot_overwrites_existing_image() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("simulation_1.png");
    fs::write(&target, b"stale").unwrap();

    PlotRenderer::default()
        .render_static(10.0, 0.5, 3.0, &target)
        .unwrap();

    assert!(fs::read(&target).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn static_plot_under_a_regular_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = PlotRenderer::default()
        .render_static(10.0, 0.5, 3.0, blocker.join("plot.png"))
        .unwrap_err();

    assert!(matches!(err, PlotError::Io { .. } | PlotError::RenderFailure(_)));
}

#[test]
fn zero_quantity_and_zero_window_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = PlotRenderer::new(PlotConfig::titled("Empty sample"));

    let markup = renderer.render_interactive(0.0, 0.1, 0.0).unwrap();
    assert!(markup.contains("Empty sample"));

    let written = renderer
        .render_static(0.0, 0.1, 0.0, dir.path().join("empty.png"))
        .unwrap();
    assert!(fs::read(written).unwrap().starts_with(PNG_MAGIC));
}

#[test]
fn interactive_fragment_uses_shared_curve_and_hover_format() {
    let lambda = decay_constant(8.02).unwrap();
    let window = plot_window(8.02);
    let curve = DecayCurve::sample(80.0, lambda, window).unwrap();

    let markup = PlotRenderer::default()
        .render_interactive(80.0, lambda, window)
        .unwrap();

    assert!(markup.contains("decay-plot"));
    assert!(markup.contains("Remaining: %{y:.2f}"));
    assert!(HOVER_TEMPLATE.contains("Time: %{x:.2f}"));
    assert!(!markup.contains("<html"));
    assert_eq!(curve.t_max, 12.0);
    assert_eq!(curve.y_range(), (0.0, 80.0));
}

#[test]
fn invalid_curve_inputs_are_rejected_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("never.png");
    let renderer = PlotRenderer::default();

    assert!(matches!(
        renderer.render_interactive(f64::NAN, 0.1, 1.0),
        Err(PlotError::InvalidCurve(_))
    ));
    assert!(matches!(
        renderer.render_static(1.0, -0.1, 1.0, &target),
        Err(PlotError::InvalidCurve(_))
    ));
    assert!(!target.exists());
}
