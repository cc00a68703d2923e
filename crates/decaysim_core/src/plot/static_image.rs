//! Raster (PNG) rendering of a decay curve with `plotters`.

use super::config::PlotConfig;
use super::curve::DecayCurve;
use super::{PlotError, PlotResult, FONT_BYTES};
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::fs;
use std::path::{Path, PathBuf};

const FONT_FAMILY: &str = "sans-serif";

static FONT_REGISTERED: OnceCell<Result<(), String>> = OnceCell::new();

/// Draws `curve` into a PNG at `target` and returns its absolute path.
///
/// The parent directory is created when missing. The image is flushed to
/// disk before returning, and the written file is checked to be a readable,
/// non-empty regular file.
pub(crate) fn write_png(
    curve: &DecayCurve,
    config: &PlotConfig,
    target: &Path,
) -> PlotResult<PathBuf> {
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PlotError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    draw(curve, config, target)?;

    let resolved = fs::canonicalize(target).map_err(|source| PlotError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    let metadata = fs::metadata(&resolved).map_err(|source| PlotError::Io {
        path: resolved.clone(),
        source,
    })?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Err(PlotError::RenderFailure(format!(
            "plot image `{}` is missing or empty after rendering",
            resolved.display()
        )));
    }

    Ok(resolved)
}

fn draw(curve: &DecayCurve, config: &PlotConfig, target: &Path) -> PlotResult<()> {
    ensure_font()?;

    let root = BitMapBackend::new(target, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(backend_error)?;

    let (x_min, x_max) = curve.x_range();
    let (y_min, y_max) = curve.y_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(config.title.as_str(), (FONT_FAMILY, 20))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(backend_error)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(config.xlabel.as_str())
        .y_desc(config.ylabel.as_str())
        .label_style((FONT_FAMILY, 12));
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(backend_error)?;

    let color = config.line_color;
    chart
        .draw_series(LineSeries::new(
            curve.points(),
            color.stroke_width(config.line_width),
        ))
        .map_err(backend_error)?
        .label(config.legend_label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    chart
        .configure_series_labels()
        .label_font((FONT_FAMILY, 12))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(backend_error)?;

    root.present().map_err(backend_error)?;
    Ok(())
}

fn ensure_font() -> PlotResult<()> {
    FONT_REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
                .map_err(|_| format!("failed to register plot font `{FONT_FAMILY}`"))
        })
        .clone()
        .map_err(PlotError::RenderFailure)
}

fn backend_error(err: impl std::fmt::Display) -> PlotError {
    PlotError::RenderFailure(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::ensure_font;

    #[test]
    fn bundled_font_registers_once() {
        ensure_font().unwrap();
        ensure_font().unwrap();
    }
}
